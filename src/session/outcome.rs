//! Final result of a play-through.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the session ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Every operation was solved
    Success,
    /// The time limit ran out first
    Timeout,
}

/// Stored when a session ends, for the UI to read.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub completed: bool,
    pub final_score: u32,
    pub total_operations: u32,
    pub elapsed_seconds: f64,
    /// Set when this session raised the high score
    pub new_high_score: bool,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OutcomeKind::Success => write!(
                f,
                "Congratulations! You solved all {} operations in {:.1} seconds!",
                self.total_operations, self.elapsed_seconds
            )?,
            OutcomeKind::Timeout => write!(
                f,
                "Time's up! You solved {} out of {} operations.",
                self.final_score, self.total_operations
            )?,
        }
        if self.new_high_score {
            f.write_str("\n\nNew High Score!")?;
        }
        Ok(())
    }
}

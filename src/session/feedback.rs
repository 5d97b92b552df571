//! Verdicts returned for submitted answers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the UI should present a piece of feedback.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Warning,
    Error,
}

/// Result of [`GameSession::submit_answer`](super::GameSession::submit_answer).
///
/// Every variant is recoverable. Only `Correct` moves the chain forward;
/// the others leave the player on the same question.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feedback {
    /// Nothing was entered
    MissingInput,
    /// The input is not an integer
    InvalidInput,
    /// Well-formed but wrong; reveals the expected answer
    Incorrect { correct_answer: u64 },
    /// Right answer; the next question is already loaded
    Correct,
    /// The session is not accepting answers
    SessionOver,
}

impl Feedback {
    /// Whether the UI should clear its answer box after showing this.
    ///
    /// Empty input is left alone so the player can simply type.
    pub fn clears_input(&self) -> bool {
        !matches!(self, Self::MissingInput)
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Correct => Tone::Success,
            Self::MissingInput | Self::InvalidInput => Tone::Warning,
            Self::Incorrect { .. } | Self::SessionOver => Tone::Error,
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput => f.write_str("Please enter a number."),
            Self::InvalidInput => f.write_str("Invalid input. Please enter an integer."),
            Self::Incorrect { correct_answer } => {
                write!(f, "Incorrect. The answer was {correct_answer}. Try again!")
            }
            Self::Correct => f.write_str("Correct!"),
            Self::SessionOver => f.write_str("The game is over. Start a new round to play again."),
        }
    }
}

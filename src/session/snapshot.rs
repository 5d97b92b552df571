//! Read-only view of a session for rendering.

use super::feedback::Feedback;
use super::outcome::Outcome;
use crate::core::GameStatus;
use serde::Serialize;
use uuid::Uuid;

/// Everything a UI needs to draw one frame.
///
/// Produced by [`GameSession::snapshot`](super::GameSession::snapshot);
/// holds no references back into the session.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub status: GameStatus,
    pub operation_index: u32,
    pub total_operations: u32,
    pub score: u32,
    pub high_score: u32,
    /// Text of the question on screen, if any
    pub expression: Option<String>,
    pub remaining_seconds: u32,
    pub time_limit_seconds: u32,
    pub feedback: Option<Feedback>,
    pub outcome: Option<Outcome>,
}

impl SessionSnapshot {
    /// Fraction of the time budget left, in `[0, 1]`.
    pub fn time_fraction(&self) -> f64 {
        if self.time_limit_seconds == 0 {
            return 0.0;
        }
        f64::from(self.remaining_seconds) / f64::from(self.time_limit_seconds)
    }

    /// Serialize for web front-ends.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

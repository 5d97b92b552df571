//! Lifecycle status of a game session.
//!
//! A session moves `NotStarted -> InProgress -> Ended`, and replays go
//! straight from `Ended` back to `InProgress`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a session is in its lifecycle.
///
/// All methods are pure and describe the status without side effects.
///
/// # Example
///
/// ```rust
/// use mindspark::core::GameStatus;
///
/// assert!(GameStatus::InProgress.accepts_input());
/// assert!(GameStatus::Ended.is_final());
/// assert_eq!(GameStatus::NotStarted.name(), "NotStarted");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Session created but `start()` never called
    #[default]
    NotStarted,
    /// Questions are being served and the timer is running
    InProgress,
    /// Finished by completion or timeout
    Ended,
}

impl GameStatus {
    /// Stable name for display and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::InProgress => "InProgress",
            Self::Ended => "Ended",
        }
    }

    /// Check if this is the terminal status of a play-through.
    ///
    /// A final status only changes again through an explicit replay.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Ended)
    }

    /// Check if answers, advances and timeout checks have any effect.
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

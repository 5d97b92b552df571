//! Status transition history.
//!
//! Every lifecycle change of a session is recorded with the time it
//! happened and how far through the operation chain the player was.

use super::status::GameStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single status change.
///
/// # Example
///
/// ```rust
/// use mindspark::core::{GameStatus, StatusTransition};
/// use chrono::Utc;
///
/// let transition = StatusTransition {
///     from: GameStatus::NotStarted,
///     to: GameStatus::InProgress,
///     timestamp: Utc::now(),
///     operation_index: 0,
/// };
/// assert!(!transition.to.is_final());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusTransition {
    /// The status being left
    pub from: GameStatus,
    /// The status being entered
    pub to: GameStatus,
    /// When the change occurred
    pub timestamp: DateTime<Utc>,
    /// Operation index at the moment of the change
    pub operation_index: u32,
}

/// Ordered history of status transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition appended and leaves the original untouched.
///
/// # Example
///
/// ```rust
/// use mindspark::core::{GameStatus, StatusHistory, StatusTransition};
/// use chrono::Utc;
///
/// let history = StatusHistory::new().record(StatusTransition {
///     from: GameStatus::NotStarted,
///     to: GameStatus::InProgress,
///     timestamp: Utc::now(),
///     operation_index: 0,
/// });
///
/// let history = history.record(StatusTransition {
///     from: GameStatus::InProgress,
///     to: GameStatus::Ended,
///     timestamp: Utc::now(),
///     operation_index: 7,
/// });
///
/// assert_eq!(
///     history.path(),
///     vec![GameStatus::NotStarted, GameStatus::InProgress, GameStatus::Ended]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusHistory {
    transitions: Vec<StatusTransition>,
}

impl StatusHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StatusTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Statuses traversed in order: the first `from`, then every `to`.
    pub fn path(&self) -> Vec<GameStatus> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the first and last recorded transitions.
    ///
    /// Returns `None` for an empty history or when the timestamps run
    /// backwards.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StatusTransition> {
        self.transitions.last()
    }

    /// All transitions in recording order.
    pub fn transitions(&self) -> &[StatusTransition] {
        &self.transitions
    }
}

//! Build errors for the session builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a session.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Every rule the configuration broke, in check order.
    #[error("Invalid game configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ConfigError>),

    #[error("Carried high score {high_score} exceeds the {total_operations} available operations")]
    HighScoreOutOfRange {
        high_score: u32,
        total_operations: u32,
    },
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

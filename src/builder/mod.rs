//! Builder API for constructing game sessions.
//!
//! [`GameSession::new`] covers the shipped game. The builder exists for
//! hosts that need a fixed clock, reproducible questions, a shorter timer,
//! or a high score carried over from a replaced session.

pub mod error;

pub use error::BuildError;

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::session::GameSession;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stillwater::validation::Validation;

/// Fluent builder for [`GameSession`].
///
/// # Example
///
/// ```
/// use mindspark::{Clock, GameSession};
/// use chrono::Utc;
///
/// let session = GameSession::builder()
///     .clock(Clock::fixed(Utc::now()))
///     .seed(11)
///     .time_limit_seconds(45)
///     .build()
///     .unwrap();
///
/// assert_eq!(session.config().time_limit_seconds, 45);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    config: GameConfig,
    clock: Clock,
    seed: Option<u64>,
    high_score: u32,
}

impl SessionBuilder {
    /// Create a builder with the standard rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn time_limit_seconds(mut self, seconds: u32) -> Self {
        self.config.time_limit_seconds = seconds;
        self
    }

    pub fn total_operations(mut self, total: u32) -> Self {
        self.config.total_operations = total;
        self
    }

    /// Set the time source (defaults to the system clock).
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Seed the question generator for reproducible games.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Carry the high score forward from a session being replaced.
    pub fn high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    /// Build the session.
    /// Returns an error listing every broken rule if the configuration is
    /// invalid.
    pub fn build(self) -> Result<GameSession, BuildError> {
        if let Validation::Failure(errors) = self.config.validate() {
            return Err(BuildError::InvalidConfig(errors.iter().cloned().collect()));
        }

        if self.high_score > self.config.total_operations {
            return Err(BuildError::HighScoreOutOfRange {
                high_score: self.high_score,
                total_operations: self.config.total_operations,
            });
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(GameSession::from_parts(
            self.config,
            self.clock,
            rng,
            self.high_score,
        ))
    }
}

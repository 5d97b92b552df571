//! Game constants and the configuration they populate.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Number of operations in a full chain.
pub const TOTAL_OPERATIONS: u32 = 7;

/// Time budget for one session, in seconds.
pub const INITIAL_TIME_SECONDS: u32 = 30;

/// Range the first chain value is drawn from.
pub const SEED_RANGE: RangeInclusive<u64> = 5..=20;

/// Errors reported by [`GameConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("total_operations must be at least 1")]
    NoOperations,

    #[error("time_limit_seconds must be at least 1")]
    NoTime,

    #[error("seed range {min}..={max} is empty or includes zero")]
    InvalidSeedRange { min: u64, max: u64 },
}

/// Session parameters.
///
/// The game ships with [`GameConfig::default`], which mirrors the
/// constants above.
///
/// # Example
///
/// ```rust
/// use mindspark::config::{GameConfig, TOTAL_OPERATIONS};
///
/// let config = GameConfig::default();
/// assert_eq!(config.total_operations, TOTAL_OPERATIONS);
/// assert!(config.validate().is_success());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub total_operations: u32,
    pub time_limit_seconds: u32,
    pub seed_min: u64,
    pub seed_max: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_operations: TOTAL_OPERATIONS,
            time_limit_seconds: INITIAL_TIME_SECONDS,
            seed_min: *SEED_RANGE.start(),
            seed_max: *SEED_RANGE.end(),
        }
    }
}

impl GameConfig {
    /// Check every field, collecting every problem rather than stopping
    /// at the first.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let checks = vec![
            rule(self.total_operations > 0, ConfigError::NoOperations),
            rule(self.time_limit_seconds > 0, ConfigError::NoTime),
            rule(
                self.seed_min > 0 && self.seed_min <= self.seed_max,
                ConfigError::InvalidSeedRange {
                    min: self.seed_min,
                    max: self.seed_max,
                },
            ),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    pub fn seed_range(&self) -> RangeInclusive<u64> {
        self.seed_min..=self.seed_max
    }
}

fn rule(holds: bool, error: ConfigError) -> Validation<(), NonEmptyVec<ConfigError>> {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(error)
    }
}

//! Mindspark: a chained arithmetic quiz core
//!
//! Players face a chain of arithmetic questions where each question's
//! first operand is the previous answer, and must solve them all before
//! the timer runs out. This crate holds the logic only; rendering and
//! input widgets belong to the host UI.
//!
//! # Core Concepts
//!
//! - **Generator**: builds questions whose answers are always
//!   non-negative integers, with operand ranges that grow along the chain
//! - **Session**: the state machine that validates answers, keeps score,
//!   and ends the game on completion or timeout
//! - **Status**: the `NotStarted -> InProgress -> Ended` lifecycle and its
//!   recorded history
//!
//! # Example
//!
//! ```rust
//! use mindspark::{Clock, Feedback, GameSession, GameStatus};
//! use chrono::{Duration, Utc};
//!
//! let start = Utc::now();
//! let mut session = GameSession::builder()
//!     .clock(Clock::fixed(start))
//!     .seed(2024)
//!     .build()
//!     .unwrap();
//!
//! session.start();
//! assert_eq!(session.submit_answer(""), Feedback::MissingInput);
//! assert_eq!(session.submit_answer("twelve"), Feedback::InvalidInput);
//!
//! let answer = session.current_operation().unwrap().result();
//! assert_eq!(session.submit_answer(&answer.to_string()), Feedback::Correct);
//!
//! // timer tick after the deadline
//! assert!(session.check_timeout(start + Duration::seconds(31)));
//! assert_eq!(session.status(), GameStatus::Ended);
//! assert_eq!(session.high_score(), 1);
//! ```

pub mod builder;
pub mod clock;
pub mod config;
pub mod core;
pub mod generator;
pub mod session;

// Re-export commonly used types
pub use builder::{BuildError, SessionBuilder};
pub use clock::Clock;
pub use config::{GameConfig, INITIAL_TIME_SECONDS, SEED_RANGE, TOTAL_OPERATIONS};
pub use crate::core::{GameStatus, StatusHistory, StatusTransition};
pub use generator::{generate, Operation, Operator};
pub use session::{Feedback, GameSession, Outcome, OutcomeKind, SessionSnapshot};

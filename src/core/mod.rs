//! Session lifecycle types.
//!
//! This module contains the pure part of the state machine:
//! - The `GameStatus` lifecycle enum
//! - Immutable status transition history
//!
//! Nothing here reads the clock or consumes randomness.

mod history;
mod status;

pub use history::{StatusHistory, StatusTransition};
pub use status::GameStatus;

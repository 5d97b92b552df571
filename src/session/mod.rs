//! Game session state machine.
//!
//! Owns the progress of one player: which question is on screen, the
//! score, the chained value and the timer. The UI layer drives it through
//! a handful of synchronous calls:
//!
//! - `start` begins or replays a game
//! - `submit_answer` validates player input
//! - `check_timeout` runs on every timer tick
//! - `snapshot` produces a read-only view for rendering

mod feedback;
mod machine;
mod outcome;
mod snapshot;

pub use feedback::{Feedback, Tone};
pub use machine::GameSession;
pub use outcome::{Outcome, OutcomeKind};
pub use snapshot::SessionSnapshot;

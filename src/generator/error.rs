//! Generator error types.

use thiserror::Error;

/// Errors raised inside the constrained operand search.
///
/// These never leave [`generate`](super::generate); they select the
/// fallback question instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No operator produced a valid result within the attempt ceiling,
    /// and the forced addition overflowed as well
    #[error("no valid operation for first operand {first_operand} after {attempts} attempts")]
    Exhausted { first_operand: u64, attempts: u32 },
}

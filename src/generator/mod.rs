//! Constrained random generation of chained arithmetic questions.
//!
//! [`generate`] takes the previous answer as its first operand and builds
//! a question whose answer is again a non-negative integer. Operands are
//! drawn so that every rule holds by construction:
//!
//! - `+` adds a value in `[1, 10 + 3·difficulty]`
//! - `-` subtracts a value in `[1, first]`
//! - `*` multiplies by a value in `[2, 5 + difficulty]`
//! - `/` divides by an exact divisor in `[2, 5 + difficulty]`
//!
//! The search is bounded by [`ATTEMPT_CEILING`]. Past the ceiling addition
//! is forced, and if even that overflows a small fresh sum is returned.

mod error;
mod operation;
mod operator;

pub use error::GenerationError;
pub use operation::Operation;
pub use operator::Operator;

use rand::seq::IndexedRandom;
use rand::Rng;
use std::ops::RangeInclusive;
use tracing::{debug, trace, warn};

/// Maximum operator/operand draws before addition is forced.
pub const ATTEMPT_CEILING: u32 = 200;

/// Range for a replacement first operand and for the last-resort sum.
const FRESH_OPERAND_RANGE: RangeInclusive<u8> = 1..=10;

/// Operand bounds for one position in the chain.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Difficulty {
    /// Upper bound for the addend of `+`
    pub max_general: u64,
    /// Upper bound for the factor of `*` and the divisor of `/`
    pub max_mul_div: u64,
}

impl Difficulty {
    /// Bounds for the 1-based `index`; an index of 0 is treated as 1.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mindspark::generator::Difficulty;
    ///
    /// let third = Difficulty::for_index(3);
    /// assert_eq!(third.max_general, 19);
    /// assert_eq!(third.max_mul_div, 8);
    /// ```
    pub fn for_index(index: u32) -> Self {
        let level = u64::from(index.max(1));
        Self {
            max_general: 10 + 3 * level,
            max_mul_div: 5 + level,
        }
    }
}

/// Generate the next question in a chain.
///
/// `first_operand` is the previous answer; values below 1 are replaced by
/// a random integer in `[1, 10]`. `difficulty_index` is the 1-based
/// position of the question and widens the operand ranges.
///
/// Always terminates and always returns an operation that satisfies
/// [`Operation::is_consistent`].
///
/// # Example
///
/// ```rust
/// use mindspark::generator::generate;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let op = generate(12, 1, &mut rng);
/// assert!(op.is_consistent());
/// ```
pub fn generate<R: Rng + ?Sized>(
    first_operand: u64,
    difficulty_index: u32,
    rng: &mut R,
) -> Operation {
    let first = if first_operand < 1 {
        u64::from(rng.random_range(FRESH_OPERAND_RANGE))
    } else {
        first_operand
    };
    let limits = Difficulty::for_index(difficulty_index);

    match search(first, limits, rng) {
        Ok(operation) => operation,
        Err(err) => {
            warn!(error = %err, "operand search exhausted, using fallback question");
            fallback(rng)
        }
    }
}

/// Operators that may be attempted for a given first operand.
fn feasible_operators(first: u64, division_ruled_out: bool) -> Vec<Operator> {
    Operator::ALL
        .into_iter()
        .filter(|operator| match operator {
            Operator::Add => true,
            Operator::Divide => first > 0 && !division_ruled_out,
            Operator::Subtract | Operator::Multiply => first > 0,
        })
        .collect()
}

/// Bounded search over operators and operands.
fn search<R: Rng + ?Sized>(
    first: u64,
    limits: Difficulty,
    rng: &mut R,
) -> Result<Operation, GenerationError> {
    // Divisors of `first` do not change between attempts, so one failed
    // division rules it out for the rest of the search.
    let mut division_ruled_out = false;

    for attempt in 1..=ATTEMPT_CEILING {
        let candidates = feasible_operators(first, division_ruled_out);
        let Some(&operator) = candidates.choose(rng) else {
            continue;
        };

        match attempt_operator(operator, first, limits, rng) {
            Some(operation) => {
                debug!(
                    attempt,
                    expression = operation.expression_text(),
                    result = operation.result(),
                    "generated operation"
                );
                return Ok(operation);
            }
            None => {
                trace!(attempt, %operator, first, "attempt abandoned");
                if operator == Operator::Divide {
                    division_ruled_out = true;
                }
            }
        }
    }

    forced_addition(first, limits, rng)
}

/// Addition used once the attempt ceiling is reached.
fn forced_addition<R: Rng + ?Sized>(
    first: u64,
    limits: Difficulty,
    rng: &mut R,
) -> Result<Operation, GenerationError> {
    attempt_operator(Operator::Add, first, limits, rng).ok_or(GenerationError::Exhausted {
        first_operand: first,
        attempts: ATTEMPT_CEILING,
    })
}

/// Draw a second operand for `operator` and build the operation.
///
/// Returns `None` when no valid second operand exists or the result
/// overflows.
fn attempt_operator<R: Rng + ?Sized>(
    operator: Operator,
    first: u64,
    limits: Difficulty,
    rng: &mut R,
) -> Option<Operation> {
    let second = match operator {
        Operator::Add => rng.random_range(1..=limits.max_general),
        Operator::Subtract => {
            if first < 1 {
                return None;
            }
            rng.random_range(1..=first)
        }
        Operator::Multiply => rng.random_range(2..=limits.max_mul_div),
        Operator::Divide => {
            let divisors: Vec<u64> = (2..=limits.max_mul_div)
                .filter(|divisor| first % divisor == 0)
                .collect();
            *divisors.choose(rng)?
        }
    };

    Operation::new(operator, first, second)
}

/// Two fresh small operands combined by `+`.
fn fallback<R: Rng + ?Sized>(rng: &mut R) -> Operation {
    let first = rng.random_range(FRESH_OPERAND_RANGE);
    let second = rng.random_range(FRESH_OPERAND_RANGE);
    Operation::small_sum(first, second)
}

//! A single generated question.

use super::operator::Operator;
use serde::Serialize;
use std::fmt;

/// One arithmetic question and its expected answer.
///
/// Operations are immutable once built. The only constructor evaluates
/// the operator with checked arithmetic, so every value of this type
/// carries a non-negative integer result that matches its operands.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Operation {
    expression_text: String,
    first_operand: u64,
    second_operand: u64,
    operator: Operator,
    result: u64,
}

impl Operation {
    /// Build `first operator second`, or `None` if the result is not a
    /// non-negative integer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mindspark::generator::{Operation, Operator};
    ///
    /// let op = Operation::new(Operator::Divide, 12, 4).unwrap();
    /// assert_eq!(op.expression_text(), "12 / 4");
    /// assert_eq!(op.result(), 3);
    ///
    /// assert!(Operation::new(Operator::Subtract, 2, 5).is_none());
    /// ```
    pub fn new(operator: Operator, first_operand: u64, second_operand: u64) -> Option<Self> {
        let result = operator.apply(first_operand, second_operand)?;
        Some(Self {
            expression_text: format!("{first_operand} {operator} {second_operand}"),
            first_operand,
            second_operand,
            operator,
            result,
        })
    }

    /// Sum of two small operands; cannot fail.
    pub(crate) fn small_sum(first_operand: u8, second_operand: u8) -> Self {
        let first_operand = u64::from(first_operand);
        let second_operand = u64::from(second_operand);
        Self {
            expression_text: format!("{first_operand} + {second_operand}"),
            first_operand,
            second_operand,
            operator: Operator::Add,
            result: first_operand + second_operand,
        }
    }

    pub fn expression_text(&self) -> &str {
        &self.expression_text
    }

    pub fn first_operand(&self) -> u64 {
        self.first_operand
    }

    pub fn second_operand(&self) -> u64 {
        self.second_operand
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn result(&self) -> u64 {
        self.result
    }

    /// Re-check the operand constraints of the operator.
    ///
    /// Division needs an exact divisor of at least 2 and subtraction may
    /// not take away more than the first operand.
    pub fn is_consistent(&self) -> bool {
        let operator_rules = match self.operator {
            Operator::Add | Operator::Multiply => true,
            Operator::Subtract => self.second_operand <= self.first_operand,
            Operator::Divide => {
                self.second_operand >= 2 && self.first_operand % self.second_operand == 0
            }
        };
        let evaluated = self.operator.apply(self.first_operand, self.second_operand);
        operator_rules && evaluated == Some(self.result)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression_text)
    }
}

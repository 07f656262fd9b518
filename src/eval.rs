// SPDX-License-Identifier: Unlicense
use crate::bound::{self, BinaryOpKind, BoundTree, Kind, UnaryOpKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Negation,
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Negation => "negation",
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        };
        f.write_str(name)
    }
}

impl From<BinaryOpKind> for Operation {
    fn from(kind: BinaryOpKind) -> Self {
        match kind {
            BinaryOpKind::Addition => Operation::Addition,
            BinaryOpKind::Subtraction => Operation::Subtraction,
            BinaryOpKind::Multiplication => Operation::Multiplication,
            BinaryOpKind::Division => Operation::Division,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Division by zero.")]
    DivisionByZero,
    #[error("Integer overflow in {0}.")]
    Overflow(Operation),
}

pub struct Evaluator<'a> {
    tree: &'a BoundTree,
}

impl<'a> Evaluator<'a> {
    pub fn new(tree: &'a BoundTree) -> Self {
        Self { tree }
    }

    pub fn evaluate(&self) -> Result<i32, EvalError> {
        let value = self.evaluate_impl(self.tree.root())?;
        log::debug!("evaluated to {value}");
        Ok(value)
    }

    fn evaluate_impl(&self, id: bound::Id) -> Result<i32, EvalError> {
        match self.tree.node(id).kind {
            Kind::Literal(value) => Ok(value),
            Kind::Unary(op, operand) => {
                let operand = self.evaluate_impl(operand)?;
                match op {
                    UnaryOpKind::Identity => Ok(operand),
                    UnaryOpKind::Negation => operand
                        .checked_neg()
                        .ok_or(EvalError::Overflow(Operation::Negation)),
                }
            }
            Kind::Binary(left, op, right) => {
                let left = self.evaluate_impl(left)?;
                let right = self.evaluate_impl(right)?;
                let result = match op {
                    BinaryOpKind::Addition => left.checked_add(right),
                    BinaryOpKind::Subtraction => left.checked_sub(right),
                    BinaryOpKind::Multiplication => left.checked_mul(right),
                    BinaryOpKind::Division => {
                        if right == 0 {
                            return Err(EvalError::DivisionByZero);
                        }
                        // truncates toward zero
                        left.checked_div(right)
                    }
                };
                result.ok_or(EvalError::Overflow(op.into()))
            }
        }
    }
}

pub fn evaluate(tree: &BoundTree) -> Result<i32, EvalError> {
    Evaluator::new(tree).evaluate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{binder::bind, parser::parse};

    fn eval_str(text: &str) -> Result<i32, EvalError> {
        let syntax = parse(text);
        assert!(syntax.diagnostics().is_empty(), "{}", syntax.diagnostics());
        let tree = bind(&syntax);
        assert!(tree.diagnostics().is_empty(), "{}", tree.diagnostics());
        evaluate(&tree)
    }

    #[test]
    fn evaluator_should_follow_precedence() {
        assert_eq!(eval_str("4 + (1 + 2) * 3"), Ok(13));
        assert_eq!(eval_str("10 * 90"), Ok(900));
        assert_eq!(eval_str("2 * 3 + 4 * 5"), Ok(26));
        assert_eq!(eval_str("-(4 - 6) * +3"), Ok(6));
    }

    #[test]
    fn evaluator_should_be_left_associative() {
        assert_eq!(eval_str("10 - 4 - 3"), Ok(3));
        assert_eq!(eval_str("100 / 10 / 5"), Ok(2));
        assert_eq!(eval_str("8 / 2 * 4"), Ok(16));
    }

    #[test]
    fn division_should_truncate_toward_zero() {
        assert_eq!(eval_str("7 / 2"), Ok(3));
        assert_eq!(eval_str("-7 / 2"), Ok(-3));
        assert_eq!(eval_str("7 / -2"), Ok(-3));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(eval_str("1 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval_str("1 / (2 - 2)"), Err(EvalError::DivisionByZero));
        assert_eq!(EvalError::DivisionByZero.to_string(), "Division by zero.");
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(
            eval_str("2147483647 + 1"),
            Err(EvalError::Overflow(Operation::Addition))
        );
        assert_eq!(
            eval_str("-2147483647 - 1 - 1"),
            Err(EvalError::Overflow(Operation::Subtraction))
        );
        assert_eq!(
            eval_str("-(-2147483647 - 1)"),
            Err(EvalError::Overflow(Operation::Negation))
        );
        assert_eq!(
            eval_str("(-2147483647 - 1) / -1"),
            Err(EvalError::Overflow(Operation::Division))
        );
        assert_eq!(
            EvalError::Overflow(Operation::Multiplication).to_string(),
            "Integer overflow in multiplication."
        );
    }
}

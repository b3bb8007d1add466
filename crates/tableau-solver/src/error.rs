use thiserror::Error;

use crate::problem::ConstraintOp;

/// Reasons a `LinearProgram` is rejected before any pivoting happens
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProblemError {
    #[error("number of {what} must be between 1 and {max}, got {found}")]
    DimensionOutOfRange {
        what: &'static str,
        found: usize,
        max: usize,
    },

    #[error("expected {expected} objective coefficients, found {found}")]
    ObjectiveLength { expected: usize, found: usize },

    #[error("expected {expected} constraint {what}, found {found}")]
    ConstraintCount {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("constraint {row} has {found} coefficients, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("non-finite value in {location}")]
    NonFinite { location: String },

    #[error("unsupported constraint type: constraint {row} uses '{op}' with bound {bound}")]
    UnsupportedConstraint { row: usize, op: ConstraintOp, bound: f64 },

    #[error("constraint {row} has negative bound {bound}; the slack basis would be infeasible")]
    NegativeBound { row: usize, bound: f64 },
}

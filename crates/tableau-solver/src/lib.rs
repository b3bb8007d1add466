//! Dense-tableau primal simplex for small maximization problems.
//!
//! A [`LinearProgram`] is validated and turned into a tableau, the pivot loop
//! runs until it proves optimality, detects unboundedness or hits the pivot
//! cap, and the result comes back as a [`Solution`] carrying a snapshot of
//! every pass.

mod error;
mod problem;
mod simplex;
mod solution;
mod standard_form;
mod tableau;
mod trace;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::ProblemError;
pub use problem::{ConstraintOp, ConstraintSet, LinearProgram, MAX_DIMENSION};
pub use simplex::{PivotRule, Solver};
pub use solution::{Solution, SolutionStatus, basic_row};
pub use standard_form::StandardForm;
pub use tableau::Tableau;
pub use trace::{IterationSnapshot, Pivot};

/// Solve `problem` with the default [`Solver`] settings.
pub fn solve(problem: &LinearProgram) -> Result<Solution, ProblemError> {
    Solver::new().solve(problem)
}

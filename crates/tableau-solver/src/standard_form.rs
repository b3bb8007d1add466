use crate::error::ProblemError;
use crate::problem::{ConstraintOp, LinearProgram, MAX_DIMENSION};
use crate::tableau::Tableau;

/// A validated program whose constraints are all `<=` with non-negative bounds
#[derive(Debug, Clone, PartialEq)]
pub struct StandardForm {
    objective: Vec<f64>,
    rows: Vec<Vec<f64>>,
    bounds: Vec<f64>,
}

impl StandardForm {
    /// Validate `problem` and normalize its rows.
    ///
    /// A `>=` row with a non-positive bound is negated into a `<=` row.
    /// Every other `>=` row and every `=` row is rejected.
    pub fn from_problem(problem: &LinearProgram) -> Result<Self, ProblemError> {
        let n = problem.num_variables;
        let m = problem.num_constraints;
        let set = &problem.constraints;

        check_dimension("decision variables", n)?;
        check_dimension("constraints", m)?;

        if problem.objective.len() != n {
            return Err(ProblemError::ObjectiveLength {
                expected: n,
                found: problem.objective.len(),
            });
        }
        check_count("coefficient rows", m, set.coefficients.len())?;
        check_count("bounds", m, set.bounds.len())?;
        check_count("operators", m, set.operators.len())?;

        if problem.objective.iter().any(|c| !c.is_finite()) {
            return Err(ProblemError::NonFinite {
                location: "objective coefficients".to_string(),
            });
        }

        let mut rows = Vec::with_capacity(m);
        let mut bounds = Vec::with_capacity(m);

        for (i, ((coefficients, &bound), &op)) in set
            .coefficients
            .iter()
            .zip(&set.bounds)
            .zip(&set.operators)
            .enumerate()
        {
            let row = i + 1;
            if coefficients.len() != n {
                return Err(ProblemError::RowLength {
                    row,
                    expected: n,
                    found: coefficients.len(),
                });
            }
            if !bound.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                return Err(ProblemError::NonFinite {
                    location: format!("constraint {}", row),
                });
            }

            match op {
                ConstraintOp::Le if bound >= 0.0 => {
                    rows.push(coefficients.clone());
                    bounds.push(bound);
                }
                ConstraintOp::Le => return Err(ProblemError::NegativeBound { row, bound }),
                ConstraintOp::Ge if bound <= 0.0 => {
                    rows.push(coefficients.iter().map(|c| -c).collect());
                    bounds.push(0.0 - bound);
                }
                ConstraintOp::Ge | ConstraintOp::Eq => {
                    return Err(ProblemError::UnsupportedConstraint { row, op, bound });
                }
            }
        }

        Ok(Self {
            objective: problem.objective.clone(),
            rows,
            bounds,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.rows.len()
    }

    /// Build the initial tableau with the slack basis.
    ///
    /// The objective row holds `-c` so that maximizing `c·x` becomes a search
    /// for negative reduced costs.
    pub fn tableau(&self) -> Tableau {
        let n = self.num_variables();
        let m = self.num_constraints();
        let mut tableau = Tableau::zeros(n, m);
        let rhs_col = tableau.rhs_column();

        for (j, &coef) in self.objective.iter().enumerate() {
            tableau.set(0, j, -coef);
        }

        for (i, (row, &bound)) in self.rows.iter().zip(&self.bounds).enumerate() {
            for (j, &coef) in row.iter().enumerate() {
                tableau.set(i + 1, j, coef);
            }
            tableau.set(i + 1, n + i, 1.0);
            tableau.set(i + 1, rhs_col, bound);
        }

        tableau
    }
}

fn check_dimension(what: &'static str, found: usize) -> Result<(), ProblemError> {
    if (1..=MAX_DIMENSION).contains(&found) {
        Ok(())
    } else {
        Err(ProblemError::DimensionOutOfRange {
            what,
            found,
            max: MAX_DIMENSION,
        })
    }
}

fn check_count(what: &'static str, expected: usize, found: usize) -> Result<(), ProblemError> {
    if expected == found {
        Ok(())
    } else {
        Err(ProblemError::ConstraintCount {
            what,
            expected,
            found,
        })
    }
}

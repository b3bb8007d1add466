use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::tableau::Tableau;
use crate::trace::{IterationSnapshot, Pivot};

/// The result of solving a linear program
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Solution {
    /// How the pivot loop terminated
    pub status: SolutionStatus,
    /// Value of each decision variable (empty when unbounded)
    pub values: Vec<f64>,
    /// Objective value; `+inf` when unbounded, which `serde_json` writes as `null`
    pub objective_value: f64,
    /// Tableau at the start of every pass, in order
    pub iterations: Vec<IterationSnapshot>,
    /// Pivots performed, in order
    pub pivots: Vec<Pivot>,
    /// Tableau the pivot loop stopped on and the values were read from.
    /// Under `IterationLimit` it follows the last pivot, so it is newer than
    /// the last entry of `iterations`.
    pub final_tableau: Tableau,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SolutionStatus {
    /// No negative reduced cost remains
    Optimal,
    /// The objective grows without bound along the entering column
    Unbounded,
    /// The pivot cap was hit; values come from a non-terminal tableau
    IterationLimit,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolutionStatus::Optimal => "optimal",
            SolutionStatus::Unbounded => "unbounded",
            SolutionStatus::IterationLimit => "iteration-limit",
        })
    }
}

impl Solution {
    /// Read variable values and the objective value out of `tableau`.
    pub(crate) fn extract(
        status: SolutionStatus,
        tableau: Tableau,
        tolerance: f64,
        iterations: Vec<IterationSnapshot>,
        pivots: Vec<Pivot>,
    ) -> Self {
        let values = (0..tableau.num_variables())
            .map(|col| match basic_row(&tableau, col, tolerance) {
                Some(row) if row > 0 => tableau.rhs(row),
                _ => 0.0,
            })
            .collect();

        Self {
            status,
            values,
            // Row 0 started as -c, so its RHS cell tracks +Z after pivoting
            objective_value: tableau.rhs(0),
            iterations,
            pivots,
            final_tableau: tableau,
        }
    }

    pub(crate) fn unbounded(tableau: Tableau, iterations: Vec<IterationSnapshot>, pivots: Vec<Pivot>) -> Self {
        Self {
            status: SolutionStatus::Unbounded,
            values: Vec::new(),
            objective_value: f64::INFINITY,
            iterations,
            pivots,
            final_tableau: tableau,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    pub fn pivot_count(&self) -> usize {
        self.pivots.len()
    }
}

/// Row holding the unit entry of column `col`, if the column is a unit vector.
///
/// Exactly one row must be within `tolerance` of 1 and every other row,
/// objective row included, within `tolerance` of 0.
pub fn basic_row(tableau: &Tableau, col: usize, tolerance: f64) -> Option<usize> {
    let mut unit_row = None;
    for (row, value) in tableau.column(col).enumerate() {
        if (value - 1.0).abs() < tolerance {
            if unit_row.is_some() {
                return None;
            }
            unit_row = Some(row);
        } else if value.abs() > tolerance {
            return None;
        }
    }
    unit_row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tableau_from(rows: Vec<Vec<f64>>, n: usize, m: usize) -> Tableau {
        let mut t = Tableau::zeros(n, m);
        for (i, row) in rows.into_iter().enumerate() {
            for (j, value) in row.into_iter().enumerate() {
                t.set(i, j, value);
            }
        }
        t
    }

    #[test]
    fn test_extract_reads_basic_columns() {
        let t = tableau_from(
            vec![
                vec![0.0, 1.0 / 3.0, 5.0 / 3.0, 0.0, 500.0 / 3.0],
                vec![1.0, 2.0 / 3.0, 1.0 / 3.0, 0.0, 100.0 / 3.0],
                vec![0.0, -1.0 / 3.0, -2.0 / 3.0, 1.0, 40.0 / 3.0],
            ],
            2,
            2,
        );

        let solution = Solution::extract(SolutionStatus::Optimal, t, 1e-10, Vec::new(), Vec::new());
        assert!((solution.values[0] - 100.0 / 3.0).abs() < 1e-12);
        assert_eq!(solution.values[1], 0.0);
        assert!((solution.objective_value - 500.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_basic_row_requires_a_single_unit() {
        let t = tableau_from(vec![vec![0.0, 1.0, 0.0], vec![1.0, 1.0, 3.0]], 1, 1);
        assert_eq!(basic_row(&t, 0, 1e-10), Some(1));
        assert_eq!(basic_row(&t, 1, 1e-10), None);

        let t = tableau_from(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 3.0]], 1, 1);
        assert_eq!(basic_row(&t, 0, 1e-10), Some(0));
        let solution = Solution::extract(SolutionStatus::Optimal, t, 1e-10, Vec::new(), Vec::new());
        assert_eq!(solution.values, vec![0.0]);
    }

    #[test]
    fn test_basic_row_uses_tolerance() {
        let t = tableau_from(vec![vec![1e-12, 0.0, 0.0], vec![1.0 - 1e-12, 1.0, 3.0]], 1, 1);
        assert_eq!(basic_row(&t, 0, 1e-10), Some(1));
        assert_eq!(basic_row(&t, 0, 1e-14), None);
    }

    #[test]
    fn test_unbounded_has_no_values() {
        let t = tableau_from(vec![vec![-1.0, 0.0, 0.0], vec![0.0, 1.0, 5.0]], 1, 1);
        let solution = Solution::unbounded(t.clone(), Vec::new(), Vec::new());
        assert_eq!(solution.status, SolutionStatus::Unbounded);
        assert!(solution.values.is_empty());
        assert_eq!(solution.objective_value, f64::INFINITY);
        assert_eq!(solution.final_tableau, t);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_unbounded_objective_serializes_as_null() {
        let t = tableau_from(vec![vec![-1.0, 0.0, 0.0], vec![0.0, 1.0, 5.0]], 1, 1);
        let json = serde_json::to_value(Solution::unbounded(t, Vec::new(), Vec::new())).unwrap();
        assert_eq!(json["status"], "unbounded");
        assert!(json["objectiveValue"].is_null());
        assert_eq!(json["finalTableau"][1][2], 5.0);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SolutionStatus::IterationLimit.to_string(), "iteration-limit");
        assert_eq!(SolutionStatus::Optimal.to_string(), "optimal");
    }
}

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Most decision variables or constraints a program may declare
pub const MAX_DIMENSION: usize = 10;

/// A maximization problem over non-negative decision variables
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LinearProgram {
    /// Declared number of decision variables (n)
    pub num_variables: usize,
    /// Declared number of constraints (m)
    pub num_constraints: usize,
    /// Coefficients of the objective to maximize
    #[cfg_attr(feature = "serde", serde(rename = "objectiveCoefficients"))]
    pub objective: Vec<f64>,
    pub constraints: ConstraintSet,
}

/// Constraint rows stored column-wise, one entry per constraint
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintSet {
    /// Coefficients for each constraint row
    pub coefficients: Vec<Vec<f64>>,
    /// Right-hand side of each row
    pub bounds: Vec<f64>,
    /// Comparison operator of each row
    pub operators: Vec<ConstraintOp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    #[cfg_attr(feature = "serde", serde(rename = "<=", alias = "≤"))]
    Le,
    /// Greater than or equal (>=)
    #[cfg_attr(feature = "serde", serde(rename = ">=", alias = "≥"))]
    Ge,
    /// Equal (=)
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Eq,
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintOp::Le => "<=",
            ConstraintOp::Ge => ">=",
            ConstraintOp::Eq => "=",
        })
    }
}

impl LinearProgram {
    /// Start a program with the given objective and no constraints.
    pub fn new(objective: Vec<f64>) -> Self {
        Self {
            num_variables: objective.len(),
            num_constraints: 0,
            objective,
            constraints: ConstraintSet::default(),
        }
    }

    pub fn add_constraint(&mut self, coefficients: Vec<f64>, op: ConstraintOp, bound: f64) {
        self.constraints.coefficients.push(coefficients);
        self.constraints.bounds.push(bound);
        self.constraints.operators.push(op);
        self.num_constraints += 1;
    }

    /// Chaining form of [`LinearProgram::add_constraint`].
    pub fn with_constraint(mut self, coefficients: Vec<f64>, op: ConstraintOp, bound: f64) -> Self {
        self.add_constraint(coefficients, op, bound);
        self
    }

    /// Objective value at `values`
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        dot(&self.objective, values)
    }

    /// Left-hand side of every constraint at `values`
    pub fn activities(&self, values: &[f64]) -> Vec<f64> {
        self.constraints
            .coefficients
            .iter()
            .map(|row| dot(row, values))
            .collect()
    }

    /// Check `values` against the original constraints and non-negativity.
    pub fn is_feasible(&self, values: &[f64], eps: f64) -> bool {
        if values.len() != self.num_variables || values.iter().any(|&v| v < -eps) {
            return false;
        }

        self.activities(values)
            .iter()
            .zip(&self.constraints.bounds)
            .zip(&self.constraints.operators)
            .all(|((&lhs, &bound), op)| match op {
                ConstraintOp::Le => lhs <= bound + eps,
                ConstraintOp::Ge => lhs >= bound - eps,
                ConstraintOp::Eq => (lhs - bound).abs() <= eps,
            })
    }
}

fn dot(coefficients: &[f64], values: &[f64]) -> f64 {
    coefficients.iter().zip(values).map(|(c, v)| c * v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> LinearProgram {
        LinearProgram::new(vec![5.0, 3.0])
            .with_constraint(vec![3.0, 2.0], ConstraintOp::Le, 100.0)
            .with_constraint(vec![2.0, 1.0], ConstraintOp::Le, 80.0)
    }

    #[test]
    fn test_builder_keeps_counts_in_sync() {
        let lp = reference();
        assert_eq!(lp.num_variables, 2);
        assert_eq!(lp.num_constraints, 2);
        assert_eq!(lp.constraints.bounds, vec![100.0, 80.0]);
        assert_eq!(lp.constraints.operators, vec![ConstraintOp::Le, ConstraintOp::Le]);
    }

    #[test]
    fn test_feasibility_check() {
        let lp = reference();
        assert!(lp.is_feasible(&[100.0 / 3.0, 0.0], 1e-9));
        assert!(lp.is_feasible(&[0.0, 0.0], 1e-9));
        assert!(!lp.is_feasible(&[40.0, 0.0], 1e-9));
        assert!(!lp.is_feasible(&[-1.0, 0.0], 1e-9));
        assert!(!lp.is_feasible(&[1.0], 1e-9));
        assert_eq!(lp.evaluate(&[10.0, 10.0]), 80.0);
        assert_eq!(lp.activities(&[10.0, 10.0]), vec![50.0, 30.0]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_shape() {
        let json = r#"{
            "numVariables": 1,
            "numConstraints": 2,
            "objectiveCoefficients": [5],
            "constraints": {
                "coefficients": [[1], [-1]],
                "bounds": [10, -2],
                "operators": ["<=", "≥"]
            }
        }"#;
        let lp: LinearProgram = serde_json::from_str(json).unwrap();
        assert_eq!(lp.constraints.operators, vec![ConstraintOp::Le, ConstraintOp::Ge]);
        assert_eq!(lp.objective, vec![5.0]);
    }
}

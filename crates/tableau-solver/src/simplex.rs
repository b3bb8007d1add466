use crate::error::ProblemError;
use crate::problem::LinearProgram;
use crate::solution::{Solution, SolutionStatus};
use crate::standard_form::StandardForm;
use crate::tableau::Tableau;
use crate::trace::{IterationRecorder, Pivot};

/// How entering and leaving variables are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotRule {
    /// Most negative reduced cost enters, lowest column index on ties;
    /// the first row with the minimum ratio leaves. Can cycle on
    /// degenerate problems.
    #[default]
    Dantzig,
    /// Lowest-index column with a negative reduced cost enters; minimum-ratio
    /// ties go to the row whose basic variable has the lowest index. Never
    /// cycles.
    Bland,
}

/// Primal simplex solver over a dense tableau
#[derive(Debug, Clone)]
pub struct Solver {
    /// Pivot cap before giving up
    max_iterations: usize,
    /// Tolerance for reading unit columns out of the final tableau
    tolerance: f64,
    /// Smallest pivot element the ratio test will accept
    pivot_tolerance: f64,
    pivot_rule: PivotRule,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-10,
            pivot_tolerance: 1e-9,
            pivot_rule: PivotRule::Dantzig,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    pub fn with_pivot_rule(mut self, rule: PivotRule) -> Self {
        self.pivot_rule = rule;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn pivot_rule(&self) -> PivotRule {
        self.pivot_rule
    }

    /// Maximize `problem`'s objective.
    ///
    /// Malformed or unsupported programs are rejected before any pivoting.
    /// Unbounded problems and runs that hit the pivot cap are reported through
    /// [`Solution::status`], not as errors.
    pub fn solve(&self, problem: &LinearProgram) -> Result<Solution, ProblemError> {
        let form = StandardForm::from_problem(problem)?;
        log::debug!(
            "solving {} variables x {} constraints with {:?}",
            form.num_variables(),
            form.num_constraints(),
            self.pivot_rule
        );
        Ok(self.solve_standard(&form))
    }

    /// Run the pivot loop on an already validated program.
    pub fn solve_standard(&self, form: &StandardForm) -> Solution {
        TableauEngine::new(self, form.tableau()).run()
    }
}

/// Owns the live tableau for the duration of one solve
struct TableauEngine<'a> {
    solver: &'a Solver,
    tableau: Tableau,
    /// Basic variable of each constraint row
    basis: Vec<usize>,
    recorder: IterationRecorder,
}

impl<'a> TableauEngine<'a> {
    fn new(solver: &'a Solver, tableau: Tableau) -> Self {
        let n = tableau.num_variables();
        let basis = (0..tableau.num_constraints()).map(|i| n + i).collect();
        Self {
            solver,
            tableau,
            basis,
            recorder: IterationRecorder::new(),
        }
    }

    fn run(mut self) -> Solution {
        let mut iteration = 0;

        let status = loop {
            self.recorder.record(&self.tableau);

            let Some(col) = self.entering_column() else {
                break SolutionStatus::Optimal;
            };
            let Some(row) = self.leaving_row(col) else {
                log::info!("pass {}: no leaving row for column {}, problem is unbounded", iteration, col);
                break SolutionStatus::Unbounded;
            };
            // A zero cap allows no pivot at all
            if iteration >= self.solver.max_iterations {
                log::warn!("pivot cap of {} reached before optimality", self.solver.max_iterations);
                break SolutionStatus::IterationLimit;
            }

            let element = self.tableau.get(row, col);
            log::debug!(
                "pass {}: {} enters, {} leaves row {} (pivot {})",
                iteration,
                self.tableau.column_label(col),
                self.tableau.column_label(self.basis[row - 1]),
                row,
                element
            );

            self.tableau.pivot(row, col);
            self.basis[row - 1] = col;
            self.recorder.record_pivot(Pivot {
                iteration,
                row,
                column: col,
                element,
            });

            iteration += 1;
            if iteration >= self.solver.max_iterations {
                log::warn!("pivot cap of {} reached before optimality", self.solver.max_iterations);
                break SolutionStatus::IterationLimit;
            }
        };

        let (iterations, pivots) = self.recorder.finish();
        match status {
            SolutionStatus::Unbounded => Solution::unbounded(self.tableau, iterations, pivots),
            _ => {
                let solution = Solution::extract(status, self.tableau, self.solver.tolerance, iterations, pivots);
                log::info!(
                    "{} after {} pivots, objective {}",
                    solution.status,
                    solution.pivot_count(),
                    solution.objective_value
                );
                solution
            }
        }
    }

    /// Optimality test: a column of the objective row with a negative entry.
    fn entering_column(&self) -> Option<usize> {
        let reduced_costs = &self.tableau.row(0)[..self.tableau.rhs_column()];

        match self.solver.pivot_rule {
            PivotRule::Dantzig => {
                let mut min_val = 0.0;
                let mut min_col = None;
                for (j, &value) in reduced_costs.iter().enumerate() {
                    if value < min_val {
                        min_val = value;
                        min_col = Some(j);
                    }
                }
                min_col
            }
            PivotRule::Bland => reduced_costs.iter().position(|&value| value < 0.0),
        }
    }

    /// Ratio test over constraint rows with a usable pivot element in `col`.
    fn leaving_row(&self, col: usize) -> Option<usize> {
        let rhs_col = self.tableau.rhs_column();

        let mut min_ratio = f64::INFINITY;
        let mut min_row: Option<usize> = None;

        for row in 1..self.tableau.num_rows() {
            let val = self.tableau.get(row, col);
            if val <= self.solver.pivot_tolerance {
                continue;
            }
            let ratio = self.tableau.get(row, rhs_col) / val;
            let better = match min_row {
                None => true,
                Some(best) => match self.solver.pivot_rule {
                    PivotRule::Dantzig => ratio < min_ratio,
                    PivotRule::Bland => {
                        ratio < min_ratio || (ratio == min_ratio && self.basis[row - 1] < self.basis[best - 1])
                    }
                },
            };
            if better {
                min_ratio = ratio;
                min_row = Some(row);
            }
        }

        min_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ConstraintOp;
    use crate::solution::basic_row;

    #[test]
    fn test_simple_maximization() {
        // Maximize: 3x + 2y
        // Subject to:
        //   x + y <= 4
        //   x <= 3
        //   y <= 3
        // Optimal: x=3, y=1, obj=11
        let problem = LinearProgram::new(vec![3.0, 2.0])
            .with_constraint(vec![1.0, 1.0], ConstraintOp::Le, 4.0)
            .with_constraint(vec![1.0, 0.0], ConstraintOp::Le, 3.0)
            .with_constraint(vec![0.0, 1.0], ConstraintOp::Le, 3.0);

        let solution = Solver::new().solve(&problem).unwrap();

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!((solution.values[0] - 3.0).abs() < 1e-6, "x = {} (expected 3)", solution.values[0]);
        assert!((solution.values[1] - 1.0).abs() < 1e-6, "y = {} (expected 1)", solution.values[1]);
        assert!((solution.objective_value - 11.0).abs() < 1e-6, "obj = {} (expected 11)", solution.objective_value);
    }

    #[test]
    fn test_dantzig_picks_most_negative_lowest_index() {
        let problem = LinearProgram::new(vec![2.0, 5.0, 5.0]).with_constraint(vec![1.0, 1.0, 1.0], ConstraintOp::Le, 4.0);
        let solver = Solver::new();
        let engine = TableauEngine::new(&solver, StandardForm::from_problem(&problem).unwrap().tableau());
        assert_eq!(engine.entering_column(), Some(1));

        let bland = Solver::new().with_pivot_rule(PivotRule::Bland);
        let engine = TableauEngine::new(&bland, StandardForm::from_problem(&problem).unwrap().tableau());
        assert_eq!(engine.entering_column(), Some(0));
    }

    #[test]
    fn test_ratio_ties_go_to_first_row() {
        let problem = LinearProgram::new(vec![1.0])
            .with_constraint(vec![2.0], ConstraintOp::Le, 4.0)
            .with_constraint(vec![1.0], ConstraintOp::Le, 2.0);
        let solver = Solver::new();
        let engine = TableauEngine::new(&solver, StandardForm::from_problem(&problem).unwrap().tableau());
        assert_eq!(engine.leaving_row(0), Some(1));
    }

    #[test]
    fn test_tiny_pivot_elements_are_ignored() {
        let problem = LinearProgram::new(vec![1.0])
            .with_constraint(vec![1e-12], ConstraintOp::Le, 1.0)
            .with_constraint(vec![1.0], ConstraintOp::Le, 5.0);
        let solver = Solver::new();
        let engine = TableauEngine::new(&solver, StandardForm::from_problem(&problem).unwrap().tableau());
        assert_eq!(engine.leaving_row(0), Some(2));

        let only_tiny = LinearProgram::new(vec![1.0]).with_constraint(vec![1e-12], ConstraintOp::Le, 1.0);
        let solution = Solver::new().solve(&only_tiny).unwrap();
        assert_eq!(solution.status, SolutionStatus::Unbounded);
    }

    #[test]
    fn test_unit_column_after_every_pivot() {
        let problem = LinearProgram::new(vec![3.0, 2.0, 4.0])
            .with_constraint(vec![1.0, 1.0, 2.0], ConstraintOp::Le, 4.0)
            .with_constraint(vec![2.0, 0.0, 3.0], ConstraintOp::Le, 5.0)
            .with_constraint(vec![2.0, 1.0, 3.0], ConstraintOp::Le, 7.0);

        let solution = Solver::new().solve(&problem).unwrap();
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!(solution.pivot_count() > 0);

        for pivot in &solution.pivots {
            let after = &solution.iterations[pivot.iteration + 1].tableau;
            for (row, value) in after.column(pivot.column).enumerate() {
                let expected = if row == pivot.row { 1.0 } else { 0.0 };
                assert!((value - expected).abs() < 1e-9, "row {} col {} = {}", row, pivot.column, value);
            }
        }
    }

    #[test]
    fn test_iteration_cap_is_not_reported_as_optimal() {
        let problem = LinearProgram::new(vec![3.0, 2.0])
            .with_constraint(vec![1.0, 1.0], ConstraintOp::Le, 4.0)
            .with_constraint(vec![1.0, 0.0], ConstraintOp::Le, 3.0);

        let solution = Solver::new().with_max_iterations(1).solve(&problem).unwrap();
        assert_eq!(solution.status, SolutionStatus::IterationLimit);
        assert_eq!(solution.pivot_count(), 1);
        assert_eq!(solution.iterations.len(), 1);
        assert_eq!(solution.values.len(), 2);

        // values come from the tableau after the capped pivot, not the last snapshot
        assert_eq!(solution.values, vec![3.0, 0.0]);
        assert_eq!(basic_row(&solution.final_tableau, 0, 1e-10), Some(2));
        assert_eq!(solution.final_tableau.rhs(2), 3.0);
        assert_ne!(solution.final_tableau, solution.iterations[0].tableau);
    }

    #[test]
    fn test_zero_iteration_cap_performs_no_pivot() {
        let problem = LinearProgram::new(vec![1.0, 1.0])
            .with_constraint(vec![1.0, 1.0], ConstraintOp::Le, 4.0)
            .with_constraint(vec![1.0, 0.0], ConstraintOp::Le, 3.0);

        let solution = Solver::new().with_max_iterations(0).solve(&problem).unwrap();
        assert_eq!(solution.status, SolutionStatus::IterationLimit);
        assert_eq!(solution.pivot_count(), 0);
        assert_eq!(solution.iterations.len(), 1);
        assert_eq!(solution.final_tableau, solution.iterations[0].tableau);
        assert_eq!(solution.values, vec![0.0, 0.0]);

        // the first pass still classifies problems that need no pivot
        let optimal = LinearProgram::new(vec![-1.0]).with_constraint(vec![1.0], ConstraintOp::Le, 4.0);
        let solution = Solver::new().with_max_iterations(0).solve(&optimal).unwrap();
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.pivot_count(), 0);
    }
}

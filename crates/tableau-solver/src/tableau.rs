#[cfg(feature = "serde")]
use serde::Serialize;

/// Dense simplex tableau with `m + 1` rows and `n + m + 1` columns.
///
/// Row 0 is the objective row, rows `1..=m` are constraint rows. Columns
/// `0..n` hold decision variables, `n..n + m` slack variables and the last
/// column the right-hand side.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(into = "Vec<Vec<f64>>"))]
pub struct Tableau {
    data: Vec<Vec<f64>>,
    num_variables: usize,
    num_constraints: usize,
}

impl Tableau {
    /// All-zero tableau for `n` variables and `m` constraints
    pub(crate) fn zeros(num_variables: usize, num_constraints: usize) -> Self {
        let cols = num_variables + num_constraints + 1;
        Self {
            data: vec![vec![0.0; cols]; num_constraints + 1],
            num_variables,
            num_constraints,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_constraints(&self) -> usize {
        self.num_constraints
    }

    pub fn num_rows(&self) -> usize {
        self.num_constraints + 1
    }

    pub fn num_cols(&self) -> usize {
        self.num_variables + self.num_constraints + 1
    }

    /// Index of the right-hand-side column
    pub fn rhs_column(&self) -> usize {
        self.num_variables + self.num_constraints
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn rhs(&self, row: usize) -> f64 {
        self.data[row][self.rhs_column()]
    }

    /// Iterate over one column, objective row first.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().map(move |row| row[col])
    }

    /// Header label for a column: `x1..xn`, `s1..sm`, then `RHS`.
    pub fn column_label(&self, col: usize) -> String {
        if col < self.num_variables {
            format!("x{}", col + 1)
        } else if col < self.rhs_column() {
            format!("s{}", col - self.num_variables + 1)
        } else {
            "RHS".to_string()
        }
    }

    /// Gauss-Jordan pivot on (`row`, `col`).
    ///
    /// The pivot row is scaled so the pivot becomes 1, then its multiples are
    /// subtracted from every other row, objective row included. The entering
    /// column ends as an exact unit vector.
    pub(crate) fn pivot(&mut self, row: usize, col: usize) {
        let n_cols = self.num_cols();

        let pivot_val = self.data[row][col];
        for j in 0..n_cols {
            self.data[row][j] /= pivot_val;
        }
        self.data[row][col] = 1.0;

        let pivot_row = self.data[row].clone();
        for (i, target) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = target[col];
            if factor == 0.0 {
                continue;
            }
            for (value, pivot) in target.iter_mut().zip(&pivot_row) {
                *value -= factor * pivot;
            }
            target[col] = 0.0;
        }
    }
}

impl From<Tableau> for Vec<Vec<f64>> {
    fn from(tableau: Tableau) -> Self {
        tableau.data
    }
}

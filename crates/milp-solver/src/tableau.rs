use crate::problem::StandardForm;
use crate::solution::SearchStats;

/// Simplex tableau: `n_constraints` constraint rows followed by the
/// objective row(s), with the RHS in the last column.
///
/// Columns are laid out as structural variables, then slack variables
/// (including any added by branching), then the RHS. During Phase 1 a block
/// of artificial columns is temporarily spliced in before the RHS and a
/// second objective row (the auxiliary one) is appended; both are stripped
/// again before Phase 2.
#[derive(Debug, Clone)]
pub(crate) struct Tableau {
    pub rows: Vec<Vec<f64>>,
    /// Column index of the variable basic in each constraint row.
    /// Entries are pairwise distinct and within column bounds.
    pub basis: Vec<usize>,
    pub n_constraints: usize,
    pub n_structural: usize,
}

impl Tableau {
    /// Build `[A | I_m | b]` with objective row `[c | 0_m | 0]`.
    /// The all-slack basis starts basic in every row.
    pub fn from_standard_form(sf: &StandardForm) -> Self {
        let m = sf.b.len();
        let n = sf.num_vars();
        let width = n + m + 1;

        let mut rows = Vec::with_capacity(m + 1);
        for (i, coeffs) in sf.a.iter().enumerate() {
            let mut row = vec![0.0; width];
            row[..n].copy_from_slice(coeffs);
            row[n + i] = 1.0;
            row[width - 1] = sf.b[i];
            rows.push(row);
        }

        let mut objective = vec![0.0; width];
        objective[..n].copy_from_slice(&sf.c);
        rows.push(objective);

        Self {
            rows,
            basis: (n..n + m).collect(),
            n_constraints: m,
            n_structural: n,
        }
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn rhs(&self, row: usize) -> f64 {
        self.rows[row][self.width() - 1]
    }

    /// RHS entry of the true objective row (holds the negated minimize value).
    pub fn objective_rhs(&self) -> f64 {
        self.rows[self.n_constraints][self.width() - 1]
    }

    /// One Gaussian-elimination step: scale the pivot row to a unit pivot,
    /// eliminate the pivot column from every other row (objective rows
    /// included), and make `col` basic in `row`.
    pub fn pivot(&mut self, row: usize, col: usize, tol: f64, stats: &mut SearchStats) {
        stats.pivots += 1;
        self.basis[row] = col;

        let width = self.width();
        let pivot_val = self.rows[row][col];
        for x in &mut self.rows[row] {
            *x /= pivot_val;
        }

        for i in 0..self.rows.len() {
            if i == row {
                continue;
            }
            let factor = self.rows[i][col];
            if factor.abs() <= tol {
                continue;
            }
            for j in 0..width {
                self.rows[i][j] -= factor * self.rows[row][j];
            }
        }
    }

    /// Derive a child tableau bounding the variable basic in `row` to
    /// `<= floor(v)` (`upper = false`) or `>= ceil(v)` (`upper = true`).
    ///
    /// The bound is a fresh row and slack column inserted before the
    /// objective row / RHS column; one corrective pivot on the branching
    /// variable's basic column restores tableau form. The child's new row
    /// ends with a negative RHS, so solving it re-enters Phase 1.
    pub fn with_bound(&self, row: usize, upper: bool, tol: f64, stats: &mut SearchStats) -> Self {
        let mut child = self.clone();
        let width = self.width();
        let value = self.rhs(row);
        let col = self.basis[row];

        for r in &mut child.rows {
            r.insert(width - 1, 0.0);
        }

        let mut bound = vec![0.0; width + 1];
        if upper {
            // x >= ceil(v), as -x + s = -ceil(v)
            bound[col] = -1.0;
            bound[width] = -value.ceil();
        } else {
            // x <= floor(v), as x + s = floor(v)
            bound[col] = 1.0;
            bound[width] = value.floor();
        }
        bound[width - 1] = 1.0;

        child.rows.insert(child.n_constraints, bound);
        child.basis.push(width - 1);
        child.n_constraints += 1;

        child.pivot(row, col, tol, stats);
        child
    }
}

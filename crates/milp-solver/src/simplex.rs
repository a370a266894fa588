use crate::error::SolverError;
use crate::pivot::{PivotRule, entering_column, leaving_row};
use crate::problem::LpProblem;
use crate::solution::{LpSolution, SearchStats};
use crate::tableau::Tableau;

/// Two-phase simplex solver for linear programs, with branch-and-bound
/// integer search layered on top (see `solve_milp`).
pub struct Solver {
    /// Tolerance for every floating point comparison: entering test, ratio
    /// test, Phase-1 zero check, and integrality check all share it
    pub(crate) tolerance: f64,
    /// Maximum pivots per phase before giving up
    pub(crate) max_iterations: usize,
    /// Entering-column strategy
    pub(crate) pivot_rule: PivotRule,
    /// Optional branch-and-bound node budget
    pub(crate) node_limit: Option<usize>,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 10_000,
            pivot_rule: PivotRule::default(),
            node_limit: None,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_pivot_rule(mut self, rule: PivotRule) -> Self {
        self.pivot_rule = rule;
        self
    }

    /// Cap the number of branch-and-bound nodes processed. When the budget
    /// runs out the best incumbent so far is returned with `complete = false`.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Solve the LP relaxation to optimality using the two-phase simplex
    /// method.
    pub fn solve_lp(&self, problem: &LpProblem) -> Result<LpSolution, SolverError> {
        let sf = problem.standard_form()?;
        let mut tableau = Tableau::from_standard_form(&sf);
        let mut stats = SearchStats::default();

        self.optimize(&mut tableau, &mut stats)?;

        Ok(LpSolution {
            values: extract_values(&tableau),
            value: sf.objective_value(tableau.objective_rhs()),
            pivots: stats.pivots,
        })
    }

    /// Drive a tableau to optimality: Phase 1 if the all-slack basis is
    /// infeasible, then Phase 2 on the true objective.
    pub(crate) fn optimize(
        &self,
        tableau: &mut Tableau,
        stats: &mut SearchStats,
    ) -> Result<(), SolverError> {
        let rhs_col = tableau.width() - 1;
        let infeasible_start =
            (0..tableau.n_constraints).any(|r| tableau.rows[r][rhs_col] < -self.tolerance);
        if infeasible_start {
            self.phase1(tableau, stats)?;
        }

        let limit = tableau.width() - 1;
        self.pivot_loop(tableau, limit, stats)
    }

    /// Pivot until no entering column remains. `limit` bounds the columns
    /// eligible to enter (used in Phase 1 to keep artificials out).
    fn pivot_loop(
        &self,
        tableau: &mut Tableau,
        limit: usize,
        stats: &mut SearchStats,
    ) -> Result<(), SolverError> {
        for _ in 0..self.max_iterations {
            let Some(col) = entering_column(tableau, self.pivot_rule, self.tolerance, limit) else {
                return Ok(());
            };
            let Some(row) = leaving_row(tableau, col, self.tolerance) else {
                return Err(SolverError::Unbounded);
            };
            tableau.pivot(row, col, self.tolerance, stats);
        }
        Err(SolverError::IterationLimit)
    }

    /// Recover a feasible basis by minimizing an auxiliary objective over
    /// artificial variables added to the negative-RHS rows.
    fn phase1(&self, tableau: &mut Tableau, stats: &mut SearchStats) -> Result<(), SolverError> {
        let rhs_col = tableau.width() - 1;

        // Sign-flip the infeasible rows; their slacks leave the basis.
        let mut flipped = Vec::new();
        for r in 0..tableau.n_constraints {
            if tableau.rows[r][rhs_col] < -self.tolerance {
                for x in &mut tableau.rows[r] {
                    *x = -*x;
                }
                flipped.push(r);
            }
        }
        if flipped.is_empty() {
            return Ok(());
        }

        // Splice one artificial column per flipped row in before the RHS
        // and make it basic there.
        let n_artificial = flipped.len();
        for row in &mut tableau.rows {
            row.splice(rhs_col..rhs_col, std::iter::repeat(0.0).take(n_artificial));
        }
        for (k, &r) in flipped.iter().enumerate() {
            tableau.rows[r][rhs_col + k] = 1.0;
            tableau.basis[r] = rhs_col + k;
        }

        // Auxiliary objective: sum of artificials, reduced against the rows
        // where they start basic. The true objective row stays in the
        // tableau and is carried through the Phase-1 pivots.
        let aux_width = rhs_col + n_artificial + 1;
        let mut aux = vec![0.0; aux_width];
        for k in 0..n_artificial {
            aux[rhs_col + k] = 1.0;
        }
        for &r in &flipped {
            for (x, &v) in aux.iter_mut().zip(tableau.rows[r].iter()) {
                *x -= v;
            }
        }
        tableau.rows.push(aux);

        // Artificial columns are excluded from entering again.
        match self.pivot_loop(tableau, rhs_col, stats) {
            Ok(()) => {}
            // The auxiliary objective is bounded below by zero; an
            // unbounded column here means the original is infeasible.
            Err(SolverError::Unbounded) => return Err(SolverError::Infeasible),
            Err(e) => return Err(e),
        }

        let aux_rhs = tableau.rows[tableau.n_constraints + 1][aux_width - 1];
        if aux_rhs.abs() > self.tolerance {
            return Err(SolverError::Infeasible);
        }
        tableau.rows.pop();

        // Pivot any artificial still basic (at zero) out of the basis; a row
        // offering no non-artificial column to pivot on is redundant.
        let mut r = 0;
        while r < tableau.n_constraints {
            if tableau.basis[r] < rhs_col {
                r += 1;
                continue;
            }
            match (0..rhs_col).find(|&j| tableau.rows[r][j].abs() > self.tolerance) {
                Some(j) => {
                    tableau.pivot(r, j, self.tolerance, stats);
                    r += 1;
                }
                None => {
                    tableau.rows.remove(r);
                    tableau.basis.remove(r);
                    tableau.n_constraints -= 1;
                }
            }
        }

        // Strip the artificial columns; every surviving basic index is
        // below them.
        for row in &mut tableau.rows {
            row.drain(rhs_col..rhs_col + n_artificial);
        }

        Ok(())
    }
}

/// Structural variable values from the basic rows; nonbasic variables are
/// zero.
pub(crate) fn extract_values(tableau: &Tableau) -> Vec<f64> {
    let mut values = vec![0.0; tableau.n_structural];
    for (r, &col) in tableau.basis.iter().enumerate() {
        if col < tableau.n_structural {
            values[col] = tableau.rhs(r);
        }
    }
    values
}

use crate::error::SolverError;
use crate::problem::LpProblem;
use crate::simplex::{Solver, extract_values};
use crate::solution::{MilpSolution, SearchStats};
use crate::tableau::Tableau;

/// One unexplored relaxation on the depth-first frontier. Each node owns its
/// tableau outright; children get their own augmented copies.
struct SearchNode {
    tableau: Tableau,
    depth: usize,
}

impl Solver {
    /// Solve the problem with all structural variables required integral,
    /// by depth-first branch-and-bound over LP relaxations.
    pub fn solve_milp(&self, problem: &LpProblem) -> Result<MilpSolution, SolverError> {
        let sf = problem.standard_form()?;
        let mut stats = SearchStats::default();
        let mut stack = vec![SearchNode {
            tableau: Tableau::from_standard_form(&sf),
            depth: 0,
        }];

        // Best integral solution so far, in internal minimize sign.
        let mut incumbent: Option<(f64, Tableau)> = None;
        let mut complete = true;

        while let Some(node) = stack.pop() {
            if self.node_limit.is_some_and(|l| stats.processed_nodes >= l as u64) {
                complete = false;
                break;
            }
            stats.processed_nodes += 1;
            stats.max_depth = stats.max_depth.max(node.depth);

            let mut tableau = node.tableau;
            match self.optimize(&mut tableau, &mut stats) {
                Ok(()) => {}
                Err(SolverError::Infeasible) => continue,
                // A finite integer optimum cannot exist under an unbounded
                // relaxation.
                Err(e) => return Err(e),
            }

            // Bound pruning: the relaxation value bounds every descendant,
            // so a node that cannot strictly beat the incumbent is done.
            let relaxed = -tableau.objective_rhs();
            if let Some((best, _)) = &incumbent {
                if relaxed >= *best {
                    stats.pruned_nodes += 1;
                    continue;
                }
            }

            match self.first_fractional_row(&tableau) {
                None => {
                    incumbent = Some((relaxed, tableau));
                }
                Some(row) => {
                    let depth = node.depth + 1;
                    stack.push(SearchNode {
                        tableau: tableau.with_bound(row, false, self.tolerance, &mut stats),
                        depth,
                    });
                    stack.push(SearchNode {
                        tableau: tableau.with_bound(row, true, self.tolerance, &mut stats),
                        depth,
                    });
                }
            }
        }

        let Some((_, tableau)) = incumbent else {
            return Err(SolverError::NoIntegerSolution);
        };

        let values = extract_values(&tableau)
            .into_iter()
            .map(|v| {
                if (v - v.round()).abs() < self.tolerance {
                    v.round()
                } else {
                    v
                }
            })
            .collect();

        Ok(MilpSolution {
            values,
            value: sf.objective_value(tableau.objective_rhs()),
            stats,
            complete,
        })
    }

    /// First constraint row, in row order, whose basic variable is
    /// structural and fractional. `None` means the solution is integral.
    fn first_fractional_row(&self, tableau: &Tableau) -> Option<usize> {
        (0..tableau.n_constraints).find(|&r| {
            let col = tableau.basis[r];
            if col >= tableau.n_structural {
                return false;
            }
            let v = tableau.rhs(r);
            (v - v.round()).abs() >= self.tolerance
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ConstraintOp;

    fn fractional_relaxation() -> LpProblem {
        // Maximize x1 + x2 s.t. 2x1 + x2 <= 5, x1 + 3x2 <= 6.
        // Relaxed optimum is (1.8, 1.4) with value 3.2; integer optimum is
        // (2, 1) with value 3.
        let mut problem = LpProblem::new(2);
        problem.set_objective(vec![1.0, 1.0], false);
        problem.add_constraint(vec![2.0, 1.0], ConstraintOp::Le, 5.0);
        problem.add_constraint(vec![1.0, 3.0], ConstraintOp::Le, 6.0);
        problem
    }

    #[test]
    fn rounds_down_a_fractional_relaxation() {
        let solution = Solver::new().solve_milp(&fractional_relaxation()).unwrap();

        assert!(solution.complete);
        assert!((solution.value - 3.0).abs() < 1e-6);
        assert!((solution.values[0] - 2.0).abs() < 1e-6);
        assert!((solution.values[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn matches_brute_force_enumeration() {
        let relaxed = Solver::new().solve_lp(&fractional_relaxation()).unwrap();
        let solution = Solver::new().solve_milp(&fractional_relaxation()).unwrap();

        // Weak duality: the integer optimum cannot beat the relaxation.
        assert!(solution.value <= relaxed.value + 1e-6);

        let mut best = f64::NEG_INFINITY;
        for x1 in 0..=5 {
            for x2 in 0..=6 {
                let (x1, x2) = (x1 as f64, x2 as f64);
                if 2.0 * x1 + x2 <= 5.0 && x1 + 3.0 * x2 <= 6.0 {
                    best = best.max(x1 + x2);
                }
            }
        }
        assert!((solution.value - best).abs() < 1e-6);
    }

    #[test]
    fn integral_relaxation_needs_no_branching() {
        let mut problem = LpProblem::new(1);
        problem.set_objective(vec![1.0], false);
        problem.add_constraint(vec![1.0], ConstraintOp::Le, 3.0);

        let solution = Solver::new().solve_milp(&problem).unwrap();

        assert!((solution.value - 3.0).abs() < 1e-6);
        assert_eq!(solution.stats.processed_nodes, 1);
        assert_eq!(solution.stats.pruned_nodes, 0);
        assert_eq!(solution.stats.max_depth, 0);
    }

    #[test]
    fn minimization_direction_prunes_correctly() {
        // Minimize 2x1 + 3x2 s.t. x1 + x2 >= 3.5. Relaxation gives
        // x1 = 3.5; the integer optimum is (4, 0) with value 8.
        let mut problem = LpProblem::new(2);
        problem.set_objective(vec![2.0, 3.0], true);
        problem.add_constraint(vec![1.0, 1.0], ConstraintOp::Ge, 3.5);

        let solution = Solver::new().solve_milp(&problem).unwrap();

        assert!((solution.value - 8.0).abs() < 1e-6);
        assert!((solution.values[0] - 4.0).abs() < 1e-6);
        assert!((solution.values[1] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn infeasible_root_has_no_integer_solution() {
        let mut problem = LpProblem::new(1);
        problem.set_objective(vec![1.0], false);
        problem.add_constraint(vec![1.0], ConstraintOp::Le, 1.0);
        problem.add_constraint(vec![1.0], ConstraintOp::Ge, 2.0);

        assert_eq!(
            Solver::new().solve_milp(&problem),
            Err(SolverError::NoIntegerSolution)
        );
    }

    #[test]
    fn feasible_relaxation_without_integer_point() {
        // 2x = 1 forces x = 0.5; both branches are infeasible.
        let mut problem = LpProblem::new(1);
        problem.set_objective(vec![1.0], false);
        problem.add_constraint(vec![2.0], ConstraintOp::Eq, 1.0);

        assert_eq!(
            Solver::new().solve_milp(&problem),
            Err(SolverError::NoIntegerSolution)
        );
    }

    #[test]
    fn unbounded_relaxation_aborts_the_search() {
        let mut problem = LpProblem::new(1);
        problem.set_objective(vec![1.0], false);

        assert_eq!(
            Solver::new().solve_milp(&problem),
            Err(SolverError::Unbounded)
        );
    }

    #[test]
    fn node_budget_returns_best_effort_incumbent() {
        // The ceil branch (x1 >= 2) is explored first and yields the true
        // integer optimum, so a two-node budget already has an incumbent
        // when it runs out.
        let solver = Solver::new().with_node_limit(2);
        let solution = solver.solve_milp(&fractional_relaxation()).unwrap();

        assert!(!solution.complete);
        assert!((solution.value - 3.0).abs() < 1e-6);
    }

    #[test]
    fn statistics_reflect_the_search() {
        let solution = Solver::new().solve_milp(&fractional_relaxation()).unwrap();

        assert!(solution.stats.pivots > 0);
        assert!(solution.stats.processed_nodes >= 3);
        assert!(solution.stats.max_depth >= 1);
    }
}

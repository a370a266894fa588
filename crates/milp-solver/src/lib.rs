mod branch;
mod error;
mod pivot;
mod problem;
mod simplex;
mod solution;
mod tableau;

pub use error::SolverError;
pub use pivot::PivotRule;
pub use problem::{Constraint, ConstraintOp, LpProblem, Objective};
pub use simplex::Solver;
pub use solution::{LpSolution, MilpSolution, SearchStats};

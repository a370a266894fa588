use thiserror::Error;

/// Terminal outcomes of a solve that carry no solution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Malformed problem: {0}")]
    MalformedProblem(String),
    #[error("The problem has no feasible solution")]
    Infeasible,
    #[error("The objective is unbounded")]
    Unbounded,
    #[error("No integer-feasible solution exists")]
    NoIntegerSolution,
    #[error("Iteration limit reached before convergence")]
    IterationLimit,
}

/// The result of solving a plain LP to optimality
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// Optimal values for each structural variable
    pub values: Vec<f64>,
    /// Optimal objective value, in the problem's original direction
    pub value: f64,
    /// Number of pivots performed
    pub pivots: u64,
}

/// The result of a branch-and-bound solve
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MilpSolution {
    /// Integer-optimal values for each structural variable
    pub values: Vec<f64>,
    /// Objective value of the incumbent, in the problem's original direction
    pub value: f64,
    /// Search diagnostics
    pub stats: SearchStats,
    /// False when a node budget cut the search short and `values` is only
    /// the best incumbent found so far
    pub complete: bool,
}

/// Diagnostic counters accumulated during a solve.
///
/// Observability only: nothing in the solver reads these back to make
/// decisions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Total Gaussian-elimination pivots across all nodes
    pub pivots: u64,
    /// Nodes popped from the search stack and solved
    pub processed_nodes: u64,
    /// Nodes discarded because their relaxation could not beat the incumbent
    pub pruned_nodes: u64,
    /// Deepest branching depth reached
    pub max_depth: usize,
}

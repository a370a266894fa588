use crate::tableau::Tableau;

/// Entering-column selection strategy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotRule {
    /// Most-negative reduced cost. Fastest in practice.
    #[default]
    Dantzig,
    /// Leftmost negative reduced cost. Guarantees termination under
    /// degeneracy at the cost of more pivots.
    Bland,
}

/// Pick the entering column from the bottom objective row, scanning columns
/// `0..limit`. Returns `None` when every reduced cost is `> -tol`, i.e. the
/// tableau is optimal for that objective.
pub(crate) fn entering_column(
    tab: &Tableau,
    rule: PivotRule,
    tol: f64,
    limit: usize,
) -> Option<usize> {
    let objective = &tab.rows[tab.rows.len() - 1];

    match rule {
        PivotRule::Dantzig => {
            let mut best_col = None;
            let mut best_val = -tol;
            for (j, &x) in objective[..limit].iter().enumerate() {
                if x < best_val {
                    best_val = x;
                    best_col = Some(j);
                }
            }
            best_col
        }
        PivotRule::Bland => objective[..limit].iter().position(|&x| x <= -tol),
    }
}

/// Minimum-ratio test over the constraint rows: among rows with a strictly
/// positive entry in `col`, the one minimizing `rhs / entry`, ties going to
/// the lowest row index. `None` means the column is unbounded.
pub(crate) fn leaving_row(tab: &Tableau, col: usize, tol: f64) -> Option<usize> {
    let rhs_col = tab.width() - 1;
    let mut best_row = None;
    let mut best_ratio = f64::INFINITY;

    for (i, row) in tab.rows[..tab.n_constraints].iter().enumerate() {
        let entry = row[col];
        if entry <= tol {
            continue;
        }
        let ratio = row[rhs_col] / entry;
        if ratio < best_ratio {
            best_ratio = ratio;
            best_row = Some(i);
        }
    }

    best_row
}

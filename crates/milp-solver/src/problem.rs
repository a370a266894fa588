use crate::error::SolverError;

/// Represents a linear programming problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct LpProblem {
    /// Number of structural (decision) variables
    pub n_vars: usize,
    /// Objective function
    pub objective: Objective,
    /// Constraints
    pub constraints: Vec<Constraint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Objective {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Whether to minimize or maximize
    pub minimize: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub op: ConstraintOp,
    /// Right-hand side value
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

impl LpProblem {
    pub fn new(n_vars: usize) -> Self {
        Self {
            n_vars,
            objective: Objective {
                coefficients: vec![0.0; n_vars],
                minimize: true,
            },
            constraints: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>, minimize: bool) {
        self.objective = Objective { coefficients, minimize };
    }

    pub fn add_constraint(&mut self, coefficients: Vec<f64>, op: ConstraintOp, rhs: f64) {
        self.constraints.push(Constraint { coefficients, op, rhs });
    }

    pub fn num_variables(&self) -> usize {
        self.n_vars
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Normalize to standard `<=` form: `>=` rows are sign-flipped, `=` rows
    /// contribute two opposing `<=` rows, and a maximize objective is negated
    /// into the internal minimize form.
    ///
    /// Shape mismatches surface here, before any pivoting.
    pub(crate) fn standard_form(&self) -> Result<StandardForm, SolverError> {
        if self.objective.coefficients.len() != self.n_vars {
            return Err(SolverError::MalformedProblem(format!(
                "objective has {} coefficients, expected {}",
                self.objective.coefficients.len(),
                self.n_vars
            )));
        }

        let mut a = Vec::new();
        let mut b = Vec::new();

        for (i, c) in self.constraints.iter().enumerate() {
            if c.coefficients.len() != self.n_vars {
                return Err(SolverError::MalformedProblem(format!(
                    "constraint {} has {} coefficients, expected {}",
                    i,
                    c.coefficients.len(),
                    self.n_vars
                )));
            }

            if matches!(c.op, ConstraintOp::Le | ConstraintOp::Eq) {
                a.push(c.coefficients.clone());
                b.push(c.rhs);
            }
            if matches!(c.op, ConstraintOp::Ge | ConstraintOp::Eq) {
                a.push(c.coefficients.iter().map(|&x| -x).collect());
                b.push(-c.rhs);
            }
        }

        let c_min = if self.objective.minimize {
            self.objective.coefficients.clone()
        } else {
            self.objective.coefficients.iter().map(|&x| -x).collect()
        };

        Ok(StandardForm {
            a,
            b,
            c: c_min,
            minimize: self.objective.minimize,
        })
    }
}

/// An LP normalized to `min c'x  s.t.  Ax <= b, x >= 0`.
#[derive(Debug, Clone)]
pub(crate) struct StandardForm {
    pub a: Vec<Vec<f64>>,
    pub b: Vec<f64>,
    /// Objective in minimize form (negated when the original maximizes)
    pub c: Vec<f64>,
    pub minimize: bool,
}

impl StandardForm {
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Recover the objective value in the original direction from the
    /// objective row's RHS entry (which holds the negated minimize value).
    pub fn objective_value(&self, objective_rhs: f64) -> f64 {
        if self.minimize { -objective_rhs } else { objective_rhs }
    }
}

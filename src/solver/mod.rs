//! Solver backends for the selection model.
//!
//! The optimizer only needs an engine that takes a [`LinearModel`] and comes
//! back with an optimal 0/1 assignment or an infeasibility signal. Backends
//! translate the whole model on every call; variable identities live in the
//! model, so cuts added between calls refer to the same courses.

#[cfg(feature = "cp-sat")]
pub mod cp_sat;
pub mod microlp;

use crate::error::CoverError;
use crate::model::{LinearConstraint, LinearModel};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What a backend made of one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// `assignment[i]` is the value of variable `i` in an optimal solution.
    Optimal(Vec<bool>),
    Infeasible,
}

/// An ILP engine able to minimize the selection model.
///
/// Anything other than an optimum or a proof of infeasibility (time limits,
/// numerical trouble, crashes) must come back as
/// [`CoverError::SolverMalfunction`].
pub trait IlpSolver {
    fn name(&self) -> &'static str;

    fn solve(&mut self, model: &LinearModel) -> Result<SolveOutcome, CoverError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    #[default]
    Microlp,
    CpSat,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SolverOptions {
    #[serde(default)]
    pub backend: Backend,

    /// Wall-clock limit per solve, for backends that support one.
    #[serde(default)]
    pub time_limit_seconds: Option<f64>,
}

/// Instantiate the configured backend.
pub fn build_solver(options: &SolverOptions) -> Result<Box<dyn IlpSolver>, CoverError> {
    match options.backend {
        Backend::Microlp => {
            if options.time_limit_seconds.is_some() {
                warn!("microlp has no time limit, ignoring time_limit_seconds");
            }
            Ok(Box::new(microlp::MicroLpSolver))
        }
        #[cfg(feature = "cp-sat")]
        Backend::CpSat => Ok(Box::new(cp_sat::CpSatSolver::new(options.time_limit_seconds))),
        #[cfg(not(feature = "cp-sat"))]
        Backend::CpSat => Err(CoverError::Invalid(
            "the cp-sat backend needs the `cp-sat` cargo feature".into(),
        )),
    }
}

/// Constraints that mention at least one variable, or `None` when a
/// constraint without variables can never hold.
pub(crate) fn active_constraints(model: &LinearModel) -> Option<Vec<&LinearConstraint>> {
    let none_selected = vec![false; model.num_vars()];
    let mut active = Vec::with_capacity(model.constraints().len());
    for constraint in model.constraints() {
        if !constraint.is_constant() {
            active.push(constraint);
        } else if !constraint.is_satisfied_by(&none_selected) {
            return None;
        }
    }
    Some(active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConstraintKind;

    #[test]
    fn constant_constraints_are_resolved_up_front() {
        let mut model = LinearModel::new(2);
        model.add_ge("Requirement_Empty", ConstraintKind::Coverage, Vec::new(), 0);
        model.add_ge("Requirement_A", ConstraintKind::Coverage, vec![(0, 1)], 1);
        let active = active_constraints(&model).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Requirement_A");

        model.add_ge("Requirement_Impossible", ConstraintKind::Coverage, Vec::new(), 1);
        assert!(active_constraints(&model).is_none());
    }

    #[test]
    fn default_backend_is_microlp() {
        let solver = build_solver(&SolverOptions::default()).unwrap();
        assert_eq!(solver.name(), "microlp");
    }
}

//! OR-Tools CP-SAT backend.

use super::{IlpSolver, SolveOutcome, active_constraints};
use crate::error::CoverError;
use crate::model::{LinearModel, Sense};
use cp_sat::builder::{BoolVar, CpModelBuilder, LinearExpr};
use cp_sat::proto::{CpSolverStatus, SatParameters};

pub struct CpSatSolver {
    params: SatParameters,
}

impl CpSatSolver {
    pub fn new(time_limit_seconds: Option<f64>) -> Self {
        let mut params = SatParameters::default();
        params.max_time_in_seconds = time_limit_seconds;
        // one worker and a fixed seed, so reruns pick the same optimum
        params.num_search_workers = Some(1);
        params.random_seed = Some(42);
        params.log_search_progress = Some(false);
        Self { params }
    }
}

impl IlpSolver for CpSatSolver {
    fn name(&self) -> &'static str {
        "cp-sat"
    }

    fn solve(&mut self, lp: &LinearModel) -> Result<SolveOutcome, CoverError> {
        let Some(constraints) = active_constraints(lp) else {
            return Ok(SolveOutcome::Infeasible);
        };

        let mut model = CpModelBuilder::default();
        let vars: Vec<BoolVar> = (0..lp.num_vars()).map(|_| model.new_bool_var()).collect();

        for constraint in constraints {
            let expr: LinearExpr = constraint
                .terms
                .iter()
                .map(|&(var, coef)| (coef, vars[var].clone()))
                .collect();
            match constraint.sense {
                Sense::AtLeast => model.add_ge(expr, LinearExpr::from(constraint.rhs)),
                Sense::AtMost => model.add_le(expr, LinearExpr::from(constraint.rhs)),
            };
        }

        let objective: LinearExpr = lp.objective().map(|(var, coef)| (coef, vars[var].clone())).collect();
        model.minimize(objective);

        let response = model.solve_with_parameters(&self.params);
        match response.status() {
            CpSolverStatus::Optimal => Ok(SolveOutcome::Optimal(
                vars.iter().map(|v| v.solution_value(&response)).collect(),
            )),
            CpSolverStatus::Infeasible => Ok(SolveOutcome::Infeasible),
            status => Err(CoverError::malfunction(
                self.name(),
                format!("search stopped with status {status:?}"),
            )),
        }
    }
}

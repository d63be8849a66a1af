//! Pure-Rust backend: `good_lp` driving the `microlp` branch-and-bound engine.

use super::{IlpSolver, SolveOutcome, active_constraints};
use crate::error::CoverError;
use crate::model::{LinearModel, Sense};
use good_lp::solvers::microlp::microlp;
use good_lp::constraint::{geq, leq};
use good_lp::{Expression, ProblemVariables, ResolutionError, Solution, SolverModel, variable};

#[derive(Debug, Default, Clone, Copy)]
pub struct MicroLpSolver;

impl IlpSolver for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&mut self, model: &LinearModel) -> Result<SolveOutcome, CoverError> {
        let Some(constraints) = active_constraints(model) else {
            return Ok(SolveOutcome::Infeasible);
        };

        let mut vars = ProblemVariables::new();
        let x: Vec<_> = (0..model.num_vars())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let mut objective = Expression::with_capacity(x.len());
        for (var, coef) in model.objective() {
            objective.add_mul(coef as f64, x[var]);
        }

        let mut problem = vars.minimise(objective).using(microlp);
        for constraint in constraints {
            let mut lhs = Expression::with_capacity(constraint.terms.len());
            for &(var, coef) in &constraint.terms {
                lhs.add_mul(coef as f64, x[var]);
            }
            let rhs = constraint.rhs as f64;
            problem.add_constraint(match constraint.sense {
                Sense::AtLeast => geq(lhs, rhs),
                Sense::AtMost => leq(lhs, rhs),
            });
        }

        match problem.solve() {
            Ok(solution) => Ok(SolveOutcome::Optimal(
                x.iter().map(|&xi| solution.value(xi) >= 0.5).collect(),
            )),
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome::Infeasible),
            Err(e) => Err(CoverError::malfunction(self.name(), e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConstraintKind;

    #[test]
    fn picks_the_single_course_covering_both() {
        // x0 covers A, x1 covers B, x2 covers both
        let mut model = LinearModel::new(3);
        model.add_ge("Requirement_A", ConstraintKind::Coverage, vec![(0, 1), (2, 1)], 1);
        model.add_ge("Requirement_B", ConstraintKind::Coverage, vec![(1, 1), (2, 1)], 1);

        let outcome = MicroLpSolver.solve(&model).unwrap();
        assert_eq!(outcome, SolveOutcome::Optimal(vec![false, false, true]));
    }

    #[test]
    fn reports_infeasible() {
        let mut model = LinearModel::new(2);
        model.add_ge("Requirement_A", ConstraintKind::Coverage, vec![(0, 1), (1, 1)], 2);
        model.add_le("Unique_A 1", ConstraintKind::Uniqueness, vec![(0, 1), (1, 1)], 1);

        assert_eq!(MicroLpSolver.solve(&model).unwrap(), SolveOutcome::Infeasible);
    }

    #[test]
    fn no_constraints_selects_nothing() {
        let model = LinearModel::new(4);
        assert_eq!(
            MicroLpSolver.solve(&model).unwrap(),
            SolveOutcome::Optimal(vec![false; 4])
        );
    }
}

//! The linear model handed to solver backends, and the context it is built in.
use super::model_groups::ExclusionGroups;
use super::model_matrix::RequirementMatrix;
use super::model_requirements::{add_coverage_constraints, add_uniqueness_constraints};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    AtLeast,
    AtMost,
}

/// Where a constraint came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Coverage,
    Uniqueness,
    NoGood,
}

/// `sum coef * x_var  (>= | <=)  rhs` over binary variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub name: String,
    pub kind: ConstraintKind,
    pub terms: Vec<(usize, i64)>,
    pub sense: Sense,
    pub rhs: i64,
}

impl LinearConstraint {
    pub fn lhs(&self, assignment: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|(var, _)| assignment[*var])
            .map(|(_, coef)| coef)
            .sum()
    }

    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        let lhs = self.lhs(assignment);
        match self.sense {
            Sense::AtLeast => lhs >= self.rhs,
            Sense::AtMost => lhs <= self.rhs,
        }
    }

    /// No variables: the constraint is decided by its right-hand side alone.
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|(_, coef)| *coef == 0)
    }
}

/// Binary minimization model: minimize the number of variables set to 1.
///
/// Variables are identified by candidate index and never renumbered, so cuts
/// added after a solve refer to the same courses as the original constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearModel {
    num_vars: usize,
    constraints: Vec<LinearConstraint>,
    num_cuts: usize,
}

impl LinearModel {
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            constraints: Vec::new(),
            num_cuts: 0,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Objective coefficients. Every course counts once.
    pub fn objective(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        (0..self.num_vars).map(|var| (var, 1))
    }

    pub fn objective_value(&self, assignment: &[bool]) -> i64 {
        assignment.iter().filter(|&&x| x).count() as i64
    }

    pub fn add_ge(&mut self, name: impl Into<String>, kind: ConstraintKind, terms: Vec<(usize, i64)>, rhs: i64) {
        self.push(name.into(), kind, terms, Sense::AtLeast, rhs);
    }

    pub fn add_le(&mut self, name: impl Into<String>, kind: ConstraintKind, terms: Vec<(usize, i64)>, rhs: i64) {
        self.push(name.into(), kind, terms, Sense::AtMost, rhs);
    }

    fn push(&mut self, name: String, kind: ConstraintKind, terms: Vec<(usize, i64)>, sense: Sense, rhs: i64) {
        debug_assert!(terms.iter().all(|(var, _)| *var < self.num_vars));
        self.constraints.push(LinearConstraint {
            name,
            kind,
            terms,
            sense,
            rhs,
        });
    }

    /// Forbid selecting every course of `selected` at once:
    /// `sum_{i in selected} x_i <= |selected| - 1`.
    pub fn add_no_good_cut(&mut self, selected: &[usize]) {
        self.num_cuts += 1;
        let name = format!("NoGood_{}", self.num_cuts);
        let terms = selected.iter().map(|&var| (var, 1)).collect();
        self.add_le(name, ConstraintKind::NoGood, terms, selected.len() as i64 - 1);
    }

    pub fn num_cuts(&self) -> usize {
        self.num_cuts
    }

    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        assignment.len() == self.num_vars && self.constraints.iter().all(|c| c.is_satisfied_by(assignment))
    }
}

/// State shared by the constraint-adding passes.
pub struct ModelBuilderContext<'a> {
    pub matrix: &'a RequirementMatrix,
    pub groups: &'a ExclusionGroups,
    pub model: LinearModel,
}

impl<'a> ModelBuilderContext<'a> {
    pub fn new(matrix: &'a RequirementMatrix, groups: &'a ExclusionGroups) -> Self {
        Self {
            matrix,
            groups,
            model: LinearModel::new(matrix.num_courses()),
        }
    }
}

/// Run every constraint pass and return the finished model.
pub fn build_model_pipeline(ctx: ModelBuilderContext<'_>) -> LinearModel {
    let mut ctx = ctx;
    add_coverage_constraints(&mut ctx);
    add_uniqueness_constraints(&mut ctx);
    debug!(
        variables = ctx.model.num_vars(),
        constraints = ctx.model.constraints().len(),
        "built selection model"
    );
    ctx.model
}

/// Build the selection model for a coverage matrix and its exclusion groups.
pub fn build_model(matrix: &RequirementMatrix, groups: &ExclusionGroups) -> LinearModel {
    build_model_pipeline(ModelBuilderContext::new(matrix, groups))
}

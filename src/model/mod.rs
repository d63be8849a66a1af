//! Model building and enumeration logic for the course selection solver.

mod enumerate;
mod model_context;
mod model_groups;
mod model_matrix;
mod model_requirements;

pub use enumerate::{EnumeratorState, SelectedCourse, Solution, SolutionEnumerator};
pub use model_context::{
    ConstraintKind, LinearConstraint, LinearModel, ModelBuilderContext, Sense, build_model, build_model_pipeline,
};
pub use model_groups::ExclusionGroups;
pub use model_matrix::RequirementMatrix;
pub use model_requirements::{add_coverage_constraints, add_uniqueness_constraints};

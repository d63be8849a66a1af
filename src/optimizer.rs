//! Entry points tying matrix, grouping, model and enumeration together.

use crate::course::Catalog;
use crate::error::CoverError;
use crate::model::{ExclusionGroups, RequirementMatrix, SelectedCourse, Solution, SolutionEnumerator, build_model};
use crate::requirements::RequirementCounts;
use crate::solver::IlpSolver;
use crate::solver::microlp::MicroLpSolver;
use tracing::info;

/// Find up to `max_solutions` distinct minimum-size course selections with
/// the default pure-Rust backend.
///
/// Fewer solutions (possibly none) come back when fewer exist; only a
/// misbehaving solver produces an error.
pub fn optimize_courses(
    catalog: &Catalog,
    requirements: &RequirementCounts,
    max_solutions: usize,
) -> Result<Vec<Solution>, CoverError> {
    optimize_with(&mut MicroLpSolver, catalog, requirements, max_solutions)
}

/// Same as [`optimize_courses`] with a caller-chosen backend.
pub fn optimize_with<S: IlpSolver + ?Sized>(
    solver: &mut S,
    catalog: &Catalog,
    requirements: &RequirementCounts,
    max_solutions: usize,
) -> Result<Vec<Solution>, CoverError> {
    let matrix = RequirementMatrix::build(catalog, requirements);
    let groups = ExclusionGroups::build(catalog);
    let model = build_model(&matrix, &groups);
    info!(
        event = "solve_start",
        backend = solver.name(),
        candidates = catalog.len(),
        categories = matrix.categories.len(),
        exclusion_groups = groups.len(),
        max_solutions,
    );

    let candidates = catalog.courses.iter().map(SelectedCourse::from).collect();
    SolutionEnumerator::new(model, candidates, solver, max_solutions).run()
}

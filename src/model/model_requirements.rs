//! Functions for adding requirement and uniqueness constraints.
use super::model_context::{ConstraintKind, ModelBuilderContext};

/// One `Requirement_<category>` constraint per category, zero counts included.
pub fn add_coverage_constraints(ctx: &mut ModelBuilderContext<'_>) {
    let matrix = ctx.matrix;
    for (j, category) in matrix.categories.iter().enumerate() {
        let terms: Vec<(usize, i64)> = matrix
            .coverage
            .iter()
            .enumerate()
            .filter(|(_, row)| row[j] > 0)
            .map(|(i, row)| (i, i64::from(row[j])))
            .collect();
        ctx.model.add_ge(
            format!("Requirement_{category}"),
            ConstraintKind::Coverage,
            terms,
            i64::from(matrix.required[j]),
        );
    }
}

/// At most one course per shared family: `Unique_<family key>`.
pub fn add_uniqueness_constraints(ctx: &mut ModelBuilderContext<'_>) {
    for (key, members) in ctx.groups.iter() {
        let terms = members.iter().map(|&i| (i, 1)).collect();
        ctx.model
            .add_le(format!("Unique_{key}"), ConstraintKind::Uniqueness, terms, 1);
    }
}

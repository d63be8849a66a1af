//! Projection of the candidate courses onto the requested categories.
use crate::course::Catalog;
use crate::requirements::RequirementCounts;
use tracing::debug;

/// Dense coverage matrix: `coverage[i][j]` is how many units of
/// `categories[j]` candidate `i` covers, `required[j]` how many are needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementMatrix {
    pub categories: Vec<String>,
    pub coverage: Vec<Vec<u32>>,
    pub required: Vec<u32>,
}

impl RequirementMatrix {
    /// Requested categories that are not columns of the catalog are skipped.
    /// An empty catalog gives an empty matrix.
    pub fn build(catalog: &Catalog, requirements: &RequirementCounts) -> Self {
        if catalog.is_empty() {
            return Self::default();
        }

        let mut categories = Vec::new();
        let mut required = Vec::new();
        for (name, count) in requirements.iter() {
            if catalog.has_category(name) {
                categories.push(name.to_string());
                required.push(count);
            } else {
                debug!(category = name, "requested category is not a column, ignoring");
            }
        }

        let coverage = catalog
            .courses
            .iter()
            .map(|course| categories.iter().map(|c| course.coverage_of(c)).collect())
            .collect();

        Self {
            categories,
            coverage,
            required,
        }
    }

    pub fn num_courses(&self) -> usize {
        self.coverage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coverage.is_empty()
    }

    /// Total coverage available for category `j` across all candidates.
    pub fn available(&self, j: usize) -> u64 {
        self.coverage.iter().map(|row| u64::from(row[j])).sum()
    }
}

//! Narrowing the course table before optimization.

use crate::course::{Catalog, Course};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Courses to leave out of the candidate set. Every list defaults to empty,
/// and an empty list excludes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExclusionFilters {
    /// College prefixes, matched against the first token (`SAR` in `SAR HS 300`).
    #[serde(default)]
    pub departments: Vec<String>,

    /// Departments, matched against the token after the college (`BI` in `CAS BI 108`).
    #[serde(default)]
    pub exact_departments: Vec<String>,

    /// Whole course codes.
    #[serde(default)]
    pub course_codes: Vec<String>,

    /// Case-insensitive substrings of the title.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ExclusionFilters {
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
            && self.exact_departments.is_empty()
            && self.course_codes.is_empty()
            && self.keywords.is_empty()
    }

    pub fn excludes(&self, course: &Course) -> bool {
        let code = &course.code;
        if code
            .college()
            .is_some_and(|college| self.departments.iter().any(|d| d == college))
        {
            return true;
        }
        if code
            .department()
            .is_some_and(|dept| self.exact_departments.iter().any(|d| d == dept))
        {
            return true;
        }
        if self.course_codes.iter().any(|c| c.trim() == code.as_str().trim()) {
            return true;
        }
        let title = course.title.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| title.contains(&k.to_lowercase()))
    }

    /// The catalog without excluded courses; survivors keep their order.
    pub fn apply(&self, catalog: &Catalog) -> Catalog {
        let kept = catalog.retain_courses(|course| !self.excludes(course));
        info!(
            before = catalog.len(),
            after = kept.len(),
            "applied exclusion filters"
        );
        kept
    }
}

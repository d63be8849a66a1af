//! Course records and the catalog they are loaded into.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A course code such as `CAS WR 120`.
///
/// The raw text is kept as-is; the college, department and family key are
/// derived views over it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first run of uppercase letters, e.g. `CAS` in `CAS WR 120`.
    pub fn college(&self) -> Option<&str> {
        let start = self.0.find(|c: char| c.is_ascii_uppercase())?;
        let rest = &self.0[start..];
        let end = rest
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }

    /// The uppercase token that follows the college, e.g. `WR` in `CAS WR 120`.
    pub fn department(&self) -> Option<&str> {
        let college = self.college()?;
        let start = self.0.find(college)? + college.len();
        let rest = &self.0[start..];
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() {
            return None;
        }
        let end = trimmed
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(trimmed.len());
        (end > 0).then(|| &trimmed[..end])
    }

    /// Subject plus catalog number, shared by every section and term of the
    /// same course: `CAS WR 120 A1` and `WR 120` both map to `WR 120`.
    ///
    /// Codes without an uppercase subject directly before a numeric token
    /// are their own family.
    pub fn family_key(&self) -> String {
        let tokens: Vec<&str> = self.0.split_whitespace().collect();
        for (k, token) in tokens.iter().enumerate().skip(1) {
            if !token.starts_with(|c: char| c.is_ascii_digit()) {
                continue;
            }
            let subject = tokens[k - 1];
            if subject.is_empty() || !subject.chars().all(|c| c.is_ascii_uppercase()) {
                continue;
            }
            let number: String = token
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            return format!("{subject} {number}");
        }
        self.0.trim().to_string()
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for CourseCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// One row of the course table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub code: CourseCode,
    pub title: String,
    /// Requirement category name -> how many units of it the course covers.
    /// Categories missing here are covered zero times.
    pub coverage: BTreeMap<String, u32>,
}

impl Course {
    pub fn new(code: impl Into<CourseCode>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            coverage: BTreeMap::new(),
        }
    }

    /// Builder-style helper used by loaders and tests.
    pub fn covering(mut self, category: impl Into<String>, count: u32) -> Self {
        self.coverage.insert(category.into(), count);
        self
    }

    pub fn coverage_of(&self, category: &str) -> u32 {
        self.coverage.get(category).copied().unwrap_or(0)
    }

    /// `Code - Title`, the label solutions are reported with.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.title)
    }
}

/// The category columns present in the data plus the ordered course rows.
///
/// Row position is the identity of a course for the optimizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<String>,
    pub courses: Vec<Course>,
}

impl Catalog {
    pub fn new(categories: Vec<String>, courses: Vec<Course>) -> Self {
        Self {
            categories,
            courses,
        }
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Keeps the category columns and the courses accepted by `keep`, in order.
    pub fn retain_courses(&self, mut keep: impl FnMut(&Course) -> bool) -> Catalog {
        Catalog {
            categories: self.categories.clone(),
            courses: self.courses.iter().filter(|c| keep(*c)).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn college_and_department() {
        let code = CourseCode::new("CAS WR 153E");
        assert_eq!(code.college(), Some("CAS"));
        assert_eq!(code.department(), Some("WR"));

        let bare = CourseCode::new("WR 120");
        assert_eq!(bare.college(), Some("WR"));
        assert_eq!(bare.department(), None);
    }

    #[test]
    fn family_key_drops_college_and_qualifiers() {
        assert_eq!(CourseCode::new("CAS WR 120").family_key(), "WR 120");
        assert_eq!(CourseCode::new("CAS WR 120 A1").family_key(), "WR 120");
        assert_eq!(CourseCode::new("WR 120 SUMMER").family_key(), "WR 120");
        assert_eq!(CourseCode::new("CAS WR 153E").family_key(), "WR 153E");
    }

    #[test]
    fn family_key_falls_back_to_code() {
        assert_eq!(CourseCode::new(" INTERNSHIP ").family_key(), "INTERNSHIP");
        assert_eq!(CourseCode::new("cas wr 120").family_key(), "cas wr 120");
    }

    #[test]
    fn label_and_coverage() {
        let course = Course::new("CAS PH 100", "Life's Big Questions").covering("Ethical Reasoning", 1);
        assert_eq!(course.label(), "CAS PH 100 - Life's Big Questions");
        assert_eq!(course.coverage_of("Ethical Reasoning"), 1);
        assert_eq!(course.coverage_of("Critical Thinking"), 0);
    }
}

//! Requested requirement categories and how many courses each needs.

use serde::{Deserialize, Serialize};

/// One requested category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub count: u32,
}

/// Ordered mapping from category name to required count.
///
/// Supply order is kept: it becomes the order of coverage constraints.
/// Inserting a name twice keeps its first position and the latest count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Requirement>", into = "Vec<Requirement>")]
pub struct RequirementCounts {
    entries: Vec<Requirement>,
}

impl RequirementCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, count: u32) {
        let name = name.into();
        match self.entries.iter_mut().find(|r| r.name == name) {
            Some(existing) => existing.count = count,
            None => self.entries.push(Requirement { name, count }),
        }
    }

    pub fn with(mut self, name: impl Into<String>, count: u32) -> Self {
        self.insert(name, count);
        self
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.iter().find(|r| r.name == name).map(|r| r.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|r| (r.name.as_str(), r.count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for RequirementCounts {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        let mut counts = RequirementCounts::new();
        for (name, count) in iter {
            counts.insert(name, count);
        }
        counts
    }
}

impl From<Vec<Requirement>> for RequirementCounts {
    fn from(entries: Vec<Requirement>) -> Self {
        entries.into_iter().map(|r| (r.name, r.count)).collect()
    }
}

impl From<RequirementCounts> for Vec<Requirement> {
    fn from(counts: RequirementCounts) -> Self {
        counts.entries
    }
}

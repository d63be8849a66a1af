//! Mutual-exclusion groups of candidates that are the same course.
use crate::course::Catalog;
use std::collections::BTreeMap;

/// Family key -> candidate indices, restricted to families with two or more
/// candidates. Sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionGroups {
    groups: BTreeMap<String, Vec<usize>>,
}

impl ExclusionGroups {
    pub fn build(catalog: &Catalog) -> Self {
        let mut by_key: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, course) in catalog.courses.iter().enumerate() {
            by_key.entry(course.code.family_key()).or_default().push(idx);
        }
        by_key.retain(|_, members| members.len() > 1);
        Self { groups: by_key }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn members(&self, key: &str) -> Option<&[usize]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

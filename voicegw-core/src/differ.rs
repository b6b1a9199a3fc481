//! Differ - Set of attributes the host reports as changed
//!
//! Update handlers only touch the remote fields whose attribute is part of the
//! [`ChangeSet`], so anything changed out of band on unrelated fields is kept.

use std::collections::BTreeSet;

/// Set of attribute names that changed in the current operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changed: BTreeSet<String>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a change set from attribute names reported by the host
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            changed: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.changed.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.changed.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.changed.iter().map(String::as_str)
    }
}

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::record::Field;

/// Field name → selected value. Empty values place no constraint.
///
/// Keys are kept verbatim so a selection on a name that is not a known field
/// still participates (it compares against the empty string and so matches
/// nothing once its value is non-empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection {
    entries: BTreeMap<String, String>,
}

/// One active constraint of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint<'a> {
    pub name: &'a str,
    /// `None` when `name` is not a recognized field.
    pub field: Option<Field>,
    pub value: &'a str,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set or clear a constraint. An empty value clears it.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if value.is_empty() {
            self.entries.remove(&name);
        } else {
            self.entries.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Constraints with a non-empty value.
    pub fn constraints(&self) -> impl Iterator<Item = Constraint<'_>> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(name, value)| Constraint {
                name: name.as_str(),
                field: name.parse().ok(),
                value: value.as_str(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.constraints().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.constraints().count()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSelection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut selection = FilterSelection::new();
        for (k, v) in iter {
            selection.set(k, v);
        }
        selection
    }
}

impl From<HashMap<String, String>> for FilterSelection {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

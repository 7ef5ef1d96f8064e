//! Identifiers exempt from reporting regardless of the compliance outcome.

use baseline_core::types::collections::FxHashSet;

/// Case-insensitive set of exempt names. Immutable for the run.
#[derive(Debug, Clone, Default)]
pub struct WhitelistSet {
    names: FxHashSet<String>,
}

impl WhitelistSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

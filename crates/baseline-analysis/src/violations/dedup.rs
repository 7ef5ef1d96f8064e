//! Insertion-ordered violation list deduplicated by `(file, line, feature)`.

use baseline_core::types::collections::FxHashSet;

use super::types::ViolationRecord;

/// Append-only violation collection. The first record for a site wins;
/// later records at the same `(file, line, feature)` are dropped.
#[derive(Debug, Clone, Default)]
pub struct ViolationSet {
    seen: FxHashSet<(String, u32, String)>,
    records: Vec<ViolationRecord>,
}

impl ViolationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; returns false if its site was already recorded.
    pub fn insert(&mut self, record: ViolationRecord) -> bool {
        let (file, line, feature) = record.dedup_key();
        let key = (file.to_string(), line, feature.to_string());
        if !self.seen.insert(key) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = ViolationRecord>) {
        for record in records {
            self.insert(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ViolationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ViolationRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violations::{ContextTag, ViolationKind};

    fn record(line: u32, feature: &str, context: ContextTag) -> ViolationRecord {
        ViolationRecord {
            file: "src/app.js".to_string(),
            line,
            column: 1,
            feature: feature.to_string(),
            kind: ViolationKind::Js,
            context,
            function_scope: None,
            message: None,
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let mut set = ViolationSet::new();
        assert!(set.insert(record(3, "at", ContextTag::FunctionCall)));
        assert!(!set.insert(record(3, "at", ContextTag::PropertyAccess)));
        assert!(set.insert(record(4, "at", ContextTag::PropertyAccess)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].context, ContextTag::FunctionCall);
    }
}

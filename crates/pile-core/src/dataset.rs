//! Append-only, insertion-ordered collection of pile records.

use crate::models::PileRecord;

/// Ordered sequence of [`PileRecord`]s for one session.
///
/// Records can only be appended; nothing removes, reorders or mutates a
/// stored record.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PileRecord>,
}

/// In/out-of-tolerance counts for a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToleranceSummary {
    pub total: usize,
    pub in_tolerance: usize,
    pub out_of_tolerance: usize,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return a reference to the stored copy.
    pub fn push(&mut self, record: PileRecord) -> &PileRecord {
        self.records.push(record);
        let last = self.records.len() - 1;
        &self.records[last]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PileRecord> {
        self.records.get(index)
    }

    /// All records in submission order.
    pub fn records(&self) -> &[PileRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PileRecord> {
        self.records.iter()
    }

    pub fn summary(&self) -> ToleranceSummary {
        let out_of_tolerance = self
            .records
            .iter()
            .filter(|r| !r.status().is_in_tolerance())
            .count();
        ToleranceSummary {
            total: self.records.len(),
            in_tolerance: self.records.len() - out_of_tolerance,
            out_of_tolerance,
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a PileRecord;
    type IntoIter = std::slice::Iter<'a, PileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use crate::tolerance::ToleranceStatus;

    fn record(id: &str, installed_x: f64) -> PileRecord {
        PileRecord::new(
            id,
            Position::new(0.0, 0.0, 2.5),
            Position::new(installed_x, 0.0, 2.5),
        )
    }

    #[test]
    fn test_new_dataset_is_empty() {
        let ds = Dataset::new();
        assert!(ds.is_empty());
        assert_eq!(ds.len(), 0);
        assert!(ds.get(0).is_none());
        assert_eq!(ds.summary(), ToleranceSummary::default());
    }

    #[test]
    fn test_push_preserves_submission_order() {
        let mut ds = Dataset::new();
        for i in 0..25 {
            ds.push(record(&format!("P-{i}"), 0.0));
        }
        assert_eq!(ds.len(), 25);
        let ids: Vec<&str> = ds.iter().map(|r| r.pile_id()).collect();
        let expected: Vec<String> = (0..25).map(|i| format!("P-{i}")).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_push_returns_stored_record() {
        let mut ds = Dataset::new();
        ds.push(record("first", 0.0));
        let stored = ds.push(record("second", 0.5));
        assert_eq!(stored.pile_id(), "second");
        assert_eq!(stored.status(), ToleranceStatus::OutOfTolerance);
    }

    #[test]
    fn test_duplicate_identifiers_are_kept() {
        let mut ds = Dataset::new();
        ds.push(record("P-1", 0.0));
        ds.push(record("P-1", 0.1));
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].pile_id(), ds.records()[1].pile_id());
    }

    #[test]
    fn test_earlier_records_unchanged_by_later_pushes() {
        let mut ds = Dataset::new();
        ds.push(record("A", 0.1));
        let snapshot = ds.records()[0].clone();
        ds.push(record("B", 0.9));
        ds.push(record("C", 0.2));
        assert_eq!(ds.records()[0], snapshot);
    }

    #[test]
    fn test_summary_counts() {
        let mut ds = Dataset::new();
        ds.push(record("ok-1", 0.1));
        ds.push(record("bad-1", 0.5));
        ds.push(record("ok-2", -0.3));
        let s = ds.summary();
        assert_eq!(s.total, 3);
        assert_eq!(s.in_tolerance, 2);
        assert_eq!(s.out_of_tolerance, 1);
    }

    #[test]
    fn test_into_iterator_for_ref() {
        let mut ds = Dataset::new();
        ds.push(record("A", 0.0));
        ds.push(record("B", 0.0));
        let mut count = 0;
        for r in &ds {
            assert!(!r.pile_id().is_empty());
            count += 1;
        }
        assert_eq!(count, 2);
    }
}

/// 1-based line number within the indexed source.
pub type LineNumber = u32;

const INITIAL_LINE_CAPACITY: usize = 10;

/// Occurrence metadata for a single normalized word.
///
/// `lines` holds one entry per occurrence in the order they were recorded, so
/// a word seen twice on line 3 contributes `3` twice. The occurrence count is
/// the length of that list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    lines: Vec<LineNumber>,
}

impl WordRecord {
    pub fn new() -> Self {
        Self {
            lines: Vec::with_capacity(INITIAL_LINE_CAPACITY),
        }
    }

    /// Record one more occurrence on `line`. Duplicates are kept.
    pub fn add_occurrence(&mut self, line: LineNumber) {
        self.lines.push(line);
    }

    pub fn count(&self) -> usize {
        self.lines.len()
    }

    /// Line numbers in insertion order, not sorted.
    pub fn lines(&self) -> &[LineNumber] {
        &self.lines
    }
}

impl Default for WordRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_empty() {
        let record = WordRecord::new();
        assert_eq!(record.count(), 0);
        assert!(record.lines().is_empty());
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut record = WordRecord::new();
        for line in [3, 1, 3, 7] {
            record.add_occurrence(line);
        }
        assert_eq!(record.lines(), &[3, 1, 3, 7]);
        assert_eq!(record.count(), 4);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut record = WordRecord::new();
        let expected: Vec<LineNumber> = (1..=25).rev().collect();
        for line in &expected {
            record.add_occurrence(*line);
        }
        assert_eq!(record.count(), 25);
        assert_eq!(record.lines(), expected.as_slice());
    }
}

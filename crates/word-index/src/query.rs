use crate::index::Index;
use crate::record::WordRecord;

/// Read-only queries over a built [`Index`].
///
/// Counts are occurrence totals: a word seen five times contributes five.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    index: &'a Index,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a Index) -> Self {
        Self { index }
    }

    /// Look up `word` after lowercasing it. Blank input is simply absent.
    pub fn lookup(&self, word: &str) -> Option<&'a WordRecord> {
        self.index.table().get(&word.to_lowercase())
    }

    /// Total token occurrences in the source, not the number of distinct words.
    pub fn total_occurrence_count(&self) -> usize {
        self.index
            .table()
            .entries()
            .map(|(_, record)| record.count())
            .sum()
    }

    /// Occurrences of every word whose first char equals `letter` lowercased.
    pub fn count_starting_with(&self, letter: char) -> usize {
        let Some(letter) = letter.to_lowercase().next() else {
            return 0;
        };
        self.index
            .table()
            .entries()
            .filter(|(word, _)| word.chars().next() == Some(letter))
            .map(|(_, record)| record.count())
            .sum()
    }
}

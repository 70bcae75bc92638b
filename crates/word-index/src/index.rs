use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::query::QueryEngine;
use crate::record::LineNumber;
use crate::table::HashTable;
use crate::tokenize::tokenize_lines;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable word index over one text source.
#[derive(Debug, Clone)]
pub struct Index {
    table: HashTable,
}

impl Index {
    /// Build from pre-tokenized `(line, token)` pairs in source order.
    pub fn from_tokens<I, S>(tokens: I, bucket_count: usize) -> Self
    where
        I: IntoIterator<Item = (LineNumber, S)>,
        S: AsRef<str>,
    {
        let mut table = HashTable::new(bucket_count);
        for (line, token) in tokens {
            table.upsert(token.as_ref()).add_occurrence(line);
        }
        let index = Self { table };
        index.log_summary();
        index
    }

    /// Tokenize `reader` line by line and index every token.
    ///
    /// A read error anywhere aborts the build; nothing partial is returned.
    pub fn from_reader<R: BufRead>(reader: R, bucket_count: usize) -> Result<Self, IndexError> {
        let mut table = HashTable::new(bucket_count);
        for pair in tokenize_lines(reader) {
            let (line, token) = pair?;
            table.upsert(&token).add_occurrence(line);
        }
        let index = Self { table };
        index.log_summary();
        Ok(index)
    }

    pub fn build_from_file<P: AsRef<Path>>(
        path: P,
        bucket_count: usize,
    ) -> Result<Self, IndexError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file), bucket_count)
    }

    pub fn table(&self) -> &HashTable {
        &self.table
    }

    pub fn query(&self) -> QueryEngine<'_> {
        QueryEngine::new(self)
    }

    fn log_summary(&self) {
        info!(
            "total occurrences indexed: {}",
            self.query().total_occurrence_count()
        );
        debug!(
            "{} buckets, longest chain {}",
            self.table.bucket_count(),
            self.table.longest_chain()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn builds_from_token_pairs() {
        let index = Index::from_tokens([(1, "hello"), (1, "bro"), (2, "hello")], 7);
        let record = index.table().get("hello").expect("hello indexed");
        assert_eq!(record.lines(), &[1, 2]);
        assert_eq!(index.table().get("bro").map(|r| r.count()), Some(1));
    }

    #[test]
    fn reader_and_token_builds_agree() {
        let text = "Hello hello bro\nHorse bro\n";
        let from_reader = Index::from_reader(Cursor::new(text), 777).unwrap();
        let from_tokens = Index::from_tokens(
            [(1, "hello"), (1, "hello"), (1, "bro"), (2, "horse"), (2, "bro")],
            777,
        );
        for (word, record) in from_tokens.table().entries() {
            assert_eq!(from_reader.table().get(word), Some(record));
        }
        assert_eq!(
            from_reader.table().entries().count(),
            from_tokens.table().entries().count()
        );
    }

    #[test]
    fn empty_source_builds_empty_index() {
        let index = Index::from_reader(Cursor::new(""), 777).unwrap();
        assert_eq!(index.table().entries().count(), 0);
        assert_eq!(index.query().total_occurrence_count(), 0);
    }

    struct Unplugged;

    impl Read for Unplugged {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device unplugged"))
        }
    }

    #[test]
    fn read_failure_fails_the_build() {
        let reader = BufReader::new(Cursor::new("fine line\n").chain(Unplugged));
        let err = Index::from_reader(reader, 777).unwrap_err();
        assert!(matches!(err, IndexError::Io(_)));
    }

    #[test]
    fn invalid_utf8_does_not_fail_the_build() {
        let index = Index::from_reader(Cursor::new(b"fine\xffline\nbro\n".to_vec()), 777).unwrap();
        let query = index.query();
        assert_eq!(query.lookup("fine").map(|r| r.lines()), Some(&[1][..]));
        assert_eq!(query.lookup("line").map(|r| r.lines()), Some(&[1][..]));
        assert_eq!(query.lookup("bro").map(|r| r.lines()), Some(&[2][..]));
    }

    #[test]
    fn lone_carriage_return_starts_a_new_line() {
        let index = Index::from_reader(Cursor::new("alpha\rbeta\n"), 777).unwrap();
        assert_eq!(index.query().lookup("beta").map(|r| r.lines()), Some(&[2][..]));
    }
}

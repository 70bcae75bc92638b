//! In-memory word index over a single text source.
//!
//! Every distinct normalized word maps to a [`WordRecord`] holding its
//! occurrence count and the line numbers it appeared on, in source order.
//! Records live in a [`HashTable`] with a fixed number of chained buckets
//! chosen at construction (777 by default); the bucket count only affects
//! chain lengths, never query results.
//!
//! Building is a single pass: [`tokenize_lines`] turns a reader into
//! `(line, token)` pairs and [`Index`] upserts a record per token. After that
//! the index is read-only and can be shared freely; [`QueryEngine`] answers
//! lookups and occurrence statistics.
//!
//! ```rust
//! use std::io::Cursor;
//! use word_index::{DEFAULT_BUCKETS, Index};
//!
//! # fn main() -> Result<(), word_index::IndexError> {
//! let index = Index::from_reader(Cursor::new("Hello hello bro\nHorse bro\n"), DEFAULT_BUCKETS)?;
//! let query = index.query();
//! assert_eq!(query.lookup("Hello").map(|r| r.lines().to_vec()), Some(vec![1, 1]));
//! assert_eq!(query.total_occurrence_count(), 5);
//! assert_eq!(query.count_starting_with('h'), 3);
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p word-index --example stats -- <file> [word]`.

pub mod index;
pub mod query;
pub mod record;
pub mod table;
pub mod tokenize;

pub use index::{Index, IndexError};
pub use query::QueryEngine;
pub use record::{LineNumber, WordRecord};
pub use table::{DEFAULT_BUCKETS, HashTable};
pub use tokenize::{TokenLines, tokenize, tokenize_lines};

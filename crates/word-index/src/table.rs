use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::record::WordRecord;

pub const DEFAULT_BUCKETS: usize = 777;

type Chain = Vec<(String, WordRecord)>;

/// Separate-chaining hash table from normalized words to their records.
///
/// The bucket count is fixed at construction; chains grow instead. Keys are
/// unique within a chain and compared by exact string equality.
#[derive(Debug, Clone)]
pub struct HashTable {
    buckets: Vec<Chain>,
}

impl HashTable {
    /// Create a table with `bucket_count` slots. Zero is treated as one.
    pub fn new(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        Self {
            buckets: vec![Vec::new(); bucket_count],
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Return the record for `key`, creating an empty one on a miss.
    pub fn upsert(&mut self, key: &str) -> &mut WordRecord {
        let slot = self.slot(key);
        let chain = &mut self.buckets[slot];
        let pos = match chain.iter().position(|(k, _)| k == key) {
            Some(pos) => pos,
            None => {
                chain.push((key.to_owned(), WordRecord::new()));
                chain.len() - 1
            }
        };
        &mut chain[pos].1
    }

    pub fn get(&self, key: &str) -> Option<&WordRecord> {
        self.buckets[self.slot(key)]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, record)| record)
    }

    /// Every `(key, record)` pair, bucket by bucket.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &WordRecord)> + '_ {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|(k, r)| (k.as_str(), r)))
    }

    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    // DefaultHasher::new() uses fixed keys, so slots are stable across runs.
    fn slot(&self, key: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKETS)
    }
}

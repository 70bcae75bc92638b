use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use word_index::{DEFAULT_BUCKETS, Index};

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .context("usage: cargo run -p word-index --example stats -- <text-file> [word]")?;

    let start = Instant::now();
    let index = Index::build_from_file(&path, DEFAULT_BUCKETS)
        .with_context(|| format!("indexing {}", path.display()))?;
    println!("Source       : {}", path.display());
    println!("Built in     : {} ms", start.elapsed().as_millis());

    let query = index.query();
    println!("Total words  : {}", query.total_occurrence_count());
    println!("Buckets      : {}", index.table().bucket_count());
    println!("Longest chain: {}", index.table().longest_chain());

    for letter in ['a', 'e', 's', 't'] {
        println!("Starting with '{letter}': {}", query.count_starting_with(letter));
    }

    if let Some(word) = args.next() {
        match query.lookup(&word) {
            Some(record) => println!(
                "'{}' occurs {} times on lines {:?}",
                word,
                record.count(),
                record.lines()
            ),
            None => println!("'{word}' not found"),
        }
    }

    Ok(())
}

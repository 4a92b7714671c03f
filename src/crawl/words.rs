// src/crawl/words.rs
// =============================================================================
// Global word -> occurrence count table, shared by all workers.
// =============================================================================

use dashmap::DashMap;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct WordTable {
    counts: DashMap<String, usize>,
}

impl WordTable {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds one occurrence of `word` (case-insensitive)
    //
    // The entry stays locked from lookup to write-back, so concurrent
    // increments of the same word are never lost.
    pub fn increment(&self, word: &str) {
        *self.counts.entry(word.to_lowercase()).or_insert(0) += 1;
    }

    #[cfg(test)]
    pub fn get(&self, word: &str) -> usize {
        self.counts
            .get(&word.to_lowercase())
            .map(|count| *count)
            .unwrap_or(0)
    }

    // Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    // Copies the current counts out of the table
    pub fn snapshot(&self) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

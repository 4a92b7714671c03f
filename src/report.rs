// src/report.rs
// =============================================================================
// Turns the final word counts into something to print.
//
// Ranking: highest count first; equal counts are ordered alphabetically so
// the output is the same on every run.
//
// Two output formats:
// - text: one "word;count" line per entry
// - JSON: the crawl summary plus the ranked entries
// =============================================================================

use serde::Serialize;
use std::collections::HashMap;

use crate::crawl::CrawlSummary;

pub const DEFAULT_TOP: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: &'a CrawlSummary,
    top_words: &'a [WordCount],
}

// Returns at most `limit` entries, by descending count
pub fn top_words(counts: &HashMap<String, usize>, limit: usize) -> Vec<WordCount> {
    let mut ranked: Vec<WordCount> = counts
        .iter()
        .map(|(word, count)| WordCount {
            word: word.clone(),
            count: *count,
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(limit);
    ranked
}

// Renders entries as "word;count" lines
pub fn render_text(entries: &[WordCount]) -> String {
    entries
        .iter()
        .map(|entry| format!("{};{}\n", entry.word, entry.count))
        .collect()
}

pub fn render_json(summary: &CrawlSummary, entries: &[WordCount]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        summary,
        top_words: entries,
    })
}

// src/crawl/mod.rs
// =============================================================================
// This module is the concurrent crawl engine.
//
// Submodules, leaves first:
// - config: validated settings (seed, depth, pool size, timeouts)
// - visited: the set of admitted addresses
// - frontier: the queue of pages waiting to be fetched
// - words: the global word frequency table
// - state: the three structures above plus in-flight tracking
// - page: what a worker does with one page
// - scheduler: the dispatch loop and completion detection
//
// Features:
// - Every address is fetched at most once
// - No page deeper than max_depth is ever fetched
// - A failing page never affects the others
// - The crawl ends on its own once nothing is queued or in flight
// =============================================================================

mod config;
mod frontier;
mod page;
mod scheduler;
mod state;
mod visited;
mod words;

pub use config::{CrawlConfig, DEFAULT_MAX_DEPTH};
pub use scheduler::{CrawlOutcome, Scheduler};
pub use state::CrawlSummary;

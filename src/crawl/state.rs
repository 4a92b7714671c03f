// src/crawl/state.rs
// =============================================================================
// Everything a single crawl run shares between the scheduler and workers.
//
// CrawlState bundles:
// - the visited registry (who has been admitted)
// - the frontier (what is waiting to be fetched)
// - the word table (what has been counted)
// - the in-flight tracker (how many pages workers are processing right now)
// - page statistics for the final summary
//
// One instance is created per run, shared through an Arc, and dropped once
// the report has been produced.
// =============================================================================

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::debug;
use url::Url;

use super::frontier::{Frontier, WorkItem};
use super::visited::VisitedRegistry;
use super::words::WordTable;

// Counters reported at the end of the run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub addresses_admitted: usize,
    pub distinct_words: usize,
    pub abandoned_tasks: usize,
}

#[derive(Debug, Default)]
struct InFlight {
    count: AtomicUsize,
    finished: Notify,
}

#[derive(Debug)]
pub struct CrawlState {
    pub visited: VisitedRegistry,
    pub frontier: Frontier,
    pub words: WordTable,
    in_flight: InFlight,
    pages_fetched: AtomicUsize,
    pages_failed: AtomicUsize,
}

impl CrawlState {
    // Creates the state with `seed` already admitted and queued at depth 0
    pub fn new(seed: Url) -> Arc<Self> {
        let state = Self {
            visited: VisitedRegistry::new(),
            frontier: Frontier::new(),
            words: WordTable::new(),
            in_flight: InFlight::default(),
            pages_fetched: AtomicUsize::new(0),
            pages_failed: AtomicUsize::new(0),
        };
        state.discover(seed, 0);
        Arc::new(state)
    }

    // Admits `address` and, if this caller won the admission, queues it
    //
    // This is the only place work enters the frontier, so every queued
    // address is unique and the registry size always equals the number of
    // items ever queued.
    pub fn discover(&self, address: Url, depth: usize) -> bool {
        if !self.visited.admit(&address) {
            return false;
        }
        debug!(address = %address, depth, "admitted");
        self.frontier.push(WorkItem { address, depth });
        true
    }

    // Marks one page as being processed until the returned guard drops
    pub fn begin_task(self: &Arc<Self>) -> InFlightGuard {
        self.in_flight.count.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            state: Arc::clone(self),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.count.load(Ordering::SeqCst)
    }

    // True when nothing is queued and nothing is being processed
    //
    // The in-flight count is read first. A worker pushes its links before
    // its guard drops, so once the count reads zero every push it made is
    // already visible in the frontier.
    pub fn is_idle(&self) -> bool {
        self.in_flight() == 0 && self.frontier.is_empty()
    }

    // Resolves after the next in-flight task finishes (or immediately if one
    // finished since the last wait)
    pub async fn task_finished(&self) {
        self.in_flight.finished.notified().await;
    }

    pub fn record_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.pages_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self, abandoned_tasks: usize) -> CrawlSummary {
        CrawlSummary {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            pages_failed: self.pages_failed.load(Ordering::Relaxed),
            addresses_admitted: self.visited.len(),
            distinct_words: self.words.len(),
            abandoned_tasks,
        }
    }
}

// Decrements the in-flight count when dropped, also when the worker panics
// or is aborted
#[derive(Debug)]
pub struct InFlightGuard {
    state: Arc<CrawlState>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.state.in_flight.count.fetch_sub(1, Ordering::SeqCst);
        self.state.in_flight.finished.notify_one();
    }
}

// src/crawl/scheduler.rs
// =============================================================================
// The crawl loop: pulls work from the frontier, hands it to a bounded pool of
// workers, and decides when the crawl is over.
//
// States:
//   Running  - the frontier had work; keep dispatching
//   Draining - the frontier is empty but workers are still running; wait for
//              a push or a finished worker (at most DRAIN_POLL_INTERVAL),
//              then look again
//   Done     - frontier empty AND nothing in flight; nobody is left who
//              could produce more work
//
// After Done, the pool is closed and running workers get a grace period to
// finish before they are abandoned.
// =============================================================================

use futures::future::FutureExt;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::config::CrawlConfig;
use super::frontier::WorkItem;
use super::page::{extract_into, process_page, Extractor};
use super::state::{CrawlState, CrawlSummary, InFlightGuard};
use crate::error::CrawlError;
use crate::fetch::Fetcher;

// Upper bound on a single wait while draining. Wake-ups normally come from
// the frontier or a finishing worker well before this.
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Draining,
    Done,
}

// The result of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub summary: CrawlSummary,
    pub words: HashMap<String, usize>,
}

pub struct Scheduler {
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
    extractor: Extractor,
}

impl Scheduler {
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config,
            fetcher,
            extractor: extract_into,
        }
    }

    #[cfg(test)]
    fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    // Crawls from the configured seed until no work is left
    //
    // Page failures never end up here; the only errors are configuration
    // problems and a pool that closed underneath us.
    pub async fn run(self) -> Result<CrawlOutcome, CrawlError> {
        self.config.validate()?;

        let state = CrawlState::new(self.config.seed.clone());
        let pool = Arc::new(Semaphore::new(self.config.workers));
        let mut workers: FuturesUnordered<JoinHandle<()>> = FuturesUnordered::new();
        let mut phase = Phase::Running;

        debug!(
            seed = %self.config.seed,
            max_depth = self.config.max_depth,
            workers = self.config.workers,
            "crawl started"
        );

        loop {
            reap_finished(&mut workers);

            if let Some(item) = state.frontier.try_pop() {
                enter(&mut phase, Phase::Running);
                debug_assert!(item.depth <= self.config.max_depth);

                let permit = acquire_slot(&pool).await?;
                let guard = state.begin_task();

                workers.push(tokio::spawn(run_worker(
                    Arc::clone(&state),
                    Arc::clone(&self.fetcher),
                    item,
                    self.config.max_depth,
                    self.extractor,
                    permit,
                    guard,
                )));
                continue;
            }

            if state.is_idle() {
                enter(&mut phase, Phase::Done);
                break;
            }

            enter(&mut phase, Phase::Draining);
            tokio::select! {
                _ = state.frontier.pushed() => {}
                _ = state.task_finished() => {}
                _ = tokio::time::sleep(DRAIN_POLL_INTERVAL) => {}
            }
        }

        pool.close();
        let abandoned = drain_workers(&mut workers, self.config.grace_period).await;

        let summary = state.summary(abandoned);
        debug!(?summary, "crawl finished");

        Ok(CrawlOutcome {
            summary,
            words: state.words.snapshot(),
        })
    }
}

fn enter(phase: &mut Phase, next: Phase) {
    let from = *phase;
    if from != next {
        debug!(?from, to = ?next, "scheduler state");
        *phase = next;
    }
}

// Waits for a free worker slot
async fn acquire_slot(pool: &Arc<Semaphore>) -> Result<OwnedSemaphorePermit, CrawlError> {
    Arc::clone(pool)
        .acquire_owned()
        .await
        .map_err(|_| CrawlError::PoolClosed)
}

// One worker: process the page, log a failure, release the pool slot and
// the in-flight count (both dropped when this returns)
async fn run_worker(
    state: Arc<CrawlState>,
    fetcher: Arc<dyn Fetcher>,
    item: WorkItem,
    max_depth: usize,
    extract: Extractor,
    _permit: OwnedSemaphorePermit,
    _guard: InFlightGuard,
) {
    let address = item.address.clone();
    match process_page(&state, fetcher.as_ref(), item, max_depth, extract).await {
        Ok(outcome) => {
            debug!(
                address = %address,
                links = outcome.links_found,
                admitted = outcome.links_admitted,
                words = outcome.words,
                "page processed"
            );
        }
        Err(e) => {
            state.record_failed();
            warn!(address = %address, error = %e, "error loading page");
        }
    }
}

// Drops handles of workers that already finished, without waiting
fn reap_finished(workers: &mut FuturesUnordered<JoinHandle<()>>) {
    while let Some(Some(joined)) = workers.next().now_or_never() {
        if let Err(e) = joined {
            warn!(error = %e, "worker task did not complete");
        }
    }
}

// Waits up to `grace` for the remaining workers, then aborts the rest
//
// Returns how many workers were abandoned.
async fn drain_workers(workers: &mut FuturesUnordered<JoinHandle<()>>, grace: Duration) -> usize {
    let all_joined = tokio::time::timeout(grace, async {
        while let Some(joined) = workers.next().await {
            if let Err(e) = joined {
                warn!(error = %e, "worker task did not complete");
            }
        }
    })
    .await;

    if all_joined.is_ok() {
        return 0;
    }

    let abandoned = workers.len();
    for handle in workers.iter() {
        handle.abort();
    }
    warn!("{}", CrawlError::ShutdownTimeout { abandoned });
    abandoned
}

// src/crawl/page.rs
// =============================================================================
// What a worker does with one page.
//
// How it works:
// 1. Fetch the page. On failure, stop: no links, no words, no new work
// 2. Decode the body as UTF-8 (invalid sequences become U+FFFD)
// 3. On the blocking pool, parse the HTML and scan it once:
//    - each link, if the page isn't at max depth yet, is offered to the
//      visited registry and queued one level deeper when admitted
//    - each word goes into the word table
//
// Errors stay inside this function's Result; the scheduler logs them and
// moves on.
// =============================================================================

use scraper::Html;
use std::sync::Arc;
use tracing::info;

use super::frontier::WorkItem;
use super::state::CrawlState;
use crate::error::PageError;
use crate::extract::{scan, Found};
use crate::fetch::Fetcher;

// The blocking half of a page: parse `body` and feed links and words into
// the crawl state. `extract_into` is the one the crawler uses.
pub type Extractor = fn(&CrawlState, &[u8], &WorkItem, usize) -> PageOutcome;

// What a successfully processed page contributed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOutcome {
    pub links_found: usize,
    pub links_admitted: usize,
    pub words: usize,
}

// Fetches and processes one work item
//
// Parameters:
//   state: the shared crawl state the page feeds into
//   fetcher: where page bytes come from
//   item: the page and its depth
//   max_depth: links are only followed from pages shallower than this
//   extract: runs on the blocking pool; a panic there becomes PageError::Parse
//     and whatever it already added to `state` is kept
pub async fn process_page(
    state: &Arc<CrawlState>,
    fetcher: &dyn Fetcher,
    item: WorkItem,
    max_depth: usize,
    extract: Extractor,
) -> Result<PageOutcome, PageError> {
    info!(address = %item.address, depth = item.depth, "analyzing page");

    let body = fetcher.fetch(&item.address).await?;
    state.record_fetched();

    // Html isn't Send, so it is built and dropped inside the blocking task
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || extract(&state, &body, &item, max_depth))
        .await
        .map_err(|e| PageError::Parse(e.to_string()))
}

pub(super) fn extract_into(
    state: &CrawlState,
    body: &[u8],
    item: &WorkItem,
    max_depth: usize,
) -> PageOutcome {
    let text = String::from_utf8_lossy(body);
    let document = Html::parse_document(&text);

    let follow_links = item.depth < max_depth;
    let child_depth = item.depth + 1;
    let mut outcome = PageOutcome::default();

    for found in scan(&document, &item.address) {
        match found {
            Found::Link(address) => {
                outcome.links_found += 1;
                if follow_links && state.discover(address, child_depth) {
                    outcome.links_admitted += 1;
                }
            }
            Found::Word(word) => {
                state.words.increment(&word);
                outcome.words += 1;
            }
        }
    }

    outcome
}

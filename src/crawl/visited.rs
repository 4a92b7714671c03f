// src/crawl/visited.rs
// =============================================================================
// The set of every address the crawl has ever accepted.
//
// Admission is the only way into the frontier: an address is pushed only by
// the caller whose admit() call actually inserted it. The set only grows,
// which is what bounds the crawl.
// =============================================================================

use dashmap::DashSet;
use url::Url;

#[derive(Debug, Default)]
pub struct VisitedRegistry {
    seen: DashSet<Url>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Claims `address` for the caller
    //
    // Returns true iff this call inserted it. The test and the insert happen
    // under the same shard lock, so two workers racing on one address get
    // exactly one `true` between them.
    pub fn admit(&self, address: &Url) -> bool {
        self.seen.insert(address.clone())
    }

    #[cfg(test)]
    pub fn contains(&self, address: &Url) -> bool {
        self.seen.contains(address)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not `if !set.contains(x) { set.insert(x) }`?
//    - Between the contains() and the insert() another worker can do the
//      same check, and both would push the page. DashSet::insert reports
//      whether the value was new, which makes it a single atomic step.
//
// 2. Why DashSet instead of Mutex<HashSet>?
//    - DashSet splits its contents into shards, each with its own lock, so
//      workers admitting different addresses rarely wait on each other.
// -----------------------------------------------------------------------------

// src/crawl/frontier.rs
// =============================================================================
// The queue of pages waiting to be fetched.
//
// Any number of workers push into it while the scheduler pops from it. The
// queue is unbounded and lock-free (crossbeam's SegQueue). Every push also
// wakes the scheduler if it is waiting for work.
// =============================================================================

use crossbeam_queue::SegQueue;
use tokio::sync::Notify;
use url::Url;

// One page to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub address: Url,
    /// Link hops from the seed
    pub depth: usize,
}

#[derive(Debug, Default)]
pub struct Frontier {
    queue: SegQueue<WorkItem>,
    pushed: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: WorkItem) {
        self.queue.push(item);
        // notify_one keeps a permit if nobody is waiting yet, so a push that
        // lands just before the scheduler starts waiting is not lost
        self.pushed.notify_one();
    }

    pub fn try_pop(&self) -> Option<WorkItem> {
        self.queue.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    // Resolves after the next push (or immediately if one is pending)
    pub async fn pushed(&self) {
        self.pushed.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    fn item(path: &str, depth: usize) -> WorkItem {
        WorkItem {
            address: Url::parse(&format!("https://example.com/{}", path)).unwrap(),
            depth,
        }
    }

    #[test]
    fn test_push_pop_keeps_depth() {
        let frontier = Frontier::new();
        frontier.push(item("a", 0));
        frontier.push(item("b", 3));

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.try_pop(), Some(item("a", 0)));
        assert_eq!(frontier.try_pop(), Some(item("b", 3)));
        assert_eq!(frontier.try_pop(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_concurrent_pushers_lose_nothing() {
        let frontier = Frontier::new();

        std::thread::scope(|s| {
            for t in 0..4 {
                let frontier = &frontier;
                s.spawn(move || {
                    for i in 0..250 {
                        frontier.push(item(&format!("{}/{}", t, i), 1));
                    }
                });
            }
        });

        let mut seen = HashSet::new();
        while let Some(popped) = frontier.try_pop() {
            assert!(seen.insert(popped.address));
        }
        assert_eq!(seen.len(), 1000);
    }

    #[tokio::test]
    async fn test_push_before_wait_is_not_lost() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(item("early", 1));

        tokio::time::timeout(Duration::from_secs(1), frontier.pushed())
            .await
            .expect("stored permit should wake the waiter");
    }

    #[tokio::test]
    async fn test_push_wakes_waiter() {
        let frontier = Arc::new(Frontier::new());
        let waiter = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move { frontier.pushed().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        frontier.push(item("late", 1));

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should be woken")
            .unwrap();
    }
}

use std::sync::{Arc, PoisonError, RwLock};

use crate::api::finnhub::NewsItem;

#[cfg(test)]
mod tests;

/// Shared snapshot of the most recently fetched news.
///
/// The whole list is replaced at once, so a reader always sees one
/// complete fetch result and never a mix of two. Reads only clone the
/// inner `Arc` while holding the lock; copying items happens after it is
/// released.
///
/// Cloning the cache is cheap and every clone observes the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct NewsCache {
    snapshot: Arc<RwLock<Arc<[NewsItem]>>>,
}

impl NewsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically swaps the stored list for `items`. The previous snapshot
    /// is dropped after the write lock is released.
    pub fn replace(&self, items: Vec<NewsItem>) {
        let fresh: Arc<[NewsItem]> = Arc::from(items);
        let _previous = {
            let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, fresh)
        };
    }

    /// Returns the current snapshot as a whole.
    pub fn snapshot(&self) -> Arc<[NewsItem]> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Returns the first `n` items of the current snapshot, or all of them
    /// when fewer are stored.
    pub fn read(&self, n: usize) -> Vec<NewsItem> {
        let snapshot = self.snapshot();
        snapshot.iter().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

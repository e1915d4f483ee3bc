use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{api::FinnhubApi, app::cache::NewsCache, log::Log};

mod core;
mod data;
mod mock;

pub use data::{CollectorConfig, CollectorState, RefreshStats, query_window};
pub use mock::MockData;

/// The Collector actor periodically refreshes the news cache.
///
/// It fetches once at startup, then once per configured interval, and stops
/// when its cancellation token fires. Successful non-empty fetches replace
/// the cache snapshot; anything else leaves it untouched. The handle
/// watches the counters the loop publishes, so status queries never wait
/// for a fetch and keep the last counters once the loop has stopped.
#[derive(Debug, Clone)]
pub enum Collector {
    Actual(watch::Receiver<RefreshStats>),
    Mock(mock::Mock),
}

impl Collector {
    /// Starts the refresh loop and returns right away.
    ///
    /// # Returns
    /// The collector handle and the join handle of the loop task, which
    /// completes once `shutdown` is cancelled.
    pub fn spawn(
        config: CollectorConfig,
        api: FinnhubApi,
        cache: NewsCache,
        log: Log,
        shutdown: CancellationToken,
    ) -> (Self, JoinHandle<()>) {
        core::Core::new(config, api, cache, log).spawn(shutdown)
    }

    /// Creates a new mock Collector for testing.
    pub fn mock(data: MockData) -> Self {
        Self::Mock(mock::Mock::new(data))
    }

    /// Returns the latest refresh counters. They stay available after the
    /// loop has stopped.
    pub async fn stats(&self) -> RefreshStats {
        match self {
            Self::Actual(stats) => stats.borrow().clone(),
            Self::Mock(mock) => mock.stats().await,
        }
    }

    /// `Stopped` once the loop task has exited.
    pub async fn state(&self) -> CollectorState {
        match self {
            Self::Actual(stats) if stats.has_changed().is_err() => CollectorState::Stopped,
            Self::Actual(_) => CollectorState::Running,
            Self::Mock(mock) => mock.state().await,
        }
    }
}

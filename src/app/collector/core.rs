use chrono::Utc;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tokio_util::sync::CancellationToken;

use super::{
    Collector,
    data::{CollectorConfig, RefreshStats, query_window},
};
use crate::{api::FinnhubApi, app::cache::NewsCache, log::Log};

const SCOPE: &str = "app.collector";

/// The refresh loop. Sole writer of the news cache.
///
/// Counters are published on a watch channel after every change, so readers
/// never wait on a fetch in flight.
#[derive(Debug)]
pub struct Core {
    config: CollectorConfig,
    api: FinnhubApi,
    cache: NewsCache,
    log: Log,
    stats: watch::Sender<RefreshStats>,
}

impl Core {
    pub fn new(config: CollectorConfig, api: FinnhubApi, cache: NewsCache, log: Log) -> Self {
        Self {
            config,
            api,
            cache,
            log,
            stats: watch::Sender::new(RefreshStats::default()),
        }
    }

    /// Transforms the collector core instance into a task that runs until
    /// `shutdown` is cancelled.
    ///
    /// # Returns
    /// A tuple containing:
    /// - The `Collector` interface
    /// - A join handle for the spawned task
    pub fn spawn(self, shutdown: CancellationToken) -> (Collector, JoinHandle<()>) {
        let stats = self.stats.subscribe();
        let handle = tokio::spawn(self.run(shutdown));
        (Collector::Actual(stats), handle)
    }

    async fn run(self, shutdown: CancellationToken) {
        if shutdown.is_cancelled() {
            self.log
                .info(SCOPE, "Shutdown requested before the first refresh");
            return;
        }

        self.log.info(
            SCOPE,
            format!(
                "Refreshing {} news every {}s",
                self.config.symbol,
                self.config.interval.as_secs()
            ),
        );
        self.refresh().await;

        let period = self.config.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => self.refresh().await,
            }
        }

        self.log.info(SCOPE, "Refresh loop stopped");
    }

    /// Fetches the current query window and installs the result when it
    /// holds at least one item. Failures only get logged.
    async fn refresh(&self) {
        let symbol = self.config.symbol.clone();
        let (from, to) = query_window(Utc::now(), self.config.lookback_days);
        self.stats.send_modify(|stats| stats.attempts += 1);

        match self.api.company_news(symbol.clone(), from, to).await {
            Ok(items) if items.is_empty() => {
                self.stats.send_modify(|stats| stats.empty += 1);
                self.log.info(
                    SCOPE,
                    format!("No {symbol} news between {from} and {to}, keeping previous snapshot"),
                );
            }
            Ok(items) => {
                let count = items.len();
                self.cache.replace(items);
                self.stats.send_modify(|stats| {
                    stats.replaced += 1;
                    stats.last_replaced_at = Some(Utc::now());
                    stats.snapshot_len = count;
                });
                self.log
                    .info(SCOPE, format!("Cached {count} {symbol} news items"));
            }
            Err(err) => {
                self.log.warn(
                    SCOPE,
                    format!("Fetching {symbol} news failed, keeping previous snapshot: {err}"),
                );
                self.stats.send_modify(|stats| {
                    stats.failed += 1;
                    stats.last_error = Some(err.to_string());
                });
            }
        }
    }
}

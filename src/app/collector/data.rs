use std::time::Duration;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    ArcStr,
    app::config::{Config, StrOpt, USizeOpt},
};

/// Settings of the refresh loop, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Ticker symbol whose news is fetched
    pub symbol: ArcStr,
    /// Time between two refresh attempts
    pub interval: Duration,
    /// How many days back the query window starts
    pub lookback_days: u32,
}

impl CollectorConfig {
    /// Projects the relevant configuration values. An interval of zero
    /// seconds is raised to one.
    pub async fn from_config(config: &Config) -> Self {
        let interval = config.usize(USizeOpt::RefreshInterval).await.max(1);
        let lookback_days = config.usize(USizeOpt::LookbackDays).await;

        Self {
            symbol: config.str(StrOpt::Ticker).await,
            interval: Duration::from_secs(interval as u64),
            lookback_days: u32::try_from(lookback_days).unwrap_or(u32::MAX),
        }
    }
}

/// Counters describing what the refresh loop has done so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshStats {
    /// Refresh attempts started
    pub attempts: u64,
    /// Attempts that replaced the snapshot
    pub replaced: u64,
    /// Attempts that succeeded without any item
    pub empty: u64,
    /// Attempts that failed
    pub failed: u64,
    pub last_replaced_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// Number of items in the current snapshot
    pub snapshot_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectorState {
    Running,
    Stopped,
}

/// Returns the `(from, to)` dates of a query issued at `now`: the UTC date
/// `lookback_days` days earlier and the UTC date of `now`.
pub fn query_window(now: DateTime<Utc>, lookback_days: u32) -> (NaiveDate, NaiveDate) {
    let to = now.date_naive();
    let from = to
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN);
    (from, to)
}

use serde::{Deserialize, Serialize};

use crate::{ArcPath, ArcStr, log::LogLevel};

/// Options for text configuration values that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum StrOpt {
    /// Base URL of the Finnhub API
    ApiUrl,
    /// Finnhub API token, sent as the `X-Finnhub-Token` header
    ApiToken,
    /// Stock symbol whose company news is collected
    Ticker,
    /// Address the HTTP server binds to
    ListenAddr,
}

/// Options for path-based configuration values that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum PathOpt {
    /// Directory where log files are stored
    LogDir,
}

/// Options for numeric configuration values that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum USizeOpt {
    /// Seconds between two refresh attempts
    RefreshInterval,
    /// Days of news requested on each refresh
    LookbackDays,
    /// Number of items served by the news endpoint
    RecentCount,
    /// Timeout for network requests in seconds
    Timeout,
    /// Seconds the HTTP server waits for in-flight requests on shutdown
    ShutdownGrace,
    /// Maximum age of log files in days before they are deleted
    MaxAge,
}

/// The configuration data structure that holds all configurable values.
///
/// Persisted as TOML. Fields missing from the file take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    api_url: ArcStr,
    api_token: ArcStr,
    ticker: ArcStr,
    listen_addr: ArcStr,
    refresh_interval: usize,
    lookback_days: usize,
    recent_count: usize,
    timeout: usize,
    shutdown_grace: usize,
    log_dir: ArcPath,
    log_level: LogLevel,
    max_age: usize,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            api_url: ArcStr::from("https://finnhub.io"),
            api_token: ArcStr::default(),
            ticker: ArcStr::from("AAPL"),
            listen_addr: ArcStr::from("0.0.0.0:8282"),
            refresh_interval: 60,
            lookback_days: 3,
            recent_count: 3,
            timeout: 30,
            shutdown_grace: 10,
            log_dir: ArcPath::from("/tmp/snowflake-news/logs"),
            log_level: LogLevel::Warning,
            max_age: 0,
        }
    }
}

impl Data {
    pub fn str(&self, opt: StrOpt) -> ArcStr {
        match opt {
            StrOpt::ApiUrl => self.api_url.clone(),
            StrOpt::ApiToken => self.api_token.clone(),
            StrOpt::Ticker => self.ticker.clone(),
            StrOpt::ListenAddr => self.listen_addr.clone(),
        }
    }

    pub fn set_str(&mut self, opt: StrOpt, value: ArcStr) {
        match opt {
            StrOpt::ApiUrl => self.api_url = value,
            StrOpt::ApiToken => self.api_token = value,
            StrOpt::Ticker => self.ticker = value,
            StrOpt::ListenAddr => self.listen_addr = value,
        }
    }

    pub fn path(&self, opt: PathOpt) -> ArcPath {
        match opt {
            PathOpt::LogDir => self.log_dir.clone(),
        }
    }

    pub fn set_path(&mut self, opt: PathOpt, path: ArcPath) {
        match opt {
            PathOpt::LogDir => self.log_dir = path,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    pub fn usize(&self, opt: USizeOpt) -> usize {
        match opt {
            USizeOpt::RefreshInterval => self.refresh_interval,
            USizeOpt::LookbackDays => self.lookback_days,
            USizeOpt::RecentCount => self.recent_count,
            USizeOpt::Timeout => self.timeout,
            USizeOpt::ShutdownGrace => self.shutdown_grace,
            USizeOpt::MaxAge => self.max_age,
        }
    }

    pub fn set_usize(&mut self, opt: USizeOpt, value: usize) {
        match opt {
            USizeOpt::RefreshInterval => self.refresh_interval = value,
            USizeOpt::LookbackDays => self.lookback_days = value,
            USizeOpt::RecentCount => self.recent_count = value,
            USizeOpt::Timeout => self.timeout = value,
            USizeOpt::ShutdownGrace => self.shutdown_grace = value,
            USizeOpt::MaxAge => self.max_age = value,
        }
    }
}

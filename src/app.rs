use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

pub mod cache;
pub mod collector;
pub mod config;

mod data;

pub use data::{Overrides, default_config_path};

use crate::{
    ArcPath,
    api::FinnhubApi,
    log::Log,
    net::Net,
    server::{self, AppState},
};
use cache::NewsCache;
use collector::{Collector, CollectorConfig};
use config::{Config, PathOpt, StrOpt, USizeOpt};

const SCOPE: &str = "app";

/// The news service - central coordinator of the actors
///
/// Owns the configuration, logging and Finnhub actors together with the
/// news cache, and runs the refresh loop next to the HTTP server until
/// shutdown is requested.
#[derive(Debug)]
pub struct App {
    config: Config,
    log: Log,
    api: FinnhubApi,
    cache: NewsCache,
}

impl App {
    /// Create the App with full initialization
    ///
    /// This performs all necessary setup including:
    /// - Configuration loading, writing the defaults when the file is missing
    /// - Command line overrides
    /// - Actor initialization (log, net, finnhub)
    pub async fn build(config_path: ArcPath, overrides: Overrides) -> anyhow::Result<Self> {
        let config = Config::spawn(config_path.clone());
        let created = load_or_init(&config, &config_path).await?;
        overrides.apply(&config).await;

        let log = Log::spawn(
            config.log_level().await,
            config.usize(USizeOpt::MaxAge).await,
            config.path(PathOpt::LogDir).await,
        )
        .await?;
        log.collect_garbage().await;

        if created {
            log.info(
                SCOPE,
                format!("Wrote default configuration to {}", config_path.display()),
            );
        }
        if config.str(StrOpt::ApiToken).await.is_empty() {
            log.warn(SCOPE, "No Finnhub API token configured, requests will be rejected");
        }

        let net = Net::spawn(config.clone(), log.clone()).await?;
        let api = FinnhubApi::spawn_with_domain(
            net,
            config.str(StrOpt::ApiToken).await,
            config.str(StrOpt::ApiUrl).await,
        );

        Ok(Self::with_parts(config, log, api))
    }

    /// Create the App from already running actors
    pub fn with_parts(config: Config, log: Log, api: FinnhubApi) -> Self {
        Self {
            config,
            log,
            api,
            cache: NewsCache::new(),
        }
    }

    pub fn log(&self) -> Log {
        self.log.clone()
    }

    /// The cache shared by the refresh loop and the HTTP handlers
    pub fn cache(&self) -> NewsCache {
        self.cache.clone()
    }

    /// Runs the service until `shutdown` is cancelled.
    ///
    /// Binds the listen address first; failing to bind is fatal. Then the
    /// refresh loop is started and the HTTP server runs until shutdown. A
    /// server failure cancels `shutdown` so the refresh loop stops too.
    /// Pending log messages are flushed before returning.
    pub async fn run(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listen_addr = self.config.str(StrOpt::ListenAddr).await;
        let listener = match server::bind(&listen_addr).await {
            Ok(listener) => listener,
            Err(err) => {
                self.log.error(SCOPE, format!("{err:#}"));
                self.log.flush().await;
                return Err(err);
            }
        };

        let collector_config = CollectorConfig::from_config(&self.config).await;
        let (collector, collector_task) = Collector::spawn(
            collector_config,
            self.api.clone(),
            self.cache.clone(),
            self.log.clone(),
            shutdown.clone(),
        );

        let state = AppState {
            cache: self.cache.clone(),
            collector,
            recent_count: self.config.usize(USizeOpt::RecentCount).await,
        };
        let grace = Duration::from_secs(self.config.usize(USizeOpt::ShutdownGrace).await as u64);

        let served = server::serve(listener, state, shutdown.clone(), grace, self.log.clone()).await;
        if let Err(err) = &served {
            self.log.error(SCOPE, format!("{err:#}"));
        }
        shutdown.cancel();

        let _ = self
            .log
            .error_on_error(SCOPE, collector_task.await.context("Refresh loop panicked"));
        self.log.info(SCOPE, "Shutdown complete");
        self.log.flush().await;

        served
    }
}

/// Loads the configuration file, or writes the defaults to it when it does
/// not exist yet. A file that exists but cannot be parsed is an error.
///
/// # Returns
/// Whether the file was created.
async fn load_or_init(config: &Config, path: &ArcPath) -> anyhow::Result<bool> {
    let exists = tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("Checking for configuration file {}", path.display()))?;

    if exists {
        config.load().await?;
        Ok(false)
    } else {
        config.save().await?;
        Ok(true)
    }
}

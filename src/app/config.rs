pub use data::{Data, PathOpt, StrOpt, USizeOpt};
use message::Message;
use tokio::sync::{mpsc::Sender, oneshot};

use crate::{ArcPath, ArcStr, log::LogLevel};
use anyhow::Context;

mod core;
mod data;
mod message;
mod mock;

/// The configuration actor that provides a thread-safe interface for configuration operations.
///
/// This enum represents either a real configuration actor backed by a TOML
/// file or an in-memory mock for testing.
///
/// Getters never fail: should the actor be gone, they answer with the
/// default value of the option.
///
/// # Examples
/// ```ignore
/// let config = Config::spawn(path);
/// config.load().await?;
/// let ticker = config.str(StrOpt::Ticker).await;
/// ```
#[derive(Debug, Clone)]
pub enum Config {
    /// A real configuration actor that reads from and writes to a file
    Actual(Sender<Message>),
    /// A mock implementation for testing that stores data in memory
    Mock(mock::Mock),
}

/// Sends a query to the actor and waits for its answer, `None` if the actor is gone.
async fn ask<T>(
    sender: &Sender<Message>,
    message: impl FnOnce(oneshot::Sender<T>) -> Message,
) -> Option<T> {
    let (tx, rx) = oneshot::channel();
    sender.send(message(tx)).await.ok()?;
    rx.await.ok()
}

impl Config {
    /// Creates a new configuration instance backed by the file at `path` and
    /// spawns its actor. Defaults are used until [`Config::load`] succeeds.
    pub fn spawn(path: ArcPath) -> Self {
        let (config, _) = core::Core::new(path).spawn();
        config
    }

    /// Creates a new mock configuration instance for testing.
    pub fn mock(data: Data) -> Self {
        Self::Mock(mock::Mock::new(data))
    }

    /// Loads the configuration from the file. No-op for the mock.
    pub async fn load(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => ask(sender, |tx| Message::Load { tx })
                .await
                .context("Config actor is gone")?,
            Self::Mock(_) => Ok(()),
        }
    }

    /// Saves the current configuration to the file. No-op for the mock.
    pub async fn save(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => ask(sender, |tx| Message::Save { tx })
                .await
                .context("Config actor is gone")?,
            Self::Mock(_) => Ok(()),
        }
    }

    /// Gets a text configuration value.
    pub async fn str(&self, opt: StrOpt) -> ArcStr {
        match self {
            Self::Actual(sender) => ask(sender, |tx| Message::GetStr { opt, tx })
                .await
                .unwrap_or_else(|| Data::default().str(opt)),
            Self::Mock(mock) => mock.str(opt).await,
        }
    }

    /// Sets a text configuration value.
    pub async fn set_str(&self, opt: StrOpt, value: ArcStr) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::SetStr { opt, value }).await;
            }
            Self::Mock(mock) => mock.set_str(opt, value).await,
        }
    }

    /// Gets a path-based configuration value.
    pub async fn path(&self, opt: PathOpt) -> ArcPath {
        match self {
            Self::Actual(sender) => ask(sender, |tx| Message::GetPath { opt, tx })
                .await
                .unwrap_or_else(|| Data::default().path(opt)),
            Self::Mock(mock) => mock.path(opt).await,
        }
    }

    /// Sets a path-based configuration value.
    pub async fn set_path(&self, opt: PathOpt, path: ArcPath) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::SetPath { opt, path }).await;
            }
            Self::Mock(mock) => mock.set_path(opt, path).await,
        }
    }

    /// Gets the current log level.
    pub async fn log_level(&self) -> LogLevel {
        match self {
            Self::Actual(sender) => ask(sender, |tx| Message::GetLogLevel { tx })
                .await
                .unwrap_or_else(|| Data::default().log_level()),
            Self::Mock(mock) => mock.log_level().await,
        }
    }

    /// Sets the log level.
    pub async fn set_log_level(&self, level: LogLevel) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::SetLogLevel { level }).await;
            }
            Self::Mock(mock) => mock.set_log_level(level).await,
        }
    }

    /// Gets a numeric configuration value.
    pub async fn usize(&self, opt: USizeOpt) -> usize {
        match self {
            Self::Actual(sender) => ask(sender, |tx| Message::GetUSize { opt, tx })
                .await
                .unwrap_or_else(|| Data::default().usize(opt)),
            Self::Mock(mock) => mock.usize(opt).await,
        }
    }

    /// Sets a numeric configuration value.
    pub async fn set_usize(&self, opt: USizeOpt, value: usize) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::SetUSize { opt, size: value }).await;
            }
            Self::Mock(mock) => mock.set_usize(opt, value).await,
        }
    }
}

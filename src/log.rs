use std::fmt::Display;

use tokio::sync::mpsc::{Sender, error::TrySendError};

use crate::ArcPath;

mod core;
mod data;
mod message;
mod mock;
#[cfg(test)]
mod tests;

pub use data::{LogLevel, LogMessage};
use message::Message;

/// The logging actor that provides a thread-safe interface for logging operations.
///
/// This enum represents either a real logging actor or a mock implementation
/// for testing purposes. It provides a unified interface for logging operations
/// regardless of the underlying implementation.
///
/// # Examples
/// ```ignore
/// let log = Log::spawn(LogLevel::Info, 7, log_dir).await?;
/// log.info("app", "Application started");
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Log {
    /// A real logging actor that writes to files and stderr
    Actual(Sender<Message>),
    /// A mock implementation for testing that keeps messages in memory
    Mock(mock::Mock),
}

impl Log {
    /// Creates the log files under `log_dir` and spawns the logging actor.
    ///
    /// # Arguments
    /// * `level` - Minimum level of messages echoed to stderr
    /// * `max_age` - Maximum age of log files in days, `0` keeps them forever
    /// * `log_dir` - Directory where log files are stored
    pub async fn spawn(level: LogLevel, max_age: usize, log_dir: ArcPath) -> anyhow::Result<Self> {
        let (log, _) = core::Core::build(level, max_age, log_dir).await?.spawn();
        Ok(log)
    }

    /// Creates a new mock logger that records every message.
    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Sends a [`LogMessage`] to the logger without blocking the caller.
    ///
    /// Messages sent after a flush are dropped.
    fn log(&self, scope: &'static str, message: String, level: LogLevel) {
        let sender = match self {
            Log::Mock(mock) => return mock.log(scope, message, level),
            Log::Actual(sender) => sender,
        };

        let message = Message::Log(LogMessage {
            level,
            scope,
            message,
        });
        if let Err(TrySendError::Full(message)) = sender.try_send(message) {
            let sender = sender.clone();
            tokio::spawn(async move {
                let _ = sender.send(message).await;
            });
        }
    }

    /// Log a message with the `INFO` level
    pub fn info<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Info);
    }

    /// Log a message with the `WARNING` level
    pub fn warn<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Warning);
    }

    /// Log a message with the `ERROR` level
    pub fn error<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Error);
    }

    /// Log a warning message if the result is an error
    /// and return the result as is
    pub fn warn_on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        if let Err(err) = &result {
            self.log(scope, err.to_string(), LogLevel::Warning);
        }
        result
    }

    /// Log an error message if the result is an error
    /// and return the result as is
    pub fn error_on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        if let Err(err) = &result {
            self.log(scope, err.to_string(), LogLevel::Error);
        }
        result
    }

    /// Waits until every message queued so far is written, then stops the
    /// logging actor. Later messages are dropped.
    pub async fn flush(&self) {
        let Self::Actual(sender) = self else {
            return;
        };

        let (tx, rx) = tokio::sync::oneshot::channel();
        if sender.send(Message::Flush { tx }).await.is_ok() {
            let _ = rx.await;
        }
    }

    /// Collects the garbage from the logs directory. Garbage logs are the ones
    /// older than the `max_age` set when the logger was spawned.
    pub async fn collect_garbage(&self) {
        let Self::Actual(sender) = self else {
            return;
        };

        let _ = sender.send(Message::CollectGarbage).await;
    }

    /// Gets all messages recorded by a mock logger.
    ///
    /// # Returns
    /// `None` for the real logger, which does not keep messages in memory.
    pub fn get_messages(&self) -> Option<Vec<LogMessage>> {
        match self {
            Self::Actual(_) => None,
            Self::Mock(mock) => Some(mock.get_messages()),
        }
    }
}

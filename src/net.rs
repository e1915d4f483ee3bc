use std::collections::HashMap;

use tokio::sync::mpsc::Sender;

use crate::{ArcStr, app::config::Config, log::Log, net::message::Message};

mod core;
mod error;
pub mod message;
mod mock;
#[cfg(test)]
mod tests;

pub use error::NetError;

/// The networking actor that provides a thread-safe interface for network operations.
///
/// This enum represents either a real networking actor or a mock implementation
/// for testing purposes. It provides a unified interface for network operations
/// regardless of the underlying implementation.
///
/// # Examples
/// ```ignore
/// let net = Net::spawn(config, log).await?;
/// let body = net.get(url, None).await?;
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Net {
    /// A real networking actor that performs HTTP requests
    Actual(Sender<Message>),
    /// A mock implementation for testing
    Mock(mock::Mock),
}

impl Net {
    /// Creates a new networking instance and spawns its actor.
    ///
    /// # Arguments
    /// * `config` - The configuration actor, read for the request timeout
    /// * `log` - The logging actor for operation logging
    pub async fn spawn(config: Config, log: Log) -> anyhow::Result<Self> {
        let (net, _) = core::Core::new(config, log).await?.spawn();
        Ok(net)
    }

    /// Creates a new mock networking instance for testing.
    ///
    /// # Arguments
    /// * `responses` - Canned result per requested URL, query string included
    pub fn mock(responses: HashMap<ArcStr, Result<ArcStr, NetError>>) -> Self {
        Self::Mock(mock::Mock::new(responses))
    }

    /// Creates a new empty mock networking instance for testing.
    /// Every request fails with a transport error.
    pub fn mock_empty() -> Self {
        Self::Mock(mock::Mock::new(HashMap::new()))
    }

    /// Performs an HTTP GET request to the specified URL.
    ///
    /// # Arguments
    /// * `url` - The URL to send the GET request to
    /// * `headers` - Optional headers to include in the request
    ///
    /// # Returns
    /// The response body of a successful (2xx) response. Transport failures
    /// and non-success statuses are reported before the body is touched.
    pub async fn get(
        &self,
        url: ArcStr,
        headers: Option<HashMap<ArcStr, ArcStr>>,
    ) -> Result<ArcStr, NetError> {
        match self {
            Net::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Get { url, headers, tx })
                    .await
                    .map_err(|_| NetError::Closed)?;
                rx.await.map_err(|_| NetError::Closed)?
            }
            Net::Mock(mock) => mock.get(url, headers).await,
        }
    }

    /// Lists the URLs requested from a mock, in request order.
    ///
    /// # Returns
    /// `None` for the real networking actor.
    pub async fn requested_urls(&self) -> Option<Vec<ArcStr>> {
        match self {
            Net::Actual(_) => None,
            Net::Mock(mock) => Some(mock.requested_urls().await),
        }
    }
}

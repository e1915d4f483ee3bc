use std::{collections::HashMap, time::Duration};

use anyhow::Context;
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::{
    ArcStr,
    app::config::{Config, USizeOpt},
    log::Log,
    net::{Net, NetError, message::Message},
};

const SCOPE: &str = "net";

/// The core of the networking system that handles HTTP requests.
///
/// Wraps a pooled `reqwest` client. Requests are served one at a time, in
/// the order they were sent to the actor.
#[derive(Debug)]
pub struct Core {
    /// Logging interface for operation logging
    log: Log,
    /// HTTP client for making requests
    client: Client,
}

impl Core {
    /// Creates a new networking instance whose client times out after the
    /// configured number of seconds.
    pub async fn new(config: Config, log: Log) -> anyhow::Result<Self> {
        let timeout = config.usize(USizeOpt::Timeout).await;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout as u64))
            .build()
            .context("Building HTTP client")?;

        Ok(Self { log, client })
    }

    /// Transforms the networking core instance into an actor.
    ///
    /// # Returns
    /// A tuple containing:
    /// - The `Net` interface
    /// - A join handle for the spawned task
    pub fn spawn(self) -> (Net, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    Message::Get { url, headers, tx } => {
                        let response = self.handle_get_request(&url, headers).await;
                        if let Err(err) = &response {
                            self.log
                                .info(SCOPE, format!("GET request failed for URL {url}: {err}"));
                        }
                        let _ = tx.send(response);
                    }
                }
            }
        });

        (Net::Actual(tx), handle)
    }

    /// Handles GET requests with optional headers
    async fn handle_get_request(
        &self,
        url: &str,
        headers: Option<HashMap<ArcStr, ArcStr>>,
    ) -> Result<ArcStr, NetError> {
        let mut request = self.client.get(url);

        if let Some(headers) = headers {
            for (key, value) in headers {
                request = request.header(&*key, &*value);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|err| NetError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|err| NetError::Transport(format!("reading response body: {err}")))?;
        Ok(ArcStr::from(text))
    }
}

//! HTTP presentation of the news cache.
//!
//! Serves the cached stories as a plain text page and exposes the state of
//! the refresh loop. The server stops accepting connections when the shared
//! cancellation token fires and gives open requests a grace period before
//! it is aborted.

use std::time::Duration;

use anyhow::Context;
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::{
    api::finnhub::NewsItem,
    app::{cache::NewsCache, collector::Collector},
    log::Log,
};

mod format;
mod handlers;
#[cfg(test)]
mod tests;

pub use format::format_news;
pub use handlers::HealthResponse;

const SCOPE: &str = "server";

/// Shared state of the HTTP handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: NewsCache,
    pub collector: Collector,
    /// How many stories `/news` shows
    pub recent_count: usize,
}

impl AppState {
    /// Returns up to `recent_count` of the most recent cached stories.
    pub fn recent_news(&self) -> Vec<NewsItem> {
        self.cache.read(self.recent_count)
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/news", get(handlers::news))
        .route("/health", get(handlers::health))
        .with_state(state)
}

pub async fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))
}

/// Serves `state` on `listener` until `shutdown` is cancelled.
///
/// After cancellation, requests in flight have `grace` to complete. Past
/// that the server task is aborted and the remaining connections dropped.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
    grace: Duration,
    log: Log,
) -> anyhow::Result<()> {
    let addr = listener
        .local_addr()
        .context("Reading the listener address")?;
    log.info(SCOPE, format!("Serving news on http://{addr}/news"));

    let token = shutdown.clone();
    let server = axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { token.cancelled().await });
    let mut task = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut task => {
            return result.context("Server task panicked")?.context("Server error");
        }
        _ = shutdown.cancelled() => {}
    }

    match tokio::time::timeout(grace, &mut task).await {
        Ok(result) => {
            result
                .context("Server task panicked")?
                .context("Server error")?;
            log.info(SCOPE, "Server stopped");
        }
        Err(_) => {
            log.warn(
                SCOPE,
                format!(
                    "Open connections did not close within {}s, aborting",
                    grace.as_secs()
                ),
            );
            task.abort();
        }
    }

    Ok(())
}

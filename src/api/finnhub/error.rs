use thiserror::Error;

use crate::net::NetError;

/// Why a company news request produced no items.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure or non-success status
    #[error("company news request failed: {0}")]
    Net(#[from] NetError),

    /// The response body is not a list of news items
    #[error("malformed company news payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request URL could not be built from the configured domain
    #[error("invalid company news URL: {0}")]
    InvalidUrl(String),

    /// The Finnhub API actor is no longer running
    #[error("Finnhub API actor is gone")]
    Closed,
}

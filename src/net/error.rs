use thiserror::Error;

/// Failures of a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetError {
    /// The request never produced a usable response (connection, TLS,
    /// timeout, or the body could not be read)
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status code
    #[error("unexpected response status: {0}")]
    Status(u16),

    /// The networking actor is no longer running
    #[error("networking actor is gone")]
    Closed,
}

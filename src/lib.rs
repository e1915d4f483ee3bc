//! Library entry point for the snowflake-news crate.
//! This file re-exports key types for use by the binary and the tests.

pub mod api;
pub mod app;
pub mod log;
pub mod net;
pub mod server;
pub mod utils;

pub use utils::*;

/// Default capacity of the actors' message channels.
pub const BUFFER_SIZE: usize = 128;

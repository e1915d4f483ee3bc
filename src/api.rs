//! API module providing high-level interfaces for external services.
//!
//! This module contains actors that intermediate calls to the networking actor,
//! providing domain-specific APIs for different services.

pub mod finnhub;

pub use finnhub::FinnhubApi;

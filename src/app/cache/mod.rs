//! Cache module for the news service.
//!
//! This module holds the in-memory state shared between the refresh loop,
//! which writes it, and the HTTP handlers, which read it:
//! - **News Cache**: the latest company news snapshot, replaced as a whole

pub mod news;

pub use news::NewsCache;

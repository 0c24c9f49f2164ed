//! # `todostash`
//!
//! A todo-list core: an in-memory record store mirrored to key-value blob
//! storage, pure derivation functions for filtering, counts, calendar
//! bucketing and analytics, and JSON/CSV backup codecs.

pub mod analytics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod id;
pub mod models;
pub mod paths;
pub mod storage;
pub mod store;
pub mod transfer;
pub mod views;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

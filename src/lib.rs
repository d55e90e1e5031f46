//! snapkit: freshness-windowed snapshot caching for expensive metric sources.
//!
//! Wraps a blocking metric fetch (one call yields a bundle of related
//! values) behind a cache that refetches at most once per freshness window.

pub mod builder;
pub mod cache;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod snapshot;

#[cfg(feature = "system")]
pub mod system;

pub mod traits;

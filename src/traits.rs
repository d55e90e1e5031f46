//! # Cache Seams
//!
//! This module defines the two traits the cache is generic over: where its
//! data comes from ([`MetricSource`]) and how named fields are projected out
//! of a cached snapshot ([`MetricFields`]).
//!
//! ```text
//!   caller ──▶ TimedCache ──▶ MetricSource::fetch() ──▶ Snapshot
//!                  │
//!                  └─▶ MetricFields::extractor(name) ──▶ u64
//! ```
//!
//! ## Trait Summary
//!
//! | Item            | Purpose                                          |
//! |-----------------|--------------------------------------------------|
//! | `MetricSource`  | One blocking fetch yielding a whole snapshot     |
//! | `MetricFields`  | Name → pure extractor lookup over a snapshot     |
//! | `source_fn`     | Adapts a fetch closure into a `MetricSource`     |

use crate::error::FetchError;

/// A provider of metric snapshots.
///
/// One `fetch` call produces the whole snapshot atomically, so values that
/// belong together (e.g. free/total/used of the same instant) always come
/// from the same underlying read. The call may block (native or system
/// call) and is assumed non-cancelable; the cache never holds its entry
/// lock across it.
///
/// # Example
///
/// ```
/// use snapkit::snapshot::SwapSnapshot;
/// use snapkit::traits::{source_fn, MetricSource};
///
/// let source = source_fn(|| Ok(SwapSnapshot::new(100, 500, 400)));
/// let snap = source.fetch().unwrap();
/// assert_eq!(snap.total, 500);
/// ```
pub trait MetricSource {
    /// Snapshot type produced by one fetch.
    type Snapshot;

    /// Fetches a fresh snapshot from the underlying source.
    ///
    /// Errors are surfaced to the caller as-is; the cache performs no retry
    /// and no stale-value fallback.
    fn fetch(&self) -> Result<Self::Snapshot, FetchError>;
}

/// Adapter returned by [`source_fn`], making a fetch closure a
/// [`MetricSource`].
#[derive(Debug, Clone)]
pub struct SourceFn<F> {
    fetch: F,
}

/// Wraps a `Fn() -> Result<T, FetchError>` closure into a
/// [`MetricSource`], keeping tests, benches and one-off sources free of
/// bespoke impl blocks.
///
/// # Example
///
/// ```
/// use snapkit::cache::TimedCache;
/// use snapkit::snapshot::SwapSnapshot;
/// use snapkit::traits::source_fn;
///
/// let cache = TimedCache::with_default_window(source_fn(|| {
///     Ok(SwapSnapshot::new(100, 500, 400))
/// }));
/// assert_eq!(cache.field("free").unwrap(), 100);
/// ```
pub fn source_fn<T, F>(fetch: F) -> SourceFn<F>
where
    F: Fn() -> Result<T, FetchError>,
{
    SourceFn { fetch }
}

impl<T, F> MetricSource for SourceFn<F>
where
    F: Fn() -> Result<T, FetchError>,
{
    type Snapshot = T;

    #[inline]
    fn fetch(&self) -> Result<T, FetchError> {
        (self.fetch)()
    }
}

/// Named field projection over a snapshot type.
///
/// Generalizes string-keyed attribute dispatch into a lookup from field
/// name to a pure extractor function. Implementations back
/// [`extractor`](Self::extractor) with a process-wide table built once and
/// never mutated (see [`SwapSnapshot`](crate::snapshot::SwapSnapshot) for
/// the canonical one).
///
/// # Example
///
/// ```
/// use snapkit::snapshot::SwapSnapshot;
/// use snapkit::traits::MetricFields;
///
/// let snap = SwapSnapshot::new(100, 500, 400);
/// let extract = SwapSnapshot::extractor("used").unwrap();
/// assert_eq!(extract(&snap), 400);
/// assert!(SwapSnapshot::extractor("cached").is_none());
/// ```
pub trait MetricFields: Sized {
    /// Returns the field names this snapshot shape provides.
    fn field_names() -> &'static [&'static str];

    /// Returns the extractor for `name`, or `None` if the name is not part
    /// of the snapshot shape.
    fn extractor(name: &str) -> Option<fn(&Self) -> u64>;

    /// Returns `true` if `name` is part of the snapshot shape.
    #[inline]
    fn is_field(name: &str) -> bool {
        Self::extractor(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Probe(u64);

    #[test]
    fn wrapped_closure_is_a_metric_source() {
        let source = source_fn(|| Ok(Probe(7)));
        assert_eq!(source.fetch().unwrap(), Probe(7));
    }

    #[test]
    fn failing_closure_propagates_fetch_error() {
        let source = source_fn(|| Err::<Probe, _>(FetchError::new("down")));
        let err = source.fetch().unwrap_err();
        assert_eq!(err.message(), "down");
    }

    #[test]
    fn is_field_follows_extractor() {
        use crate::snapshot::SwapSnapshot;

        assert!(SwapSnapshot::is_field("free"));
        assert!(!SwapSnapshot::is_field("Free"));
    }
}

//! Freshness-windowed snapshot cache.
//!
//! [`TimedCache`] sits between callers and a blocking
//! [`MetricSource`](crate::traits::MetricSource), bounding the rate of
//! source fetches to at most one per freshness window.
//!
//! ## Read Flow
//!
//! ```text
//!   snapshot()
//!       │
//!       ▼
//!   entry fresh? ──yes──▶ clone stored snapshot      (read lock only)
//!       │no
//!       ▼
//!   flight lock ──▶ re-check entry ──fresh──▶ reuse winner's result
//!       │stale
//!       ▼
//!   source.fetch() ──ok──▶ replace entry as one unit ──▶ return
//!       │err
//!       ▼
//!   entry left untouched, error propagates
//! ```
//!
//! ## Locking
//!
//! Two locks, two jobs:
//!
//! - `entry: RwLock<Option<CacheEntry>>`: the stored snapshot and its
//!   fetch timestamp, always replaced as a whole unit. Fresh reads take a
//!   short read lock and nothing else.
//! - `flight: Mutex<()>`: serializes fetch attempts. It is the only lock
//!   held across the blocking source call; the entry lock never is.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, warn};
use parking_lot::{Mutex, RwLock};

use crate::error::{FetchError, FieldError, UnknownFieldError};
#[cfg(feature = "metrics")]
use crate::metrics::{TimedCacheMetrics, TimedCacheMetricsSnapshot};
use crate::traits::{MetricFields, MetricSource};

/// Default freshness window: five seconds.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(5);

/// Snapshot plus the instant its fetch completed. Replaced wholesale on
/// every refresh; never mutated field by field.
#[derive(Debug)]
struct CacheEntry<T> {
    snapshot: T,
    fetched_at: Instant,
}

/// Freshness check with an inclusive boundary on the refetch side:
/// `elapsed == window` counts as stale. A backwards clock step saturates to
/// zero elapsed, so the entry stays valid rather than refetching early.
#[inline]
fn entry_is_fresh(fetched_at: Instant, now: Instant, window: Duration) -> bool {
    now.saturating_duration_since(fetched_at) < window
}

/// A cache that serves a memoized snapshot for the length of a freshness
/// window, refetching from its [`MetricSource`] only on first access or
/// once the window has elapsed.
///
/// Caching the whole snapshot (rather than each field independently)
/// keeps field reads consistent: `used`, `free` and `total` served inside
/// one window all come from the same source read.
///
/// # Concurrency
///
/// `TimedCache` takes `&self` everywhere and is `Sync` when its source is.
/// Concurrent demand for a stale value is single-flight: one caller wins
/// the flight lock and fetches, the others block on that lock, then reuse
/// the winner's freshly stored entry without fetching. Reads of a fresh
/// entry never touch the flight lock, so a slow fetch does not delay them.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use snapkit::cache::TimedCache;
/// use snapkit::snapshot::SwapSnapshot;
/// use snapkit::traits::source_fn;
///
/// let cache = TimedCache::new(
///     source_fn(|| Ok(SwapSnapshot::new(100, 500, 400))),
///     Duration::from_secs(5),
/// );
///
/// let snap = cache.snapshot().unwrap();
/// assert_eq!(snap.total, 500);
/// assert_eq!(cache.field("used").unwrap(), 400);
/// ```
pub struct TimedCache<S: MetricSource> {
    source: S,
    window: Duration,
    entry: RwLock<Option<CacheEntry<S::Snapshot>>>,
    flight: Mutex<()>,
    #[cfg(feature = "metrics")]
    metrics: TimedCacheMetrics,
}

impl<S: MetricSource> TimedCache<S> {
    /// Creates a cache over `source` with the given freshness window.
    ///
    /// `Duration` is non-negative by construction; `Duration::ZERO` means
    /// every read refetches. For a window given in fractional seconds (and
    /// the validation that comes with it), use
    /// [`TimedCacheBuilder`](crate::builder::TimedCacheBuilder).
    pub fn new(source: S, window: Duration) -> Self {
        Self {
            source,
            window,
            entry: RwLock::new(None),
            flight: Mutex::new(()),
            #[cfg(feature = "metrics")]
            metrics: TimedCacheMetrics::default(),
        }
    }

    /// Creates a cache with the [`DEFAULT_WINDOW`] of five seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use snapkit::cache::{TimedCache, DEFAULT_WINDOW};
    /// use snapkit::snapshot::SwapSnapshot;
    /// use snapkit::traits::source_fn;
    ///
    /// let cache = TimedCache::with_default_window(source_fn(|| Ok(SwapSnapshot::new(0, 0, 0))));
    /// assert_eq!(cache.window(), DEFAULT_WINDOW);
    /// ```
    pub fn with_default_window(source: S) -> Self {
        Self::new(source, DEFAULT_WINDOW)
    }

    /// Returns the freshness window.
    #[inline]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns the underlying source.
    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the age of the stored snapshot, or `None` if the cache is
    /// empty.
    pub fn age(&self) -> Option<Duration> {
        self.entry.read().as_ref().map(|e| e.fetched_at.elapsed())
    }

    /// Returns `true` if a stored snapshot exists and is inside its window.
    pub fn is_fresh(&self) -> bool {
        let now = Instant::now();
        self.entry
            .read()
            .as_ref()
            .is_some_and(|e| entry_is_fresh(e.fetched_at, now, self.window))
    }

    /// Clears the stored entry, forcing the next [`snapshot`](Self::snapshot)
    /// to fetch unconditionally. Intended for explicit cache-busting and
    /// tests.
    pub fn invalidate(&self) {
        *self.entry.write() = None;
        debug!("snapshot cache invalidated");
        #[cfg(feature = "metrics")]
        self.metrics.record_invalidation();
    }

    /// Returns a point-in-time copy of the cache's own counters.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> TimedCacheMetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl<S: MetricSource> TimedCache<S>
where
    S::Snapshot: Clone,
{
    /// Returns the current snapshot, fetching through the source only when
    /// no entry exists or the stored one has reached the window boundary
    /// (`elapsed >= window`).
    ///
    /// On fetch failure the stored entry and its timestamp are left
    /// untouched and the error propagates; staleness is only acceptable
    /// within the window, never as an error-masking fallback. Elapsed time
    /// is measured on a monotonic clock and saturates at zero if the clock
    /// steps backwards, which keeps the entry valid for up to one extra
    /// window in that case.
    pub fn snapshot(&self) -> Result<S::Snapshot, FetchError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_read();

        let now = Instant::now();
        {
            let entry = self.entry.read();
            if let Some(e) = entry.as_ref() {
                if entry_is_fresh(e.fetched_at, now, self.window) {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_hit();
                    return Ok(e.snapshot.clone());
                }
            }
        }

        self.refresh()
    }

    /// Reads one named field of the current snapshot.
    ///
    /// The name is resolved against the snapshot's field table first, so an
    /// unknown name fails without costing a fetch. Known names go through
    /// [`snapshot`](Self::snapshot) and project from whatever it returns.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use snapkit::cache::TimedCache;
    /// use snapkit::snapshot::SwapSnapshot;
    /// use snapkit::traits::source_fn;
    ///
    /// let cache = TimedCache::new(
    ///     source_fn(|| Ok(SwapSnapshot::new(100, 500, 400))),
    ///     Duration::from_secs(5),
    /// );
    ///
    /// assert_eq!(cache.field("free").unwrap(), 100);
    /// assert!(cache.field("cached").is_err());
    /// ```
    pub fn field(&self, name: &str) -> Result<u64, FieldError>
    where
        S::Snapshot: MetricFields,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_field_read();

        let Some(extract) = <S::Snapshot as MetricFields>::extractor(name) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_unknown_field();
            return Err(UnknownFieldError::new(
                name,
                <S::Snapshot as MetricFields>::field_names(),
            )
            .into());
        };

        let snapshot = self.snapshot()?;
        Ok(extract(&snapshot))
    }

    /// Slow path: serialize on the flight lock, re-check the entry (the
    /// previous holder may have refreshed it), and fetch only if it is
    /// still absent or stale.
    fn refresh(&self) -> Result<S::Snapshot, FetchError> {
        let _flight = self.flight.lock();

        {
            let entry = self.entry.read();
            if let Some(e) = entry.as_ref() {
                if entry_is_fresh(e.fetched_at, Instant::now(), self.window) {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_hit();
                    return Ok(e.snapshot.clone());
                }
            }
        }

        debug!("snapshot absent or stale, fetching");
        match self.source.fetch() {
            Ok(snapshot) => {
                let fetched_at = Instant::now();
                *self.entry.write() = Some(CacheEntry {
                    snapshot: snapshot.clone(),
                    fetched_at,
                });
                #[cfg(feature = "metrics")]
                self.metrics.record_refresh();
                Ok(snapshot)
            },
            Err(err) => {
                warn!("snapshot fetch failed: {err}");
                #[cfg(feature = "metrics")]
                self.metrics.record_fetch_error();
                Err(err)
            },
        }
    }
}

impl<S: MetricSource> fmt::Debug for TimedCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedCache")
            .field("window", &self.window)
            .field("fresh", &self.is_fresh())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Builder for [`TimedCache`].
//!
//! Validates user-configurable parameters at build time, so an invalid
//! freshness window is a [`ConfigError`] from `try_build`, never a failure
//! at read time.
//!
//! ## Example
//!
//! ```rust
//! use snapkit::builder::TimedCacheBuilder;
//! use snapkit::snapshot::SwapSnapshot;
//! use snapkit::traits::source_fn;
//!
//! let cache = TimedCacheBuilder::new(source_fn(|| Ok(SwapSnapshot::new(100, 500, 400))))
//!     .window_secs(2.5)
//!     .try_build()
//!     .unwrap();
//! assert_eq!(cache.field("total").unwrap(), 500);
//! ```

use std::time::Duration;

use crate::cache::{DEFAULT_WINDOW, TimedCache};
use crate::error::ConfigError;
use crate::traits::MetricSource;

/// Builder for [`TimedCache`], defaulting to the five-second
/// [`DEFAULT_WINDOW`].
///
/// The window can be set either as a [`Duration`] (valid by construction)
/// or in fractional seconds, which is validated in
/// [`try_build`](Self::try_build). The last setter called wins.
pub struct TimedCacheBuilder<S: MetricSource> {
    source: S,
    window: Duration,
    window_secs: Option<f64>,
}

impl<S: MetricSource> TimedCacheBuilder<S> {
    /// Starts a builder over `source` with the default window.
    pub fn new(source: S) -> Self {
        Self {
            source,
            window: DEFAULT_WINDOW,
            window_secs: None,
        }
    }

    /// Sets the freshness window. `Duration::ZERO` means every read
    /// refetches.
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self.window_secs = None;
        self
    }

    /// Sets the freshness window in fractional seconds.
    ///
    /// Validated in [`try_build`](Self::try_build): the value must be
    /// finite, non-negative and within `Duration` range.
    pub fn window_secs(mut self, secs: f64) -> Self {
        self.window_secs = Some(secs);
        self
    }

    /// Builds the cache, validating any seconds-based window.
    pub fn try_build(self) -> Result<TimedCache<S>, ConfigError> {
        let window = match self.window_secs {
            Some(secs) => Duration::try_from_secs_f64(secs).map_err(|_| {
                ConfigError::new(format!(
                    "freshness window must be a finite, non-negative number of seconds, got {secs}"
                ))
            })?,
            None => self.window,
        };
        Ok(TimedCache::new(self.source, window))
    }
}

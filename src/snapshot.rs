//! Swap memory snapshots and their field table.
//!
//! ## Key Components
//!
//! - [`SwapSnapshot`]: immutable bundle of free/total/used swap memory, all
//!   captured by one source fetch.
//! - [`SWAP_FIELD_NAMES`] and the extractor table behind
//!   [`MetricFields`](crate::traits::MetricFields): the name → projection
//!   mapping used by field reads. Built once, treated as constant.
//!
//! ## Example Usage
//!
//! ```
//! use snapkit::snapshot::SwapSnapshot;
//!
//! let snap = SwapSnapshot::new(100, 500, 400);
//! assert!(snap.is_consistent());
//! assert_eq!(snap.used, 400);
//! ```

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::traits::MetricFields;

/// Field names provided by [`SwapSnapshot`], in stable order.
pub const SWAP_FIELD_NAMES: &[&str] = &["free", "total", "used"];

type SwapExtractor = fn(&SwapSnapshot) -> u64;

static SWAP_EXTRACTORS: Lazy<FxHashMap<&'static str, SwapExtractor>> = Lazy::new(|| {
    let mut table: FxHashMap<&'static str, SwapExtractor> = FxHashMap::default();
    table.insert("free", |snap| snap.free);
    table.insert("total", |snap| snap.total);
    table.insert("used", |snap| snap.used);
    table
});

/// Immutable swap memory snapshot, in bytes.
///
/// All three values come from the same underlying read, so `used` and
/// `free` always refer to the same instant as `total`. Whether they sum up
/// exactly is up to the source; [`is_consistent`](Self::is_consistent)
/// checks it.
///
/// # Example
///
/// ```
/// use snapkit::snapshot::SwapSnapshot;
///
/// let snap = SwapSnapshot::new(1 << 30, 4 << 30, 3 << 30);
/// assert!(snap.is_consistent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapSnapshot {
    /// Free swap memory, in bytes.
    pub free: u64,
    /// Total swap memory configured on the system, in bytes.
    pub total: u64,
    /// Swap memory in use, in bytes.
    pub used: u64,
}

impl SwapSnapshot {
    /// Creates a snapshot from raw byte counts.
    #[inline]
    pub fn new(free: u64, total: u64, used: u64) -> Self {
        Self { free, total, used }
    }

    /// Returns `true` if `used + free == total` without overflow.
    ///
    /// Sources that report the three values from one atomic read satisfy
    /// this; a `false` here points at an inconsistent source, not at the
    /// cache.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.used.checked_add(self.free) == Some(self.total)
    }
}

impl MetricFields for SwapSnapshot {
    #[inline]
    fn field_names() -> &'static [&'static str] {
        SWAP_FIELD_NAMES
    }

    #[inline]
    fn extractor(name: &str) -> Option<fn(&Self) -> u64> {
        SWAP_EXTRACTORS.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_snapshot_detected() {
        assert!(SwapSnapshot::new(100, 500, 400).is_consistent());
        assert!(SwapSnapshot::new(0, 0, 0).is_consistent());
    }

    #[test]
    fn inconsistent_snapshot_detected() {
        assert!(!SwapSnapshot::new(100, 500, 350).is_consistent());
    }

    #[test]
    fn overflowing_sum_is_not_consistent() {
        assert!(!SwapSnapshot::new(u64::MAX, u64::MAX, u64::MAX).is_consistent());
    }

    #[test]
    fn every_advertised_field_has_an_extractor() {
        for name in SwapSnapshot::field_names() {
            assert!(
                SwapSnapshot::extractor(name).is_some(),
                "missing extractor for `{}`",
                name
            );
        }
    }

    #[test]
    fn extractors_project_matching_fields() {
        let snap = SwapSnapshot::new(100, 500, 400);
        assert_eq!(SwapSnapshot::extractor("free").unwrap()(&snap), 100);
        assert_eq!(SwapSnapshot::extractor("total").unwrap()(&snap), 500);
        assert_eq!(SwapSnapshot::extractor("used").unwrap()(&snap), 400);
    }

    #[test]
    fn unknown_name_has_no_extractor() {
        assert!(SwapSnapshot::extractor("cached").is_none());
        assert!(SwapSnapshot::extractor("").is_none());
    }
}

//! Swap metrics read from the running system via `sysinfo`.

use parking_lot::Mutex;
use sysinfo::System;

use crate::error::FetchError;
use crate::snapshot::SwapSnapshot;
use crate::traits::MetricSource;

/// [`MetricSource`] that reads swap memory from the running system.
///
/// Each fetch refreshes the memory tables once and captures free, total and
/// used swap from that single refresh, so the returned snapshot is
/// internally consistent. The refresh is a blocking system call; pair this
/// source with a [`TimedCache`](crate::cache::TimedCache) to bound how
/// often it runs.
///
/// # Example
///
/// ```no_run
/// use snapkit::cache::TimedCache;
/// use snapkit::system::SystemSwapSource;
///
/// let cache = TimedCache::with_default_window(SystemSwapSource::new());
/// let snap = cache.snapshot().unwrap();
/// println!("{} of {} bytes of swap in use", snap.used, snap.total);
/// ```
pub struct SystemSwapSource {
    system: Mutex<System>,
}

impl SystemSwapSource {
    /// Creates a source with its own `sysinfo` handle.
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SystemSwapSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for SystemSwapSource {
    type Snapshot = SwapSnapshot;

    fn fetch(&self) -> Result<SwapSnapshot, FetchError> {
        let mut system = self.system.lock();
        system.refresh_memory();
        Ok(SwapSnapshot::new(
            system.free_swap(),
            system.total_swap(),
            system.used_swap(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_produces_bounded_snapshot() {
        let source = SystemSwapSource::new();
        let snap = source.fetch().unwrap();

        // A machine without swap reports all zeros; either way the parts
        // never exceed the whole.
        assert!(snap.used <= snap.total);
        assert!(snap.free <= snap.total);
    }

    #[test]
    fn repeated_fetches_keep_total_stable() {
        let source = SystemSwapSource::new();
        let first = source.fetch().unwrap();
        let second = source.fetch().unwrap();
        assert_eq!(first.total, second.total);
    }
}

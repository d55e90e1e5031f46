//! Counters for cache behavior, and the export seam for publishing them.
//!
//! Responsibilities are split the same way the cache itself splits reads
//! from fetches: [`TimedCacheMetrics`] only records,
//! [`TimedCacheMetricsSnapshot`] is a plain point-in-time copy for
//! assertions and dashboards, and [`MetricsExporter`] publishes snapshots
//! without knowing how they were recorded.
//!
//! Counters are atomic so recording works from concurrent readers without
//! extra locking; they are observational and never affect cache behavior.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct TimedCacheMetrics {
    reads: AtomicU64,
    hits: AtomicU64,
    refreshes: AtomicU64,
    fetch_errors: AtomicU64,
    field_reads: AtomicU64,
    unknown_fields: AtomicU64,
    invalidations: AtomicU64,
}

impl TimedCacheMetrics {
    #[inline]
    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_fetch_error(&self) {
        self.fetch_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_field_read(&self) {
        self.field_reads.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_unknown_field(&self) {
        self.unknown_fields.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time copy of all counters.
    pub fn snapshot(&self) -> TimedCacheMetricsSnapshot {
        TimedCacheMetricsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            fetch_errors: self.fetch_errors.load(Ordering::Relaxed),
            field_reads: self.field_reads.load(Ordering::Relaxed),
            unknown_fields: self.unknown_fields.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of a cache's counters.
///
/// `reads` counts snapshot reads; `hits` the subset served from a fresh
/// entry (including readers that waited out another caller's fetch);
/// `refreshes` and `fetch_errors` the outcomes of actual source calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimedCacheMetricsSnapshot {
    pub reads: u64,
    pub hits: u64,
    pub refreshes: u64,
    pub fetch_errors: u64,
    pub field_reads: u64,
    pub unknown_fields: u64,
    pub invalidations: u64,
}

/// Publishes metrics snapshots to a monitoring destination.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes in the Prometheus text exposition format so the output can be
/// scraped as-is or forwarded to a collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<TimedCacheMetricsSnapshot>
    for PrometheusTextExporter<W>
{
    fn export(&self, snapshot: &TimedCacheMetricsSnapshot) {
        self.write_counter(&self.metric_name("reads_total"), snapshot.reads);
        self.write_counter(&self.metric_name("hits_total"), snapshot.hits);
        self.write_counter(&self.metric_name("refreshes_total"), snapshot.refreshes);
        self.write_counter(&self.metric_name("fetch_errors_total"), snapshot.fetch_errors);
        self.write_counter(&self.metric_name("field_reads_total"), snapshot.field_reads);
        self.write_counter(
            &self.metric_name("unknown_fields_total"),
            snapshot.unknown_fields,
        );
        self.write_counter(
            &self.metric_name("invalidations_total"),
            snapshot.invalidations,
        );
    }
}

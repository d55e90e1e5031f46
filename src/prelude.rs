pub use crate::builder::TimedCacheBuilder;
pub use crate::cache::{DEFAULT_WINDOW, TimedCache};
pub use crate::error::{ConfigError, FetchError, FieldError, UnknownFieldError};

#[cfg(feature = "metrics")]
pub use crate::metrics::{
    MetricsExporter, PrometheusTextExporter, TimedCacheMetrics, TimedCacheMetricsSnapshot,
};
pub use crate::snapshot::{SwapSnapshot, SWAP_FIELD_NAMES};
#[cfg(feature = "system")]
pub use crate::system::SystemSwapSource;
pub use crate::traits::{source_fn, MetricFields, MetricSource, SourceFn};

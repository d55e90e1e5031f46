//! Error types for the snapkit library.
//!
//! ## Key Components
//!
//! - [`FetchError`]: Returned when the underlying metric source could not
//!   produce a snapshot. The cache never retries internally and never falls
//!   back to a stale value; the error surfaces to the caller unchanged.
//! - [`UnknownFieldError`]: Returned when a caller asks for a field name that
//!   is not part of the snapshot shape. Purely a caller-input error.
//! - [`FieldError`]: The two ways a field read can fail, as one type.
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. a non-finite freshness window in seconds). Raised at build time,
//!   never at read time.
//!
//! ## Example Usage
//!
//! ```
//! use snapkit::error::FetchError;
//!
//! let err = FetchError::new("swap probe unavailable");
//! assert_eq!(err.to_string(), "swap probe unavailable");
//! ```

use std::error::Error;
use std::fmt;

// ---------------------------------------------------------------------------
// FetchError
// ---------------------------------------------------------------------------

/// Error returned when the metric source fails to produce a snapshot.
///
/// Optionally wraps the underlying source error, which is exposed through
/// [`Error::source`]. A failed fetch leaves the cache entry untouched: a
/// previously stored snapshot stays available for later reads inside its
/// own window.
///
/// # Example
///
/// ```
/// use std::error::Error;
/// use snapkit::error::FetchError;
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "sysctl failed");
/// let err = FetchError::with_source("swap probe failed", io);
/// assert_eq!(err.to_string(), "swap probe failed");
/// assert!(err.source().is_some());
/// ```
#[derive(Debug)]
pub struct FetchError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl FetchError {
    /// Creates a new `FetchError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            source: None,
        }
    }

    /// Creates a new `FetchError` wrapping an underlying source error.
    pub fn with_source(
        msg: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: msg.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

// ---------------------------------------------------------------------------
// UnknownFieldError
// ---------------------------------------------------------------------------

/// Error returned when a requested field name is not part of the snapshot
/// shape.
///
/// Carries the rejected name and the set of known field names. Produced
/// before any fetch is attempted, so an unknown name never costs a source
/// call.
///
/// # Example
///
/// ```
/// use snapkit::error::UnknownFieldError;
///
/// let err = UnknownFieldError::new("cached", &["free", "total", "used"]);
/// assert!(err.to_string().contains("cached"));
/// assert_eq!(err.field(), "cached");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError {
    field: String,
    known: &'static [&'static str],
}

impl UnknownFieldError {
    /// Creates a new `UnknownFieldError` for the given name.
    #[inline]
    pub fn new(field: impl Into<String>, known: &'static [&'static str]) -> Self {
        Self {
            field: field.into(),
            known,
        }
    }

    /// Returns the rejected field name.
    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the field names the snapshot shape does provide.
    #[inline]
    pub fn known_fields(&self) -> &'static [&'static str] {
        self.known
    }
}

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown metric field `{}` (known fields: {})",
            self.field,
            self.known.join(", ")
        )
    }
}

impl Error for UnknownFieldError {}

// ---------------------------------------------------------------------------
// FieldError
// ---------------------------------------------------------------------------

/// Error returned by field reads, which can fail on either side of the
/// cache: the name lookup or the underlying fetch.
#[derive(Debug)]
pub enum FieldError {
    /// The snapshot fetch behind the field read failed.
    Fetch(FetchError),
    /// The requested field name is not part of the snapshot shape.
    UnknownField(UnknownFieldError),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Fetch(err) => fmt::Display::fmt(err, f),
            FieldError::UnknownField(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FieldError::Fetch(err) => Some(err),
            FieldError::UnknownField(err) => Some(err),
        }
    }
}

impl From<FetchError> for FieldError {
    fn from(err: FetchError) -> Self {
        FieldError::Fetch(err)
    }
}

impl From<UnknownFieldError> for FieldError {
    fn from(err: UnknownFieldError) -> Self {
        FieldError::UnknownField(err)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible builders such as
/// [`TimedCacheBuilder::try_build`](crate::builder::TimedCacheBuilder::try_build).
/// Carries a human-readable description of which parameter failed
/// validation.
///
/// # Example
///
/// ```
/// use snapkit::builder::TimedCacheBuilder;
/// use snapkit::error::ConfigError;
/// use snapkit::snapshot::SwapSnapshot;
/// use snapkit::traits::source_fn;
///
/// let source = source_fn(|| Ok(SwapSnapshot::new(0, 0, 0)));
/// let err: ConfigError = TimedCacheBuilder::new(source)
///     .window_secs(-1.0)
///     .try_build()
///     .unwrap_err();
/// assert!(err.to_string().contains("window"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Trip-record sources.
//!
//! A [`DataSource`] turns a [`Period`] into the raw bytes of one monthly
//! parquet file. The loader only ever talks to this trait, so the HTTP
//! download used in production can be swapped for a local directory or an
//! in-memory fixture.
//!
//! # Example
//!
//! ```rust
//! use trip_duration::dataset::{DataSource, MemorySource};
//! use trip_duration::period::Period;
//!
//! let period = Period::new(2021, 1).unwrap();
//! let source = MemorySource::new().with_file(period, vec![1, 2, 3]);
//! assert_eq!(source.fetch(period).unwrap(), vec![1, 2, 3]);
//! ```

use crate::error::Result;
use crate::period::Period;

pub mod http;
pub mod local;
pub mod memory;

pub use self::http::HttpSource;
pub use self::local::LocalSource;
pub use self::memory::MemorySource;

/// Public location of the monthly trip-record files.
pub const DEFAULT_BASE_URL: &str = "https://d37ci6vzurychx.cloudfront.net/trip-data";

/// A read-only provider of monthly trip-record files.
pub trait DataSource {
    /// Human-readable location of the file for `period` (URL, path, ...).
    ///
    /// Used in log lines and error messages; never dereferenced by callers.
    fn locate(&self, period: Period) -> String;

    /// Fetch the complete file for `period`.
    ///
    /// # Errors
    /// Returns [`crate::Error::SourceUnavailable`] when the file cannot be
    /// retrieved. Implementations never retry.
    fn fetch(&self, period: Period) -> Result<Vec<u8>>;
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn locate(&self, period: Period) -> String {
        (**self).locate(period)
    }

    fn fetch(&self, period: Period) -> Result<Vec<u8>> {
        (**self).fetch(period)
    }
}

impl<S: DataSource + ?Sized> DataSource for &S {
    fn locate(&self, period: Period) -> String {
        (**self).locate(period)
    }

    fn fetch(&self, period: Period) -> Result<Vec<u8>> {
        (**self).fetch(period)
    }
}

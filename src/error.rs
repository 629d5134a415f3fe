//! Error types for loading, fitting and persisting duration models.

use thiserror::Error;

/// Every failure a training run can surface.
///
/// Nothing is recovered inside the crate: the loader logs and returns
/// [`Error::SourceUnavailable`] / [`Error::SchemaMismatch`], everything else is
/// propagated as-is so callers can branch on the kind.
#[derive(Debug, Error)]
pub enum Error {
    /// The source could not be fetched or parsed.
    #[error("source unavailable: {location}: {reason}")]
    SourceUnavailable { location: String, reason: String },

    /// Expected columns are absent or have an unusable type.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The artifact could not be encoded, decoded, written or read.
    #[error("serialization failure: {0}")]
    SerializationFailure(String),

    /// Empty data provided where non-empty was required.
    #[error("empty data: {0}")]
    EmptyData(String),

    /// Feature dimension mismatch between a matrix and a fitted component.
    #[error("feature mismatch: expected {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    /// Two sequences that must pair up element-wise have different lengths.
    #[error("length mismatch: expected {expected} values, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// Non-finite inputs or a solver breakdown.
    #[error("numerical error: {0}")]
    NumericalError(String),

    /// A year/month pair that cannot name a monthly file.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
}

impl Error {
    pub(crate) fn source_unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        Error::SourceUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::SerializationFailure(err.to_string())
    }
}

/// Result type for training operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_display() {
        let err = Error::source_unavailable("http://host/file.parquet", "connection refused");
        assert_eq!(
            err.to_string(),
            "source unavailable: http://host/file.parquet: connection refused"
        );
    }

    #[test]
    fn test_feature_mismatch_display() {
        let err = Error::FeatureMismatch {
            expected: 5,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "feature mismatch: expected 5 features, got 3"
        );
    }

    #[test]
    fn test_from_bincode_error() {
        let bad_bytes: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        let decoded: std::result::Result<String, bincode::Error> = bincode::deserialize(bad_bytes);
        let err: Error = decoded.unwrap_err().into();
        assert!(matches!(err, Error::SerializationFailure(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(Error::EmptyData("no rows".to_string()));
        assert_eq!(err.to_string(), "empty data: no rows");
    }
}

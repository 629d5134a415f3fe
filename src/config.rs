//! Runtime configuration of where trip records come from.

use crate::dataset::{DataSource, HttpSource, LocalSource, DEFAULT_BASE_URL};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Selects and configures the [`DataSource`] for a run.
///
/// A `data_dir` takes precedence over `base_url`; the timeout only applies to
/// HTTP downloads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceConfig {
    pub base_url: String,
    pub data_dir: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: None,
            timeout: None,
        }
    }
}

impl SourceConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(&self) -> Box<dyn DataSource> {
        match &self.data_dir {
            Some(dir) => {
                debug!(dir = %dir.display(), "reading trip records from a local directory");
                Box::new(LocalSource::new(dir))
            }
            None => {
                debug!(base_url = %self.base_url, timeout = ?self.timeout, "downloading trip records");
                let source = HttpSource::new(self.base_url.clone());
                match self.timeout {
                    Some(timeout) => Box::new(source.with_timeout(timeout)),
                    None => Box::new(source),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::Period;

    #[test]
    fn test_default_is_public_bucket() {
        let source = SourceConfig::default().build();
        let period = Period::new(2021, 1).unwrap();

        assert_eq!(
            source.locate(period),
            "https://d37ci6vzurychx.cloudfront.net/trip-data/green_tripdata_2021-01.parquet"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let source = SourceConfig::default()
            .with_base_url("http://localhost:8000/data/")
            .with_timeout(Duration::from_secs(5))
            .build();
        let period = Period::new(2022, 11).unwrap();

        assert_eq!(
            source.locate(period),
            "http://localhost:8000/data/green_tripdata_2022-11.parquet"
        );
    }

    #[test]
    fn test_data_dir_wins_over_base_url() {
        let tmp = tempfile::tempdir().unwrap();
        let source = SourceConfig::default()
            .with_base_url("http://example.invalid")
            .with_data_dir(tmp.path())
            .build();
        let period = Period::new(2021, 2).unwrap();

        assert_eq!(
            source.locate(period),
            tmp.path()
                .join("green_tripdata_2021-02.parquet")
                .display()
                .to_string()
        );
    }
}

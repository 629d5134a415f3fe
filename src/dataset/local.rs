use crate::dataset::DataSource;
use crate::error::{Error, Result};
use crate::period::Period;
use std::path::{Path, PathBuf};

/// Reads monthly files that were placed in a directory beforehand.
///
/// File names follow the same template as the remote source, so a directory
/// filled by hand from the public bucket works unchanged.
#[derive(Clone, Debug)]
pub struct LocalSource {
    dir: PathBuf,
}

impl LocalSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, period: Period) -> PathBuf {
        self.dir.join(period.file_name())
    }
}

impl DataSource for LocalSource {
    fn locate(&self, period: Period) -> String {
        self.path_for(period).display().to_string()
    }

    fn fetch(&self, period: Period) -> Result<Vec<u8>> {
        std::fs::read(self.path_for(period))
            .map_err(|e| Error::source_unavailable(self.locate(period), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_source_reads_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        let period = Period::new(2021, 1)?;
        std::fs::write(tmp.path().join("green_tripdata_2021-01.parquet"), b"PAR1")?;

        let source = LocalSource::new(tmp.path());
        assert_eq!(source.fetch(period)?, b"PAR1".to_vec());
        Ok(())
    }

    #[test]
    fn test_local_source_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let source = LocalSource::new(tmp.path());
        let period = Period::new(2021, 2).unwrap();

        match source.fetch(period) {
            Err(Error::SourceUnavailable { location, .. }) => {
                assert!(location.ends_with("green_tripdata_2021-02.parquet"));
            }
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }
}

use crate::dataset::DataSource;
use crate::error::{Error, Result};
use crate::period::Period;
use std::collections::HashMap;

/// Serves files from memory; periods without a file are unavailable.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<Period, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the bytes served for `period`, replacing any previous file.
    pub fn with_file(mut self, period: Period, bytes: Vec<u8>) -> Self {
        self.files.insert(period, bytes);
        self
    }
}

impl DataSource for MemorySource {
    fn locate(&self, period: Period) -> String {
        format!("memory://{}", period.file_name())
    }

    fn fetch(&self, period: Period) -> Result<Vec<u8>> {
        self.files
            .get(&period)
            .cloned()
            .ok_or_else(|| Error::source_unavailable(self.locate(period), "no such file"))
    }
}

use crate::dataset::{DataSource, DEFAULT_BASE_URL};
use crate::error::{Error, Result};
use crate::period::Period;
use std::time::Duration;

/// Downloads monthly files over HTTP with a blocking client.
///
/// Requests are sent once; non-2xx responses count as unavailable. No timeout
/// is applied unless one is configured with [`HttpSource::with_timeout`].
#[derive(Clone, Debug)]
pub struct HttpSource {
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Bound the whole request (connect + body) to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn client(&self) -> reqwest::Result<reqwest::blocking::Client> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl DataSource for HttpSource {
    fn locate(&self, period: Period) -> String {
        format!("{}/{}", self.base_url, period.file_name())
    }

    fn fetch(&self, period: Period) -> Result<Vec<u8>> {
        let url = self.locate(period);
        let unavailable = |e: reqwest::Error| Error::source_unavailable(url.clone(), e);

        let client = self.client().map_err(unavailable)?;
        let response = client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?;
        let bytes = response.bytes().map_err(unavailable)?;

        Ok(bytes.to_vec())
    }
}

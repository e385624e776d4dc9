//! Dataset download strategies
//!
//! The store only needs "give me the bytes at this URL". Direct HTTP is the
//! default; shelling out to curl matches environments where a proxy or
//! certificate setup is only configured for command-line tools.

use async_trait::async_trait;
use reqwest::Client;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// A mechanism for retrieving the raw dataset payload
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Downloads the full payload, failing on any non-success status
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Selectable fetch strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FetcherKind {
    /// Direct HTTP GET
    #[default]
    Http,
    /// Invoke the curl command-line tool
    Curl,
}

impl FetcherKind {
    /// Builds the strategy this kind names
    pub fn build(self) -> Box<dyn Fetcher> {
        match self {
            FetcherKind::Http => Box::new(HttpFetcher::new()),
            FetcherKind::Curl => Box::new(CurlFetcher::new()),
        }
    }
}

/// Fetches the dataset with a plain HTTP GET
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    http_client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{} returned HTTP {}", url, status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;
        debug!(bytes = body.len(), "downloaded dataset over http");
        Ok(body.to_vec())
    }
}

/// Fetches the dataset by running `curl` and capturing its stdout
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    program: String,
}

impl CurlFetcher {
    pub fn new() -> Self {
        Self::with_program("curl")
    }

    /// Uses a different executable in place of `curl`
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for CurlFetcher {
    fn name(&self) -> &'static str {
        "curl"
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        // --fail turns HTTP errors into a non-zero exit status
        let output = Command::new(&self.program)
            .args(["--fail", "--silent", "--show-error", "--location", url])
            .output()
            .await
            .map_err(|e| Error::Fetch(format!("could not run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Fetch(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        debug!(bytes = output.stdout.len(), "downloaded dataset with curl");
        Ok(output.stdout)
    }
}

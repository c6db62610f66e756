//! Where raw `/pm` payloads come from.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::core::config::Config;
use crate::error::{PmError, Result};

/// An asynchronous producer of raw payloads.
pub trait MetricsSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<Value>> + Send;
}

/// `GET`s the power-monitor endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            // The monitor lives on the local network
            .no_proxy()
            .user_agent(concat!("pmview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PmError::other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.source_url()?,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl MetricsSource for HttpSource {
    fn fetch(&self) -> impl Future<Output = Result<Value>> + Send {
        let client = self.client.clone();
        let url = self.url.clone();

        async move {
            let response = client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| PmError::fetch(format!("GET {} failed: {}", url, e)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(PmError::fetch(format!("GET {} returned status {}", url, status)));
            }

            let body = response
                .text()
                .await
                .map_err(|e| PmError::fetch(format!("Failed to read body from {}: {}", url, e)))?;

            serde_json::from_str(&body)
                .map_err(|e| PmError::parse(format!("invalid JSON payload: {}", e)))
        }
    }
}

/// Adapts an async closure into a [`MetricsSource`].
pub struct FnSource<F> {
    fetch: F,
}

pub fn source_fn<F, Fut>(fetch: F) -> FnSource<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    FnSource { fetch }
}

impl<F, Fut> MetricsSource for FnSource<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    fn fetch(&self) -> impl Future<Output = Result<Value>> + Send {
        (self.fetch)()
    }
}

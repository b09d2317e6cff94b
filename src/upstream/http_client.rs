use crate::config::UpstreamConfig;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;
use tracing::{debug, warn};
use url::Url;

const MAX_BACKOFF: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: Url, status: StatusCode },

    #[error("unexpected body from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Worth another attempt: network trouble, throttling, server errors.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            FetchError::Decode { .. } => false,
        }
    }
}

pub struct HttpClient {
    inner: reqwest::Client,
    base_url: Url,
    max_retries: usize,
    retry_base_delay_ms: u64,
}

impl HttpClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            inner,
            base_url: parse_base_url(&config.base_url)?,
            max_retries: config.max_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid endpoint path {:?}", path))
    }

    /// GET a JSON document, retrying transient failures with jittered backoff.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(self.retry_base_delay_ms)
            .max_delay(MAX_BACKOFF)
            .map(jitter)
            .take(self.max_retries);

        RetryIf::spawn(strategy, || self.get_once(url), |e: &FetchError| {
            let retry = e.is_transient();
            if retry {
                warn!("{} — retrying", e);
            }
            retry
        })
        .await
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        debug!("GET {}", url);

        let resp = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }

        let body = resp.text().await.map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

        decode(url, &body)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|source| FetchError::Decode {
        url: url.clone(),
        source,
    })
}

/// Parse the service root so that `join` appends rather than replaces its last segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).with_context(|| format!("Invalid upstream base URL {:?}", raw))
}

// Engine metrics endpoint client (fetch + decode into RawSnapshot).

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::config::EngineConfig;
use crate::models::RawSnapshot;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("engine returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid metrics payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can produce a raw engine snapshot (HTTP endpoint, fixture, ...).
pub trait SnapshotSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<RawSnapshot, EngineError>> + Send;
}

pub struct EngineClient {
    client: reqwest::Client,
    url: String,
}

impl EngineClient {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(EngineError::Client)?;
        Ok(Self {
            client,
            url: config.metrics_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SnapshotSource for EngineClient {
    async fn fetch(&self) -> Result<RawSnapshot, EngineError> {
        let request_err = |source| EngineError::Request {
            url: self.url.clone(),
            source,
        };
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(request_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Status {
                url: self.url.clone(),
                status,
            });
        }
        let body = response.text().await.map_err(request_err)?;
        serde_json::from_str(&body).map_err(|source| EngineError::Decode {
            url: self.url.clone(),
            source,
        })
    }
}

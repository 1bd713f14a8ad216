use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use crate::mapping::Category;

/// Raw access to the upstream API. A non-2xx answer is an error at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<String, UpstreamError>;
}

/// reqwest-backed transport. No response caching and no retries: every call hits the live API.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!("wonderwise/", env!("CARGO_PKG_VERSION")));
        // Without a configured timeout a stalled upstream stalls the caller.
        if let Some(ms) = config.timeout_ms { builder = builder.timeout(Duration::from_millis(ms)); }
        let http = builder.build().context("building upstream HTTP client")?;
        Ok(Self { http, base_url: config.base_url.as_str().trim_end_matches('/').to_string() })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<String, UpstreamError> {
        let url = self.url_for(path);
        debug!(%url, "GET upstream");
        let resp = self.http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { path: path.to_string(), source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { path: path.to_string(), status: status.as_u16() });
        }
        resp.text().await.map_err(|source| UpstreamError::Transport { path: path.to_string(), source })
    }
}

/// Result of a single-resource fetch that reached the upstream successfully.
#[derive(Debug, Clone, PartialEq)]
pub enum SingleFetch {
    Json(Value),
    /// The body was not JSON; kept for diagnostics.
    Unparsable { raw: String },
}

/// Outcome of fetching all four categories concurrently. All or nothing.
#[derive(Debug)]
pub enum FanOut {
    /// One entry per category in [`Category::ALL`] order.
    Complete(Vec<(Category, Vec<Value>)>),
    /// First failing leg in category order; the other legs were still awaited.
    Failed { category: Category, error: UpstreamError },
}

impl FanOut {
    pub fn is_complete(&self) -> bool { matches!(self, FanOut::Complete(_)) }

    /// Concatenate the groups, keeping per-category contiguity and group order.
    pub fn into_flat(self) -> Result<Vec<Value>, UpstreamError> {
        match self {
            FanOut::Complete(groups) => Ok(groups.into_iter().flat_map(|(_, items)| items).collect()),
            FanOut::Failed { error, .. } => Err(error),
        }
    }
}

#[derive(Clone)]
pub struct UpstreamClient {
    transport: Arc<dyn Transport>,
}

impl UpstreamClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self { Self { transport } }

    pub fn http(config: &UpstreamConfig) -> Result<Self> { Ok(Self::new(Arc::new(HttpTransport::new(config)?))) }

    /// Fetch one already-translated path. Transport and status failures propagate;
    /// a non-JSON body is captured instead of failing.
    pub async fn fetch_one(&self, path: &str) -> Result<SingleFetch, UpstreamError> {
        let body = self.transport.get(path).await?;
        match serde_json::from_str::<Value>(&body) {
            Ok(v) => Ok(SingleFetch::Json(v)),
            Err(e) => {
                error!(path, error = %e, raw = %body, "Failed to parse JSON");
                Ok(SingleFetch::Unparsable { raw: body })
            }
        }
    }

    /// Fetch a whole category; the body must be a JSON array.
    pub async fn fetch_group(&self, category: Category) -> Result<Vec<Value>, UpstreamError> {
        let path = category.upstream_name();
        let body = self.transport.get(path).await?;
        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(_) => Err(UpstreamError::NotAnArray { path: path.to_string() }),
            Err(source) => Err(UpstreamError::Malformed { path: path.to_string(), source }),
        }
    }

    /// Issue the four category requests at once and wait for every one of them.
    pub async fn fan_out(&self) -> FanOut {
        let results = join_all(Category::ALL.map(|c| self.fetch_group(c))).await;
        let mut groups = Vec::with_capacity(Category::ALL.len());
        let mut failure = None;
        for (category, res) in Category::ALL.into_iter().zip(results) {
            match res {
                Ok(items) => groups.push((category, items)),
                Err(error) => {
                    warn!(%category, %error, "fan-out leg failed");
                    if failure.is_none() { failure = Some((category, error)); }
                }
            }
        }
        match failure {
            Some((category, error)) => FanOut::Failed { category, error },
            None => FanOut::Complete(groups),
        }
    }
}

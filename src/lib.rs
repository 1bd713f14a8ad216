pub mod aggregator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod mapping;
pub mod proxy;
pub mod sanitize;
pub mod server;
pub mod types;
pub mod upstream;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::aggregator::categorize;
    pub use crate::catalog::RemoteCatalog;
    pub use crate::config::Config;
    pub use crate::error::{CatalogError, UpstreamError};
    pub use crate::mapping::{translate_endpoint, Category};
    pub use crate::proxy::ProxyReply;
    pub use crate::types::{CategorySet, ContentItem};
    pub use crate::Wonderwise;
}

use std::sync::Arc;

use anyhow::Result;

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::error::{CatalogError, UpstreamError};
use crate::proxy::{Proxy, ProxyReply};
use crate::types::{CategorySet, ContentItem};
use crate::upstream::{Transport, UpstreamClient};

/// Library entry point. Owns the upstream client and the views built on it.
#[derive(Clone)]
pub struct Wonderwise {
    config: Config,
    proxy: Proxy,
    aggregator: Aggregator,
}

impl Wonderwise {
    /// Build against the configured upstream over HTTP.
    pub fn new(config: Config) -> Result<Self> {
        let client = UpstreamClient::http(&config.upstream)?;
        Ok(Self::from_client(config, client))
    }

    /// Build over any transport (tests, alternative backends).
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self::from_client(config, UpstreamClient::new(transport))
    }

    fn from_client(config: Config, client: UpstreamClient) -> Self {
        Self { config, proxy: Proxy::new(client.clone()), aggregator: Aggregator::new(client) }
    }

    pub fn config(&self) -> &Config { &self.config }

    /// One proxy request, exactly as `/api/proxy?endpoint=...` answers it.
    pub async fn proxy(&self, endpoint: Option<&str>) -> ProxyReply { self.proxy.handle(endpoint).await }

    /// All four categories grouped; a failing leg fails the call.
    pub async fn categories(&self) -> Result<CategorySet, UpstreamError> { self.aggregator.categories().await }

    pub async fn landing(&self) -> Result<CategorySet, CatalogError> { self.aggregator.landing().await }

    pub async fn detail(&self, category: &str, id: &str) -> Result<Option<ContentItem>, UpstreamError> {
        self.aggregator.detail(category, id).await
    }
}

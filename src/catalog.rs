use anyhow::Context;
use serde_json::Value;
use tracing::{error, info, warn};
use url::Url;

use crate::aggregator::{categorize, item_from_payload};
use crate::error::CatalogError;
use crate::mapping::{item_endpoint, ALL_ENDPOINT};
use crate::types::{CategorySet, ContentItem};

/// Consumer of a running proxy, as the landing and detail pages use it.
pub struct RemoteCatalog {
    http: reqwest::Client,
    proxy_url: Url,
}

impl RemoteCatalog {
    /// `proxy_url` is the full proxy route, e.g. `http://localhost:3000/api/proxy`.
    pub fn new(proxy_url: Url) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().build().context("building catalog HTTP client")?;
        Ok(Self { http, proxy_url })
    }

    async fn request(&self, endpoint: &str) -> Result<Value, reqwest::Error> {
        self.http
            .get(self.proxy_url.clone())
            .query(&[("endpoint", endpoint)])
            .send()
            .await?
            .json::<Value>()
            .await
    }

    /// Every item, grouped. Never fails: problems yield empty groups.
    pub async fn fetch_all(&self) -> CategorySet {
        match self.request(ALL_ENDPOINT).await {
            Ok(Value::Array(items)) => {
                let set = categorize(items);
                for (category, items) in set.iter() {
                    info!("{category} items: {}", items.len());
                }
                set
            }
            Ok(other) => {
                error!("Invalid data format: {other}");
                CategorySet::default()
            }
            Err(e) => {
                error!("API Error: {e}");
                CategorySet::default()
            }
        }
    }

    pub async fn landing(&self) -> Result<CategorySet, CatalogError> {
        let set = self.fetch_all().await;
        if set.is_meaningful() { Ok(set) } else { Err(CatalogError::NoData) }
    }

    /// One item by category (either vocabulary) and id.
    pub async fn detail(&self, category: &str, id: &str) -> Result<Option<ContentItem>, CatalogError> {
        let payload = self.request(&item_endpoint(category, id)).await.map_err(|e| {
            warn!("Error fetching detail: {e}");
            CatalogError::Request(e)
        })?;
        Ok(item_from_payload(payload))
    }
}

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, UpstreamError};
use crate::mapping::{item_endpoint, translate_endpoint, Category};
use crate::types::{CategorySet, ContentItem};
use crate::upstream::{SingleFetch, UpstreamClient};

/// Regroup a flat item list by each item's own `category` field.
///
/// The field decides, not the endpoint the item came from. Unknown categories
/// and items that do not look like a [`ContentItem`] are dropped.
pub fn categorize<I>(items: I) -> CategorySet
where
    I: IntoIterator<Item = Value>,
{
    let mut set = CategorySet::default();
    for raw in items {
        let label = match raw.get("category") {
            Some(Value::String(s)) => s.to_lowercase(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string().to_lowercase(),
        };
        let Some(category) = Category::from_upstream(&label) else {
            warn!("Unmatched category: {:?}", raw.get("category"));
            continue;
        };
        match serde_json::from_value::<ContentItem>(raw) {
            Ok(item) => set.push(category, item),
            Err(e) => warn!(%category, "dropping malformed item: {e}"),
        }
    }
    for (category, items) in set.iter() {
        debug!("{category} items: {}", items.len());
    }
    set
}

/// Interpret a single-resource payload as one item. Error objects, arrays and
/// anything else that is not an item yield `None`.
pub fn item_from_payload(payload: Value) -> Option<ContentItem> {
    if !payload.is_object() || payload.get("error").is_some() { return None; }
    serde_json::from_value(payload).map_err(|e| warn!("detail payload is not an item: {e}")).ok()
}

/// Grouped views over the upstream, computed in-process.
#[derive(Clone)]
pub struct Aggregator {
    client: UpstreamClient,
}

impl Aggregator {
    pub fn new(client: UpstreamClient) -> Self { Self { client } }

    /// Fan out and group. Any failing leg fails the whole call.
    pub async fn categories(&self) -> Result<CategorySet, UpstreamError> {
        let flat = self.client.fan_out().await.into_flat()?;
        info!("Combined data: {} items", flat.len());
        Ok(categorize(flat))
    }

    /// Data for the landing view. Upstream failures degrade to "no data".
    pub async fn landing(&self) -> Result<CategorySet, CatalogError> {
        let set = self.categories().await.unwrap_or_else(|e| {
            warn!("landing fetch failed: {e}");
            CategorySet::default()
        });
        if set.is_meaningful() { Ok(set) } else { Err(CatalogError::NoData) }
    }

    /// One item by client-facing category and id.
    pub async fn detail(&self, category: &str, id: &str) -> Result<Option<ContentItem>, UpstreamError> {
        let path = translate_endpoint(&item_endpoint(category, id));
        match self.client.fetch_one(&path).await? {
            SingleFetch::Json(v) => Ok(item_from_payload(v)),
            SingleFetch::Unparsable { .. } => Ok(None),
        }
    }
}

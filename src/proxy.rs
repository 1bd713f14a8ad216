use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::UpstreamError;
use crate::mapping::{translate_endpoint, ALL_ENDPOINT};
use crate::upstream::{SingleFetch, UpstreamClient};

pub const MISSING_ENDPOINT_MESSAGE: &str = "No endpoint specified";
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse JSON";

/// Terminal outcome of one proxy request. Every variant has a JSON body; none of them is an HTTP error by itself.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyReply {
    /// `endpoint` absent or empty. No upstream call was made.
    MissingEndpoint,
    /// Flat fan-out result for `all`.
    Combined(Vec<Value>),
    /// Upstream JSON, forwarded verbatim.
    Passthrough(Value),
    /// Upstream answered with something that is not JSON.
    Unparsable { raw: String },
    /// Anything failed along the way.
    Empty,
}

impl ProxyReply {
    pub fn body(&self) -> Value {
        match self {
            ProxyReply::MissingEndpoint => json!({ "error": MISSING_ENDPOINT_MESSAGE }),
            ProxyReply::Combined(items) => Value::Array(items.clone()),
            ProxyReply::Passthrough(v) => v.clone(),
            ProxyReply::Unparsable { raw } => json!({ "error": PARSE_FAILURE_MESSAGE, "details": raw }),
            ProxyReply::Empty => Value::Array(Vec::new()),
        }
    }

    pub fn into_body(self) -> Value {
        match self {
            ProxyReply::Combined(items) => Value::Array(items),
            ProxyReply::Passthrough(v) => v,
            other => other.body(),
        }
    }

    /// True for replies that only exist because something went wrong.
    pub fn is_failure(&self) -> bool {
        matches!(self, ProxyReply::MissingEndpoint | ProxyReply::Unparsable { .. } | ProxyReply::Empty)
    }
}

/// The `/api/proxy` boundary: translate, fetch, and fail soft.
#[derive(Clone)]
pub struct Proxy {
    client: UpstreamClient,
}

impl Proxy {
    pub fn new(client: UpstreamClient) -> Self { Self { client } }

    pub async fn handle(&self, endpoint: Option<&str>) -> ProxyReply {
        let endpoint = match endpoint {
            Some(e) if !e.is_empty() => e,
            _ => return ProxyReply::MissingEndpoint,
        };
        match self.dispatch(endpoint).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Proxy error: {e}");
                ProxyReply::Empty
            }
        }
    }

    async fn dispatch(&self, endpoint: &str) -> Result<ProxyReply, UpstreamError> {
        if endpoint == ALL_ENDPOINT {
            let all = self.client.fan_out().await.into_flat()?;
            info!("Combined data: {} items", all.len());
            return Ok(ProxyReply::Combined(all));
        }

        let path = translate_endpoint(endpoint);
        info!("Converted endpoint: {endpoint} -> {path}");
        Ok(match self.client.fetch_one(&path).await? {
            SingleFetch::Json(v) => ProxyReply::Passthrough(v),
            SingleFetch::Unparsable { raw } => ProxyReply::Unparsable { raw },
        })
    }
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::proxy::ProxyReply;
use crate::types::CategorySet;
use crate::Wonderwise;

pub const PROXY_ROUTE: &str = "/api/proxy";
pub const CATEGORIES_ROUTE: &str = "/api/categories";

pub type AppState = Arc<Wonderwise>;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(PROXY_ROUTE, get(proxy_handler))
        .route(CATEGORIES_ROUTE, get(categories_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Status for a proxy reply. Compatibility mode answers 200 no matter what.
pub fn reply_status(reply: &ProxyReply, strict: bool) -> StatusCode {
    if !strict { return StatusCode::OK; }
    match reply {
        ProxyReply::MissingEndpoint => StatusCode::BAD_REQUEST,
        ProxyReply::Unparsable { .. } | ProxyReply::Empty => StatusCode::BAD_GATEWAY,
        ProxyReply::Combined(_) | ProxyReply::Passthrough(_) => StatusCode::OK,
    }
}

// Raw pairs so a repeated `endpoint` cannot turn into a rejection; the first one wins.
async fn proxy_handler(State(app): State<AppState>, Query(params): Query<Vec<(String, String)>>) -> Response {
    let endpoint = params.iter().find(|(k, _)| k == "endpoint").map(|(_, v)| v.as_str());
    let reply = app.proxy(endpoint).await;
    let status = reply_status(&reply, app.config().server.strict_status);
    (status, Json(reply.into_body())).into_response()
}

async fn categories_handler(State(app): State<AppState>) -> Response {
    match app.categories().await {
        Ok(set) => Json(set).into_response(),
        Err(e) => {
            warn!("categories unavailable: {e}");
            let status = if app.config().server.strict_status { StatusCode::BAD_GATEWAY } else { StatusCode::OK };
            (status, Json(CategorySet::default())).into_response()
        }
    }
}

pub async fn serve(app: Wonderwise) -> Result<()> {
    let address: SocketAddr = app
        .config()
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address: {}", app.config().server.bind))?;
    info!("Upstream: {}", app.config().upstream.base_url);

    let listener = TcpListener::bind(address).await.with_context(|| format!("binding {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, router(Arc::new(app)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compatibility_mode_is_always_ok() {
        for reply in [ProxyReply::MissingEndpoint, ProxyReply::Empty, ProxyReply::Unparsable { raw: "x".into() }, ProxyReply::Combined(vec![])] {
            assert_eq!(reply_status(&reply, false), StatusCode::OK);
        }
    }

    #[test]
    fn strict_mode_maps_failures() {
        assert_eq!(reply_status(&ProxyReply::MissingEndpoint, true), StatusCode::BAD_REQUEST);
        assert_eq!(reply_status(&ProxyReply::Empty, true), StatusCode::BAD_GATEWAY);
        assert_eq!(reply_status(&ProxyReply::Unparsable { raw: String::new() }, true), StatusCode::BAD_GATEWAY);
        assert_eq!(reply_status(&ProxyReply::Passthrough(json!({"id": 1})), true), StatusCode::OK);
    }
}

//! Shared helpers: a wiremock-backed upstream and an in-process proxy.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wonderwise::config::Config;
use wonderwise::server::router;
use wonderwise::Wonderwise;

/// Mock of the upstream content API, mounted under `/api`.
pub struct Upstream {
    pub server: MockServer,
}

impl Upstream {
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    pub fn config(&self) -> Config {
        let mut cfg = Config::default();
        cfg.upstream.base_url = self.base_url().parse().unwrap();
        cfg
    }

    /// Serve JSON on `GET /api/<route>`; only requests asking for JSON match.
    pub async fn json(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/{route}")))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn text(&self, route: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/{route}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mount the four category listings with the given sizes, tagged with their own category.
    pub async fn categories(&self, sizes: [usize; 4]) {
        let mut next = 1;
        for (route, n) in ["sejarah", "wisata", "kuliner", "event"].into_iter().zip(sizes) {
            self.json(route, items(route, next, n)).await;
            next += n as i64;
        }
    }

    pub async fn request_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }
}

pub fn item(id: i64, category: &str) -> Value {
    json!({
        "id": id,
        "title": format!("{category} #{id}"),
        "description": "<p>Keindahan alam</p><button>Pesan</button>",
        "image": format!("https://img.example/{id}.jpg"),
        "category": category,
        "createdAt": "2024-12-01T09:30:00.000Z",
        "updatedAt": null,
    })
}

pub fn items(category: &str, first_id: i64, n: usize) -> Value {
    Value::Array((0..n as i64).map(|i| item(first_id + i, category)).collect())
}

/// Drive the router in-process and return status plus JSON body.
pub async fn get(app: &Wonderwise, uri: &str) -> (StatusCode, Value) {
    let resp = router(Arc::new(app.clone()))
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

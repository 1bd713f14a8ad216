use thiserror::Error;

/// Failures talking to the upstream content API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error! status: {status} ({path})")]
    Status { path: String, status: u16 },

    #[error("malformed JSON from {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON array from {path}")]
    NotAnArray { path: String },
}

impl UpstreamError {
    pub fn path(&self) -> &str {
        match self {
            UpstreamError::Transport { path, .. }
            | UpstreamError::Status { path, .. }
            | UpstreamError::Malformed { path, .. }
            | UpstreamError::NotAnArray { path } => path,
        }
    }
}

/// Failures surfaced to whoever renders the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Every category came back empty. Retryable.
    #[error("Data tidak tersedia")]
    NoData,

    #[error("Gagal memuat data: {0}")]
    Request(#[from] reqwest::Error),
}

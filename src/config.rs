use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api-wonderwise.up.railway.app/api";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const CONFIG_FILE_NAME: &str = "wonderwise.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: Url,
    /// No timeout unless set.
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Map failures to 4xx/5xx instead of always answering 200.
    pub strict_status: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"), timeout_ms: None }
    }
}

impl Default for ServerConfig {
    fn default() -> Self { Self { bind: DEFAULT_BIND.to_string(), strict_status: false } }
}

impl Config {
    /// Explicit file, else `<config dir>/wonderwise.toml` when present, else defaults.
    /// `WONDERWISE_*` environment variables win over both.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut cfg = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).with_context(|| format!("reading config: {}", path.display()))?;
        let cfg = toml::from_str(&raw).with_context(|| format!("parsing config: {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = parse_var(&lookup, "WONDERWISE_BASE_URL") { self.upstream.base_url = url; }
        if let Some(ms) = parse_var(&lookup, "WONDERWISE_TIMEOUT_MS") { self.upstream.timeout_ms = Some(ms); }
        if let Some(bind) = lookup("WONDERWISE_BIND") { self.server.bind = bind; }
        if let Some(raw) = lookup("WONDERWISE_STRICT_STATUS") {
            match parse_flag(&raw) {
                Some(v) => self.server.strict_status = v,
                None => warn!("Invalid WONDERWISE_STRICT_STATUS value: {raw}"),
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "wonderwise", "wonderwise").map(|p| p.config_dir().join(CONFIG_FILE_NAME))
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    raw.trim().parse().map_err(|e| warn!("Invalid {key} value: {e}")).ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

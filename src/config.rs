use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

use crate::record::DEFAULT_PLACEHOLDER_IMAGE;

pub const DEFAULT_BACKEND_ORIGIN: &str = "http://localhost:5000";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const CONFIG_FILE: &str = "showroom.toml";

/// On-disk shape; every key is optional.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "snake_case")]
struct FileConfig {
    #[serde(default)]
    backend_origin: Option<String>,
    #[serde(default)]
    api_prefix: Option<String>,
    #[serde(default)]
    placeholder_image: Option<String>,
    #[serde(default)]
    request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowroomConfig {
    /// Scheme and host of the backend, without a trailing slash.
    pub backend_origin: String,
    pub api_prefix: String,
    pub placeholder_image: String,
    pub request_timeout_ms: u64,
}

impl Default for ShowroomConfig {
    fn default() -> Self {
        Self {
            backend_origin: DEFAULT_BACKEND_ORIGIN.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ShowroomConfig {
    /// Load from `path`, or from `showroom.toml` in the user config directory
    /// when it exists, then apply `SHOWROOM_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => Some(read_file_config(p)?),
            None => match default_config_path().filter(|p| p.exists()) {
                Some(p) => Some(read_file_config(&p)?),
                None => None,
            },
        };
        let mut cfg = Self::default();
        if let Some(file) = file {
            cfg.merge(file);
        }
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.validated()
    }

    /// Parse a TOML document directly; no environment overrides.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(s).context("parsing showroom config")?;
        let mut cfg = Self::default();
        cfg.merge(file);
        cfg.validated()
    }

    /// Replace the origin, e.g. from a command-line flag.
    pub fn with_origin(mut self, origin: &str) -> Result<Self> {
        self.backend_origin = origin.to_string();
        self.validated()
    }

    fn merge(&mut self, file: FileConfig) {
        if let Some(v) = file.backend_origin { self.backend_origin = v; }
        if let Some(v) = file.api_prefix { self.api_prefix = v; }
        if let Some(v) = file.placeholder_image { self.placeholder_image = v; }
        if let Some(v) = file.request_timeout_ms { self.request_timeout_ms = v; }
    }

    fn apply_env<F>(&mut self, var: F) -> Result<()>
    where F: Fn(&str) -> Option<String> {
        let set = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = set("SHOWROOM_BACKEND_ORIGIN") { self.backend_origin = v; }
        if let Some(v) = set("SHOWROOM_API_PREFIX") { self.api_prefix = v; }
        if let Some(v) = set("SHOWROOM_PLACEHOLDER_IMAGE") { self.placeholder_image = v; }
        if let Some(v) = set("SHOWROOM_TIMEOUT_MS") {
            self.request_timeout_ms = v
                .trim()
                .parse()
                .with_context(|| format!("invalid SHOWROOM_TIMEOUT_MS: {v}"))?;
        }
        Ok(())
    }

    fn validated(mut self) -> Result<Self> {
        self.backend_origin = validate_origin(&self.backend_origin)?;
        self.api_prefix = normalize_prefix(&self.api_prefix);
        if self.request_timeout_ms == 0 {
            self.request_timeout_ms = DEFAULT_TIMEOUT_MS;
        }
        Ok(self)
    }

    /// Base URL all content endpoints hang off, with a trailing slash.
    pub fn api_base(&self) -> Result<Url> {
        let base = format!("{}{}/", self.backend_origin, self.api_prefix);
        Url::parse(&base).with_context(|| format!("invalid api base: {base}"))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    debug!(path = %path.display(), "loading config");
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config: {}", path.display()))
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "showroom", "showroom").map(|p| p.config_dir().join(CONFIG_FILE))
}

/// Check that `origin` is a bare http(s) origin and strip any trailing slash.
pub fn validate_origin(origin: &str) -> Result<String> {
    let trimmed = origin.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).with_context(|| format!("invalid backend origin: {origin}"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(anyhow!("backend origin must be http or https (got `{other}`)")),
    }
    if url.host_str().is_none() {
        return Err(anyhow!("backend origin has no host: {origin}"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(anyhow!("backend origin must not carry a path, query or fragment: {origin}"));
    }
    Ok(trimmed.to_string())
}

fn normalize_prefix(prefix: &str) -> String {
    let inner = prefix.trim().trim_matches('/');
    if inner.is_empty() { String::new() } else { format!("/{inner}") }
}

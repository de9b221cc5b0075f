//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars, then extracts typed sections. Provides helpers to expand `~` and
//! `${VAR}` and to resolve relative paths against a known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{CollectionTarget, LIMIT_MAX, LIMIT_MIN};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        // Double underscore separates section from key so keys may
        // themselves contain underscores: APP_BACKEND__TIMEOUT_SECS.
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Ok(Self { figment })
    }

    /// Build a config from an explicit Figment, bypassing the file/env
    /// merge. Used by tests and by embedders that already hold settings.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    /// Extract one typed section (e.g. `"backend"`). Missing sections fall
    /// back to the section type's serde defaults.
    pub fn section<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match self.figment.find_value(key) {
            Ok(_) => self
                .figment
                .extract_inner(key)
                .map_err(|e| anyhow::anyhow!("Failed to read section '{}': {}", key, e)),
            Err(_) => Ok(T::default()),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8000 }
    }
}

/// Vector-search backend connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: Option<String>,
    /// Per-collection call budget for the fan-out.
    pub timeout_secs: u64,
    /// Read consistency requested on every query.
    pub consistency_level: String,
    /// Whether the backend can embed query text itself. When false, a
    /// blended request must carry its own vector.
    pub embeds_queries: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            api_key: None,
            timeout_secs: 30,
            consistency_level: "ONE".to_string(),
            embeds_queries: false,
        }
    }
}

/// Fan-out search settings: which collections to hit and what to ask for.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub collections: Vec<String>,
    pub default_limit: usize,
    /// Properties the keyword/blended match runs against.
    pub properties: Vec<String>,
    /// Object fields returned per hit.
    pub return_fields: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            collections: [
                "SongLyrics",
                "SongLyrics_400k",
                "SongLyrics_200k",
                "SongLyrics_50k",
                "SongLyrics_30k",
                "SongLyrics_20k",
                "SongLyrics_15k",
                "SongLyrics_12k",
                "SongLyrics_10k",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            default_limit: 200,
            properties: vec!["title".to_string(), "lyrics".to_string()],
            return_fields: [
                "title",
                "tag",
                "artist",
                "year",
                "views",
                "features",
                "lyrics",
                "song_id",
                "language_cld3",
                "language_ft",
                "language",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
        }
    }
}

impl SearchConfig {
    /// Validate and convert the configured collection names.
    pub fn targets(&self) -> Result<Vec<CollectionTarget>> {
        if self.collections.is_empty() {
            return Err(Error::InvalidConfig(
                "search.collections must name at least one collection".to_string(),
            ));
        }
        if !(LIMIT_MIN..=LIMIT_MAX).contains(&self.default_limit) {
            return Err(Error::InvalidConfig(format!(
                "search.default_limit must be in [{}, {}], got {}",
                LIMIT_MIN, LIMIT_MAX, self.default_limit
            )));
        }
        self.collections.iter().map(CollectionTarget::new).collect()
    }
}

/// Stored-query lookup settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Path to the stored-queries JSON file; `~` and `$VAR` are expanded.
    pub queries_file: Option<String>,
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

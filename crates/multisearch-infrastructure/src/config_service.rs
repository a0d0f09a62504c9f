//! Configuration service implementation.
//!
//! Loads [`SearchConfig`] from `config.toml` (created with defaults when
//! missing) and applies environment overrides on top.

use multisearch_core::config::SearchConfig;
use multisearch_core::error::{Result, SearchError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::paths::SearchPaths;

pub const ENV_WEBHOOK_URL: &str = "MULTISEARCH_WEBHOOK_URL";
pub const ENV_TIMEOUT_SECS: &str = "MULTISEARCH_TIMEOUT_SECS";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<SearchConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the platform default `config.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(SearchPaths::config_file()?))
    }

    /// Creates a service reading the given file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A file that cannot be loaded is reported and replaced by defaults
    /// (environment overrides still apply).
    pub fn get_config(&self) -> SearchConfig {
        if let Ok(read_lock) = self.config.read()
            && let Some(ref cached) = *read_lock
        {
            return cached.clone();
        }

        let loaded = self.load().unwrap_or_else(|e| {
            tracing::warn!("[Config] Falling back to defaults: {}", e);
            apply_overrides(SearchConfig::default(), |key| std::env::var(key).ok())
        });

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Loads the file (writing defaults first if it does not exist) and applies
    /// environment overrides.
    pub fn load(&self) -> Result<SearchConfig> {
        let from_file = if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            toml::from_str::<SearchConfig>(&content)?
        } else {
            let defaults = SearchConfig::default();
            self.save(&defaults)?;
            tracing::info!("[Config] Created default configuration at {:?}", self.path);
            defaults
        };

        Ok(apply_overrides(from_file, |key| std::env::var(key).ok()))
    }

    /// Writes the configuration to the file and refreshes the cache.
    pub fn save(&self, config: &SearchConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, content)?;

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(config.clone());
        }
        Ok(())
    }
}

/// Applies environment overrides read through `lookup`.
pub fn apply_overrides(
    mut config: SearchConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> SearchConfig {
    if let Some(url) = lookup(ENV_WEBHOOK_URL).filter(|v| !v.trim().is_empty()) {
        config.webhook_url = Some(url.trim().to_string());
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        match raw.trim().parse::<u64>() {
            Ok(secs) => config.request_timeout_secs = secs,
            Err(e) => tracing::warn!("[Config] Invalid {} value '{}': {}", ENV_TIMEOUT_SECS, raw, e),
        }
    }
    config
}

/// Validates that configured endpoints are absolute http(s) URLs.
pub fn validate(config: &SearchConfig) -> Result<()> {
    let endpoints = [
        ("webhook_url", &config.webhook_url),
        ("suggestions_url", &config.suggestions_url),
        ("trending_url", &config.trending_url),
    ];
    for (name, value) in endpoints {
        if let Some(url) = value.as_deref().filter(|u| !u.trim().is_empty()) {
            let parsed = reqwest::Url::parse(url)
                .map_err(|e| SearchError::config(format!("{name} '{url}' is not a valid URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(SearchError::config(format!(
                    "{name} must use http or https, got '{}'",
                    parsed.scheme()
                )));
            }
        }
    }
    Ok(())
}

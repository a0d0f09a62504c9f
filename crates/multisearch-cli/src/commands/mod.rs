pub mod config;
pub mod search;
pub mod suggest;

use anyhow::{Context, Result};
use multisearch_application::SearchApp;
use multisearch_infrastructure::ConfigService;
use std::path::Path;

pub fn config_service(path: Option<&Path>) -> Result<ConfigService> {
    match path {
        Some(path) => Ok(ConfigService::with_path(path)),
        None => ConfigService::new().context("Failed to locate the configuration file"),
    }
}

pub fn build_app(config_service: &ConfigService) -> Result<SearchApp> {
    let config = config_service
        .load()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
    SearchApp::from_config(config).context("Invalid configuration")
}

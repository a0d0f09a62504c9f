//! Client configuration model.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::request::{LocationContext, SearchType};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Root configuration, stored as `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Remote search endpoint. Simulation mode when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending_url: Option<String>,
    /// `0` disables the timeout.
    pub request_timeout_secs: u64,
    pub default_search_type: SearchType,
    pub page_size: usize,
    pub location: LocationSettings,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            suggestions_url: None,
            trending_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            default_search_type: SearchType::All,
            page_size: DEFAULT_PAGE_SIZE,
            location: LocationSettings::default(),
        }
    }
}

impl SearchConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn is_simulation(&self) -> bool {
        self.webhook_url
            .as_deref()
            .is_none_or(|url| url.trim().is_empty())
    }
}

/// Location behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    pub enabled: bool,
    /// Substituted when no real location is known.
    pub fallback: FallbackLocation,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            fallback: FallbackLocation::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackLocation {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for FallbackLocation {
    fn default() -> Self {
        Self {
            city: "Paris".to_string(),
            country: "France".to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
        }
    }
}

impl FallbackLocation {
    pub fn to_context(&self) -> LocationContext {
        LocationContext {
            country: self.country.clone(),
            city: self.city.clone(),
            latitude: Some(self.latitude),
            longitude: Some(self.longitude),
            is_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert!(config.is_simulation());
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.page_size, 12);
        assert!(config.location.enabled);
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = SearchConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SearchConfig = toml::from_str(
            r#"
            webhook_url = "https://hooks.example.com/search"
            default_search_type = "product"

            [location]
            enabled = false
            "#,
        )
        .unwrap();
        assert!(!config.is_simulation());
        assert_eq!(config.default_search_type, SearchType::Product);
        assert!(!config.location.enabled);
        assert_eq!(config.location.fallback.city, "Paris");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_fallback_context_is_flagged() {
        let context = FallbackLocation::default().to_context();
        assert!(context.is_fallback);
        assert!(context.is_complete());
    }
}

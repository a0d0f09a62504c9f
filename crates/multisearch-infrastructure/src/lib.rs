//! Infrastructure adapters for the Multisearch client.

pub mod cached_location;
pub mod config_service;
pub mod http_gateway;
pub mod paths;
pub mod recording_navigator;
pub mod session_identity;
pub mod simulated_gateway;

pub use cached_location::CachedLocationProvider;
pub use config_service::ConfigService;
pub use http_gateway::HttpSearchGateway;
pub use recording_navigator::RecordingNavigator;
pub use session_identity::SessionIdentityProvider;
pub use simulated_gateway::SimulatedSearchGateway;

use async_trait::async_trait;
use multisearch_core::config::SearchConfig;
use multisearch_core::error::Result;
use multisearch_core::gateway::{SearchGateway, SuggestionSource};
use multisearch_core::outcome::SearchOutcome;
use multisearch_core::request::{SearchRequest, SearchType};

/// The gateway selected by configuration.
#[derive(Clone)]
pub enum ConfiguredGateway {
    Http(HttpSearchGateway),
    Simulated(SimulatedSearchGateway),
}

impl ConfiguredGateway {
    /// Builds the HTTP gateway when a webhook is configured, the simulated one otherwise.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config_service::validate(config)?;

        let webhook_url = match config.webhook_url.as_deref() {
            Some(url) if !config.is_simulation() => url,
            _ => {
                tracing::warn!("[Bootstrap] No webhook URL configured, running in simulation mode");
                return Ok(Self::Simulated(SimulatedSearchGateway::new()));
            }
        };

        let mut gateway = HttpSearchGateway::new(webhook_url)?;
        if let Some(url) = config.suggestions_url.as_deref() {
            gateway = gateway.with_suggestions_url(url)?;
        }
        if let Some(url) = config.trending_url.as_deref() {
            gateway = gateway.with_trending_url(url)?;
        }
        tracing::info!("[Bootstrap] Using search webhook {}", webhook_url);
        Ok(Self::Http(gateway))
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::Simulated(_))
    }
}

#[async_trait]
impl SearchGateway for ConfiguredGateway {
    async fn submit(&self, request: &SearchRequest) -> SearchOutcome {
        match self {
            Self::Http(gateway) => gateway.submit(request).await,
            Self::Simulated(gateway) => gateway.submit(request).await,
        }
    }
}

#[async_trait]
impl SuggestionSource for ConfiguredGateway {
    async fn suggestions(&self, query: &str, search_type: SearchType) -> Vec<String> {
        match self {
            Self::Http(gateway) => gateway.suggestions(query, search_type).await,
            Self::Simulated(gateway) => gateway.suggestions(query, search_type).await,
        }
    }

    async fn trending(&self, search_type: SearchType) -> Vec<String> {
        match self {
            Self::Http(gateway) => gateway.trending(search_type).await,
            Self::Simulated(gateway) => gateway.trending(search_type).await,
        }
    }
}

//! Wires the orchestrator and its collaborators from configuration.

use multisearch_core::config::SearchConfig;
use multisearch_core::error::Result;
use multisearch_core::gateway::SuggestionSource;
use multisearch_core::request::SearchType;
use multisearch_core::state::SearchStateStore;
use multisearch_infrastructure::{
    CachedLocationProvider, ConfiguredGateway, RecordingNavigator, SessionIdentityProvider,
};
use std::sync::Arc;

use crate::orchestrator::SearchOrchestrator;

/// A fully wired search client.
///
/// The adapters are kept alongside the orchestrator so the caller can sign
/// users in, record locations and observe navigation.
pub struct SearchApp {
    config: SearchConfig,
    store: SearchStateStore,
    gateway: Arc<ConfiguredGateway>,
    identity: SessionIdentityProvider,
    location: CachedLocationProvider,
    navigator: RecordingNavigator,
    orchestrator: Arc<SearchOrchestrator>,
}

impl SearchApp {
    /// Builds every component from `config`.
    ///
    /// Fails only when a configured endpoint is not a valid http(s) URL.
    pub fn from_config(config: SearchConfig) -> Result<Self> {
        let gateway = Arc::new(ConfiguredGateway::from_config(&config)?);
        let store = SearchStateStore::new();
        let identity = SessionIdentityProvider::new();
        let location = CachedLocationProvider::new(config.location.clone());
        let navigator = RecordingNavigator::new();

        let orchestrator = SearchOrchestrator::new(store.clone(), gateway.clone())
            .with_identity(Arc::new(identity.clone()))
            .with_location(Arc::new(location.clone()))
            .with_navigator(Arc::new(navigator.clone()))
            .with_timeout(config.request_timeout())
            .with_default_search_type(config.default_search_type);

        tracing::debug!(
            "[Bootstrap] Search client ready (timeout: {:?}, default type: {})",
            config.request_timeout(),
            config.default_search_type
        );

        Ok(Self {
            config,
            store,
            gateway,
            identity,
            location,
            navigator,
            orchestrator: Arc::new(orchestrator),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn store(&self) -> &SearchStateStore {
        &self.store
    }

    pub fn orchestrator(&self) -> Arc<SearchOrchestrator> {
        Arc::clone(&self.orchestrator)
    }

    pub fn identity(&self) -> &SessionIdentityProvider {
        &self.identity
    }

    pub fn location(&self) -> &CachedLocationProvider {
        &self.location
    }

    pub fn navigator(&self) -> &RecordingNavigator {
        &self.navigator
    }

    pub fn is_simulated(&self) -> bool {
        self.gateway.is_simulated()
    }

    /// Query completions. Never fails; an unavailable source yields nothing.
    pub async fn suggestions(&self, query: &str, search_type: Option<SearchType>) -> Vec<String> {
        let search_type = search_type.unwrap_or(self.config.default_search_type);
        self.gateway.suggestions(query, search_type).await
    }

    /// Currently popular searches. Never fails.
    pub async fn trending(&self, search_type: Option<SearchType>) -> Vec<String> {
        let search_type = search_type.unwrap_or(self.config.default_search_type);
        self.gateway.trending(search_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multisearch_core::identity::IdentityProvider;
    use multisearch_core::navigation::Destination;
    use multisearch_core::state::SearchStatus;

    #[tokio::test]
    async fn test_default_config_runs_simulated_search() {
        let app = SearchApp::from_config(SearchConfig::default()).unwrap();
        assert!(app.is_simulated());

        app.identity().sign_in("user-1");
        assert_eq!(
            app.identity().current_user_id().await.as_deref(),
            Some("user-1")
        );

        let id = app
            .orchestrator()
            .handle_text_search("desk lamp", None)
            .await
            .unwrap();

        let state = app.store().state();
        assert_eq!(state.status, SearchStatus::Success);
        assert_eq!(state.active_request_id, Some(id));
        assert_eq!(state.total_results, 2);
        assert!(matches!(
            app.navigator().current(),
            Some(Destination::Results(route)) if route.request_id == Some(id)
        ));
    }

    #[tokio::test]
    async fn test_simulation_has_no_suggestions() {
        let app = SearchApp::from_config(SearchConfig::default()).unwrap();
        assert!(app.suggestions("desk", None).await.is_empty());
        assert!(app.trending(Some(SearchType::Product)).await.is_empty());
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let config = SearchConfig {
            webhook_url: Some("ftp://example.com".into()),
            ..Default::default()
        };
        assert!(SearchApp::from_config(config).is_err());
    }
}

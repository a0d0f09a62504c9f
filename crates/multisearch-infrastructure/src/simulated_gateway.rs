//! Simulation mode used when no webhook is configured.

use async_trait::async_trait;
use multisearch_core::gateway::{SearchGateway, SuggestionSource};
use multisearch_core::outcome::{ResultItem, SearchOutcome, SearchSuccess};
use multisearch_core::request::{SearchRequest, SearchType};
use std::time::Duration;

const SIMULATED_EXECUTION_TIME: f64 = 0.1;

/// Gateway that answers every search with two canned results.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSearchGateway {
    latency: Option<Duration>,
}

impl SimulatedSearchGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every answer, to exercise loading states.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn simulated_item(index: usize, description: String, search_type: SearchType) -> ResultItem {
        ResultItem {
            id: Some(index.to_string()),
            title: format!("Simulated result {index}"),
            description,
            result_type: Some(search_type.as_str().to_string()),
            category: Some("Simulation".to_string()),
            tags: vec!["test".to_string(), "simulation".to_string()],
            ..Default::default()
        }
    }
}

#[async_trait]
impl SearchGateway for SimulatedSearchGateway {
    async fn submit(&self, request: &SearchRequest) -> SearchOutcome {
        tracing::warn!(
            "[Gateway] No webhook configured, simulating results for request {}",
            request.request_id()
        );
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let search_type = request.search_type();
        let results = vec![
            Self::simulated_item(1, format!("Result for: {}", request.query()), search_type),
            Self::simulated_item(
                2,
                format!("Another result for: {}", request.query()),
                search_type,
            ),
        ];

        SearchOutcome::Success(SearchSuccess {
            total_results: results.len(),
            results,
            processing_time: Some(SIMULATED_EXECUTION_TIME),
            suggestions: Vec::new(),
        })
    }
}

#[async_trait]
impl SuggestionSource for SimulatedSearchGateway {
    async fn suggestions(&self, _query: &str, _search_type: SearchType) -> Vec<String> {
        Vec::new()
    }

    async fn trending(&self, _search_type: SearchType) -> Vec<String> {
        Vec::new()
    }
}

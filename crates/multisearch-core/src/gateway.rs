//! Remote search gateway traits.

use async_trait::async_trait;

use crate::outcome::SearchOutcome;
use crate::request::{SearchRequest, SearchType};

/// Performs the remote call for one request.
///
/// Implementations never retry and never panic on a bad response: every
/// failure is reported as [`SearchOutcome::Failure`]. `Pending` is never
/// returned.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn submit(&self, request: &SearchRequest) -> SearchOutcome;
}

/// Auxiliary lookups shown around the search box.
///
/// Failures are not errors here; they yield an empty list.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Query completions for a partial input.
    async fn suggestions(&self, query: &str, search_type: SearchType) -> Vec<String>;

    /// Currently popular searches.
    async fn trending(&self, search_type: SearchType) -> Vec<String>;
}

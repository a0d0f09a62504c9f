//! Search orchestrator.
//!
//! Every input modality converges on a single execution path:
//!
//! 1. compute the display query (validation failures stop here, no state change)
//! 2. allocate the request id and dispatch `StartSearch` before any I/O
//! 3. navigate to the results view
//! 4. resolve identity and location, build the request, call the gateway
//! 5. dispatch the resolution tagged with the id from step 2
//!
//! Overlapping searches are allowed. The store's staleness guard decides which
//! resolution is visible; in-flight calls are never aborted.

use multisearch_core::error::{Result, SearchError};
use multisearch_core::gateway::SearchGateway;
use multisearch_core::identity::{AnonymousIdentity, IdentityProvider};
use multisearch_core::location::{LocationProvider, NoLocation};
use multisearch_core::navigation::{Destination, Navigator, ResultsRoute};
use multisearch_core::outcome::SearchOutcome;
use multisearch_core::request::{
    ImageSource, RawInput, RequestContext, RequestId, RequestNormalizer, SearchType,
};
use multisearch_core::state::{SearchAction, SearchStateStore};
use std::sync::Arc;
use std::time::Duration;

/// Coordinates a search from user input to the resolved session state.
pub struct SearchOrchestrator {
    store: SearchStateStore,
    normalizer: RequestNormalizer,
    gateway: Arc<dyn SearchGateway>,
    identity: Arc<dyn IdentityProvider>,
    location: Arc<dyn LocationProvider>,
    navigator: Option<Arc<dyn Navigator>>,
    timeout: Option<Duration>,
    default_search_type: SearchType,
}

impl SearchOrchestrator {
    /// Creates an orchestrator for an anonymous caller without location and
    /// without a navigator. Use the `with_*` methods to attach collaborators.
    pub fn new(store: SearchStateStore, gateway: Arc<dyn SearchGateway>) -> Self {
        Self {
            store,
            normalizer: RequestNormalizer::new(),
            gateway,
            identity: Arc::new(AnonymousIdentity),
            location: Arc::new(NoLocation),
            navigator: None,
            timeout: None,
            default_search_type: SearchType::default(),
        }
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_location(mut self, location: Arc<dyn LocationProvider>) -> Self {
        self.location = location;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Bounds the gateway call. An elapsed timeout resolves the search as a
    /// `Timeout` failure; `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Category used when a handler is called without one.
    pub fn with_default_search_type(mut self, search_type: SearchType) -> Self {
        self.default_search_type = search_type;
        self
    }

    /// The store this orchestrator dispatches to.
    pub fn store(&self) -> &SearchStateStore {
        &self.store
    }

    /// Searches for typed text.
    ///
    /// Returns the id of the started search, or a `Validation` error when the
    /// text is blank (in which case the state is left untouched).
    pub async fn handle_text_search(
        &self,
        text: impl Into<String>,
        search_type: Option<SearchType>,
    ) -> Result<RequestId> {
        self.execute_search(RawInput::Text(text.into()), search_type)
            .await
    }

    /// Searches for a finished voice transcript.
    pub async fn handle_voice_search(
        &self,
        transcript: impl Into<String>,
        search_type: Option<SearchType>,
    ) -> Result<RequestId> {
        self.execute_search(RawInput::Voice(transcript.into()), search_type)
            .await
    }

    /// Searches by image.
    ///
    /// An unreadable image does not return an error: the search is started and
    /// resolves as an `Encoding` failure, so the UI shows the error panel.
    pub async fn handle_image_search(
        &self,
        image: ImageSource,
        search_type: Option<SearchType>,
    ) -> Result<RequestId> {
        self.execute_search(RawInput::Image(image), search_type)
            .await
    }

    /// Abandons the current search and returns to the entry point.
    ///
    /// A response still in flight for the abandoned search is discarded when
    /// it arrives.
    pub fn retry(&self) {
        tracing::info!("[Orchestrator] Retry requested, clearing session");
        self.store.dispatch(SearchAction::Clear);
        self.navigate(Destination::Home);
    }

    async fn execute_search(
        &self,
        input: RawInput,
        search_type: Option<SearchType>,
    ) -> Result<RequestId> {
        let query = RequestNormalizer::display_query(&input)?;
        let search_type = search_type.unwrap_or(self.default_search_type);
        let input_type = input.input_type();

        let request_id = RequestId::generate();
        tracing::info!(
            "[Orchestrator] Starting {} search {} ({}): {}",
            input_type,
            request_id.short(),
            search_type,
            query
        );
        self.store.dispatch(SearchAction::StartSearch {
            request_id,
            query: query.clone(),
        });
        self.navigate(Destination::Results(ResultsRoute::new(&query, request_id)));

        let outcome = self.resolve(request_id, input, search_type).await;
        let action = match outcome {
            SearchOutcome::Success(success) => {
                tracing::info!(
                    "[Orchestrator] Search {} returned {} results",
                    request_id.short(),
                    success.total_results
                );
                SearchAction::ResolveSuccess {
                    request_id,
                    outcome: success,
                }
            }
            SearchOutcome::Failure(failure) => {
                tracing::warn!(
                    "[Orchestrator] Search {} failed ({:?}): {}",
                    request_id.short(),
                    failure.kind,
                    failure.message
                );
                SearchAction::ResolveFailure {
                    request_id,
                    failure,
                }
            }
            SearchOutcome::Pending => {
                // Gateways must not hand back a pending outcome.
                SearchAction::ResolveFailure {
                    request_id,
                    failure: SearchError::internal("gateway returned a pending outcome").into(),
                }
            }
        };

        if let Some(kind) = self.store.dispatch(action).error_kind() {
            tracing::debug!(
                "[Orchestrator] Search {} was superseded before it resolved ({:?})",
                request_id.short(),
                kind
            );
        }

        Ok(request_id)
    }

    /// Builds the request and runs it through the gateway. Never fails: every
    /// error becomes a `Failure` outcome.
    async fn resolve(
        &self,
        request_id: RequestId,
        input: RawInput,
        search_type: SearchType,
    ) -> SearchOutcome {
        let context = RequestContext {
            search_type,
            location: self.location.last_known(),
            user_id: self.identity.current_user_id().await,
        };

        let request = match self
            .normalizer
            .build_request_with_id(request_id, input, context)
            .await
        {
            Ok(request) => request,
            Err(e) => return SearchOutcome::failure(e),
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.gateway.submit(&request))
                .await
                .unwrap_or_else(|_| SearchOutcome::failure(SearchError::Timeout(limit))),
            None => self.gateway.submit(&request).await,
        }
    }

    fn navigate(&self, destination: Destination) {
        if let Some(navigator) = &self.navigator {
            navigator.navigate(destination);
        }
    }
}

//! Injectable container around the session state.

use std::sync::Arc;
use tokio::sync::watch;

use super::model::SearchSessionState;
use crate::error::SearchErrorKind;
use super::reducer::{SearchAction, Transition, reduce};

/// Result of [`SearchStateStore::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    Applied,
    /// The action was a resolution for a request that is no longer active.
    Stale,
}

impl DispatchResult {
    /// Classification of a discarded resolution, `None` when the action was applied.
    pub fn error_kind(&self) -> Option<SearchErrorKind> {
        match self {
            Self::Applied => None,
            Self::Stale => Some(SearchErrorKind::StaleResponse),
        }
    }
}

/// Holds the [`SearchSessionState`] and notifies subscribers on every change.
///
/// State is mutated exclusively through [`dispatch`](Self::dispatch). Cloning
/// the store shares the same state; separate instances are fully isolated.
///
/// # Example
///
/// ```
/// use multisearch_core::request::RequestId;
/// use multisearch_core::state::{SearchAction, SearchStateStore, SearchStatus};
///
/// let store = SearchStateStore::new();
/// store.dispatch(SearchAction::StartSearch {
///     request_id: RequestId::generate(),
///     query: "bike".to_string(),
/// });
/// assert_eq!(store.state().status, SearchStatus::Loading);
/// ```
#[derive(Clone)]
pub struct SearchStateStore {
    sender: Arc<watch::Sender<SearchSessionState>>,
}

impl SearchStateStore {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(SearchSessionState::new());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> SearchSessionState {
        self.sender.borrow().clone()
    }

    /// Subscribes to state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<SearchSessionState> {
        self.sender.subscribe()
    }

    /// Applies an action atomically with respect to other dispatches.
    pub fn dispatch(&self, action: SearchAction) -> DispatchResult {
        let action_name = action.name();
        let request_id = action.request_id();
        let mut result = DispatchResult::Stale;

        self.sender.send_if_modified(|state| match reduce(state, action) {
            Transition::Applied(next) => {
                *state = next;
                result = DispatchResult::Applied;
                true
            }
            Transition::Stale => false,
        });

        match (result, request_id) {
            (DispatchResult::Stale, Some(id)) => {
                tracing::debug!("[Store] Discarded stale {} for request {}", action_name, id);
            }
            (DispatchResult::Applied, Some(id)) => {
                tracing::debug!("[Store] Applied {} for request {}", action_name, id);
            }
            (_, None) => {
                tracing::debug!("[Store] Applied {}", action_name);
            }
        }

        result
    }
}

impl Default for SearchStateStore {
    fn default() -> Self {
        Self::new()
    }
}

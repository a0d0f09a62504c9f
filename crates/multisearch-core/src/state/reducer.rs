//! Pure transition function of the search session state.

use super::model::{SearchSessionState, SearchStatus};
use crate::outcome::{SearchFailure, SearchSuccess};
use crate::request::RequestId;

/// The only ways the session state may change.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    /// A new search began. Always applied; wipes every payload field.
    StartSearch { request_id: RequestId, query: String },
    /// The remote search for `request_id` succeeded.
    ResolveSuccess {
        request_id: RequestId,
        outcome: SearchSuccess,
    },
    /// The search for `request_id` failed.
    ResolveFailure {
        request_id: RequestId,
        failure: SearchFailure,
    },
    /// Back to the initial state.
    Clear,
}

impl SearchAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartSearch { .. } => "start_search",
            Self::ResolveSuccess { .. } => "resolve_success",
            Self::ResolveFailure { .. } => "resolve_failure",
            Self::Clear => "clear",
        }
    }

    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            Self::StartSearch { request_id, .. }
            | Self::ResolveSuccess { request_id, .. }
            | Self::ResolveFailure { request_id, .. } => Some(*request_id),
            Self::Clear => None,
        }
    }
}

/// What a reduction did.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Applied(SearchSessionState),
    /// A resolution for a request other than the one in flight. Dropped.
    Stale,
}

/// Computes the next state.
///
/// Resolutions are applied only while the state is `Loading` for the same
/// request id; anything else is stale. After `Clear` no id is active, so every
/// late resolution is stale.
pub fn reduce(state: &SearchSessionState, action: SearchAction) -> Transition {
    match action {
        SearchAction::StartSearch { request_id, query } => Transition::Applied(SearchSessionState {
            status: SearchStatus::Loading,
            active_request_id: Some(request_id),
            query: Some(query),
            ..SearchSessionState::default()
        }),
        SearchAction::ResolveSuccess {
            request_id,
            outcome,
        } => {
            if !state.is_awaiting(request_id) {
                return Transition::Stale;
            }
            Transition::Applied(SearchSessionState {
                status: SearchStatus::Success,
                active_request_id: state.active_request_id,
                query: state.query.clone(),
                results: outcome.results,
                total_results: outcome.total_results,
                processing_time: outcome.processing_time,
                suggestions: outcome.suggestions,
                error_message: None,
                error_kind: None,
            })
        }
        SearchAction::ResolveFailure {
            request_id,
            failure,
        } => {
            if !state.is_awaiting(request_id) {
                return Transition::Stale;
            }
            Transition::Applied(SearchSessionState {
                status: SearchStatus::Error,
                active_request_id: state.active_request_id,
                query: state.query.clone(),
                error_message: Some(failure.message),
                error_kind: Some(failure.kind),
                ..SearchSessionState::default()
            })
        }
        SearchAction::Clear => Transition::Applied(SearchSessionState::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::outcome::ResultItem;

    fn item(title: &str) -> ResultItem {
        ResultItem {
            id: Some(title.to_string()),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn success(titles: &[&str]) -> SearchSuccess {
        SearchSuccess {
            results: titles.iter().map(|t| item(t)).collect(),
            total_results: titles.len(),
            processing_time: Some(0.4),
            suggestions: vec!["more".to_string()],
        }
    }

    fn applied(transition: Transition) -> SearchSessionState {
        match transition {
            Transition::Applied(state) => state,
            Transition::Stale => panic!("expected transition to apply"),
        }
    }

    fn start(state: &SearchSessionState, id: RequestId, query: &str) -> SearchSessionState {
        applied(reduce(
            state,
            SearchAction::StartSearch {
                request_id: id,
                query: query.to_string(),
            },
        ))
    }

    #[test]
    fn test_start_search_enters_loading() {
        let id = RequestId::generate();
        let state = start(&SearchSessionState::new(), id, "phone repair");
        assert_eq!(state.status, SearchStatus::Loading);
        assert_eq!(state.active_request_id, Some(id));
        assert_eq!(state.query.as_deref(), Some("phone repair"));
    }

    #[test]
    fn test_start_search_wipes_previous_success() {
        let first = RequestId::generate();
        let loading = start(&SearchSessionState::new(), first, "a");
        let resolved = applied(reduce(
            &loading,
            SearchAction::ResolveSuccess {
                request_id: first,
                outcome: success(&["x", "y"]),
            },
        ));
        assert_eq!(resolved.total_results, 2);

        let second = RequestId::generate();
        let state = start(&resolved, second, "b");
        assert!(state.results.is_empty());
        assert!(state.suggestions.is_empty());
        assert_eq!(state.total_results, 0);
        assert!(state.processing_time.is_none());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_start_search_wipes_previous_error() {
        let first = RequestId::generate();
        let loading = start(&SearchSessionState::new(), first, "a");
        let failed = applied(reduce(
            &loading,
            SearchAction::ResolveFailure {
                request_id: first,
                failure: SearchError::transport("down").into(),
            },
        ));
        assert_eq!(failed.status, SearchStatus::Error);

        let state = start(&failed, RequestId::generate(), "b");
        assert!(state.error_message.is_none());
        assert!(state.error_kind.is_none());
    }

    #[test]
    fn test_resolve_success_for_active_request() {
        let id = RequestId::generate();
        let loading = start(&SearchSessionState::new(), id, "phone repair");
        let state = applied(reduce(
            &loading,
            SearchAction::ResolveSuccess {
                request_id: id,
                outcome: success(&["1"]),
            },
        ));
        assert_eq!(state.status, SearchStatus::Success);
        assert_eq!(state.total_results, 1);
        assert_eq!(state.query.as_deref(), Some("phone repair"));
        assert_eq!(state.suggestions, vec!["more".to_string()]);
    }

    #[test]
    fn test_resolution_for_other_request_is_stale() {
        let old = RequestId::generate();
        let new = RequestId::generate();
        let loading = start(&start(&SearchSessionState::new(), old, "a"), new, "b");

        let transition = reduce(
            &loading,
            SearchAction::ResolveSuccess {
                request_id: old,
                outcome: success(&["from a"]),
            },
        );
        assert_eq!(transition, Transition::Stale);

        let transition = reduce(
            &loading,
            SearchAction::ResolveFailure {
                request_id: old,
                failure: SearchError::transport("late").into(),
            },
        );
        assert_eq!(transition, Transition::Stale);
    }

    #[test]
    fn test_resolution_after_clear_is_stale() {
        let id = RequestId::generate();
        let loading = start(&SearchSessionState::new(), id, "a");
        let cleared = applied(reduce(&loading, SearchAction::Clear));

        let transition = reduce(
            &cleared,
            SearchAction::ResolveSuccess {
                request_id: id,
                outcome: success(&["late"]),
            },
        );
        assert_eq!(transition, Transition::Stale);
    }

    #[test]
    fn test_second_resolution_of_same_request_is_stale() {
        let id = RequestId::generate();
        let loading = start(&SearchSessionState::new(), id, "a");
        let failed = applied(reduce(
            &loading,
            SearchAction::ResolveFailure {
                request_id: id,
                failure: SearchError::Timeout(std::time::Duration::from_secs(1)).into(),
            },
        ));
        let transition = reduce(
            &failed,
            SearchAction::ResolveSuccess {
                request_id: id,
                outcome: success(&["too late"]),
            },
        );
        assert_eq!(transition, Transition::Stale);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let loading = start(&SearchSessionState::new(), RequestId::generate(), "a");
        let once = applied(reduce(&loading, SearchAction::Clear));
        let twice = applied(reduce(&once, SearchAction::Clear));
        assert_eq!(once, twice);
        assert_eq!(once, SearchSessionState::new());
    }
}

//! Selection of what the results view shows for a given state.

use crate::error::SearchErrorKind;
use crate::outcome::ResultItem;
use crate::request::RequestId;
use crate::state::{SearchSessionState, SearchStatus};

/// Exactly one of these is rendered at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView<'a> {
    /// Nothing searched yet.
    Idle,
    Loading {
        query: &'a str,
        request_id: Option<RequestId>,
    },
    /// Error panel with a retry affordance.
    Error {
        query: Option<&'a str>,
        message: &'a str,
        kind: Option<SearchErrorKind>,
    },
    Empty { query: &'a str },
    Results {
        query: &'a str,
        items: &'a [ResultItem],
        total_results: usize,
        processing_time: Option<f64>,
        suggestions: &'a [String],
    },
}

impl<'a> ResultsView<'a> {
    /// Reads payload fields only after checking the status.
    pub fn from_state(state: &'a SearchSessionState) -> Self {
        let query = state.query.as_deref().unwrap_or_default();
        match state.status {
            SearchStatus::Idle => Self::Idle,
            SearchStatus::Loading => Self::Loading {
                query,
                request_id: state.active_request_id,
            },
            SearchStatus::Error => Self::Error {
                query: state.query.as_deref(),
                message: state
                    .error_message
                    .as_deref()
                    .unwrap_or("An unknown error occurred during search"),
                kind: state.error_kind,
            },
            SearchStatus::Success if state.results.is_empty() => Self::Empty { query },
            SearchStatus::Success => Self::Results {
                query,
                items: &state.results,
                total_results: state.total_results,
                processing_time: state.processing_time,
                suggestions: &state.suggestions,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_state() {
        let state = SearchSessionState::new();
        assert_eq!(ResultsView::from_state(&state), ResultsView::Idle);
    }

    #[test]
    fn test_loading_ignores_leftover_payload() {
        let state = SearchSessionState {
            status: SearchStatus::Loading,
            query: Some("bike".into()),
            results: vec![ResultItem::default()],
            ..Default::default()
        };
        assert!(matches!(
            ResultsView::from_state(&state),
            ResultsView::Loading { query: "bike", .. }
        ));
    }

    #[test]
    fn test_success_without_results_is_empty() {
        let state = SearchSessionState {
            status: SearchStatus::Success,
            query: Some("unicorn".into()),
            ..Default::default()
        };
        assert_eq!(
            ResultsView::from_state(&state),
            ResultsView::Empty { query: "unicorn" }
        );
    }

    #[test]
    fn test_success_with_results() {
        let state = SearchSessionState {
            status: SearchStatus::Success,
            query: Some("lamp".into()),
            results: vec![ResultItem::default(), ResultItem::default()],
            total_results: 40,
            ..Default::default()
        };
        match ResultsView::from_state(&state) {
            ResultsView::Results {
                items,
                total_results,
                ..
            } => {
                assert_eq!(items.len(), 2);
                assert_eq!(total_results, 40);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn test_error_always_has_message() {
        let state = SearchSessionState {
            status: SearchStatus::Error,
            ..Default::default()
        };
        match ResultsView::from_state(&state) {
            ResultsView::Error { message, .. } => assert!(!message.is_empty()),
            other => panic!("unexpected view: {other:?}"),
        }
    }
}

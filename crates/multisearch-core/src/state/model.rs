//! Search session state models.

use serde::{Deserialize, Serialize};

use crate::error::SearchErrorKind;
use crate::outcome::ResultItem;
use crate::request::RequestId;

/// Lifecycle of the current search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// The single source of truth consumed by the results view.
///
/// Payload fields are only meaningful for the status that produced them;
/// readers check `status` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchSessionState {
    pub status: SearchStatus,
    pub active_request_id: Option<RequestId>,
    pub query: Option<String>,
    pub results: Vec<ResultItem>,
    pub total_results: usize,
    pub processing_time: Option<f64>,
    pub suggestions: Vec<String>,
    pub error_message: Option<String>,
    pub error_kind: Option<SearchErrorKind>,
}

impl SearchSessionState {
    /// Creates the initial `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    /// True when `request_id` is the in-flight request this state waits on.
    pub fn is_awaiting(&self, request_id: RequestId) -> bool {
        self.is_loading() && self.active_request_id == Some(request_id)
    }
}

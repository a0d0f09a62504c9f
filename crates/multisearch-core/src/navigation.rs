//! Navigation between the entry point and the results view.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::request::RequestId;

pub const RESULTS_PATH: &str = "/search";
pub const HOME_PATH: &str = "/";

const QUERY_PARAM: &str = "q";
const REQUEST_ID_PARAM: &str = "requestId";

/// Addressable state of the results view.
///
/// This is a display and correlation hint. Opening a results address never
/// re-runs a search by itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsRoute {
    pub query: String,
    pub request_id: Option<RequestId>,
}

impl ResultsRoute {
    pub fn new(query: impl Into<String>, request_id: RequestId) -> Self {
        Self {
            query: query.into(),
            request_id: Some(request_id),
        }
    }

    /// Renders `/search?q=<query>&requestId=<id>`.
    pub fn to_path(&self) -> String {
        let mut url = base_url().join(RESULTS_PATH).unwrap_or_else(|_| base_url());
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(QUERY_PARAM, &self.query);
            if let Some(id) = self.request_id {
                pairs.append_pair(REQUEST_ID_PARAM, &id.to_string());
            }
        }
        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }

    /// Parses a results address. A malformed `requestId` is ignored.
    pub fn parse(path: &str) -> Result<Self> {
        let url = base_url()
            .join(path)
            .map_err(|e| SearchError::validation(format!("invalid results path '{path}': {e}")))?;

        if url.path() != RESULTS_PATH {
            return Err(SearchError::validation(format!(
                "'{path}' is not a results path"
            )));
        }

        let mut query = None;
        let mut request_id = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                QUERY_PARAM => query = Some(value.into_owned()),
                REQUEST_ID_PARAM => request_id = value.parse().ok(),
                _ => {}
            }
        }

        let query = query
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| SearchError::validation("results path has no query"))?;

        Ok(Self { query, request_id })
    }
}

fn base_url() -> Url {
    // Safe to unwrap because the base is a constant, well-formed URL
    Url::parse("http://localhost/").unwrap()
}

/// Where the UI should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The search entry point.
    Home,
    Results(ResultsRoute),
}

impl Destination {
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => HOME_PATH.to_string(),
            Self::Results(route) => route.to_path(),
        }
    }
}

/// Performs view changes on behalf of the orchestrator.
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination);
}

//! HttpSearchGateway - forwards search requests to a remote webhook.
//!
//! The request is flattened into the JSON body the webhook expects and the
//! response is validated into a [`SearchSuccess`] before anything reaches the
//! state store.

use async_trait::async_trait;
use multisearch_core::error::{Result, SearchError};
use multisearch_core::gateway::{SearchGateway, SuggestionSource};
use multisearch_core::outcome::{ResultItem, SearchOutcome, SearchSuccess};
use multisearch_core::request::{SearchRequest, SearchType};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("multisearch/", env!("CARGO_PKG_VERSION"));

/// Gateway implementation that talks to the search webhook over HTTP.
#[derive(Clone)]
pub struct HttpSearchGateway {
    client: Client,
    webhook_url: Url,
    suggestions_url: Option<Url>,
    trending_url: Option<Url>,
}

impl HttpSearchGateway {
    /// Creates a gateway posting to `webhook_url`.
    pub fn new(webhook_url: &str) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SearchError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            webhook_url: parse_url("webhook_url", webhook_url)?,
            suggestions_url: None,
            trending_url: None,
        })
    }

    pub fn with_suggestions_url(mut self, url: &str) -> Result<Self> {
        self.suggestions_url = Some(parse_url("suggestions_url", url)?);
        Ok(self)
    }

    pub fn with_trending_url(mut self, url: &str) -> Result<Self> {
        self.trending_url = Some(parse_url("trending_url", url)?);
        Ok(self)
    }

    async fn send_request(&self, body: &WireSearchRequest<'_>) -> Result<SearchSuccess> {
        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(body)
            .send()
            .await
            .map_err(|err| SearchError::transport(format!("Search request failed: {err}")))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|err| SearchError::transport(format!("Failed to read search response: {err}")))?;

        if !status.is_success() {
            return Err(SearchError::remote(status.as_u16(), body_text));
        }

        parse_search_response(&body_text)
    }

    async fn get_string_list(&self, url: Url, key: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| SearchError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::remote(status.as_u16(), body));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|err| SearchError::malformed_response(err.to_string()))?;
        Ok(string_list(&value, key))
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).map_err(|e| SearchError::config(format!("{name} '{raw}' is invalid: {e}")))
}

#[async_trait]
impl SearchGateway for HttpSearchGateway {
    async fn submit(&self, request: &SearchRequest) -> SearchOutcome {
        let body = WireSearchRequest::from_request(request);
        tracing::debug!(
            "[Gateway] POST {} (request {}, input {})",
            self.webhook_url,
            request.request_id(),
            request.input_type()
        );

        let result = self.send_request(&body).await;
        if let Err(ref err) = result {
            tracing::warn!("[Gateway] Request {} failed: {}", request.request_id(), err);
        }
        result.into()
    }
}

#[async_trait]
impl SuggestionSource for HttpSearchGateway {
    async fn suggestions(&self, query: &str, search_type: SearchType) -> Vec<String> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let Some(mut url) = self.suggestions_url.clone() else {
            return Vec::new();
        };
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("type", search_type.as_str());

        self.get_string_list(url, "suggestions")
            .await
            .unwrap_or_else(|err| {
                tracing::warn!("[Gateway] Suggestions lookup failed: {}", err);
                Vec::new()
            })
    }

    async fn trending(&self, search_type: SearchType) -> Vec<String> {
        let Some(mut url) = self.trending_url.clone() else {
            return Vec::new();
        };
        url.query_pairs_mut().append_pair("type", search_type.as_str());

        self.get_string_list(url, "trending")
            .await
            .unwrap_or_else(|err| {
                tracing::warn!("[Gateway] Trending lookup failed: {}", err);
                Vec::new()
            })
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSearchRequest<'a> {
    query: &'a str,
    #[serde(rename = "type")]
    search_type: SearchType,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<WireLocation<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_data: Option<&'a str>,
    input_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    uid: Option<&'a str>,
    request_id: String,
    timestamp: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireLocation<'a> {
    latitude: f64,
    longitude: f64,
    city: &'a str,
    country: &'a str,
}

impl<'a> WireSearchRequest<'a> {
    /// The location block is sent only when both coordinates are valid.
    pub(crate) fn from_request(request: &'a SearchRequest) -> Self {
        let location = request.location_context().and_then(|context| {
            context
                .coordinates()
                .map(|(latitude, longitude)| WireLocation {
                    latitude,
                    longitude,
                    city: &context.city,
                    country: &context.country,
                })
        });

        Self {
            query: request.query(),
            search_type: request.search_type(),
            location,
            image_data: request.image_payload().map(|p| p.data_url.as_str()),
            input_type: request.input_type().as_str(),
            uid: request.user_id(),
            request_id: request.request_id().to_string(),
            timestamp: request.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSearchResponse {
    #[serde(default)]
    results: Option<Vec<ResultItem>>,
    // Counters and timings are read leniently: runners emit `1.0` or `"1"`.
    #[serde(default)]
    total_results: Option<Value>,
    #[serde(default)]
    processing_time: Option<Value>,
    #[serde(default)]
    execution_time: Option<Value>,
    #[serde(default)]
    suggestions: Option<Value>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Validates a webhook response body into a [`SearchSuccess`].
///
/// Missing `totalResults` falls back to the number of results; missing lists
/// become empty; a missing processing time stays unknown. A body that is not
/// a JSON object of the expected shape, or that reports `"status": "error"`,
/// is a Remote error.
pub fn parse_search_response(body: &str) -> Result<SearchSuccess> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| SearchError::malformed_response(format!("response is not JSON: {e}")))?;

    // Some webhook runners wrap a single item in an array.
    let value = match value {
        Value::Array(mut items) if items.len() == 1 && items[0].is_object() => items.remove(0),
        other => other,
    };
    if !value.is_object() {
        return Err(SearchError::malformed_response(
            "response is not a JSON object",
        ));
    }

    let wire: WireSearchResponse = serde_json::from_value(value)
        .map_err(|e| SearchError::malformed_response(format!("unexpected response shape: {e}")))?;

    if wire
        .status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("error"))
    {
        let message = wire
            .message
            .or_else(|| wire.error.as_ref().map(error_text))
            .unwrap_or_else(|| "remote service reported an error".to_string());
        return Err(SearchError::malformed_response(message));
    }

    let results = wire.results.unwrap_or_default();
    let total_results = wire
        .total_results
        .as_ref()
        .and_then(number)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round() as usize)
        .unwrap_or(results.len());
    let processing_time = wire
        .processing_time
        .as_ref()
        .and_then(number)
        .or_else(|| wire.execution_time.as_ref().and_then(number));
    let suggestions = wire
        .suggestions
        .as_ref()
        .map(|value| string_list(value, "suggestions"))
        .unwrap_or_default();

    Ok(SearchSuccess {
        total_results,
        processing_time,
        suggestions,
        results,
    })
}

/// A finite number, or numeric text.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn error_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reads `{ "<key>": [..] }` or a bare array, keeping string entries only.
fn string_list(value: &Value, key: &str) -> Vec<String> {
    let list = match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get(key).and_then(Value::as_array),
        _ => None,
    };
    list.map(|items| {
        items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    })
    .unwrap_or_default()
}

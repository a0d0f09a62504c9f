//! Search outcome domain models.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{SearchError, SearchErrorKind};

/// A single display record returned by the remote service.
///
/// The client never computes over these fields except to order results, so
/// anything it does not know about is kept in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ResultItem {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    /// Free-form price text, e.g. `"60.000FCFA"`.
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts `"4.5"`, `4.5` or `null` and keeps the textual form.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Like [`string_or_number`], but `null` and other shapes become empty text.
fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_or_number(deserializer)?.unwrap_or_default())
}

/// Accepts a list, a single string or `null`. Entries that are neither text
/// nor numbers are dropped.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Payload of a successful search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchSuccess {
    pub results: Vec<ResultItem>,
    pub total_results: usize,
    /// Seconds spent by the remote service. `None` means unknown, not zero.
    pub processing_time: Option<f64>,
    pub suggestions: Vec<String>,
}

/// A failed search, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFailure {
    pub kind: SearchErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<SearchError> for SearchFailure {
    fn from(err: SearchError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        let (status, detail) = match err {
            SearchError::Remote { status, body, .. } => (status, body),
            _ => (None, None),
        };
        Self {
            kind,
            message,
            status,
            detail,
        }
    }
}

/// Tagged union of the three states an asynchronous search can be in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Pending,
    Success(SearchSuccess),
    Failure(SearchFailure),
}

impl SearchOutcome {
    pub fn failure(err: SearchError) -> Self {
        Self::Failure(err.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

impl From<Result<SearchSuccess, SearchError>> for SearchOutcome {
    fn from(result: Result<SearchSuccess, SearchError>) -> Self {
        match result {
            Ok(success) => Self::Success(success),
            Err(err) => Self::failure(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_item_accepts_numeric_fields() {
        let item: ResultItem = serde_json::from_value(json!({
            "id": 7,
            "title": "Repair kit",
            "price": 1500,
            "rating": "4.5",
            "type": "product",
            "vendor": "ACME"
        }))
        .unwrap();

        assert_eq!(item.id.as_deref(), Some("7"));
        assert_eq!(item.price.as_deref(), Some("1500"));
        assert_eq!(item.rating.as_deref(), Some("4.5"));
        assert_eq!(item.result_type.as_deref(), Some("product"));
        assert_eq!(item.extra.get("vendor"), Some(&json!("ACME")));
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_result_item_tolerates_null_and_odd_shapes() {
        let item: ResultItem = serde_json::from_value(json!({
            "id": "1",
            "title": null,
            "description": null,
            "tags": ["repair", 3, null, {"k": "v"}]
        }))
        .unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.description, "");
        assert_eq!(item.tags, vec!["repair", "3"]);

        let item: ResultItem =
            serde_json::from_value(json!({"title": "Lamp", "tags": null})).unwrap();
        assert!(item.tags.is_empty());

        let item: ResultItem =
            serde_json::from_value(json!({"title": "Lamp", "tags": "lighting"})).unwrap();
        assert_eq!(item.tags, vec!["lighting"]);
    }

    #[test]
    fn test_failure_from_remote_error_keeps_diagnostics() {
        let failure: SearchFailure = SearchError::remote(503, "maintenance").into();
        assert_eq!(failure.kind, SearchErrorKind::Remote);
        assert_eq!(failure.status, Some(503));
        assert_eq!(failure.detail.as_deref(), Some("maintenance"));
        assert!(!failure.message.is_empty());
    }

    #[test]
    fn test_outcome_from_result() {
        let outcome: SearchOutcome = Ok(SearchSuccess::default()).into();
        assert!(outcome.is_success());
        let outcome: SearchOutcome = Err(SearchError::transport("reset")).into();
        assert!(outcome.is_failure());
    }
}

//! Canonical search request domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::SearchError;

/// Correlation key of one search attempt.
///
/// Backed by a random (v4) UUID. A new value is allocated for every search and
/// never reused; the state store relies on it to reject stale resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Allocates a fresh, unpredictable identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// First eight characters, for compact display in progress indicators.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RequestId {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| SearchError::validation(format!("invalid request id '{s}': {e}")))
    }
}

/// Provenance of the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Voice,
    Image,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result-category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Product,
    Service,
    #[default]
    All,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Service => "service",
            Self::All => "all",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" | "products" => Ok(Self::Product),
            "service" | "services" => Ok(Self::Service),
            "all" => Ok(Self::All),
            other => Err(SearchError::validation(format!(
                "unknown search type '{other}' (expected product, service or all)"
            ))),
        }
    }
}

/// Snapshot of where the user was when the request was built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationContext {
    pub country: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// True when the real lookup failed and a default place was substituted.
    #[serde(default)]
    pub is_fallback: bool,
}

impl LocationContext {
    /// Returns `(latitude, longitude)` only when both are present, finite and in range.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.filter(|v| v.is_finite() && (-90.0..=90.0).contains(v))?;
        let lon = self
            .longitude
            .filter(|v| v.is_finite() && (-180.0..=180.0).contains(v))?;
        Some((lat, lon))
    }

    pub fn is_complete(&self) -> bool {
        self.coordinates().is_some()
    }
}

/// Encoded image content, ready for a text-only transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub file_name: String,
    pub mime_type: String,
    /// `data:<mime>;base64,<content>`
    pub data_url: String,
}

/// Where the bytes of an image search come from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A file on disk, read asynchronously at request-build time.
    File(PathBuf),
    /// Bytes already in memory (e.g. an upload buffer).
    Bytes { file_name: String, bytes: Vec<u8> },
}

impl ImageSource {
    pub fn file_name(&self) -> String {
        match self {
            Self::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string()),
            Self::Bytes { file_name, .. } => file_name.clone(),
        }
    }
}

/// Raw user input before normalization.
#[derive(Debug, Clone)]
pub enum RawInput {
    Text(String),
    /// A finished speech-recognition transcript.
    Voice(String),
    Image(ImageSource),
}

impl RawInput {
    pub fn input_type(&self) -> InputType {
        match self {
            Self::Text(_) => InputType::Text,
            Self::Voice(_) => InputType::Voice,
            Self::Image(_) => InputType::Image,
        }
    }
}

/// One immutable search attempt.
///
/// Fields are only reachable through accessors; a new search always builds a
/// new value with a new [`RequestId`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    request_id: RequestId,
    query: String,
    input_type: InputType,
    search_type: SearchType,
    location_context: Option<LocationContext>,
    image_payload: Option<ImagePayload>,
    user_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl SearchRequest {
    pub(crate) fn new(
        request_id: RequestId,
        query: String,
        input_type: InputType,
        search_type: SearchType,
        location_context: Option<LocationContext>,
        image_payload: Option<ImagePayload>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            request_id,
            query,
            input_type,
            search_type,
            location_context,
            image_payload,
            user_id,
            created_at: Utc::now(),
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub fn location_context(&self) -> Option<&LocationContext> {
        self.location_context.as_ref()
    }

    pub fn image_payload(&self) -> Option<&ImagePayload> {
        self.image_payload.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

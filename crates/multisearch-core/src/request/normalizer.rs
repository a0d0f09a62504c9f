//! Converts raw user input into a canonical [`SearchRequest`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use super::model::{
    ImagePayload, ImageSource, InputType, LocationContext, RawInput, RequestId, SearchRequest,
    SearchType,
};
use crate::error::{Result, SearchError};

const IMAGE_QUERY_PREFIX: &str = "Image search: ";

/// Context resolved by the caller at request-build time.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub search_type: SearchType,
    pub location: Option<LocationContext>,
    pub user_id: Option<String>,
}

/// Builds [`SearchRequest`] values.
///
/// Stateless apart from the image read, which is the only suspension point.
#[derive(Debug, Clone, Default)]
pub struct RequestNormalizer;

impl RequestNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Computes the text shown to the user for this input.
    ///
    /// Text and voice input are trimmed and must not be empty. For images the
    /// query is synthesized from the file name, so it can be displayed before
    /// the image is read.
    pub fn display_query(input: &RawInput) -> Result<String> {
        match input {
            RawInput::Text(text) | RawInput::Voice(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(SearchError::validation(format!(
                        "{} query must not be empty",
                        input.input_type()
                    )));
                }
                Ok(trimmed.to_string())
            }
            RawInput::Image(source) => Ok(format!("{IMAGE_QUERY_PREFIX}{}", source.file_name())),
        }
    }

    /// Builds a request with a freshly allocated [`RequestId`].
    pub async fn build_request(
        &self,
        input: RawInput,
        context: RequestContext,
    ) -> Result<SearchRequest> {
        self.build_request_with_id(RequestId::generate(), input, context)
            .await
    }

    /// Builds a request under an identifier the caller already allocated.
    ///
    /// The orchestrator uses this to keep the id it announced to the store.
    pub async fn build_request_with_id(
        &self,
        request_id: RequestId,
        input: RawInput,
        context: RequestContext,
    ) -> Result<SearchRequest> {
        let query = Self::display_query(&input)?;
        let input_type = input.input_type();

        let image_payload = match &input {
            RawInput::Image(source) => Some(Self::encode_image(source).await?),
            RawInput::Text(_) | RawInput::Voice(_) => None,
        };
        debug_assert_eq!(image_payload.is_some(), input_type == InputType::Image);

        let user_id = context.user_id.filter(|id| !id.trim().is_empty());

        Ok(SearchRequest::new(
            request_id,
            query,
            input_type,
            context.search_type,
            context.location,
            image_payload,
            user_id,
        ))
    }

    /// Reads and encodes an image as a base64 data URL.
    pub async fn encode_image(source: &ImageSource) -> Result<ImagePayload> {
        let file_name = source.file_name();
        let bytes = match source {
            ImageSource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| SearchError::encoding(&file_name, e.to_string()))?,
            ImageSource::Bytes { bytes, .. } => bytes.clone(),
        };

        if bytes.is_empty() {
            return Err(SearchError::encoding(&file_name, "image file is empty"));
        }

        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let data_url = format!("data:{mime_type};base64,{}", BASE64_STANDARD.encode(&bytes));

        tracing::debug!(
            "[Normalizer] Encoded image {} ({} bytes, {})",
            file_name,
            bytes.len(),
            mime_type
        );

        Ok(ImagePayload {
            file_name,
            mime_type,
            data_url,
        })
    }
}

//! Request domain module.
//!
//! - `model`: the canonical [`SearchRequest`] and its building blocks
//! - `normalizer`: raw input to request conversion

mod model;
mod normalizer;

pub use model::{
    ImagePayload, ImageSource, InputType, LocationContext, RawInput, RequestId, SearchRequest,
    SearchType,
};
pub use normalizer::{RequestContext, RequestNormalizer};

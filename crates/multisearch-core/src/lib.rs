//! Domain core of the Multisearch client.
//!
//! A search moves through three pieces:
//!
//! - [`request`]: raw input is normalized into an immutable [`request::SearchRequest`]
//! - [`gateway`]: the request is submitted to a remote service, producing an [`outcome::SearchOutcome`]
//! - [`state`]: a reducer-driven store tracks the current search and drops stale resolutions
//!
//! The orchestration that ties them together lives in `multisearch-application`.

pub mod config;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod location;
pub mod navigation;
pub mod outcome;
pub mod presentation;
pub mod request;
pub mod state;

// Re-export common error type
pub use error::{SearchError, SearchErrorKind};

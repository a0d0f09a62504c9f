//! Application layer for multisearch.
//!
//! This crate provides the search orchestrator, which coordinates the request
//! normalizer, the state store and the remote gateway on behalf of the UI, and
//! the bootstrap that wires it from configuration.

pub mod bootstrap;
pub mod orchestrator;

pub use bootstrap::SearchApp;
pub use orchestrator::SearchOrchestrator;

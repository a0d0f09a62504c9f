//! Identity provider abstraction.
//!
//! Authentication itself happens elsewhere; the search core only asks who the
//! caller is, once per request build.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Session lifecycle notifications emitted by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SignedIn { user_id: String },
    SignedOut,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current user's id, or `None` for an anonymous caller.
    async fn current_user_id(&self) -> Option<String>;
}

/// Identity provider for callers that are never signed in.
#[derive(Debug, Clone, Default)]
pub struct AnonymousIdentity;

#[async_trait]
impl IdentityProvider for AnonymousIdentity {
    async fn current_user_id(&self) -> Option<String> {
        None
    }
}

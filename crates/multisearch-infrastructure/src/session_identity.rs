//! In-process identity provider driven by sign-in/sign-out calls.

use async_trait::async_trait;
use multisearch_core::identity::{IdentityProvider, SessionEvent};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

/// Tracks the signed-in user and broadcasts lifecycle events.
#[derive(Clone)]
pub struct SessionIdentityProvider {
    user_id: Arc<RwLock<Option<String>>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionIdentityProvider {
    /// Creates an anonymous session.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            user_id: Arc::new(RwLock::new(None)),
            events,
        }
    }

    /// Creates a session already signed in as `user_id`.
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        let provider = Self::new();
        provider.sign_in(user_id);
        provider
    }

    pub fn sign_in(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        if let Ok(mut guard) = self.user_id.write() {
            *guard = Some(user_id.clone());
        }
        tracing::info!("[Identity] Signed in as {}", user_id);
        // No subscribers is fine.
        let _ = self.events.send(SessionEvent::SignedIn { user_id });
    }

    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.user_id.write() {
            *guard = None;
        }
        tracing::info!("[Identity] Signed out");
        let _ = self.events.send(SessionEvent::SignedOut);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

impl Default for SessionIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for SessionIdentityProvider {
    async fn current_user_id(&self) -> Option<String> {
        self.user_id.read().ok().and_then(|guard| guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let provider = SessionIdentityProvider::new();
        assert!(provider.current_user_id().await.is_none());

        provider.sign_in("user-7");
        assert_eq!(provider.current_user_id().await.as_deref(), Some("user-7"));

        provider.sign_out();
        assert!(provider.current_user_id().await.is_none());
    }

    #[tokio::test]
    async fn test_lifecycle_events_are_broadcast() {
        let provider = SessionIdentityProvider::new();
        let mut events = provider.subscribe();

        provider.sign_in("user-7");
        provider.sign_out();

        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::SignedIn {
                user_id: "user-7".into()
            }
        );
        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedOut);
    }
}

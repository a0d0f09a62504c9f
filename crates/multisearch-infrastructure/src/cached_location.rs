//! Location provider backed by the last recorded snapshot.

use multisearch_core::config::LocationSettings;
use multisearch_core::location::LocationProvider;
use multisearch_core::request::LocationContext;
use std::sync::{Arc, RwLock};

/// Serves the last recorded location, or the configured fallback.
///
/// Recording happens whenever a geolocation lookup completes elsewhere; a
/// search only reads the cached value.
#[derive(Clone)]
pub struct CachedLocationProvider {
    settings: Arc<RwLock<LocationSettings>>,
    snapshot: Arc<RwLock<Option<LocationContext>>>,
}

impl CachedLocationProvider {
    pub fn new(settings: LocationSettings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            snapshot: Arc::new(RwLock::new(None)),
        }
    }

    /// Stores the result of a location lookup.
    pub fn record(&self, snapshot: LocationContext) {
        tracing::debug!(
            "[Location] Recorded {}, {} (fallback: {})",
            snapshot.city,
            snapshot.country,
            snapshot.is_fallback
        );
        if let Ok(mut guard) = self.snapshot.write() {
            *guard = Some(snapshot);
        }
    }

    /// Records that the lookup failed, substituting the fallback place.
    pub fn record_failure(&self) {
        let fallback = self
            .settings
            .read()
            .map(|s| s.fallback.to_context())
            .ok();
        if let Some(fallback) = fallback {
            tracing::warn!("[Location] Lookup failed, using {}", fallback.city);
            self.record(fallback);
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        if let Ok(mut guard) = self.settings.write() {
            guard.enabled = enabled;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.read().map(|s| s.enabled).unwrap_or(false)
    }
}

impl LocationProvider for CachedLocationProvider {
    fn last_known(&self) -> Option<LocationContext> {
        let settings = self.settings.read().ok()?;
        if !settings.enabled {
            return None;
        }
        let recorded = self.snapshot.read().ok().and_then(|guard| guard.clone());
        Some(recorded.unwrap_or_else(|| settings.fallback.to_context()))
    }
}

//! Navigator that keeps a history of destinations instead of driving a UI.

use multisearch_core::navigation::{Destination, Navigator};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    history: Arc<Mutex<Vec<Destination>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent destination.
    pub fn current(&self) -> Option<Destination> {
        self.history.lock().ok().and_then(|h| h.last().cloned())
    }

    pub fn history(&self) -> Vec<Destination> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: Destination) {
        tracing::debug!("[Navigator] -> {}", destination.to_path());
        if let Ok(mut history) = self.history.lock() {
            history.push(destination);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multisearch_core::navigation::ResultsRoute;
    use multisearch_core::request::RequestId;

    #[test]
    fn test_records_in_order() {
        let navigator = RecordingNavigator::new();
        assert!(navigator.current().is_none());

        let route = ResultsRoute::new("lamp", RequestId::generate());
        navigator.navigate(Destination::Results(route.clone()));
        navigator.navigate(Destination::Home);

        assert_eq!(
            navigator.history(),
            vec![Destination::Results(route), Destination::Home]
        );
        assert_eq!(navigator.current(), Some(Destination::Home));
    }
}

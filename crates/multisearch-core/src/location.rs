//! Location provider abstraction.

use crate::request::LocationContext;

/// Source of the last known location.
///
/// Read synchronously from cached state; implementations must not perform a
/// fresh lookup per search.
pub trait LocationProvider: Send + Sync {
    fn last_known(&self) -> Option<LocationContext>;
}

/// A provider that never knows where the user is.
#[derive(Debug, Clone, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn last_known(&self) -> Option<LocationContext> {
        None
    }
}

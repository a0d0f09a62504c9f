//! Search session state: model, reducer and store.

mod model;
mod reducer;
mod store;

pub use model::{SearchSessionState, SearchStatus};
pub use reducer::{SearchAction, Transition, reduce};
pub use store::{DispatchResult, SearchStateStore};

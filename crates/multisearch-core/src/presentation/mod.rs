//! Read-only helpers for rendering a [`SearchSessionState`](crate::state::SearchSessionState).

mod ordering;
mod progress;
mod view;

pub use ordering::{Page, SortOrder, paginate, parse_price, parse_rating, sort_results};
pub use progress::{LOADER_STEPS, LoaderProgress, LoaderStep, progress_at};
pub use view::ResultsView;

pub mod api;
mod source;

pub use api::ItemStatus;
pub use source::{PocketSource, PocketSourceOptions, DEFAULT_FETCH_COUNT};

pub mod client_utils;
mod errors;
pub mod mastodon;
pub mod pocket;
mod publisher;
mod save_source;
pub mod savecast_test;
mod types;

pub use errors::*;
pub use reqwest::StatusCode;
pub use publisher::StatusPublisher;
pub use save_source::SaveSource;
pub use types::*;

mod api;
mod publisher;

pub use api::MastodonApiError;
pub use publisher::{MastodonPublisher, MastodonPublisherOptions};

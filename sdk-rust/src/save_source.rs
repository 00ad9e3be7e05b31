use crate::{SavedItem, ServiceResult};

/// A service holding a user's saved links.
#[async_trait::async_trait]
pub trait SaveSource: Send + Sync {
    fn source(&self) -> &'static str;
    /// Fetch the most recent unarchived saves. An empty list is a valid
    /// answer; the order of the returned items is not tied to save time.
    async fn fetch_recent_saves(&self) -> ServiceResult<Vec<SavedItem>>;
}

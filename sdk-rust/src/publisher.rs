use crate::{PostedStatus, ServiceResult, StatusRequest};

/// A server that statuses can be posted to.
#[async_trait::async_trait]
pub trait StatusPublisher: Send + Sync {
    fn destination(&self) -> &'static str;
    async fn publish(&self, status: &StatusRequest) -> ServiceResult<PostedStatus>;
}

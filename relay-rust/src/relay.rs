use crate::{RelayError, RelayParams, StatusTemplate};
use savecast_sdk::{
    PostedStatus, SaveSource, SavecastError, SavedItem, StatusPublisher, StatusRequest,
    Visibility,
};
use std::{sync::Arc, time::Duration};
use tracing::{info, info_span, warn};
use tracing_futures::Instrument;

/// Moves recent saves from a source to a publisher, one status per save.
pub struct Relay {
    source: Arc<dyn SaveSource>,
    publisher: Arc<dyn StatusPublisher>,
    post_delay: Duration,
    template: StatusTemplate,
    visibility: Option<Visibility>,
}

/// A save that was posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedItem {
    pub item: SavedItem,
    pub posted: PostedStatus,
}

/// A save whose post failed. The rest of the batch still ran.
#[derive(Debug)]
pub struct PublishFailure {
    pub item: SavedItem,
    pub error: SavecastError,
}

/// Outcome of one relay pass.
#[derive(Debug, Default)]
pub struct RelayReport {
    /// Number of unarchived saves returned by the source.
    pub fetched: usize,
    pub published: Vec<PublishedItem>,
    pub failures: Vec<PublishFailure>,
}

impl RelayReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Relay {
    #[must_use]
    pub fn new(params: RelayParams) -> Self {
        Self {
            source: params.source,
            publisher: params.publisher,
            post_delay: params.post_delay,
            template: params.template,
            visibility: params.visibility,
        }
    }

    pub fn builder(
        source: Arc<dyn SaveSource>,
        publisher: Arc<dyn StatusPublisher>,
    ) -> RelayParams {
        RelayParams::new(source, publisher)
    }

    /// Build the status posted for a save.
    #[must_use]
    pub fn status_request(&self, item: &SavedItem) -> StatusRequest {
        StatusRequest::text(self.template.render(item))
            .with_visibility(self.visibility)
            .with_idempotency_key(format!("savecast-{}", item.item_id))
    }

    /// Fetch recent saves and publish each one.
    /// A fetch failure aborts the pass before anything is posted. A publish
    /// failure is logged and recorded in the report, and the next save is
    /// still attempted. A save without a URL is recorded as a failure and
    /// never reaches the publisher.
    pub async fn run(&self) -> Result<RelayReport, RelayError> {
        let span = info_span!(
            "savecast.run",
            source = self.source.source(),
            destination = self.publisher.destination()
        );

        async move {
            let saves = self
                .source
                .fetch_recent_saves()
                .await
                .map_err(RelayError::Fetch)?;

            let mut report = RelayReport {
                fetched: saves.len(),
                ..RelayReport::default()
            };

            for (index, item) in saves.into_iter().enumerate() {
                if index > 0 && !self.post_delay.is_zero() {
                    tokio::time::sleep(self.post_delay).await;
                }

                let outcome = if item.url.is_empty() {
                    Err(SavecastError::InvalidInput(format!(
                        "Save {} has no URL to post",
                        item.item_id
                    )))
                } else {
                    self.publisher.publish(&self.status_request(&item)).await
                };
                match outcome {
                    Ok(posted) => report.published.push(PublishedItem { item, posted }),
                    Err(error) => {
                        warn!(
                            item_id = %item.item_id,
                            title = %item.title,
                            error = %error,
                            "failed to publish save"
                        );
                        report.failures.push(PublishFailure { item, error });
                    }
                }
            }

            info!(
                fetched = report.fetched,
                published = report.published.len(),
                failed = report.failures.len(),
                "finished processing recent saves"
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }
}

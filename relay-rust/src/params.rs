use crate::{Relay, StatusTemplate};
use savecast_sdk::{SaveSource, StatusPublisher, Visibility};
use std::{sync::Arc, time::Duration};

pub const DEFAULT_POST_DELAY: Duration = Duration::from_secs(2);

/// Parameters required to create a relay.
/// # Default Values
/// - `post_delay`: 2 seconds
/// - `template`: `StatusTemplate::default()`
/// - `visibility`: `None` (the account's default)
pub struct RelayParams {
    /// Where saves are read from.
    pub source: Arc<dyn SaveSource>,
    /// Where statuses are posted to.
    pub publisher: Arc<dyn StatusPublisher>,
    /// Fixed pause between consecutive publish attempts. Applied whether or
    /// not the previous attempt succeeded.
    pub post_delay: Duration,
    pub template: StatusTemplate,
    pub visibility: Option<Visibility>,
}

impl RelayParams {
    pub fn new(source: Arc<dyn SaveSource>, publisher: Arc<dyn StatusPublisher>) -> Self {
        Self {
            source,
            publisher,
            post_delay: DEFAULT_POST_DELAY,
            template: StatusTemplate::default(),
            visibility: None,
        }
    }

    /// Set the delay between posts
    #[must_use]
    pub fn post_delay(mut self, post_delay: Duration) -> Self {
        self.post_delay = post_delay;
        self
    }

    /// Set the status template
    #[must_use]
    pub fn template(mut self, template: StatusTemplate) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn visibility(mut self, visibility: Option<Visibility>) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn build(self) -> Relay {
        Relay::new(self)
    }
}

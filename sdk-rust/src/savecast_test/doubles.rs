use std::{collections::VecDeque, sync::Mutex};

use crate::{
    PostedStatus, SaveSource, SavecastError, SavedItem, ServiceResult, StatusPublisher,
    StatusRequest,
};

/// A save source for testing that returns queued results in order.
pub struct MockSaveSource {
    source: &'static str,
    state: Mutex<MockSaveSourceState>,
}

#[derive(Default)]
struct MockSaveSourceState {
    mocked_results: VecDeque<ServiceResult<Vec<SavedItem>>>,
    fetch_count: usize,
}

impl Default for MockSaveSource {
    fn default() -> Self {
        Self {
            source: "mock",
            state: Mutex::new(MockSaveSourceState::default()),
        }
    }
}

impl MockSaveSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a list of saves to return from the next fetch.
    pub fn enqueue_saves(&self, saves: Vec<SavedItem>) -> &Self {
        self.enqueue_result(Ok(saves))
    }

    /// Enqueue an error to return from the next fetch.
    pub fn enqueue_error(&self, error: SavecastError) -> &Self {
        self.enqueue_result(Err(error))
    }

    fn enqueue_result(&self, result: ServiceResult<Vec<SavedItem>>) -> &Self {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.push_back(result);
        drop(state);
        self
    }

    /// Number of fetches performed so far.
    pub fn fetch_count(&self) -> usize {
        self.state.lock().expect("mock state poisoned").fetch_count
    }
}

#[async_trait::async_trait]
impl SaveSource for MockSaveSource {
    fn source(&self) -> &'static str {
        self.source
    }

    async fn fetch_recent_saves(&self) -> ServiceResult<Vec<SavedItem>> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.fetch_count += 1;
        state.mocked_results.pop_front().ok_or_else(|| {
            SavecastError::InvalidInput("no mocked fetch results available".into())
        })?
    }
}

/// Result for a mocked `publish` call.
pub enum MockPublishResult {
    Posted(PostedStatus),
    Error(SavecastError),
}

impl MockPublishResult {
    /// A successful post with the given status id.
    pub fn posted(id: impl Into<String>) -> Self {
        Self::Posted(PostedStatus {
            id: Some(id.into()),
            url: None,
        })
    }

    /// A rejection carrying only a status code.
    pub fn rejected(status: u16) -> Self {
        Self::Error(SavecastError::DestinationRejected {
            status: reqwest::StatusCode::from_u16(status)
                .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            error: None,
        })
    }
}

impl From<PostedStatus> for MockPublishResult {
    fn from(posted: PostedStatus) -> Self {
        Self::Posted(posted)
    }
}

impl From<SavecastError> for MockPublishResult {
    fn from(error: SavecastError) -> Self {
        Self::Error(error)
    }
}

#[derive(Default)]
struct MockPublisherState {
    mocked_results: VecDeque<MockPublishResult>,
    tracked_requests: Vec<StatusRequest>,
}

/// A publisher for testing that records every request and answers with
/// queued results.
pub struct MockPublisher {
    destination: &'static str,
    state: Mutex<MockPublisherState>,
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self {
            destination: "mock",
            state: Mutex::new(MockPublisherState::default()),
        }
    }
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue one or more mocked publish results.
    pub fn enqueue_results<I>(&self, results: I) -> &Self
    where
        I: IntoIterator<Item = MockPublishResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.extend(results);
        drop(state);
        self
    }

    /// Convenience to enqueue a single mocked publish result.
    pub fn enqueue<R>(&self, result: R) -> &Self
    where
        R: Into<MockPublishResult>,
    {
        self.enqueue_results(std::iter::once(result.into()))
    }

    /// Requests received so far, in call order.
    pub fn tracked_requests(&self) -> Vec<StatusRequest> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.clone()
    }
}

#[async_trait::async_trait]
impl StatusPublisher for MockPublisher {
    fn destination(&self) -> &'static str {
        self.destination
    }

    async fn publish(&self, request: &StatusRequest) -> ServiceResult<PostedStatus> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.push(request.clone());

        let result = state.mocked_results.pop_front().ok_or_else(|| {
            SavecastError::InvalidInput("no mocked publish results available".into())
        })?;

        match result {
            MockPublishResult::Posted(posted) => Ok(posted),
            MockPublishResult::Error(error) => Err(error),
        }
    }
}

use super::api::{MastodonApiError, StatusForm};
use crate::{
    client_utils, PostedStatus, SavecastError, ServiceResult, StatusPublisher, StatusRequest,
    Visibility,
};
use reqwest::{header::HeaderMap, Client};
use tracing::{debug, info, info_span};
use tracing_futures::Instrument;

const PROVIDER: &str = "mastodon";

pub struct MastodonPublisher {
    server: String,
    access_token: String,
    client: Client,
}

#[derive(Clone, Default)]
pub struct MastodonPublisherOptions {
    /// Base URL of the instance, e.g. `https://mastodon.social`.
    pub server: String,
    pub access_token: String,
    pub client: Option<Client>,
}

impl MastodonPublisher {
    #[must_use]
    pub fn new(options: MastodonPublisherOptions) -> Self {
        let MastodonPublisherOptions {
            server,
            access_token,
            client,
        } = options;

        Self {
            server: server.trim_end_matches('/').to_string(),
            access_token,
            client: client.unwrap_or_else(Client::new),
        }
    }

    fn request_headers(&self, request: &StatusRequest) -> ServiceResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        client_utils::insert_header(
            &mut headers,
            "authorization",
            &format!("Bearer {}", self.access_token),
            "Mastodon access token",
        )?;
        if let Some(key) = &request.idempotency_key {
            client_utils::insert_header(&mut headers, "idempotency-key", key, "idempotency key")?;
        }
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl StatusPublisher for MastodonPublisher {
    fn destination(&self) -> &'static str {
        PROVIDER
    }

    async fn publish(&self, request: &StatusRequest) -> ServiceResult<PostedStatus> {
        if request.status.trim().is_empty() {
            return Err(SavecastError::InvalidInput(
                "Status text must not be empty".to_string(),
            ));
        }

        let span = info_span!("mastodon.post_status", server = %self.server);
        async move {
            let form = StatusForm {
                status: &request.status,
                visibility: request.visibility.map(Visibility::as_str),
            };

            let response = client_utils::post_form(
                &self.client,
                &format!("{}/api/v1/statuses", self.server),
                &form,
                self.request_headers(request)?,
            )
            .await?;

            let status = response.status();
            if !status.is_success() {
                let body = client_utils::error_text(response).await;
                debug!(%status, body = %body, "status rejected");
                return Err(SavecastError::DestinationRejected {
                    status,
                    error: serde_json::from_str::<MastodonApiError>(&body).ok(),
                });
            }

            // The status already exists at this point, so an unreadable
            // body only costs us the id and URL for logging.
            let posted = response
                .bytes()
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<PostedStatus>(&body).ok())
                .unwrap_or_default();

            info!(id = ?posted.id, url = ?posted.url, "posted status");
            Ok(posted)
        }
        .instrument(span)
        .await
    }
}

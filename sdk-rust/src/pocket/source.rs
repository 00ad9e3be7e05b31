use super::api::{DetailType, ItemStatus, RawItem, RetrieveParams, RetrieveResponse, Sort};
use crate::{client_utils, SaveSource, SavecastError, SavedItem, ServiceResult};
use reqwest::{header::HeaderMap, Client};
use std::cmp::Ordering;
use tracing::{debug, info, info_span, warn};
use tracing_futures::Instrument;

const PROVIDER: &str = "pocket";
const DEFAULT_BASE_URL: &str = "https://getpocket.com/v3";
pub const DEFAULT_FETCH_COUNT: u32 = 10;

pub struct PocketSource {
    consumer_key: String,
    access_token: String,
    base_url: String,
    count: u32,
    client: Client,
}

#[derive(Clone, Default)]
pub struct PocketSourceOptions {
    pub consumer_key: String,
    pub access_token: String,
    pub base_url: Option<String>,
    /// Number of items to request. Defaults to 10.
    pub count: Option<u32>,
    pub client: Option<Client>,
}

impl PocketSource {
    #[must_use]
    pub fn new(options: PocketSourceOptions) -> Self {
        let PocketSourceOptions {
            consumer_key,
            access_token,
            base_url,
            count,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            consumer_key,
            access_token,
            base_url,
            count: count.unwrap_or(DEFAULT_FETCH_COUNT),
            client: client.unwrap_or_else(Client::new),
        }
    }

    fn request_headers() -> ServiceResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        client_utils::insert_header(&mut headers, "x-accept", "application/json", "accept")?;
        Ok(headers)
    }

    async fn retrieve(&self) -> ServiceResult<RetrieveResponse> {
        let params = RetrieveParams {
            consumer_key: &self.consumer_key,
            access_token: &self.access_token,
            count: self.count,
            sort: Sort::Newest,
            detail_type: DetailType::Simple,
        };

        let response = client_utils::post_json(
            &self.client,
            &format!("{}/get", self.base_url),
            &params,
            Self::request_headers()?,
        )
        .await?;

        let status = response.status();
        if !status.is_success() {
            // Pocket explains failures in X-Error rather than the body.
            let reason = response
                .headers()
                .get("x-error")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let message = match reason {
                Some(reason) => reason,
                None => client_utils::error_text(response).await,
            };
            return Err(SavecastError::SourceUnavailable(status, message));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|error| {
            SavecastError::SourceResponseInvalid(format!("Failed to parse retrieve response: {error}"))
        })
    }
}

#[async_trait::async_trait]
impl SaveSource for PocketSource {
    fn source(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_recent_saves(&self) -> ServiceResult<Vec<SavedItem>> {
        let span = info_span!("pocket.retrieve", count = self.count);
        async move {
            let response = self.retrieve().await?;
            let total = response.list.len();
            let saves = unarchived_saves(response);
            info!(total, unarchived = saves.len(), "retrieved recent saves");
            Ok(saves)
        }
        .instrument(span)
        .await
    }
}

/// Keep unread items and reduce them to title and URL, ordered by the
/// API's `sort_id` and then by item id. An item without any URL is kept
/// with an empty one.
pub(crate) fn unarchived_saves(response: RetrieveResponse) -> Vec<SavedItem> {
    let mut kept: Vec<(Option<u64>, String, RawItem)> = response
        .list
        .into_iter()
        .filter(|(item_id, item)| {
            if item.status == ItemStatus::Unread {
                true
            } else {
                debug!(%item_id, status = ?item.status, "skipping item that is not unread");
                false
            }
        })
        .map(|(key, item)| {
            let rank = item.sort_id.as_deref().and_then(|id| id.parse().ok());
            let item_id = item.item_id.clone().unwrap_or(key);
            (rank, item_id, item)
        })
        .collect();

    kept.sort_by(|(rank_a, id_a, _), (rank_b, id_b, _)| match (rank_a, rank_b) {
        (Some(a), Some(b)) => a.cmp(b).then_with(|| id_a.cmp(id_b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => id_a.cmp(id_b),
    });

    kept.into_iter()
        .map(|(_, item_id, item)| {
            let url = first_non_empty(item.resolved_url, item.given_url).unwrap_or_default();
            if url.is_empty() {
                warn!(%item_id, "unread item has no URL");
            }
            let title = first_non_empty(item.resolved_title, item.given_title).unwrap_or_default();
            SavedItem { item_id, title, url }
        })
        .collect()
}

fn first_non_empty(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    preferred
        .filter(|value| !value.is_empty())
        .or_else(|| fallback.filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> RetrieveResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn keeps_only_unread_items() {
        let saves = unarchived_saves(response(json!({
            "list": {
                "123": {
                    "resolved_title": "Article One",
                    "resolved_url": "http://example.com/a1",
                    "status": 0
                },
                "456": {
                    "resolved_title": "Article Two",
                    "resolved_url": "http://example.com/a2",
                    "status": 2
                }
            }
        })));

        assert_eq!(
            saves,
            vec![SavedItem::new("123", "Article One", "http://example.com/a1")]
        );
    }

    #[test]
    fn falls_back_to_given_fields() {
        let saves = unarchived_saves(response(json!({
            "list": {
                "1": {
                    "resolved_title": "",
                    "given_title": "Given",
                    "given_url": "http://example.com/given",
                    "status": "0"
                },
                "2": { "status": "0" },
                "3": { "resolved_url": "http://example.com/untitled", "status": "0" }
            }
        })));

        assert_eq!(
            saves,
            vec![
                SavedItem::new("1", "Given", "http://example.com/given"),
                SavedItem::new("2", "", ""),
                SavedItem::new("3", "", "http://example.com/untitled"),
            ]
        );
    }

    #[test]
    fn every_unread_item_is_returned_even_without_url() {
        let saves = unarchived_saves(response(json!({
            "list": {
                "1": { "resolved_title": "No link", "resolved_url": "", "status": 0 },
                "2": { "resolved_title": "Linked", "resolved_url": "http://example.com/2", "status": 0 }
            }
        })));

        assert_eq!(
            saves,
            vec![
                SavedItem::new("1", "No link", ""),
                SavedItem::new("2", "Linked", "http://example.com/2"),
            ]
        );
    }

    #[test]
    fn orders_by_sort_id_then_item_id() {
        let saves = unarchived_saves(response(json!({
            "list": {
                "30": { "resolved_url": "http://example.com/30", "sort_id": 1, "status": "0" },
                "10": { "resolved_url": "http://example.com/10", "sort_id": 0, "status": "0" },
                "20": { "resolved_url": "http://example.com/20", "status": "0" },
                "05": { "resolved_url": "http://example.com/05", "status": "0" }
            }
        })));

        let ids: Vec<&str> = saves.iter().map(|save| save.item_id.as_str()).collect();
        assert_eq!(ids, vec!["10", "30", "05", "20"]);
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let source = PocketSource::new(PocketSourceOptions {
            base_url: Some("http://localhost:8080/v3/".into()),
            ..Default::default()
        });

        assert_eq!(source.base_url, "http://localhost:8080/v3");
        assert_eq!(source.count, DEFAULT_FETCH_COUNT);
    }
}

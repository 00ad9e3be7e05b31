#![allow(clippy::pedantic)]
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Body of `POST /v3/get`.
#[derive(Serialize, Debug, Clone)]
pub struct RetrieveParams<'a> {
    pub consumer_key: &'a str,
    pub access_token: &'a str,
    /// Only return this many items.
    pub count: u32,
    pub sort: Sort,
    #[serde(rename = "detailType")]
    pub detail_type: DetailType,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    Newest,
    Oldest,
    Title,
    Site,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DetailType {
    Simple,
    Complete,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RetrieveResponse {
    /// Items keyed by item id. The API sends `[]` instead of `{}` when there
    /// is nothing to return.
    #[serde(default, deserialize_with = "deserialize_item_list")]
    pub list: HashMap<String, RawItem>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawItem {
    #[serde(default, deserialize_with = "deserialize_opt_scalar")]
    pub item_id: Option<String>,
    #[serde(default)]
    pub resolved_title: Option<String>,
    #[serde(default)]
    pub given_title: Option<String>,
    #[serde(default)]
    pub resolved_url: Option<String>,
    #[serde(default)]
    pub given_url: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
    /// Position in the requested sort order.
    #[serde(default, deserialize_with = "deserialize_opt_scalar")]
    pub sort_id: Option<String>,
}

/// State of a saved item. The API encodes it as either `"0"` or `0`
/// depending on the endpoint version. Values of any other shape decode to
/// `Other` so one odd item never fails the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ItemStatus {
    /// Also used when the field is absent, like an unset integer status.
    #[default]
    Unread,
    Archived,
    Deleted,
    Other(String),
}

impl ItemStatus {
    fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Unread),
            1 => Some(Self::Archived),
            2 => Some(Self::Deleted),
            _ => None,
        }
    }
}

impl From<&str> for ItemStatus {
    fn from(value: &str) -> Self {
        value
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(Self::from_code)
            .unwrap_or_else(|| Self::Other(value.to_string()))
    }
}

impl From<&Value> for ItemStatus {
    fn from(value: &Value) -> Self {
        let code = match value {
            Value::String(text) => return Self::from(text.as_str()),
            Value::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|float| float.fract() == 0.0)
                    .map(|float| float as i64)
            }),
            _ => None,
        };
        code.and_then(Self::from_code)
            .unwrap_or_else(|| Self::Other(value.to_string()))
    }
}

impl<'de> Deserialize<'de> for ItemStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from(&Value::deserialize(deserializer)?))
    }
}

/// Ids arrive as strings or numbers; other shapes are treated as absent.
fn deserialize_opt_scalar<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemList {
    Keyed(HashMap<String, RawItem>),
    Empty(Vec<RawItem>),
}

fn deserialize_item_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<HashMap<String, RawItem>, D::Error> {
    match Option::<ItemList>::deserialize(deserializer)? {
        Some(ItemList::Keyed(items)) => Ok(items),
        Some(ItemList::Empty(items)) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let key = item.item_id.clone().unwrap_or_else(|| index.to_string());
                (key, item)
            })
            .collect()),
        None => Ok(HashMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_accepts_string_and_integer() {
        let response: RetrieveResponse = serde_json::from_value(json!({
            "list": {
                "1": { "status": "0" },
                "2": { "status": 0 },
                "3": { "status": "1" },
                "4": { "status": 2 },
                "5": { "status": "7" }
            }
        }))
        .unwrap();

        assert_eq!(response.list["1"].status, ItemStatus::Unread);
        assert_eq!(response.list["2"].status, ItemStatus::Unread);
        assert_eq!(response.list["3"].status, ItemStatus::Archived);
        assert_eq!(response.list["4"].status, ItemStatus::Deleted);
        assert_eq!(response.list["5"].status, ItemStatus::Other("7".into()));
    }

    #[test]
    fn unexpected_status_shapes_are_excluded_not_fatal() {
        let response: RetrieveResponse = serde_json::from_value(json!({
            "list": {
                "1": { "status": null },
                "2": { "status": "0" },
                "3": { "status": true },
                "4": { "status": 0.0 },
                "5": { "status": 1.5 },
                "6": {}
            }
        }))
        .unwrap();

        assert_eq!(response.list["1"].status, ItemStatus::Other("null".into()));
        assert_eq!(response.list["2"].status, ItemStatus::Unread);
        assert_eq!(response.list["3"].status, ItemStatus::Other("true".into()));
        assert_eq!(response.list["4"].status, ItemStatus::Unread);
        assert_eq!(response.list["5"].status, ItemStatus::Other("1.5".into()));
        assert_eq!(response.list["6"].status, ItemStatus::Unread);
    }

    #[test]
    fn unexpected_id_shapes_are_treated_as_absent() {
        let response: RetrieveResponse = serde_json::from_value(json!({
            "list": { "9": { "item_id": false, "sort_id": [1], "status": "0" } }
        }))
        .unwrap();

        assert_eq!(response.list["9"].item_id, None);
        assert_eq!(response.list["9"].sort_id, None);
    }

    #[test]
    fn empty_list_is_sent_as_array() {
        let response: RetrieveResponse =
            serde_json::from_value(json!({ "status": 2, "complete": 1, "list": [] })).unwrap();

        assert!(response.list.is_empty());
    }

    #[test]
    fn missing_or_null_list_is_empty() {
        let response: RetrieveResponse = serde_json::from_value(json!({ "status": 1 })).unwrap();
        assert!(response.list.is_empty());

        let response: RetrieveResponse =
            serde_json::from_value(json!({ "list": null })).unwrap();
        assert!(response.list.is_empty());
    }

    #[test]
    fn sort_id_accepts_integer() {
        let response: RetrieveResponse = serde_json::from_value(json!({
            "list": { "9": { "item_id": "9", "sort_id": 3, "status": "0" } }
        }))
        .unwrap();

        assert_eq!(response.list["9"].sort_id.as_deref(), Some("3"));
        assert_eq!(response.list["9"].item_id.as_deref(), Some("9"));
    }

    #[test]
    fn retrieve_params_use_api_field_names() {
        let params = RetrieveParams {
            consumer_key: "ck",
            access_token: "at",
            count: 10,
            sort: Sort::Newest,
            detail_type: DetailType::Simple,
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "consumer_key": "ck",
                "access_token": "at",
                "count": 10,
                "sort": "newest",
                "detailType": "simple"
            })
        );
    }
}

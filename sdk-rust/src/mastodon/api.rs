use serde::{Deserialize, Serialize};
use std::fmt;

/// Form body of `POST /api/v1/statuses`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusForm<'a> {
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<&'static str>,
}

/// Error entity returned by Mastodon alongside a 4xx/5xx status.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MastodonApiError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl fmt::Display for MastodonApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_description {
            Some(description) => write!(f, "{} ({description})", self.error),
            None => f.write_str(&self.error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_description() {
        let error: MastodonApiError = serde_json::from_str(
            r#"{"error":"invalid_token","error_description":"The access token is invalid"}"#,
        )
        .unwrap();

        assert_eq!(
            error.to_string(),
            "invalid_token (The access token is invalid)"
        );
    }

    #[test]
    fn status_form_omits_unset_visibility() {
        let form = StatusForm {
            status: "hi",
            visibility: None,
        };

        assert_eq!(serde_json::to_value(&form).unwrap(), serde_json::json!({ "status": "hi" }));
    }
}

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A saved link reduced to what gets republished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    /// Identifier of the item in the source service.
    pub item_id: String,
    /// Title of the saved page. May be empty when the source could not
    /// resolve one.
    pub title: String,
    /// Canonical URL of the saved page.
    pub url: String,
}

impl SavedItem {
    pub fn new(
        item_id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Who can see a published status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Direct,
}

impl Visibility {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Unlisted => "unlisted",
            Self::Private => "private",
            Self::Direct => "direct",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "unlisted" => Ok(Self::Unlisted),
            "private" => Ok(Self::Private),
            "direct" => Ok(Self::Direct),
            other => Err(format!(
                "unknown visibility '{other}', expected one of public, unlisted, private, direct"
            )),
        }
    }
}

/// A status to be created on the destination server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusRequest {
    /// Plain text of the status.
    pub status: String,
    pub visibility: Option<Visibility>,
    /// Sent as the `Idempotency-Key` header so the server drops duplicates.
    pub idempotency_key: Option<String>,
}

impl StatusRequest {
    pub fn text(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Option<Visibility>) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

/// What the destination reported back about a created status.
/// Both fields are best effort; a success response that cannot be decoded
/// yields an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostedStatus {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

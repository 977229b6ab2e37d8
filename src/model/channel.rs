use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::GranularValue;

/// Channel or group metadata parsed from a single "about" document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Canonical username, in the capitalization the page reports.
    /// Telegram resolves usernames case-insensitively, so compare
    /// channels case-folded.
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Exact member count from the page header, unlike the granular
    /// counters below.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<GranularValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<GranularValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<GranularValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<GranularValue>,
}

impl Channel {
    pub(crate) fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            title: None,
            verified: None,
            photo: None,
            description: None,
            members: None,
            is_public: None,
            photos: None,
            videos: None,
            links: None,
            files: None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "https://t.me/s/{}", self.username)
    }
}

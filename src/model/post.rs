use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use url::Url;

use super::GranularValue;

/// One message extracted from a preview page. Constructed once per
/// page-parse pass and immutable afterwards; optional list fields are
/// `None` rather than empty to keep "no data" distinguishable in the
/// serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Canonical permalink in the `/s/` preview form.
    pub url: String,
    /// Message index within the channel, taken from the permalink. Unique
    /// per channel and increasing with posting time.
    pub message_id: u64,
    pub date: DateTime<FixedOffset>,
    /// Message body in the configured format; `None` for media-only posts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Outbound links, first-occurrence order, deduplicated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlinks: Option<Vec<Url>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    /// Username of the origin channel when this post is a forward. The
    /// origin is never fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarded_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarded_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<Medium>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<GranularValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview: Option<LinkPreview>,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A media attachment, exclusively owned by one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Medium {
    Photo {
        url: Url,
    },
    Video {
        #[serde(skip_serializing_if = "Option::is_none")]
        thumbnail_url: Option<Url>,
        duration: u64,
        /// Direct asset URL when the page embeds one; `None` means the
        /// asset would need a follow-up fetch this crate does not perform.
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<Url>,
    },
    VoiceMessage {
        url: Url,
        duration: u64,
        /// Waveform bar heights as percentages, in source order.
        bars: Vec<f64>,
    },
    Gif {
        #[serde(skip_serializing_if = "Option::is_none")]
        thumbnail_url: Option<Url>,
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<Url>,
    },
}

/// The rich preview block a post may carry for one of its links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkPreview {
    pub href: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Url>,
}

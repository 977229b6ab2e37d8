//! The CSS-class contract with the preview markup, kept in one place so an
//! upstream markup change touches a single table.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

/// Anchors nested under these classes belong to the author/avatar header
/// and are never treated as message links.
pub(crate) const AUTHOR_HEADER_CLASSES: [&str; 2] =
    ["tgme_widget_message_user", "tgme_widget_message_author"];

fn sel(pattern: &str) -> Selector {
    Selector::parse(pattern).expect("static selector")
}

// Message list and post internals.
pub(crate) static MESSAGE: Lazy<Selector> =
    Lazy::new(|| sel("div.tgme_widget_message[data-post]"));
pub(crate) static FOOTER: Lazy<Selector> = Lazy::new(|| sel("div.tgme_widget_message_footer"));
pub(crate) static DATE_LINK: Lazy<Selector> =
    Lazy::new(|| sel("a.tgme_widget_message_date[href]"));
pub(crate) static TIME_DATETIME: Lazy<Selector> = Lazy::new(|| sel("time[datetime]"));
pub(crate) static MESSAGE_TEXT: Lazy<Selector> = Lazy::new(|| sel("div.tgme_widget_message_text"));
pub(crate) static FORWARDED_NAME: Lazy<Selector> =
    Lazy::new(|| sel("a.tgme_widget_message_forwarded_from_name[href]"));
pub(crate) static ANCHOR: Lazy<Selector> = Lazy::new(|| sel("a[href]"));
pub(crate) static VIEWS: Lazy<Selector> = Lazy::new(|| sel("span.tgme_widget_message_views"));

// Media players.
pub(crate) static VOICE_PLAYER: Lazy<Selector> =
    Lazy::new(|| sel("a.tgme_widget_message_voice_player"));
pub(crate) static VIDEO_PLAYER: Lazy<Selector> =
    Lazy::new(|| sel("a.tgme_widget_message_video_player"));
pub(crate) static AUDIO: Lazy<Selector> = Lazy::new(|| sel("audio[src]"));
pub(crate) static VIDEO: Lazy<Selector> = Lazy::new(|| sel("video"));
pub(crate) static ICON: Lazy<Selector> = Lazy::new(|| sel("i"));
pub(crate) static TIME: Lazy<Selector> = Lazy::new(|| sel("time"));
pub(crate) static WAVEFORM_BARS: Lazy<Selector> = Lazy::new(|| sel("div.bar s"));

// Link preview block.
pub(crate) static LINK_PREVIEW: Lazy<Selector> =
    Lazy::new(|| sel("a.tgme_widget_message_link_preview[href]"));
pub(crate) static PREVIEW_SITE_NAME: Lazy<Selector> =
    Lazy::new(|| sel("div.link_preview_site_name"));
pub(crate) static PREVIEW_TITLE: Lazy<Selector> = Lazy::new(|| sel("div.link_preview_title"));
pub(crate) static PREVIEW_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| sel("div.link_preview_description"));
pub(crate) static PREVIEW_IMAGE: Lazy<Selector> = Lazy::new(|| sel("i.link_preview_image"));

// Pagination.
pub(crate) static MESSAGES_MORE: Lazy<Selector> =
    Lazy::new(|| sel("a.tme_messages_more[data-before][href]"));
pub(crate) static CANONICAL_LINK: Lazy<Selector> =
    Lazy::new(|| sel("link[rel=\"canonical\"][href]"));

// Channel "about" documents.
pub(crate) static PAGE_ACTION: Lazy<Selector> = Lazy::new(|| sel("div.tgme_page_action"));
pub(crate) static ACTION_BUTTON: Lazy<Selector> =
    Lazy::new(|| sel("a.tgme_action_button_new.shine"));
pub(crate) static PAGE_EXTRA: Lazy<Selector> = Lazy::new(|| sel("div.tgme_page_extra"));
pub(crate) static PAGE_PHOTO: Lazy<Selector> = Lazy::new(|| sel("img.tgme_page_photo_image"));
pub(crate) static PAGE_TITLE_SPAN: Lazy<Selector> = Lazy::new(|| sel("div.tgme_page_title span"));
pub(crate) static PAGE_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| sel("div.tgme_page_description"));
pub(crate) static CONTEXT_LINK: Lazy<Selector> = Lazy::new(|| sel("a.tgme_page_context_link"));
pub(crate) static CHANNEL_INFO: Lazy<Selector> = Lazy::new(|| sel("div.tgme_channel_info"));
pub(crate) static INFO_TITLE: Lazy<Selector> =
    Lazy::new(|| sel("div.tgme_channel_info_header_title"));
pub(crate) static INFO_USERNAME: Lazy<Selector> =
    Lazy::new(|| sel("div.tgme_channel_info_header_username"));
pub(crate) static INFO_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| sel("div.tgme_channel_info_description"));
pub(crate) static VERIFIED_ICON: Lazy<Selector> = Lazy::new(|| sel("i.verified-icon"));
pub(crate) static COUNTER: Lazy<Selector> = Lazy::new(|| sel("div.tgme_channel_info_counter"));
pub(crate) static COUNTER_VALUE: Lazy<Selector> = Lazy::new(|| sel("span.counter_value"));
pub(crate) static COUNTER_TYPE: Lazy<Selector> = Lazy::new(|| sel("span.counter_type"));
pub(crate) static SPAN: Lazy<Selector> = Lazy::new(|| sel("span"));

/// `url('...')` tokens inside an inline style.
pub(crate) static STYLE_IMAGE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"url\('(.*?)'\)").unwrap());

/// Permalink of a single attachment within an album.
pub(crate) static SINGLE_MEDIA_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://t\.me/[^/]+/\d+\?single$").unwrap());

use scraper::{ElementRef, Html};
use tracing::warn;
use url::Url;

use super::{base, classes};
use crate::count::parse_abbreviated_count;
use crate::model::Channel;

/// Parses a channel or group "about" document. Handles the public-channel
/// page, the private-group page, and the nonexistent-entity page; the last
/// one is a first-class `None`, never a half-empty [`Channel`].
pub struct ChannelInfoParser;

impl ChannelInfoParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, document: &Html) -> Option<Channel> {
        let root = document.root_element();

        // The action button's deep link is the only reliable existence
        // signal: a deleted or never-created entity has no resolvable
        // username behind it.
        let username = root
            .select(&classes::PAGE_ACTION)
            .next()
            .and_then(|action| action.select(&classes::ACTION_BUTTON).next())
            .and_then(|button| button.value().attr("href"))
            .and_then(|href| href.strip_prefix("tg://resolve?domain="))
            .filter(|name| !name.is_empty())?;
        let mut channel = Channel::new(username);

        channel.members = root
            .select(&classes::PAGE_EXTRA)
            .next()
            .and_then(|extra| parse_member_count(&base::element_text(&extra)));

        channel.photo = root
            .select(&classes::PAGE_PHOTO)
            .next()
            .and_then(|img| img.value().attr("src"))
            .and_then(|src| Url::parse(src).ok());

        channel.title = root
            .select(&classes::PAGE_TITLE_SPAN)
            .next()
            .map(|span| base::element_text_separated(&span, " ").trim().to_string());
        channel.description = root
            .select(&classes::PAGE_DESCRIPTION)
            .next()
            .map(|div| base::element_text_separated(&div, " ").trim().to_string());

        channel.is_public = Some(
            root.select(&classes::CONTEXT_LINK)
                .next()
                .and_then(|link| link.value().attr("href"))
                .map(|href| href.contains("/s/"))
                .unwrap_or(false),
        );

        if let Some(info) = root.select(&classes::CHANNEL_INFO).next() {
            self.parse_info_block(&root, &info, &mut channel);
        }

        Some(channel)
    }

    /// The richer detail block on group/channel pages. Its title, verified
    /// flag, and description win over the page header's.
    fn parse_info_block(&self, root: &ElementRef, info: &ElementRef, channel: &mut Channel) {
        if let Some(title) = info.select(&classes::INFO_TITLE).next() {
            if let Some(span) = title.select(&classes::SPAN).next() {
                channel.title = Some(base::element_text_separated(&span, " "));
            }
            channel.verified = Some(title.select(&classes::VERIFIED_ICON).next().is_some());
        }

        // The header username is not canonicalised, but post permalinks
        // are, so prefer the newest post's embedded identifier.
        let from_post = root
            .select(&classes::MESSAGE)
            .last()
            .and_then(|post| post.value().attr("data-post"))
            .and_then(|data_post| data_post.split('/').next())
            .map(str::to_string);
        match from_post {
            Some(username) => channel.username = username,
            None => {
                if let Some(header) = info.select(&classes::INFO_USERNAME).next() {
                    warn!(
                        "no post to take the username from, falling back to the \
                         channel info header, which may not be capitalised correctly"
                    );
                    channel.username = base::element_text(&header)
                        .trim()
                        .trim_start_matches('@')
                        .to_string();
                }
            }
        }

        if let Some(description) = info.select(&classes::INFO_DESCRIPTION).next() {
            channel.description = Some(base::element_text_separated(&description, " "));
        }

        for counter in info.select(&classes::COUNTER) {
            let value = counter
                .select(&classes::COUNTER_VALUE)
                .next()
                .map(|e| base::element_text(&e));
            let kind = counter
                .select(&classes::COUNTER_TYPE)
                .next()
                .map(|e| base::element_text_separated(&e, " "));
            let (Some(value), Some(kind)) = (value, kind) else {
                continue;
            };
            // "members" was already taken, more exactly, from the header.
            if kind == "members" {
                continue;
            }
            let parsed = match parse_abbreviated_count(&value) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("unparseable {kind} counter for {}: {e}", channel.username);
                    continue;
                }
            };
            match kind.as_str() {
                "photos" => channel.photos = Some(parsed),
                "videos" => channel.videos = Some(parsed),
                "links" => channel.links = Some(parsed),
                "files" => channel.files = Some(parsed),
                _ => {}
            }
        }
    }
}

impl Default for ChannelInfoParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Member counts read "217 094 members, 12 online" or "no members"; only
/// the first comma-separated segment matters.
fn parse_member_count(text: &str) -> Option<u64> {
    let head = text.split(',').next()?.trim();
    if !head.ends_with(" members") && !head.ends_with(" subscribers") {
        return None;
    }
    let words: Vec<&str> = head.split(' ').collect();
    let number = words[..words.len() - 1].concat();
    if number == "no" {
        return Some(0);
    }
    number.parse().ok()
}

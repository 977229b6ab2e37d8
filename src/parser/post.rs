use chrono::{DateTime, FixedOffset};
use scraper::{ElementRef, Html};
use tracing::warn;
use url::Url;

use super::{base, classes, markdown, media};
use crate::count::parse_abbreviated_count;
use crate::format::PostFormat;
use crate::model::{LinkPreview, Medium, Post};

/// Turns the post fragments of one preview page into [`Post`] records.
/// A malformed fragment degrades to partial fields with a logged warning;
/// only a fragment without a usable permalink (its identity) is skipped.
pub struct PostParser {
    format: PostFormat,
}

impl PostParser {
    pub fn new(format: PostFormat) -> Self {
        Self { format }
    }

    /// Parses every post on the page in reverse document order, so a page
    /// listing posts oldest-to-newest comes back newest-first. Pure
    /// function of the document: re-parsing yields identical records.
    pub fn parse_page(&self, document: &Html, page_url: &Url) -> Vec<Post> {
        let root = document.root_element();
        let mut fragments: Vec<ElementRef> = root.select(&classes::MESSAGE).collect();
        fragments.reverse();
        fragments
            .iter()
            .filter_map(|fragment| self.parse_post(fragment, page_url))
            .collect()
    }

    fn parse_post(&self, post: &ElementRef, page_url: &Url) -> Option<Post> {
        let (raw_url, url, date) = self.parse_permalink(post)?;
        let message_id = match message_id_of(&url) {
            Some(id) => id,
            None => {
                warn!("no numeric message id in {url:?}, skipping post");
                return None;
            }
        };

        let (forwarded_from, forwarded_url) = parse_forwarded(post);
        let content = post
            .select(&classes::MESSAGE_TEXT)
            .next()
            .map(|message| self.render_content(&message));

        let mut media = Vec::new();
        let (mut outlinks, mentions, hashtags) = collect_links(
            post,
            page_url,
            &raw_url,
            &url,
            forwarded_url.as_ref(),
            &mut media,
        );
        media::collect_voice_messages(post, &mut media);
        media::collect_video_players(post, &mut media);

        let link_preview = extract_link_preview(post, page_url, &url, &mut outlinks);

        let views = post.select(&classes::VIEWS).next().and_then(|span| {
            let text = base::element_text(&span);
            parse_abbreviated_count(&text)
                .map_err(|e| warn!("unparseable view count on {url}: {e}"))
                .ok()
        });

        Some(Post {
            url,
            message_id,
            date,
            content,
            outlinks: non_empty(outlinks),
            mentions: non_empty(mentions),
            hashtags: non_empty(hashtags),
            forwarded_from,
            forwarded_url,
            media: non_empty(media),
            views,
            link_preview,
        })
    }

    /// Raw permalink, its canonical `/s/` form, and the post timestamp.
    /// Shape anomalies are logged, not fatal; a missing permalink or
    /// timestamp leaves the fragment without an identity and skips it.
    fn parse_permalink(&self, post: &ElementRef) -> Option<(String, String, DateTime<FixedOffset>)> {
        let footer = post.select(&classes::FOOTER).next().or_else(|| {
            warn!("post fragment without a footer, skipping");
            None
        })?;
        let date_link = footer.select(&classes::DATE_LINK).next().or_else(|| {
            warn!("post footer without a date link, skipping");
            None
        })?;
        let raw_url = date_link.value().attr("href")?.to_string();

        let tail = raw_url.rsplit('/').next().unwrap_or("");
        if !raw_url.starts_with("https://t.me/")
            || raw_url.matches('/').count() != 4
            || tail.is_empty()
            || !tail.chars().all(|c| c.is_ascii_digit())
        {
            warn!("possibly incorrect URL: {raw_url:?}");
        }
        let url = raw_url.replacen("//t.me/", "//t.me/s/", 1);

        let datetime = date_link
            .select(&classes::TIME_DATETIME)
            .next()
            .and_then(|time| time.value().attr("datetime").map(str::to_string))
            .or_else(|| {
                warn!("post {raw_url} without a machine-readable datetime, skipping");
                None
            })?;
        let date = DateTime::parse_from_rfc3339(&datetime)
            .map_err(|e| warn!("unparseable datetime {datetime:?} on {raw_url}: {e}"))
            .ok()?;

        Some((raw_url, url, date))
    }

    fn render_content(&self, message: &ElementRef) -> String {
        match self.format {
            PostFormat::Text => base::element_text_separated(message, "\n"),
            PostFormat::Html => message.html(),
            PostFormat::Markdown => markdown::render(message),
        }
    }
}

/// Classifies every anchor outside the author header: self-links (photo or
/// timestamp permalink), single-attachment photos, mentions, hashtags, and
/// plain outlinks in first-occurrence order.
fn collect_links(
    post: &ElementRef,
    page_url: &Url,
    raw_url: &str,
    canonical_url: &str,
    forwarded_url: Option<&Url>,
    media: &mut Vec<Medium>,
) -> (Vec<Url>, Vec<String>, Vec<String>) {
    let mut outlinks = Vec::new();
    let mut mentions = Vec::new();
    let mut hashtags = Vec::new();

    for link in post.select(&classes::ANCHOR) {
        if base::parent_has_class(&link, &classes::AUTHOR_HEADER_CLASSES) {
            continue;
        }
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        if href == raw_url || href == canonical_url {
            // Self-link: a styled one is a photo or video cover, a bare one
            // is the timestamp permalink.
            if let Some(photo) = media::photo_from_style(&link) {
                media.push(photo);
            }
            continue;
        }
        if classes::SINGLE_MEDIA_LINK.is_match(href) {
            if let Some(photo) = media::photo_from_style(&link) {
                media.push(photo);
            }
            continue;
        }

        let text = base::element_text(&link);
        if let Some(mention) = text.strip_prefix('@') {
            mentions.push(mention.to_string());
            continue;
        }
        if let Some(hashtag) = text.strip_prefix('#') {
            hashtags.push(hashtag.to_string());
            continue;
        }

        let resolved = match page_url.join(href) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("unresolvable link {href:?} on {canonical_url}: {e}");
                continue;
            }
        };
        if resolved.as_str() == raw_url
            || resolved.as_str() == canonical_url
            || forwarded_url == Some(&resolved)
            || outlinks.contains(&resolved)
        {
            continue;
        }
        outlinks.push(resolved);
    }

    (outlinks, mentions, hashtags)
}

/// At most one rich preview block per post. Its target supersedes a plain
/// outlink to the same URL.
fn extract_link_preview(
    post: &ElementRef,
    page_url: &Url,
    post_url: &str,
    outlinks: &mut Vec<Url>,
) -> Option<LinkPreview> {
    let preview = post.select(&classes::LINK_PREVIEW).next()?;
    let href = match page_url.join(preview.value().attr("href")?) {
        Ok(href) => href,
        Err(e) => {
            warn!("unresolvable link preview target on {post_url}: {e}");
            return None;
        }
    };

    let site_name = preview
        .select(&classes::PREVIEW_SITE_NAME)
        .next()
        .map(|e| base::element_text(&e));
    let title = preview
        .select(&classes::PREVIEW_TITLE)
        .next()
        .map(|e| base::element_text(&e));
    let description = preview
        .select(&classes::PREVIEW_DESCRIPTION)
        .next()
        .map(|e| base::element_text(&e));

    let image = preview.select(&classes::PREVIEW_IMAGE).next().and_then(|icon| {
        let style = icon.value().attr("style").unwrap_or("");
        match style.strip_prefix("background-image:url('") {
            Some(rest) => rest.split('\'').next().and_then(|u| Url::parse(u).ok()),
            None => {
                warn!("could not process link preview image on {post_url}");
                None
            }
        }
    });

    outlinks.retain(|outlink| outlink != &href);

    Some(LinkPreview {
        href,
        site_name,
        title,
        description,
        image,
    })
}

/// Forward origin, recorded by username only. The username sits in the
/// profile URL right after the `t.me/` host part.
fn parse_forwarded(post: &ElementRef) -> (Option<String>, Option<Url>) {
    let Some(tag) = post.select(&classes::FORWARDED_NAME).next() else {
        return (None, None);
    };
    let Some(href) = tag.value().attr("href") else {
        return (None, None);
    };
    let username = href
        .split_once("t.me/")
        .map(|(_, rest)| rest.split('/').next().unwrap_or(rest).to_string());
    if username.is_none() {
        warn!("forwarded-from link without a t.me profile URL: {href:?}");
    }
    (username, Url::parse(href).ok())
}

fn message_id_of(url: &str) -> Option<u64> {
    url.rsplit('/')
        .next()?
        .split('?')
        .next()?
        .parse()
        .ok()
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_id_of() {
        assert_eq!(message_id_of("https://t.me/s/durov/123"), Some(123));
        assert_eq!(message_id_of("https://t.me/s/durov/123?single"), Some(123));
        assert_eq!(message_id_of("https://t.me/s/durov/abc"), None);
    }
}

//! Classification of media attachments inside one post fragment.

use scraper::ElementRef;
use tracing::warn;
use url::Url;

use super::{base, classes};
use crate::count::duration_to_seconds;
use crate::model::Medium;

/// A photo carried by an anchor's inline `background-image` style. The
/// markup always encodes exactly one image URL for a photo anchor.
pub(crate) fn photo_from_style(anchor: &ElementRef) -> Option<Medium> {
    let urls = base::style_image_urls(anchor);
    if urls.len() != 1 {
        return None;
    }
    match Url::parse(&urls[0]) {
        Ok(url) => Some(Medium::Photo { url }),
        Err(e) => {
            warn!("unparseable photo URL {:?}: {e}", urls[0]);
            None
        }
    }
}

/// Voice messages: audio URL from the embedded audio element, duration
/// from the time label, waveform bar heights from the inline percentage
/// styles in source order.
pub(crate) fn collect_voice_messages(post: &ElementRef, media: &mut Vec<Medium>) {
    for player in post.select(&classes::VOICE_PLAYER) {
        let url = player
            .select(&classes::AUDIO)
            .next()
            .and_then(|audio| audio.value().attr("src"))
            .and_then(|src| Url::parse(src).ok());
        let Some(url) = url else {
            warn!("voice player without a usable audio source, skipping");
            continue;
        };

        let duration = player
            .select(&classes::TIME)
            .next()
            .map(|time| duration_to_seconds(&base::element_text(&time)))
            .unwrap_or(0);

        let bars = player
            .select(&classes::WAVEFORM_BARS)
            .filter_map(|bar| bar.value().attr("style").and_then(bar_height))
            .collect();

        media.push(Medium::VoiceMessage { url, duration, bars });
    }
}

/// Video players become a `Video` when they carry a duration label and a
/// `Gif` when they do not. A missing direct source is legal and means the
/// asset would need a follow-up fetch.
pub(crate) fn collect_video_players(post: &ElementRef, media: &mut Vec<Medium>) {
    for player in post.select(&classes::VIDEO_PLAYER) {
        let (thumbnail_url, url) = match player.select(&classes::ICON).next() {
            None => (None, None),
            Some(icon) => {
                let thumbnail_url = base::style_image_urls(&icon)
                    .into_iter()
                    .next()
                    .and_then(|u| Url::parse(&u).ok());
                if thumbnail_url.is_none() {
                    warn!("video player icon without a thumbnail style");
                }
                let url = player
                    .select(&classes::VIDEO)
                    .next()
                    .and_then(|video| video.value().attr("src"))
                    .and_then(|src| Url::parse(src).ok());
                (thumbnail_url, url)
            }
        };

        match player.select(&classes::TIME).next() {
            Some(time) => media.push(Medium::Video {
                thumbnail_url,
                duration: duration_to_seconds(&base::element_text(&time)),
                url,
            }),
            None => media.push(Medium::Gif { thumbnail_url, url }),
        }
    }
}

/// Parses an inline `height: NN%` style into a bar height.
fn bar_height(style: &str) -> Option<f64> {
    style
        .rsplit(':')
        .next()?
        .trim()
        .trim_matches(|c| c == ';' || c == '%')
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_height() {
        assert_eq!(bar_height("height:56%"), Some(56.0));
        assert_eq!(bar_height("height: 12.5%;"), Some(12.5));
        assert_eq!(bar_height("height"), None);
    }
}

mod common;

use common::MockFetcher;
use scraper::Html;
use url::Url;

use tgscrape::parser::ChannelInfoParser;
use tgscrape::{GranularValue, TelegramChannelScraper};

const CHANNEL: &str = include_str!("fixtures/channel.html");
const CHANNEL_FULL: &str = include_str!("fixtures/channel_full.html");
const GROUP: &str = include_str!("fixtures/group.html");
const NOTFOUND: &str = include_str!("fixtures/notfound.html");

fn parse(body: &str) -> Option<tgscrape::Channel> {
    ChannelInfoParser::new().parse(&Html::parse_document(body))
}

#[test]
fn public_channel_header() {
    let channel = parse(CHANNEL).unwrap();
    assert_eq!(channel.username, "RustCast");
    assert_eq!(channel.title.as_deref(), Some("RustCast Weekly"));
    assert_eq!(channel.members, Some(217_094));
    assert_eq!(channel.is_public, Some(true));
    assert_eq!(
        channel.photo.as_ref().map(Url::as_str),
        Some("https://cdn.example.org/channel.jpg")
    );
    assert_eq!(channel.description.as_deref(), Some("Rust news, every week"));
    // No channel info block on this page shape.
    assert_eq!(channel.verified, None);
    assert_eq!(channel.photos, None);
    assert_eq!(channel.to_string(), "https://t.me/s/RustCast");
}

#[test]
fn private_group_is_not_public() {
    let channel = parse(GROUP).unwrap();
    assert_eq!(channel.username, "crabcollective");
    assert_eq!(channel.members, Some(45));
    assert_eq!(channel.is_public, Some(false));
}

#[test]
fn missing_entity_is_none_not_an_error() {
    assert_eq!(parse(NOTFOUND), None);
}

#[test]
fn info_block_overrides_header_and_carries_counters() {
    let channel = parse(CHANNEL_FULL).unwrap();
    // The canonical capitalisation comes from the newest post's permalink,
    // not from the lowercased action-button href.
    assert_eq!(channel.username, "RustCast");
    assert_eq!(channel.title.as_deref(), Some("RustCast Weekly"));
    assert_eq!(channel.verified, Some(true));
    assert_eq!(channel.members, Some(217_094));
    assert_eq!(channel.is_public, Some(true));
    assert_eq!(channel.description.as_deref(), Some("Rust news, every week"));

    assert_eq!(
        channel.photos,
        Some(GranularValue { value: 1460, granularity: 10 })
    );
    assert_eq!(
        channel.videos,
        Some(GranularValue { value: 1200, granularity: 100 })
    );
    assert_eq!(
        channel.links,
        Some(GranularValue { value: 4270, granularity: 10 })
    );
    assert_eq!(
        channel.files,
        Some(GranularValue { value: 53, granularity: 1 })
    );
}

#[test]
fn channel_info_through_the_scraper() {
    let fetcher = MockFetcher::new().route("https://t.me/s/rustcast", CHANNEL_FULL);
    let scraper = TelegramChannelScraper::with_fetcher("rustcast", &fetcher).unwrap();

    let channel = scraper.channel_info().unwrap().unwrap();
    assert_eq!(channel.username, "RustCast");

    // The cached initial page serves repeated lookups.
    let again = scraper.channel_info().unwrap().unwrap();
    assert_eq!(channel, again);
    assert_eq!(fetcher.fetch_count(), 1);
}

#[test]
fn channel_serializes_without_absent_fields() {
    let channel = parse(GROUP).unwrap();
    let value = serde_json::to_value(&channel).unwrap();
    let object = value.as_object().unwrap();
    assert!(object.contains_key("username"));
    assert!(object.contains_key("members"));
    assert!(!object.contains_key("verified"));
    assert!(!object.contains_key("photos"));
    assert!(!object.contains_key("links"));
}

mod common;

use common::MockFetcher;
use tgscrape::{Post, ScraperError, TelegramChannelScraper};

const PAGE1: &str = include_str!("fixtures/page1.html");
const PAGE2: &str = include_str!("fixtures/page2.html");
const FALLBACK1: &str = include_str!("fixtures/fallback_page1.html");
const FALLBACK2: &str = include_str!("fixtures/fallback_page2.html");
const FALLBACK3: &str = include_str!("fixtures/fallback_page3.html");
const GROUP: &str = include_str!("fixtures/group.html");

fn ids(posts: &[Post]) -> Vec<u64> {
    posts.iter().map(|p| p.message_id).collect()
}

#[test]
fn walk_terminates_at_message_one() {
    let fetcher = MockFetcher::new()
        .route("https://t.me/s/walkchan", PAGE1)
        .route("https://t.me/s/walkchan?before=23", PAGE2);
    let scraper = TelegramChannelScraper::with_fetcher("walkchan", &fetcher).unwrap();

    let posts: Vec<Post> = scraper.posts().collect::<Result<_, _>>().unwrap();

    assert_eq!(ids(&posts), vec![24, 23, 3, 2, 1]);
    // The page containing message 1 is terminal: its own more-link must
    // not be followed.
    assert_eq!(fetcher.fetch_count(), 2);
}

#[test]
fn walk_yields_decreasing_unique_ids() {
    let fetcher = MockFetcher::new()
        .route("https://t.me/s/walkchan", PAGE1)
        .route("https://t.me/s/walkchan?before=23", PAGE2);
    let scraper = TelegramChannelScraper::with_fetcher("walkchan", &fetcher).unwrap();

    let posts: Vec<Post> = scraper.posts().collect::<Result<_, _>>().unwrap();

    // Strictly decreasing in fetch order, so the collected walk read
    // oldest-to-newest is strictly increasing with no duplicates.
    assert!(posts.windows(2).all(|w| w[0].message_id > w[1].message_id));
    let oldest_first: Vec<u64> = ids(&posts).into_iter().rev().collect();
    assert!(oldest_first.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn walk_infers_offsets_when_more_link_is_missing() {
    let fetcher = MockFetcher::new()
        .route("https://t.me/s/fbchan", FALLBACK1)
        .route("https://t.me/s/fbchan?before=41", FALLBACK2)
        .route("https://t.me/s/fbchan?before=21", FALLBACK3);
    let scraper = TelegramChannelScraper::with_fetcher("fbchan", &fetcher).unwrap();

    let posts: Vec<Post> = scraper.posts().collect::<Result<_, _>>().unwrap();

    assert_eq!(ids(&posts), vec![46, 45, 26, 25, 6, 5]);
    assert_eq!(
        fetcher.fetched_urls(),
        vec![
            "https://t.me/s/fbchan",
            "https://t.me/s/fbchan?before=41",
            "https://t.me/s/fbchan?before=21",
        ]
    );
}

#[test]
fn failed_page_fetch_ends_the_walk_with_an_error() {
    // page2 is not routed, so following the more-link returns a 404.
    let fetcher = MockFetcher::new().route("https://t.me/s/walkchan", PAGE1);
    let scraper = TelegramChannelScraper::with_fetcher("walkchan", &fetcher).unwrap();

    let results: Vec<Result<Post, ScraperError>> = scraper.posts().collect();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().message_id, 24);
    assert_eq!(results[1].as_ref().unwrap().message_id, 23);
    assert!(matches!(
        results[2],
        Err(ScraperError::Status { code: 404, .. })
    ));
}

#[test]
fn redirect_away_from_preview_yields_no_posts() {
    // A channel without a public post list redirects off the /s/ path.
    let fetcher = MockFetcher::new().route_redirect(
        "https://t.me/s/crabcollective",
        "https://t.me/crabcollective",
        GROUP,
    );
    let scraper = TelegramChannelScraper::with_fetcher("crabcollective", &fetcher).unwrap();

    assert_eq!(scraper.posts().count(), 0);
    assert_eq!(fetcher.fetch_count(), 1);
}

#[test]
fn posts_and_channel_info_share_the_initial_fetch() {
    let fetcher = MockFetcher::new()
        .route("https://t.me/s/walkchan", PAGE1)
        .route("https://t.me/s/walkchan?before=23", PAGE2);
    let scraper = TelegramChannelScraper::with_fetcher("walkchan", &fetcher).unwrap();

    let _ = scraper.channel_info().unwrap();
    let posts: Vec<Post> = scraper.posts().collect::<Result<_, _>>().unwrap();

    assert_eq!(posts.len(), 5);
    assert_eq!(fetcher.fetch_count(), 2);
}

#[test]
fn invalid_channel_name_is_rejected_at_construction() {
    let fetcher = MockFetcher::new();
    assert!(matches!(
        TelegramChannelScraper::with_fetcher("no spaces allowed", &fetcher),
        Err(ScraperError::InvalidChannelName)
    ));
    assert!(matches!(
        TelegramChannelScraper::with_fetcher("abc", &fetcher),
        Err(ScraperError::InvalidChannelName)
    ));
}

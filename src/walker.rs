//! The scraper itself: one cached initial fetch shared between the post
//! walk and the entity lookup, and the backward page walk over the
//! channel's history.

use std::collections::HashMap;

use once_cell::unsync::OnceCell;
use scraper::Html;
use tracing::warn;
use url::Url;

use crate::error::ScraperError;
use crate::format::PostFormat;
use crate::model::{Channel, Post};
use crate::parser::{classes, ChannelInfoParser, PostParser};
use crate::request::{FetchResponse, Fetcher, HttpFetcher, DEFAULT_USER_AGENT};
use crate::validation::validate_channel_name;

/// Pages carry up to this many posts; the offset fallback assumes it.
const PAGE_SIZE: i64 = 20;

#[derive(Debug, Clone)]
struct Page {
    effective_url: Url,
    body: String,
}

/// Point-in-time extractor over one channel's public preview pages. Each
/// instance owns its fetch state; walk several channels concurrently by
/// running independent instances.
pub struct TelegramChannelScraper<F: Fetcher = HttpFetcher> {
    name: String,
    format: PostFormat,
    headers: HashMap<String, String>,
    fetcher: F,
    initial_page: OnceCell<Page>,
}

impl TelegramChannelScraper<HttpFetcher> {
    pub fn new(name: &str) -> Result<Self, ScraperError> {
        Self::with_fetcher(name, HttpFetcher::with_defaults()?)
    }
}

impl<F: Fetcher> TelegramChannelScraper<F> {
    /// Builds a scraper over a caller-supplied transport.
    pub fn with_fetcher(name: &str, fetcher: F) -> Result<Self, ScraperError> {
        validate_channel_name(name)?;
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());
        Ok(Self {
            name: name.to_string(),
            format: PostFormat::default(),
            headers,
            fetcher,
            initial_page: OnceCell::new(),
        })
    }

    /// Sets the body rendering mode, fixed for the scraper's lifetime.
    pub fn post_format(mut self, format: PostFormat) -> Self {
        self.format = format;
        self
    }

    /// Adds or replaces a request header sent on every fetch.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Walks the channel history backwards from the most recent page,
    /// yielding posts newest-first (message ids strictly decrease; reverse
    /// the collected walk for oldest-to-newest order). Consuming the
    /// iterator drives further page fetches on demand; a transport failure
    /// ends the walk with its error.
    pub fn posts(&self) -> Posts<'_, F> {
        Posts {
            scraper: self,
            parser: PostParser::new(self.format),
            buffer: Vec::new().into_iter(),
            next_url: None,
            last_page_url: String::new(),
            started: false,
            done: false,
        }
    }

    /// Fetches and parses the channel metadata. `Ok(None)` means the
    /// entity does not exist; it is not an error.
    pub fn channel_info(&self) -> Result<Option<Channel>, ScraperError> {
        let page = self.initial_page()?;
        let document = Html::parse_document(&page.body);
        Ok(ChannelInfoParser::new().parse(&document))
    }

    fn initial_page(&self) -> Result<&Page, ScraperError> {
        self.initial_page.get_or_try_init(|| {
            let url = format!("https://t.me/s/{}", self.name);
            let response = self.fetcher.fetch(&url, &self.headers)?;
            into_page(response)
        })
    }
}

fn into_page(response: FetchResponse) -> Result<Page, ScraperError> {
    if !(200..300).contains(&response.status) {
        return Err(ScraperError::Status {
            code: response.status,
            url: response.effective_url,
        });
    }
    Ok(Page {
        effective_url: Url::parse(&response.effective_url)?,
        body: response.body,
    })
}

/// Lazy, finite, forward-only walk over a channel's posts. One linear
/// backward traversal with no backtracking; dropping the iterator is the
/// only cancellation needed.
pub struct Posts<'a, F: Fetcher> {
    scraper: &'a TelegramChannelScraper<F>,
    parser: PostParser,
    buffer: std::vec::IntoIter<Post>,
    next_url: Option<Url>,
    /// Most recent page URL, for the offset-fallback arithmetic when a
    /// page lacks its "load more" control.
    last_page_url: String,
    started: bool,
    done: bool,
}

impl<F: Fetcher> Posts<'_, F> {
    /// Loads the next page into the buffer. `Ok(false)` means the walk is
    /// complete.
    fn advance(&mut self) -> Result<bool, ScraperError> {
        let page = if !self.started {
            self.started = true;
            let page = self.scraper.initial_page()?.clone();
            if !page.effective_url.as_str().contains("/s/") {
                // Redirected away from the preview listing: entity exists
                // but has no public post list.
                warn!("no public post list for {}", self.scraper.name);
                return Ok(false);
            }
            page
        } else {
            let Some(url) = self.next_url.take() else {
                return Ok(false);
            };
            let response = self.scraper.fetcher.fetch(url.as_str(), &self.scraper.headers)?;
            into_page(response)?
        };

        let document = Html::parse_document(&page.body);
        self.buffer = self
            .parser
            .parse_page(&document, &page.effective_url)
            .into_iter();
        self.next_url = self.next_page_url(&document, &page.effective_url)?;
        Ok(true)
    }

    /// Decides whether another (older) page exists and where it lives. The
    /// upstream pagination contract is inconsistent: the "more" link is
    /// sometimes absent even when older pages exist, in which case the next
    /// offset is inferred from the canonical URL's query parameter.
    fn next_page_url(
        &mut self,
        document: &Html,
        effective_url: &Url,
    ) -> Result<Option<Url>, ScraperError> {
        let root = document.root_element();

        // The page's first date anchor belongs to its oldest post; index 1
        // is the channel's first-ever post.
        if let Some(date_link) = root.select(&classes::DATE_LINK).next() {
            let index = date_link
                .value()
                .attr("href")
                .unwrap_or("")
                .rsplit('/')
                .next();
            if index == Some("1") {
                return Ok(None);
            }
        }

        let href = match root.select(&classes::MESSAGES_MORE).next() {
            Some(more) => match more.value().attr("href") {
                Some(href) => href.to_string(),
                None => return Ok(None),
            },
            None => {
                if !self.last_page_url.contains('=') {
                    let Some(canonical) = root
                        .select(&classes::CANONICAL_LINK)
                        .next()
                        .and_then(|link| link.value().attr("href"))
                    else {
                        warn!(
                            "page for {} has neither a more-link nor a canonical URL, \
                             stopping the walk",
                            self.scraper.name
                        );
                        return Ok(None);
                    };
                    self.last_page_url = canonical.to_string();
                }
                let Some((prefix, offset)) = self.last_page_url.rsplit_once('=') else {
                    return Ok(None);
                };
                let Ok(offset) = offset.parse::<i64>() else {
                    warn!("unparseable page offset in {:?}", self.last_page_url);
                    return Ok(None);
                };
                let next_offset = offset - PAGE_SIZE;
                if next_offset <= PAGE_SIZE {
                    return Ok(None);
                }
                format!("{prefix}={next_offset}")
            }
        };

        let next = effective_url.join(&href)?;
        self.last_page_url = next.to_string();
        Ok(Some(next))
    }
}

impl<F: Fetcher> Iterator for Posts<'_, F> {
    type Item = Result<Post, ScraperError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(post) = self.buffer.next() {
                return Some(Ok(post));
            }
            if self.done {
                return None;
            }
            match self.advance() {
                Ok(true) => continue,
                Ok(false) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

//! Scraper for the public web preview of Telegram channels.
//!
//! Walks a channel's paginated `t.me/s/<name>` history backwards from the
//! most recent page and turns each message fragment into a typed [`Post`],
//! without touching any private API. Channel metadata is available
//! separately through [`TelegramChannelScraper::channel_info`].
//!
//! ```no_run
//! use tgscrape::{PostFormat, TelegramChannelScraper};
//!
//! fn main() -> Result<(), tgscrape::ScraperError> {
//!     let scraper = TelegramChannelScraper::new("telegram")?
//!         .post_format(PostFormat::Text);
//!     for post in scraper.posts().take(40) {
//!         let post = post?;
//!         println!("{} {}", post.message_id, post.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod count;
pub mod error;
pub mod format;
pub mod model;
pub mod parser;
pub mod request;
mod validation;
mod walker;

pub use count::parse_abbreviated_count;
pub use error::ScraperError;
pub use format::PostFormat;
pub use model::{Channel, GranularValue, LinkPreview, Medium, Post};
pub use request::{FetchResponse, Fetcher, HttpFetcher};
pub use validation::validate_channel_name;
pub use walker::{Posts, TelegramChannelScraper};

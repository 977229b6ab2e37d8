use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ScraperError;

static CHANNEL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]{3,31}$").unwrap());

/// Telegram usernames start with a letter, use word characters only, and
/// run 4 to 32 characters.
pub fn validate_channel_name(name: &str) -> Result<(), ScraperError> {
    if CHANNEL_NAME.is_match(name) {
        Ok(())
    } else {
        Err(ScraperError::InvalidChannelName)
    }
}

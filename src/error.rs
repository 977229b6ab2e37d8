use thiserror::Error;

/// Fatal conditions surfaced to the caller. Recoverable parsing anomalies
/// are logged as warnings instead and never abort a walk.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// Network-level transport failure, distinct from a non-2xx status.
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// A page fetch came back with a non-success status code. Fatal to the
    /// walk in progress.
    #[error("got status code {code} fetching {url}")]
    Status { code: u16, url: String },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid channel name, must match ^[a-zA-Z][a-zA-Z0-9_]{{3,31}}$")]
    InvalidChannelName,
}

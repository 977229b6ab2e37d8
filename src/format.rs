use serde::{Deserialize, Serialize};

/// Rendering mode for the message body, fixed for the scraper's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostFormat {
    /// Plain text, block-separated.
    Text,
    /// A markdown-like rendition of the message markup.
    #[default]
    Markdown,
    /// The raw message markup.
    Html,
}

impl PostFormat {
    /// Resolves a configuration string. `"md"` aliases markdown; anything
    /// unrecognized degrades to [`PostFormat::Text`] rather than erroring.
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => PostFormat::Text,
            "html" => PostFormat::Html,
            "markdown" | "md" => PostFormat::Markdown,
            _ => PostFormat::Text,
        }
    }
}

mod channel;
mod post;

pub use channel::Channel;
pub use post::{LinkPreview, Medium, Post};

use serde::{Deserialize, Serialize};

/// A number rounded to the nearest `granularity`, as implied by an
/// abbreviated display count ("1.2K" is 1200 rounded to hundreds).
/// Granularity 1 means the value is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GranularValue {
    pub value: u64,
    pub granularity: u64,
}

impl GranularValue {
    pub fn exact(value: u64) -> Self {
        Self { value, granularity: 1 }
    }
}

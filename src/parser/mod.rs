//! Parsers mapping the CSS-class-addressed preview markup onto the typed
//! models. Missing fragments degrade to absent fields with a logged
//! warning; parsing never performs I/O.

mod base;
mod channel;
pub(crate) mod classes;
mod markdown;
mod media;
mod post;

pub use channel::ChannelInfoParser;
pub use post::PostParser;

//! Post retrieval and rendering for xprint.
//!
//! [`twitter`] fetches a post from the fxtwitter, vxtwitter and oEmbed sources
//! and normalizes whichever answers first into an [`Article`]. [`rich_text`]
//! renders long-form article bodies and [`document`] wraps the result in a
//! printable HTML page.
pub mod article;
pub mod document;
pub mod lenient;
pub mod markup;
pub mod rich_text;
pub mod twitter;

pub use article::{Article, Source};
pub use document::{DocumentOptions, build_html_document, format_timestamp};

//! Post retrieval from the fxtwitter, vxtwitter and oEmbed sources.
//!
//! [`status`] turns a post URL into a [`PostRef`], [`client`] fetches raw
//! payloads, [`adapters`] normalize them and [`resolve`] picks the winner.
pub mod adapters;
pub mod client;
pub mod resolve;
pub mod status;
pub mod types;

pub use client::{SourceEndpoints, TwitterSources};
pub use resolve::{
    PayloadFetcher, ResolveError, SourceFailure, resolve_article, resolve_article_concurrent,
};
pub use status::{PostRef, StatusRefError};

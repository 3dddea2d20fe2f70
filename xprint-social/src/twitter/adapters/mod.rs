//! Per-source payload normalization into [`Article`].
//!
//! Adapters never fail: a payload that does not carry what the source must
//! provide yields `None`, which the resolver records as an invalid payload.
use serde_json::Value;

use crate::article::{Article, Source};
use crate::twitter::status::PostRef;

mod fx;
mod oembed;
mod vx;

impl Source {
    /// Normalize a payload fetched from this source.
    pub fn normalize(self, payload: &Value, post: &PostRef) -> Option<Article> {
        let article = match self {
            Source::FxTwitter => fx::normalize(payload, post),
            Source::VxTwitter => vx::normalize(payload, post),
            Source::Oembed => oembed::normalize(payload, post),
        };
        if article.is_none() {
            tracing::debug!(source = %self, status_id = %post.status_id, "adapter.payload.rejected");
        }
        article
    }
}

/// Non-empty string, or `None`.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

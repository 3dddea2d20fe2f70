use serde_json::Value;

use super::present;
use crate::article::{Article, Source, fallback_title};
use crate::twitter::status::PostRef;
use crate::twitter::types::{OembedPayload, parse_payload};

pub(super) fn normalize(payload: &Value, post: &PostRef) -> Option<Article> {
    let oembed: OembedPayload = parse_payload(payload)?;
    // Embed markup is inserted verbatim.
    let html = oembed.html?;
    let author = present(oembed.author_name.as_deref());

    Some(Article {
        source: Source::Oembed,
        canonical_url: present(oembed.url.as_deref())
            .unwrap_or(&post.url)
            .to_string(),
        title: match author {
            Some(name) => format!("Post by {name}"),
            None => fallback_title(&post.status_id),
        },
        author_name: author.unwrap_or_default().to_string(),
        author_handle: String::new(),
        created_at: String::new(),
        lead_text: String::new(),
        cover_image_url: None,
        body_markup: format!(r#"<section class="oembed">{html}</section>"#),
    })
}

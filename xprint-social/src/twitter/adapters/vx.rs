use serde_json::Value;

use super::present;
use crate::article::{self, Article, Source};
use crate::markup::{escape_html, figure};
use crate::twitter::status::PostRef;
use crate::twitter::types::{VxPayload, parse_payload};

pub(super) fn normalize(payload: &Value, _post: &PostRef) -> Option<Article> {
    let vx: VxPayload = parse_payload(payload)?;
    let id = present(vx.tweet_id.as_deref())?;
    let long_form = vx.article.as_ref();

    let mut parts: Vec<String> = Vec::with_capacity(vx.media_urls.len() + 1);
    if let Some(preview) = present(long_form.and_then(|a| a.preview_text.as_deref())) {
        parts.push(format!("<p>{}</p>", escape_html(preview)));
    }
    parts.extend(vx.media_urls.iter().map(|url| figure(url, None)));

    Some(Article {
        source: Source::VxTwitter,
        canonical_url: vx.tweet_url.clone().unwrap_or_default(),
        title: article::title_or_fallback(long_form.and_then(|a| a.title.as_deref()), id),
        author_name: vx.user_name.clone().unwrap_or_default(),
        author_handle: article::handle(vx.user_screen_name.as_deref()),
        created_at: vx.date.clone().unwrap_or_default(),
        lead_text: vx.text.clone().unwrap_or_default(),
        cover_image_url: present(long_form.and_then(|a| a.image.as_deref())).map(str::to_string),
        body_markup: parts.join("\n"),
    })
}

use serde_json::Value;

use super::present;
use crate::article::{self, Article, Source};
use crate::rich_text::render_article_body;
use crate::twitter::status::PostRef;
use crate::twitter::types::{FxEnvelope, parse_payload};

pub(super) fn normalize(payload: &Value, post: &PostRef) -> Option<Article> {
    let envelope: FxEnvelope = parse_payload(payload)?;
    if envelope.code != 200 {
        return None;
    }
    let tweet = envelope.tweet?;
    let id = tweet.id.as_deref().unwrap_or(&post.status_id);
    let author = tweet.author.unwrap_or_default();
    let long_form = tweet.article.as_ref();

    let lead_text = present(tweet.text.as_deref())
        .or_else(|| tweet.raw_text.as_ref().and_then(|raw| present(raw.text.as_deref())))
        .unwrap_or_default()
        .trim()
        .to_string();
    let body_markup = long_form
        .map(|a| {
            let content = a.content.clone().unwrap_or_default();
            render_article_body(&content, &a.media_entities)
        })
        .unwrap_or_default();

    Some(Article {
        source: Source::FxTwitter,
        canonical_url: tweet.url.clone().unwrap_or_default(),
        title: article::title_or_fallback(long_form.and_then(|a| a.title.as_deref()), id),
        author_name: author.name.unwrap_or_default(),
        author_handle: article::handle(author.screen_name.as_deref()),
        created_at: tweet.created_at.clone().unwrap_or_default(),
        lead_text,
        cover_image_url: long_form
            .and_then(|a| a.cover_media.as_ref())
            .and_then(|m| m.best_url())
            .map(str::to_string),
        body_markup,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post() -> PostRef {
        PostRef::parse("https://x.com/jane/status/42").unwrap()
    }

    #[test]
    fn requires_code_200_and_a_tweet() {
        assert!(normalize(&json!({"code": 404, "tweet": {}}), &post()).is_none());
        assert!(normalize(&json!({"code": 200}), &post()).is_none());
        assert!(normalize(&json!("nope"), &post()).is_none());
    }

    #[test]
    fn plain_post_without_article() {
        let article = normalize(
            &json!({"code": 200, "tweet": {
                "id": "42",
                "url": "https://x.com/jane/status/42",
                "text": "",
                "raw_text": {"text": "  hello  "},
                "created_at": "Wed Oct 10 20:19:24 +0000 2018",
                "author": {"name": "Jane", "screen_name": "jane"}
            }}),
            &post(),
        )
        .unwrap();
        assert_eq!(article.source, Source::FxTwitter);
        assert_eq!(article.title, "Post 42");
        assert_eq!(article.author_handle, "@jane");
        assert_eq!(article.lead_text, "hello");
        assert_eq!(article.body_markup, "");
        assert_eq!(article.cover_image_url, None);
    }

    #[test]
    fn long_form_article_renders_body_and_cover() {
        let article = normalize(
            &json!({"code": 200, "tweet": {
                "id": 42,
                "text": "teaser",
                "article": {
                    "title": "Deep dive",
                    "cover_media": {"media_info": {"original_img_url": "https://img/cover.jpg"}},
                    "media_entities": [{"media_id": "m1", "media_info": {"original_img_url": "https://img/m1.jpg"}}],
                    "content": {
                        "blocks": [
                            {"type": "header-one", "text": "Intro"},
                            {"type": "atomic", "entityRanges": [{"key": "0"}]}
                        ],
                        "entityMap": [{"key": "0", "value": {"type": "MEDIA", "data": {"mediaItems": [{"mediaId": "m1"}]}}}]
                    }
                }
            }}),
            &post(),
        )
        .unwrap();
        assert_eq!(article.title, "Deep dive");
        assert_eq!(article.cover_image_url.as_deref(), Some("https://img/cover.jpg"));
        assert!(article.body_markup.starts_with("<h1>Intro</h1>\n<figure>"));
        assert!(!article.body_markup.contains("<h2>Media</h2>"));
    }

    #[test]
    fn missing_id_uses_the_status_reference() {
        let article = normalize(&json!({"code": 200, "tweet": {"article": {"title": ""}}}), &post()).unwrap();
        assert_eq!(article.title, "Post 42");
        assert_eq!(article.author_name, "");
        assert_eq!(article.author_handle, "");
    }
}

//! Payload shapes for the three post sources.
//!
//! Every field is optional and leniently typed; adapters decide what is
//! required. Use [`parse_payload`] so non-object payloads never reach serde.
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::lenient;
use crate::rich_text::{MediaRecord, RichTextContent};

/// Deserialize an object payload; anything else (or a broken object) is `None`.
pub fn parse_payload<T: DeserializeOwned>(payload: &Value) -> Option<T> {
    if !payload.is_object() {
        return None;
    }
    T::deserialize(payload).ok()
}

// fxtwitter: GET /status/{id}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FxEnvelope {
    #[serde(default, deserialize_with = "lenient::int")]
    pub code: i64,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub tweet: Option<FxTweet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FxTweet {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub raw_text: Option<FxRawText>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub author: Option<FxAuthor>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub article: Option<FxArticle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FxRawText {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FxAuthor {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub screen_name: Option<String>,
}

/// Long-form article attached to a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FxArticle {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub preview_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub cover_media: Option<MediaRecord>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub media_entities: Vec<MediaRecord>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub content: Option<RichTextContent>,
}

// vxtwitter: GET /status/{id}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VxPayload {
    #[serde(rename = "tweetID", default, deserialize_with = "lenient::opt_id")]
    pub tweet_id: Option<String>,
    #[serde(rename = "tweetURL", default, deserialize_with = "lenient::opt_string")]
    pub tweet_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub user_screen_name: Option<String>,
    #[serde(rename = "mediaURLs", default, deserialize_with = "lenient::strings")]
    pub media_urls: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub article: Option<VxArticle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VxArticle {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub preview_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub image: Option<String>,
}

// publish.twitter.com: GET /oembed?url=...

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OembedPayload {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub html: Option<String>,
}

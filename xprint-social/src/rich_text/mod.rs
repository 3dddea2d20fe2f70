//! Block-based rich text (the editor document embedded in long-form posts).
//!
//! A document is an ordered list of [`TextBlock`]s plus an entity map. Blocks
//! carry inline style ranges and, for `atomic` blocks, references into the
//! entity map. [`blocks::render_article_body`] turns a document and the
//! article's media list into an HTML fragment.
use serde::Deserialize;
use serde_json::Value;

use crate::lenient;

pub mod blocks;
pub mod entity_map;
pub mod media;
pub mod style;

pub use blocks::{render_article_body, render_blocks, render_leftover_media};
pub use entity_map::{Entity, EntityMap};
pub use media::{ConsumedMedia, MediaLibrary, MediaRecord};
pub use style::render_styled_text;

/// Structural role of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlockKind {
    #[default]
    Paragraph,
    HeaderOne,
    HeaderTwo,
    UnorderedListItem,
    OrderedListItem,
    Atomic,
    /// Any other type; rendered like a paragraph.
    Other(String),
}

impl BlockKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "paragraph" | "unstyled" | "" => BlockKind::Paragraph,
            "header-one" => BlockKind::HeaderOne,
            "header-two" => BlockKind::HeaderTwo,
            "unordered-list-item" => BlockKind::UnorderedListItem,
            "ordered-list-item" => BlockKind::OrderedListItem,
            "atomic" => BlockKind::Atomic,
            other => BlockKind::Other(other.to_string()),
        }
    }

    fn deserialize_lenient<'de, D>(d: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::parse(&lenient::string(d)?))
    }
}

/// Half-open interval of UTF-16 code units carrying an inline style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StyleRange {
    #[serde(default, deserialize_with = "lenient::int")]
    pub offset: i64,
    #[serde(default, deserialize_with = "lenient::int")]
    pub length: i64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub style: String,
}

impl StyleRange {
    pub fn is_bold(&self) -> bool {
        self.style.eq_ignore_ascii_case("bold")
    }
}

/// Reference from an atomic block into the entity map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntityRef {
    #[serde(default, deserialize_with = "lenient::string")]
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TextBlock {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "BlockKind::deserialize_lenient"
    )]
    pub kind: BlockKind,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,
    #[serde(
        rename = "inlineStyleRanges",
        alias = "styleRanges",
        default,
        deserialize_with = "lenient::records"
    )]
    pub style_ranges: Vec<StyleRange>,
    #[serde(
        rename = "entityRanges",
        default,
        deserialize_with = "lenient::records"
    )]
    pub entity_ranges: Vec<EntityRef>,
}

/// The editor document: blocks plus the raw entity map (any of its forms).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RichTextContent {
    #[serde(default, deserialize_with = "lenient::records")]
    pub blocks: Vec<TextBlock>,
    #[serde(rename = "entityMap", default)]
    pub entity_map: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_block_with_aliases_and_odd_fields() {
        let block: TextBlock = serde_json::from_value(json!({
            "type": "header-two",
            "text": "Title",
            "styleRanges": [{"offset": 0, "length": 5, "style": "BOLD"}, "junk"],
            "entityRanges": [{"key": 3, "offset": 0, "length": 1}]
        }))
        .unwrap();
        assert_eq!(block.kind, BlockKind::HeaderTwo);
        assert_eq!(block.style_ranges.len(), 1);
        assert!(block.style_ranges[0].is_bold());
        assert_eq!(block.entity_ranges[0].key, "3");
    }

    #[test]
    fn unknown_types_are_kept_for_diagnostics() {
        assert_eq!(
            BlockKind::parse("header-three"),
            BlockKind::Other("header-three".into())
        );
        assert_eq!(BlockKind::parse("unstyled"), BlockKind::Paragraph);
    }

    #[test]
    fn content_drops_malformed_blocks() {
        let content: RichTextContent = serde_json::from_value(json!({
            "blocks": [{"type": "atomic", "text": " "}, 5, null],
            "entityMap": {"0": {"type": "LINK", "data": {"url": "https://e.com"}}}
        }))
        .unwrap();
        assert_eq!(content.blocks.len(), 1);
        assert!(content.entity_map.is_object());
    }
}

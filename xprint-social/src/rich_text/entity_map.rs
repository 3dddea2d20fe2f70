//! Entity map normalization and the typed entity union.
//!
//! Sources ship the entity map in three shapes: an array of `{key, value}`
//! pairs, a plain array whose index is the key, or an object keyed by name.
//! [`EntityMap::normalize`] folds all of them into one lookup table.
use std::collections::HashMap;

use serde_json::Value;

use crate::lenient::{number_string, scalar_id, str_field};

/// Id fields checked, in order, on the first entry of a media entity's `mediaItems`.
pub const MEDIA_ITEM_ID_FIELDS: [&str; 4] = ["mediaId", "media_id", "id", "localMediaId"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaEntity {
    /// Every alias id found on the first media item, in lookup order.
    pub media_ids: Vec<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkUrl {
    pub url: Option<String>,
    pub expanded_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkEntity {
    pub url: Option<String>,
    pub urls: Vec<LinkUrl>,
}

impl LinkEntity {
    /// `url`, else the first `urls` entry's `url`, else its `expanded_url`.
    pub fn href(&self) -> Option<&str> {
        let first = self.urls.first();
        self.url
            .as_deref()
            .or_else(|| first.and_then(|u| u.url.as_deref()))
            .or_else(|| first.and_then(|u| u.expanded_url.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Media(MediaEntity),
    Markdown(String),
    Link(LinkEntity),
    /// Unsupported kind, kept with its raw type name.
    Other(String),
}

impl Entity {
    /// Interpret one entity object. Missing data yields empty fields.
    pub fn from_value(value: &Value) -> Entity {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
        let data = value.get("data").unwrap_or(&Value::Null);
        match kind.to_ascii_uppercase().as_str() {
            "MEDIA" => Entity::Media(media_entity(data)),
            "MARKDOWN" => Entity::Markdown(
                data.get("markdown")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            ),
            "LINK" => Entity::Link(link_entity(data)),
            _ => Entity::Other(kind.to_string()),
        }
    }
}

fn media_entity(data: &Value) -> MediaEntity {
    let first = data
        .get("mediaItems")
        .and_then(Value::as_array)
        .and_then(|items| items.first());
    let media_ids = first
        .map(|item| {
            MEDIA_ITEM_ID_FIELDS
                .iter()
                .filter_map(|field| item.get(*field).and_then(scalar_id))
                .collect()
        })
        .unwrap_or_default();
    MediaEntity {
        media_ids,
        caption: str_field(data, "caption").map(str::to_string),
    }
}

fn link_entity(data: &Value) -> LinkEntity {
    let urls = data
        .get("urls")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| LinkUrl {
                    url: str_field(item, "url").map(str::to_string),
                    expanded_url: str_field(item, "expanded_url").map(str::to_string),
                })
                .collect()
        })
        .unwrap_or_default();
    LinkEntity {
        url: str_field(data, "url").map(str::to_string),
        urls,
    }
}

/// String key to entity, independent of the source representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMap(HashMap<String, Entity>);

impl EntityMap {
    pub fn normalize(raw: &Value) -> EntityMap {
        let mut map = HashMap::new();
        let mut insert = |key: String, value: &Value| {
            if value.is_object() {
                map.insert(key, Entity::from_value(value));
            }
        };
        match raw {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    match (item.get("key"), item.get("value")) {
                        (Some(key), Some(value)) => insert(key_string(key), value),
                        _ => insert(index.to_string(), item),
                    }
                }
            }
            Value::Object(entries) => {
                for (name, value) in entries {
                    insert(name.clone(), value);
                }
            }
            _ => {}
        }
        EntityMap(map)
    }

    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn key_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Number(n) => number_string(n),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn media(id: &str) -> Value {
        json!({"type": "MEDIA", "data": {"mediaItems": [{"mediaId": id}], "caption": "cap"}})
    }

    #[test]
    fn all_three_shapes_normalize_to_the_same_map() {
        let link = json!({"type": "LINK", "data": {"url": "https://e.com"}});
        let pairs = json!([
            {"key": "0", "value": media("m1")},
            {"key": 1, "value": link.clone()}
        ]);
        let plain = json!([media("m1"), link.clone()]);
        let keyed = json!({"0": media("m1"), "1": link});

        let a = EntityMap::normalize(&pairs);
        let b = EntityMap::normalize(&plain);
        let c = EntityMap::normalize(&keyed);
        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn numeric_pair_keys_ignore_a_zero_fraction() {
        let map = EntityMap::normalize(&json!([
            {"key": 1.0, "value": {"type": "MARKDOWN", "data": {"markdown": "a"}}},
            {"key": 2.5, "value": {"type": "MARKDOWN", "data": {"markdown": "b"}}}
        ]));
        assert_eq!(map.get("1"), Some(&Entity::Markdown("a".into())));
        assert_eq!(map.get("2.5"), Some(&Entity::Markdown("b".into())));
    }

    #[test]
    fn non_collections_and_scalar_entries_are_ignored() {
        assert!(EntityMap::normalize(&Value::Null).is_empty());
        assert!(EntityMap::normalize(&json!("x")).is_empty());
        let map = EntityMap::normalize(&json!({"a": 1, "b": null, "c": {"type": "MARKDOWN"}}));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("c"), Some(&Entity::Markdown(String::new())));
    }

    #[test]
    fn media_ids_collect_every_alias_in_order() {
        let entity = Entity::from_value(&json!({
            "type": "media",
            "data": {"mediaItems": [{"localMediaId": 9, "id": "b", "mediaId": "a"}, {"mediaId": "z"}]}
        }));
        let Entity::Media(media) = entity else {
            panic!("expected media entity");
        };
        assert_eq!(media.media_ids, vec!["a", "b", "9"]);
        assert_eq!(media.caption, None);
    }

    #[test]
    fn link_href_falls_back_through_urls() {
        let link = |data: Value| match Entity::from_value(&json!({"type": "LINK", "data": data})) {
            Entity::Link(l) => l.href().map(str::to_string),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(link(json!({"url": "a"})).as_deref(), Some("a"));
        assert_eq!(link(json!({"urls": [{"url": "b"}]})).as_deref(), Some("b"));
        assert_eq!(
            link(json!({"url": "", "urls": [{"expanded_url": "c"}]})).as_deref(),
            Some("c")
        );
        assert_eq!(link(json!({})), None);
    }

    #[test]
    fn unknown_kinds_keep_their_name() {
        assert_eq!(
            Entity::from_value(&json!({"type": "TWEMOJI"})),
            Entity::Other("TWEMOJI".into())
        );
    }
}

//! Media records, best-URL selection and per-render consumption tracking.
use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::lenient;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaVariant {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
    #[serde(default, alias = "bitrate", deserialize_with = "lenient::opt_f64")]
    pub bit_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaInfo {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub original_img_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub variants: Vec<MediaVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaRecord {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub media_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub media_key: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub media_info: Option<MediaInfo>,
}

impl MediaRecord {
    /// Present alias ids in `media_id`, `id`, `media_key` order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        [&self.media_id, &self.id, &self.media_key]
            .into_iter()
            .filter_map(|id| id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// The id used for consumption tracking.
    pub fn identity(&self) -> Option<&str> {
        self.ids().next()
    }

    fn original_image(&self) -> Option<&str> {
        self.media_info
            .as_ref()
            .and_then(|info| info.original_img_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Original image, else the highest bit-rate variant with a URL.
    pub fn best_url(&self) -> Option<&str> {
        if let Some(url) = self.original_image() {
            return Some(url);
        }
        let info = self.media_info.as_ref()?;
        let mut ranked: Vec<(&str, f64)> = info
            .variants
            .iter()
            .filter_map(|v| {
                let url = v.url.as_deref().filter(|u| !u.is_empty())?;
                Some((url, v.bit_rate.unwrap_or(0.0)))
            })
            .collect();
        // sort_by is stable, so equal rates keep source order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.first().map(|(url, _)| *url)
    }
}

/// Identities already placed in the current render.
#[derive(Debug, Clone, Default)]
pub struct ConsumedMedia(HashSet<String>);

impl ConsumedMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, record: &MediaRecord) {
        if let Some(id) = record.identity() {
            self.0.insert(id.to_string());
        }
    }

    pub fn is_consumed(&self, record: &MediaRecord) -> bool {
        record
            .identity()
            .is_some_and(|id| self.0.contains(id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Read-only view over an article's media list.
#[derive(Debug)]
pub struct MediaLibrary<'a> {
    records: &'a [MediaRecord],
    by_id: HashMap<&'a str, usize>,
}

impl<'a> MediaLibrary<'a> {
    pub fn new(records: &'a [MediaRecord]) -> Self {
        let mut by_id = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            for id in record.ids() {
                by_id.entry(id).or_insert(index);
            }
        }
        Self { records, by_id }
    }

    /// First candidate id that names a known record.
    pub fn lookup(&self, candidate_ids: &[String]) -> Option<&'a MediaRecord> {
        candidate_ids
            .iter()
            .find_map(|id| self.by_id.get(id.as_str()))
            .map(|&index| &self.records[index])
    }

    /// First record with an identity that has not been placed yet.
    pub fn first_unconsumed(&self, consumed: &ConsumedMedia) -> Option<&'a MediaRecord> {
        self.records
            .iter()
            .find(|r| r.identity().is_some() && !consumed.is_consumed(r))
    }

    /// Records never placed, in original order.
    pub fn leftovers(&self, consumed: &ConsumedMedia) -> Vec<&'a MediaRecord> {
        self.records
            .iter()
            .filter(|r| !consumed.is_consumed(r))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//! Status URL parsing.
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use url::Url;

static STATUS_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)status/(\d+)").expect("status id pattern"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusRefError {
    #[error("invalid URL {0:?}; expected something like https://x.com/user/status/1234567890")]
    InvalidUrl(String),
    #[error("no status id found in URL {0}")]
    MissingStatusId(String),
}

/// A post reference: the numeric status id and the URL it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRef {
    pub status_id: String,
    pub url: String,
}

impl PostRef {
    pub fn parse(input: &str) -> Result<Self, StatusRefError> {
        let input = input.trim();
        let url = Url::parse(input).map_err(|_| StatusRefError::InvalidUrl(input.to_string()))?;
        let status_id = STATUS_ID
            .captures(url.path())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| StatusRefError::MissingStatusId(input.to_string()))?;
        Ok(Self {
            status_id,
            url: input.to_string(),
        })
    }
}

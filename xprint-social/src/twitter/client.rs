//! HTTP access to the three post sources.
//!
//! Each source gets its own [`HttpClient`] so base URLs can point anywhere
//! (a mirror, a local mock) while timeouts, retries and the user agent stay shared.
use std::borrow::Cow;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use xprint_http::{HttpClient, HttpError, RequestOpts};

use crate::article::Source;
use crate::twitter::resolve::PayloadFetcher;
use crate::twitter::status::PostRef;

/// Base URLs of the source APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEndpoints {
    pub fxtwitter: String,
    pub vxtwitter: String,
    pub oembed: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            fxtwitter: "https://api.fxtwitter.com".into(),
            vxtwitter: "https://api.vxtwitter.com".into(),
            oembed: "https://publish.twitter.com".into(),
        }
    }
}

#[derive(Clone)]
pub struct TwitterSources {
    fx: HttpClient,
    vx: HttpClient,
    oembed: HttpClient,
}

impl TwitterSources {
    pub fn new(endpoints: &SourceEndpoints) -> Result<Self, HttpError> {
        Ok(Self {
            fx: HttpClient::new(&endpoints.fxtwitter)?,
            vx: HttpClient::new(&endpoints.vxtwitter)?,
            oembed: HttpClient::new(&endpoints.oembed)?,
        })
    }

    fn map_clients(self, f: impl Fn(HttpClient) -> HttpClient) -> Self {
        Self {
            fx: f(self.fx),
            vx: f(self.vx),
            oembed: f(self.oembed),
        }
    }

    fn try_map_clients(
        self,
        f: impl Fn(HttpClient) -> Result<HttpClient, HttpError>,
    ) -> Result<Self, HttpError> {
        Ok(Self {
            fx: f(self.fx)?,
            vx: f(self.vx)?,
            oembed: f(self.oembed)?,
        })
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.map_clients(|c| c.with_timeout(timeout))
    }

    pub fn with_retries(self, retries: usize) -> Self {
        self.map_clients(|c| c.with_retries(retries))
    }

    pub fn with_backoff(self, backoff: Duration) -> Self {
        self.map_clients(|c| c.with_backoff(backoff))
    }

    pub fn with_user_agent(self, agent: &str) -> Result<Self, HttpError> {
        self.try_map_clients(|c| c.with_user_agent(agent))
    }

    pub fn client(&self, source: Source) -> &HttpClient {
        match source {
            Source::FxTwitter => &self.fx,
            Source::VxTwitter => &self.vx,
            Source::Oembed => &self.oembed,
        }
    }
}

#[async_trait]
impl PayloadFetcher for TwitterSources {
    async fn fetch(&self, source: Source, post: &PostRef) -> Result<Value> {
        let client = self.client(source);
        let payload: Value = match source {
            Source::FxTwitter | Source::VxTwitter => {
                let path = format!("status/{}", post.status_id);
                client.get_json(&path, RequestOpts::default()).await?
            }
            Source::Oembed => {
                let opts = RequestOpts {
                    query: Some(vec![("url", Cow::Borrowed(post.url.as_str()))]),
                    ..Default::default()
                };
                client.get_json("oembed", opts).await?
            }
        };
        tracing::debug!(%source, status_id = %post.status_id, "sources.fetch.ok");
        Ok(payload)
    }
}

//! Source selection: try each source in priority order, keep the first usable article.
use std::fmt;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;
use thiserror::Error;

use crate::article::{Article, Source};
use crate::twitter::status::PostRef;

/// Retrieval seam: fetch the raw payload one source holds for a post.
#[async_trait]
pub trait PayloadFetcher: Send + Sync {
    async fn fetch(&self, source: Source, post: &PostRef) -> anyhow::Result<Value>;
}

/// Why one source did not produce an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: Source,
    pub reason: String,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unable to retrieve post data. Details: {}", join_failures(.failures))]
    Exhausted { failures: Vec<SourceFailure> },
}

fn join_failures(failures: &[SourceFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Accept or reject one fetch outcome.
fn evaluate(
    source: Source,
    post: &PostRef,
    fetched: anyhow::Result<Value>,
) -> Result<Article, SourceFailure> {
    let reason = match fetched {
        Ok(payload) => match source.normalize(&payload, post) {
            Some(article) => return Ok(article),
            None => "invalid payload".to_string(),
        },
        Err(err) => format!("{err:#}"),
    };
    tracing::warn!(%source, status_id = %post.status_id, %reason, "resolve.source.failed");
    Err(SourceFailure { source, reason })
}

/// Try sources one at a time, stopping at the first that yields an article.
pub async fn resolve_article(
    post: &PostRef,
    fetcher: &dyn PayloadFetcher,
) -> Result<Article, ResolveError> {
    let mut failures = Vec::new();
    for source in Source::PRIORITY {
        tracing::debug!(%source, status_id = %post.status_id, "resolve.source.try");
        match evaluate(source, post, fetcher.fetch(source, post).await) {
            Ok(article) => {
                tracing::info!(%source, status_id = %post.status_id, "resolve.source.accepted");
                return Ok(article);
            }
            Err(failure) => failures.push(failure),
        }
    }
    Err(ResolveError::Exhausted { failures })
}

/// Fetch every source at once; acceptance still follows priority order.
pub async fn resolve_article_concurrent(
    post: &PostRef,
    fetcher: &dyn PayloadFetcher,
) -> Result<Article, ResolveError> {
    let fetched = join_all(
        Source::PRIORITY
            .iter()
            .map(|&source| fetcher.fetch(source, post)),
    )
    .await;

    let mut failures = Vec::new();
    for (source, outcome) in Source::PRIORITY.into_iter().zip(fetched) {
        match evaluate(source, post, outcome) {
            Ok(article) => {
                tracing::info!(%source, status_id = %post.status_id, concurrent = true, "resolve.source.accepted");
                return Ok(article);
            }
            Err(failure) => failures.push(failure),
        }
    }
    Err(ResolveError::Exhausted { failures })
}

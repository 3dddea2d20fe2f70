//! Wiring from configuration to a written document.
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use xprint_common::OutputFormat;
use xprint_config::XprintConfig;
use xprint_drivers::PdfPrinter;
use xprint_social::twitter::{
    PayloadFetcher, PostRef, SourceEndpoints, TwitterSources, resolve_article,
    resolve_article_concurrent,
};
use xprint_social::{DocumentOptions, build_html_document};

/// `x-<id>.<ext>` in the working directory.
pub fn default_output(status_id: &str, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("x-{status_id}.{}", format.extension()))
}

pub fn output_path(explicit: Option<PathBuf>, status_id: &str, format: OutputFormat) -> PathBuf {
    explicit.unwrap_or_else(|| default_output(status_id, format))
}

/// Source clients configured from the `http` and `sources` sections.
pub fn build_sources(cfg: &XprintConfig) -> Result<TwitterSources> {
    let endpoints = SourceEndpoints {
        fxtwitter: cfg.sources.fxtwitter.clone(),
        vxtwitter: cfg.sources.vxtwitter.clone(),
        oembed: cfg.sources.oembed.clone(),
    };
    let sources = TwitterSources::new(&endpoints)
        .context("invalid source endpoint")?
        .with_timeout(Duration::from_secs(cfg.http.timeout_secs))
        .with_retries(cfg.http.retries)
        .with_backoff(Duration::from_millis(cfg.http.backoff_ms))
        .with_user_agent(&cfg.http.user_agent)?;
    Ok(sources)
}

/// Resolve the post and assemble its HTML document.
pub async fn render_document(
    post: &PostRef,
    fetcher: &dyn PayloadFetcher,
    options: &DocumentOptions,
    concurrent: bool,
) -> Result<String> {
    let article = if concurrent {
        resolve_article_concurrent(post, fetcher).await?
    } else {
        resolve_article(post, fetcher).await?
    };
    tracing::info!(
        source = %article.source,
        title = %article.title,
        body_bytes = article.body_markup.len(),
        "pipeline.article.resolved"
    );
    Ok(build_html_document(&article, &post.url, options))
}

/// Write `html` as-is or print it, creating parent directories first.
pub async fn write_output(
    html: &str,
    output: &Path,
    format: OutputFormat,
    printer: Option<&dyn PdfPrinter>,
) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    match format {
        OutputFormat::Html => tokio::fs::write(output, html)
            .await
            .with_context(|| format!("failed to write {}", output.display()))?,
        OutputFormat::Pdf => {
            let printer = printer.context("no PDF printer available")?;
            printer.print(html, output).await?;
        }
    }
    tracing::info!(output = %output.display(), ?format, "pipeline.output.written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use xprint_social::Source;

    struct VxOnly;

    #[async_trait]
    impl PayloadFetcher for VxOnly {
        async fn fetch(&self, source: Source, post: &PostRef) -> Result<Value> {
            match source {
                Source::VxTwitter => Ok(json!({
                    "tweetID": post.status_id.clone(),
                    "user_name": "Jane",
                    "text": "hello"
                })),
                _ => anyhow::bail!("HTTP 500"),
            }
        }
    }

    #[derive(Default)]
    struct RecordingPrinter {
        printed: Mutex<Vec<(usize, PathBuf)>>,
    }

    #[async_trait]
    impl PdfPrinter for RecordingPrinter {
        async fn print(&self, html: &str, output: &Path) -> xprint_common::Result<()> {
            self.printed
                .lock()
                .unwrap()
                .push((html.len(), output.to_path_buf()));
            Ok(())
        }
    }

    #[test]
    fn default_names_follow_status_id_and_format() {
        assert_eq!(default_output("123", OutputFormat::Pdf), PathBuf::from("x-123.pdf"));
        assert_eq!(default_output("123", OutputFormat::Html), PathBuf::from("x-123.html"));
        assert_eq!(
            output_path(Some("out/a.pdf".into()), "123", OutputFormat::Pdf),
            PathBuf::from("out/a.pdf")
        );
    }

    #[test]
    fn sources_follow_config() {
        let cfg = XprintConfig::default();
        let sources = build_sources(&cfg).unwrap();
        let fx = sources.client(Source::FxTwitter);
        assert_eq!(fx.max_retries, cfg.http.retries);
        assert_eq!(fx.default_timeout, Duration::from_secs(cfg.http.timeout_secs));
    }

    #[tokio::test]
    async fn renders_and_writes_html_into_new_directories() {
        let post = PostRef::parse("https://x.com/jane/status/42").unwrap();
        let html = render_document(&post, &VxOnly, &DocumentOptions::default(), false)
            .await
            .unwrap();
        assert!(html.contains("<title>Post 42</title>"));
        assert!(html.contains("Source: vxtwitter"));

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/deeper/x-42.html");
        write_output(&html, &output, OutputFormat::Html, None).await.unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), html);
    }

    #[tokio::test]
    async fn document_section_shapes_the_page() {
        let cfg = xprint_config::XprintConfigLoader::new()
            .with_yaml_str("document:\n  lang: fr\n  unknown_author: Anonyme\n")
            .load()
            .unwrap();
        let post = PostRef::parse("https://x.com/i/status/42").unwrap();
        let html = render_document(&post, &VxOnly, &cfg.document, false)
            .await
            .unwrap();
        assert!(html.contains(r#"<html lang="fr">"#));
        assert!(html.contains("<p>Jane</p>"));
    }

    #[tokio::test]
    async fn pdf_output_goes_through_the_printer() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out/x-1.pdf");
        let printer = RecordingPrinter::default();
        write_output("<p>x</p>", &output, OutputFormat::Pdf, Some(&printer))
            .await
            .unwrap();
        assert_eq!(*printer.printed.lock().unwrap(), vec![(8, output.clone())]);
        assert!(output.parent().unwrap().is_dir());
    }

    #[tokio::test]
    async fn pdf_without_printer_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_output("x", &dir.path().join("a.pdf"), OutputFormat::Pdf, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no PDF printer"));
    }
}

//! Printable HTML page around a rendered [`Article`].
use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::article::Article;
use crate::markup::escape_html;

/// Twitter's legacy `created_at` layout, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Value of the `lang` attribute on `<html>`.
    pub lang: String,
    /// `chrono` strftime pattern applied to the UTC timestamp.
    pub date_format: String,
    pub unknown_author: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            lang: "en".into(),
            date_format: "%-d %B %Y, %H:%M UTC".into(),
            unknown_author: "Unknown author".into(),
        }
    }
}

/// Render `raw` in UTC with `fmt`, or return it untouched when unparseable.
pub fn format_timestamp(raw: &str, fmt: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_rfc2822(trimmed))
        .or_else(|_| DateTime::parse_from_str(trimmed, TWITTER_DATE_FORMAT));
    match parsed {
        Ok(ts) => {
            let utc: DateTime<Utc> = ts.with_timezone(&Utc);
            let mut out = String::new();
            // chrono reports an invalid pattern as a fmt error.
            match write!(out, "{}", utc.format(fmt)) {
                Ok(()) => out,
                Err(_) => raw.to_string(),
            }
        }
        Err(_) => raw.to_string(),
    }
}

/// Complete standalone HTML page for `article`.
///
/// `original_url` stands in for the canonical link when the source gave none.
pub fn build_html_document(article: &Article, original_url: &str, opts: &DocumentOptions) -> String {
    let title = if article.title.trim().is_empty() {
        "Post".to_string()
    } else {
        escape_html(&article.title)
    };
    let canonical = if article.canonical_url.is_empty() {
        original_url
    } else {
        article.canonical_url.as_str()
    };
    let author_line = [article.author_name.as_str(), article.author_handle.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let author_line = if author_line.is_empty() {
        opts.unknown_author.clone()
    } else {
        author_line
    };

    let created = format_timestamp(&article.created_at, &opts.date_format);
    let created = if created.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", escape_html(&created))
    };
    let lead = if article.lead_text.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="lead">{}</p>"#, escape_html(&article.lead_text))
    };
    let cover = article
        .cover_image_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| {
            format!(
                r#"<figure class="cover"><img src="{}" alt="cover" loading="eager" /></figure>"#,
                escape_html(url)
            )
        })
        .unwrap_or_default();
    let canonical = escape_html(canonical);

    format!(
        r#"<!doctype html>
<html lang="{lang}">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <style>{css}</style>
</head>
<body>
  <main>
    <section class="meta">
      <h1>{title}</h1>
      <p>{author}</p>
      <div class="row">
        {created}
        <p>Source: {source}</p>
      </div>
      <div class="row">
        <a href="{canonical}" target="_blank" rel="noopener noreferrer">{canonical}</a>
      </div>
    </section>
    {lead}
    {cover}
    {body}
  </main>
</body>
</html>
"#,
        lang = escape_html(&opts.lang),
        css = STYLESHEET,
        author = escape_html(&author_line),
        source = article.source.label(),
        body = article.body_markup,
    )
}

const STYLESHEET: &str = r#"
    @page { size: A4; margin: 12mm 10mm; }
    :root { --text: #111827; --muted: #4b5563; --line: #d1d5db; --panel: #f8fafc; }
    * { box-sizing: border-box; }
    body {
      margin: 0;
      font-family: "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
      color: var(--text);
      line-height: 1.6;
      font-size: 14px;
      -webkit-print-color-adjust: exact;
      print-color-adjust: exact;
    }
    main { max-width: 820px; margin: 0 auto; padding: 28px; }
    .meta {
      background: var(--panel);
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 14px 16px;
      margin-bottom: 24px;
      break-inside: avoid;
    }
    .meta h1 { font-size: 1.6rem; line-height: 1.3; margin: 0 0 10px 0; word-break: break-word; }
    .meta p { margin: 0; color: var(--muted); font-size: 0.95rem; }
    .meta .row { margin-top: 8px; display: flex; flex-wrap: wrap; gap: 10px; }
    .meta a { color: #0b65d8; text-decoration: none; word-break: break-all; }
    .lead { font-size: 1rem; margin-bottom: 18px; white-space: pre-wrap; }
    h1 { font-size: 1.5rem; margin: 1.1em 0 0.45em 0; line-height: 1.3; }
    h2 { font-size: 1.15rem; margin: 1.05em 0 0.42em 0; line-height: 1.35; }
    p { margin: 0.5em 0; white-space: pre-wrap; word-break: break-word; }
    ul, ol { margin: 0.5em 0 0.9em 1.3em; padding: 0; }
    li { margin: 0.22em 0; }
    figure {
      margin: 14px 0;
      border: 1px solid var(--line);
      border-radius: 10px;
      overflow: hidden;
      break-inside: avoid;
    }
    figure.cover { margin-top: 0; }
    img { display: block; width: 100%; height: auto; }
    figcaption {
      font-size: 0.86rem;
      color: var(--muted);
      padding: 10px 12px;
      border-top: 1px solid var(--line);
    }
    pre {
      border-radius: 10px;
      padding: 12px;
      background: #0b1020;
      color: #e5e7eb;
      white-space: pre-wrap;
      word-break: break-word;
      break-inside: avoid;
    }
    .oembed { margin-top: 6px; }
    .twitter-tweet { break-inside: avoid; }
    @media print {
      main { padding: 0; }
      a { color: inherit; }
    }
  "#;

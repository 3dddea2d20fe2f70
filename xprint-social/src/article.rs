//! The canonical, source-independent article record.
use serde::Serialize;
use std::fmt;

/// Which upstream produced an [`Article`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    FxTwitter,
    VxTwitter,
    Oembed,
}

impl Source {
    /// Order in which sources are tried.
    pub const PRIORITY: [Source; 3] = [Source::FxTwitter, Source::VxTwitter, Source::Oembed];

    pub fn label(self) -> &'static str {
        match self {
            Source::FxTwitter => "fxtwitter",
            Source::VxTwitter => "vxtwitter",
            Source::Oembed => "oembed",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A post normalized from whichever source answered first.
///
/// `title` is never empty and `body_markup` is a well-formed HTML fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub source: Source,
    pub canonical_url: String,
    pub title: String,
    pub author_name: String,
    pub author_handle: String,
    /// Timestamp exactly as the source reported it.
    pub created_at: String,
    pub lead_text: String,
    pub cover_image_url: Option<String>,
    pub body_markup: String,
}

/// Title used when a source carries none.
pub(crate) fn fallback_title(id: &str) -> String {
    format!("Post {id}")
}

/// `@handle`, or empty when the handle is missing.
pub(crate) fn handle(screen_name: Option<&str>) -> String {
    match screen_name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => format!("@{name}"),
        None => String::new(),
    }
}

/// First non-empty candidate, else the synthesized title.
pub(crate) fn title_or_fallback(title: Option<&str>, id: &str) -> String {
    title
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback_title(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_is_fx_vx_oembed() {
        let labels: Vec<_> = Source::PRIORITY.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["fxtwitter", "vxtwitter", "oembed"]);
    }

    #[test]
    fn blank_titles_fall_back_to_post_id() {
        assert_eq!(title_or_fallback(None, "42"), "Post 42");
        assert_eq!(title_or_fallback(Some("  "), "42"), "Post 42");
        assert_eq!(title_or_fallback(Some("Hello"), "42"), "Hello");
    }

    #[test]
    fn handle_is_prefixed() {
        assert_eq!(handle(Some("jack")), "@jack");
        assert_eq!(handle(Some("")), "");
        assert_eq!(handle(None), "");
    }
}

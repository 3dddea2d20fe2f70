//! HTML escaping and the handful of fragments shared by every renderer.

/// Escape the five reserved HTML characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        push_escaped(&mut out, ch);
    }
    out
}

pub(crate) fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}

/// `<figure>` with an eagerly loaded image and an optional caption.
pub fn figure(url: &str, caption: Option<&str>) -> String {
    let caption = caption
        .filter(|c| !c.is_empty())
        .map(|c| format!("<figcaption>{}</figcaption>", escape_html(c)))
        .unwrap_or_default();
    format!(
        r#"<figure><img src="{}" alt="media" loading="eager" />{}</figure>"#,
        escape_html(url),
        caption
    )
}

/// Paragraph holding a single outbound link.
pub fn link_paragraph(url: &str) -> String {
    let safe = escape_html(url);
    format!(r#"<p><a href="{safe}" target="_blank" rel="noopener noreferrer">{safe}</a></p>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_reserved_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn figure_escapes_url_and_caption() {
        assert_eq!(
            figure("https://img/a.jpg?x=1&y=2", Some("a <b>")),
            r#"<figure><img src="https://img/a.jpg?x=1&amp;y=2" alt="media" loading="eager" /><figcaption>a &lt;b&gt;</figcaption></figure>"#
        );
        assert_eq!(
            figure("u", None),
            r#"<figure><img src="u" alt="media" loading="eager" /></figure>"#
        );
    }

    #[test]
    fn link_paragraph_uses_url_as_text() {
        assert_eq!(
            link_paragraph("https://e.com/?a&b"),
            r#"<p><a href="https://e.com/?a&amp;b" target="_blank" rel="noopener noreferrer">https://e.com/?a&amp;b</a></p>"#
        );
    }
}

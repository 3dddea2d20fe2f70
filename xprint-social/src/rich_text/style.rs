//! Inline style rendering: escaped text with `<strong>` around bold runs.
use super::StyleRange;
use crate::markup::push_escaped;

/// One flag per UTF-16 code unit, set where any bold range covers the unit.
///
/// Ranges are clipped to the text; negative or oversized values never panic.
pub fn bold_mask(text: &str, ranges: &[StyleRange]) -> Vec<bool> {
    let len = text.encode_utf16().count();
    let mut mask = vec![false; len];
    for range in ranges.iter().filter(|r| r.is_bold()) {
        let start = range.offset.clamp(0, len as i64);
        let end = start.saturating_add(range.length.max(0)).min(len as i64);
        for flag in &mut mask[start as usize..end as usize] {
            *flag = true;
        }
    }
    mask
}

/// Escape `text` and wrap every maximal bold run in `<strong>…</strong>`.
///
/// A character is bold when the code unit it starts at is covered, so a range
/// boundary inside a surrogate pair never splits the character.
pub fn render_styled_text(text: &str, ranges: &[StyleRange]) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mask = bold_mask(text, ranges);
    let mut out = String::with_capacity(text.len() + 17);
    let mut in_bold = false;
    let mut unit = 0usize;
    for ch in text.chars() {
        let bold = mask[unit];
        if bold && !in_bold {
            out.push_str("<strong>");
            in_bold = true;
        } else if !bold && in_bold {
            out.push_str("</strong>");
            in_bold = false;
        }
        push_escaped(&mut out, ch);
        unit += ch.len_utf16();
    }
    if in_bold {
        out.push_str("</strong>");
    }
    out
}

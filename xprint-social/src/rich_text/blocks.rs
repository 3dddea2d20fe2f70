//! Block-to-HTML rendering with list grouping and media placement.
use super::entity_map::{Entity, EntityMap, MediaEntity};
use super::media::{ConsumedMedia, MediaLibrary, MediaRecord};
use super::style::render_styled_text;
use super::{BlockKind, RichTextContent, TextBlock};
use crate::markup::{escape_html, figure, link_paragraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

struct BlockRenderer<'r, 'a> {
    entities: &'r EntityMap,
    library: &'r MediaLibrary<'a>,
    consumed: &'r mut ConsumedMedia,
    open_list: Option<ListKind>,
    parts: Vec<String>,
}

impl<'r, 'a> BlockRenderer<'r, 'a> {
    fn block(&mut self, block: &TextBlock) {
        let list = match block.kind {
            BlockKind::UnorderedListItem => Some(ListKind::Unordered),
            BlockKind::OrderedListItem => Some(ListKind::Ordered),
            _ => None,
        };
        if let Some(kind) = list {
            if self.open_list != Some(kind) {
                self.close_list();
                self.parts.push(format!("<{}>", kind.tag()));
                self.open_list = Some(kind);
            }
            let styled = render_styled_text(&block.text, &block.style_ranges);
            self.parts.push(format!("<li>{styled}</li>"));
            return;
        }

        self.close_list();
        match &block.kind {
            BlockKind::HeaderOne => self.heading("h1", block),
            BlockKind::HeaderTwo => self.heading("h2", block),
            BlockKind::Atomic => {
                for range in &block.entity_ranges {
                    match self.entities.get(&range.key) {
                        Some(entity) => self.entity(entity),
                        None => tracing::trace!(key = %range.key, "render.entity.missing"),
                    }
                }
            }
            _ => {
                let styled = render_styled_text(&block.text, &block.style_ranges);
                if !styled.trim().is_empty() {
                    self.parts.push(format!("<p>{styled}</p>"));
                }
            }
        }
    }

    fn heading(&mut self, tag: &str, block: &TextBlock) {
        let styled = render_styled_text(&block.text, &block.style_ranges);
        self.parts.push(format!("<{tag}>{styled}</{tag}>"));
    }

    fn entity(&mut self, entity: &Entity) {
        match entity {
            Entity::Media(media) => self.media(media),
            Entity::Markdown(markdown) => {
                let trimmed = markdown.trim();
                if !trimmed.is_empty() {
                    self.parts.push(format!("<pre>{}</pre>", escape_html(trimmed)));
                }
            }
            Entity::Link(link) => {
                if let Some(href) = link.href() {
                    self.parts.push(link_paragraph(href));
                }
            }
            Entity::Other(kind) => tracing::trace!(%kind, "render.entity.unsupported"),
        }
    }

    fn media(&mut self, media: &MediaEntity) {
        let record = self
            .library
            .lookup(&media.media_ids)
            .or_else(|| self.library.first_unconsumed(self.consumed));
        let Some(record) = record else {
            tracing::debug!(ids = ?media.media_ids, "render.media.unresolved");
            return;
        };
        if let Some(url) = record.best_url() {
            self.parts.push(figure(url, media.caption.as_deref()));
            self.consumed.mark(record);
        }
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.open_list.take() {
            self.parts.push(format!("</{}>", kind.tag()));
        }
    }

    fn finish(mut self) -> String {
        self.close_list();
        self.parts.join("\n")
    }
}

/// Render blocks in order, marking every placed media record in `consumed`.
pub fn render_blocks(
    blocks: &[TextBlock],
    entities: &EntityMap,
    library: &MediaLibrary<'_>,
    consumed: &mut ConsumedMedia,
) -> String {
    let mut renderer = BlockRenderer {
        entities,
        library,
        consumed,
        open_list: None,
        parts: Vec::with_capacity(blocks.len()),
    };
    for block in blocks {
        renderer.block(block);
    }
    renderer.finish()
}

/// `<h2>Media</h2>` and a figure for every unplaced record with a URL.
///
/// Empty when nothing is left over.
pub fn render_leftover_media(library: &MediaLibrary<'_>, consumed: &ConsumedMedia) -> String {
    let figures: Vec<String> = library
        .leftovers(consumed)
        .into_iter()
        .filter_map(MediaRecord::best_url)
        .map(|url| figure(url, None))
        .collect();
    if figures.is_empty() {
        return String::new();
    }
    let mut parts = Vec::with_capacity(figures.len() + 1);
    parts.push("<h2>Media</h2>".to_string());
    parts.extend(figures);
    parts.join("\n")
}

/// Full article body: rendered blocks followed by the leftover media section.
pub fn render_article_body(content: &RichTextContent, media: &[MediaRecord]) -> String {
    let entities = EntityMap::normalize(&content.entity_map);
    let library = MediaLibrary::new(media);
    let mut consumed = ConsumedMedia::new();

    let body = render_blocks(&content.blocks, &entities, &library, &mut consumed);
    let leftovers = render_leftover_media(&library, &consumed);
    tracing::debug!(
        blocks = content.blocks.len(),
        entities = entities.len(),
        media = media.len(),
        placed = consumed.len(),
        "render.body.done"
    );

    [body, leftovers]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

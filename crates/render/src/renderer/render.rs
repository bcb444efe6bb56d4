//! Per-family rendering functions.
//!
//! Every block is wrapped in
//! `<div class="block block--{family} block--{variant}" data-block-id="..">`
//! and its body is chosen by one exhaustive match over [`Family`].

use pageblocks_core::content::{
    self, ButtonContent, ButtonLink, ColumnsContent, GalleryContent, ImageContent, NoteContent,
    QaContent, TableContent, TextContent, TilesContent,
};
use pageblocks_core::{Block, Family, MediaPosition, Orientation, Tab, VariantOptions, siblings};

use super::context::Context;

const PLACEHOLDER: &str =
    r#"<div class="image-placeholder" aria-hidden="true"><span class="icon icon--image"></span></div>"#;

/// Renders a sibling list in `order`, recursing into containers.
pub fn render_blocks(blocks: &[Block], ctx: &mut Context) {
    for block in siblings::sorted(blocks) {
        render_block(&block, ctx);
    }
}

/// Renders one block with its wrapper.
///
/// Only types the registry knows get a family body; anything else, even
/// with a familiar prefix, goes through the text fallback.
pub fn render_block(block: &Block, ctx: &mut Context) {
    let Some(family) = ctx.registered_family(block) else {
        render_fallback(block, ctx);
        return;
    };
    let options = ctx.variant_options(block);

    ctx.push_raw("<div class=\"block block--");
    ctx.push_raw(family.id());
    ctx.push_raw(" block--");
    ctx.push_attr_value(&block.variant().to_ascii_lowercase());
    ctx.push_raw("\"");
    ctx.push_data_attr("data-block-id", block.id.as_str());
    ctx.push_raw(">");

    match family {
        Family::Text => render_text(block, ctx),
        Family::Button => render_buttons(block, options, ctx),
        Family::Qa => render_qa(block, options, ctx),
        Family::Note => render_note(block, options, ctx),
        Family::Tabs => match options.orientation.unwrap_or(Orientation::Horizontal) {
            Orientation::Horizontal => render_tab_strip(block, ctx),
            Orientation::Vertical => render_tab_sections(block, ctx),
        },
        Family::Columns => render_columns(block, options, ctx),
        Family::Image => render_image(block, options, ctx),
        Family::Gallery => render_gallery(block, options, ctx),
        Family::Tiles => render_tiles(block, options, ctx),
        Family::Table => render_table(block, options, ctx),
    }

    ctx.push_raw("</div>");
}

/// Unrecognized types render their `html` field as text.
fn render_fallback(block: &Block, ctx: &mut Context) {
    log::debug!(
        "Rendering block {} of unknown type {:?} as text",
        block.id,
        block.block_type
    );
    ctx.note_fallback(&block.id);
    ctx.push_raw("<div class=\"block block--text block--fallback\"");
    ctx.push_data_attr("data-block-id", block.id.as_str());
    ctx.push_raw(">");
    ctx.push_raw(block.content_str("html").unwrap_or_default());
    ctx.push_raw("</div>");
}

fn render_text(block: &Block, ctx: &mut Context) {
    let text: TextContent = content::decode(&block.content);
    ctx.push_raw(&text.html);
}

fn render_buttons(block: &Block, options: &VariantOptions, ctx: &mut Context) {
    let button: ButtonContent = content::decode(&block.content);
    let style = options.style.as_deref().unwrap_or("primary");

    if options.group {
        ctx.push_raw("<div class=\"button-group\">");
        for link in &button.buttons {
            render_button(link, link.style.as_deref().unwrap_or(style), ctx);
        }
        ctx.push_raw("</div>");
    } else {
        let link = ButtonLink {
            label: button.label,
            url: button.url,
            new_tab: button.new_tab,
            style: None,
        };
        render_button(&link, style, ctx);
    }
}

fn render_button(link: &ButtonLink, style: &str, ctx: &mut Context) {
    let label = match link.label.trim() {
        "" => "Button",
        label => label,
    };
    let url = link.url.trim();

    if url.is_empty() {
        ctx.push_raw("<span class=\"button button--");
        ctx.push_attr_value(style);
        ctx.push_raw(" button--disabled\">");
        ctx.push_text(label);
        ctx.push_raw("</span>");
        return;
    }

    ctx.push_raw("<a class=\"button button--");
    ctx.push_attr_value(style);
    ctx.push_raw("\"");
    ctx.push_attr("href", url);
    if link.new_tab {
        let rel = ctx.options().new_tab_rel.clone();
        ctx.push_raw(" target=\"_blank\"");
        ctx.push_attr("rel", &rel);
    }
    ctx.push_raw(">");
    ctx.push_text(label);
    ctx.push_raw("</a>");
}

fn render_qa(block: &Block, options: &VariantOptions, ctx: &mut Context) {
    let qa: QaContent = content::decode(&block.content);

    if !options.single_open {
        for item in &qa.items {
            ctx.push_raw("<div class=\"qa-item is-open\"><div class=\"qa-question\">");
            ctx.push_text(&item.question);
            ctx.push_raw("</div><div class=\"qa-answer\">");
            ctx.push_raw(&item.answer);
            ctx.push_raw("</div></div>");
        }
        return;
    }

    // Single-open accordion: only the lowest open index counts.
    let open = ctx.view().open_answers(block.id.as_str()).next();
    for (index, item) in qa.items.iter().enumerate() {
        let is_open = open == Some(index);
        ctx.push_raw(if is_open {
            "<div class=\"qa-item is-open\">"
        } else {
            "<div class=\"qa-item\">"
        });
        ctx.push_raw("<button type=\"button\" class=\"qa-question\"");
        ctx.push_data_attr("data-qa-index", &index.to_string());
        ctx.push_raw(">");
        ctx.push_text(&item.question);
        ctx.push_raw("</button>");
        if is_open {
            ctx.push_raw("<div class=\"qa-answer\">");
            ctx.push_raw(&item.answer);
            ctx.push_raw("</div>");
        }
        ctx.push_raw("</div>");
    }
}

fn render_note(block: &Block, options: &VariantOptions, ctx: &mut Context) {
    let note: NoteContent = content::decode(&block.content);
    let style = options.style.as_deref().unwrap_or("info");

    ctx.push_raw("<aside class=\"note note--");
    ctx.push_attr_value(style);
    ctx.push_raw("\">");

    if style == "quote" {
        ctx.push_raw("<blockquote class=\"note-body\">");
        ctx.push_raw(&note.html);
        ctx.push_raw("</blockquote>");
        if let Some(author) = content::non_empty(&note.author) {
            ctx.push_raw("<cite class=\"note-author\">");
            ctx.push_text(author);
            ctx.push_raw("</cite>");
        }
    } else {
        if let Some(title) = content::non_empty(&note.title) {
            ctx.push_raw("<p class=\"note-title\">");
            ctx.push_text(title);
            ctx.push_raw("</p>");
        }
        ctx.push_raw("<div class=\"note-body\">");
        ctx.push_raw(&note.html);
        ctx.push_raw("</div>");
    }

    ctx.push_raw("</aside>");
}

/// Index of the tab a horizontal container shows.
///
/// A selection that no longer names one of the tabs falls back to the
/// first tab.
pub fn selected_index(block: &Block, ctx: &Context) -> usize {
    ctx.view()
        .selected_tab(block.id.as_str())
        .and_then(|selected| block.tabs().iter().position(|tab| &tab.id == selected))
        .unwrap_or(0)
}

fn render_tab_strip(block: &Block, ctx: &mut Context) {
    let tabs = block.tabs();
    let selected = selected_index(block, ctx);

    ctx.push_raw("<div class=\"tabs-nav\" role=\"tablist\">");
    for (index, tab) in tabs.iter().enumerate() {
        ctx.push_raw(if index == selected {
            "<button type=\"button\" role=\"tab\" class=\"tab-button is-active\""
        } else {
            "<button type=\"button\" role=\"tab\" class=\"tab-button\""
        });
        ctx.push_data_attr("data-tab-id", tab.id.as_str());
        ctx.push_raw(">");
        ctx.push_text(&tab.title);
        ctx.push_raw("</button>");
    }
    ctx.push_raw("</div>");

    if let Some(tab) = tabs.get(selected) {
        render_tab_panel(tab, " role=\"tabpanel\"", ctx);
    }
}

fn render_tab_sections(block: &Block, ctx: &mut Context) {
    for tab in block.tabs() {
        let open = ctx.view().is_section_open(&block.id, &tab.id);
        ctx.push_raw(if open {
            "<section class=\"tab-section is-open\">"
        } else {
            "<section class=\"tab-section\">"
        });
        ctx.push_raw("<button type=\"button\" class=\"tab-toggle\"");
        ctx.push_data_attr("data-tab-id", tab.id.as_str());
        ctx.push_raw(">");
        ctx.push_text(&tab.title);
        ctx.push_raw("</button>");
        if open {
            render_tab_panel(tab, "", ctx);
        }
        ctx.push_raw("</section>");
    }
}

fn render_tab_panel(tab: &Tab, role: &str, ctx: &mut Context) {
    ctx.push_raw("<div class=\"tab-panel\"");
    ctx.push_raw(role);
    ctx.push_data_attr("data-tab-id", tab.id.as_str());
    ctx.push_raw(">");
    render_blocks(&tab.children, ctx);
    ctx.push_raw("</div>");
}

fn render_columns(block: &Block, options: &VariantOptions, ctx: &mut Context) {
    let columns: ColumnsContent = content::decode(&block.content);
    let count = options.columns.unwrap_or(columns.columns.len());

    for index in 0..count {
        ctx.push_raw("<div class=\"column\">");
        if let Some(column) = columns.columns.get(index) {
            ctx.push_raw(&column.html);
        }
        ctx.push_raw("</div>");
    }
}

fn render_img(src: Option<&str>, alt: &str, ctx: &mut Context) {
    let Some(src) = src else {
        ctx.push_raw(PLACEHOLDER);
        return;
    };
    let url = ctx.resolve_url(src);
    ctx.push_raw("<img");
    ctx.push_attr("src", &url);
    ctx.push_attr("alt", alt);
    if ctx.options().lazy_images {
        ctx.push_raw(" loading=\"lazy\"");
    }
    ctx.push_raw(" />");
}

fn render_caption(caption: &Option<String>, allowed: bool, ctx: &mut Context) {
    if !allowed {
        return;
    }
    if let Some(caption) = content::non_empty(caption) {
        ctx.push_raw("<figcaption>");
        ctx.push_text(caption);
        ctx.push_raw("</figcaption>");
    }
}

fn render_image(block: &Block, options: &VariantOptions, ctx: &mut Context) {
    let image: ImageContent = content::decode(&block.content);
    let media = options.media.unwrap_or(MediaPosition::Full);

    let render_media = |ctx: &mut Context| {
        let src = content::non_empty(&image.src);
        match content::non_empty(&image.link) {
            Some(link) if src.is_some() => {
                ctx.push_raw("<a");
                ctx.push_attr("href", link);
                ctx.push_raw(">");
                render_img(src, &image.alt, ctx);
                ctx.push_raw("</a>");
            }
            _ => render_img(src, &image.alt, ctx),
        }
        render_caption(&image.caption, options.allow_caption, ctx);
    };

    let render_body = |ctx: &mut Context| {
        ctx.push_raw("<div class=\"image-text\">");
        ctx.push_raw(&image.html);
        ctx.push_raw("</div>");
    };

    match media {
        MediaPosition::Full => {
            ctx.push_raw("<figure class=\"image\">");
            render_media(ctx);
            ctx.push_raw("</figure>");
        }
        MediaPosition::Left => {
            ctx.push_raw("<figure class=\"image-media\">");
            render_media(ctx);
            ctx.push_raw("</figure>");
            render_body(ctx);
        }
        MediaPosition::Right => {
            render_body(ctx);
            ctx.push_raw("<figure class=\"image-media\">");
            render_media(ctx);
            ctx.push_raw("</figure>");
        }
    }
}

fn render_gallery(block: &Block, options: &VariantOptions, ctx: &mut Context) {
    let gallery: GalleryContent = content::decode(&block.content);
    let limit = options.max_images.unwrap_or(usize::MAX);

    if gallery.images.is_empty() {
        ctx.push_raw("<div class=\"gallery gallery--empty\">");
        ctx.push_raw(PLACEHOLDER);
        ctx.push_raw("</div>");
        return;
    }

    ctx.push_raw("<div class=\"gallery\">");
    for image in gallery.images.iter().take(limit) {
        ctx.push_raw("<figure class=\"gallery-item\">");
        render_img(content::non_empty(&image.src), &image.alt, ctx);
        render_caption(&image.caption, options.allow_caption, ctx);
        ctx.push_raw("</figure>");
    }
    ctx.push_raw("</div>");
}

fn render_tiles(block: &Block, options: &VariantOptions, ctx: &mut Context) {
    let tiles: TilesContent = content::decode(&block.content);

    ctx.push_raw("<div class=\"tiles\">");
    for tile in &tiles.tiles {
        let url = content::non_empty(&tile.url);
        match url {
            Some(url) => {
                ctx.push_raw("<a class=\"tile\"");
                ctx.push_attr("href", url);
                ctx.push_raw(">");
            }
            None => ctx.push_raw("<div class=\"tile\">"),
        }

        if options.icon_tiles {
            ctx.push_raw("<span class=\"icon icon--");
            ctx.push_attr_value(content::non_empty(&tile.icon).unwrap_or("link"));
            ctx.push_raw("\"></span>");
        } else {
            ctx.push_raw("<div class=\"tile-media\">");
            render_img(content::non_empty(&tile.image), &tile.title, ctx);
            ctx.push_raw("</div>");
        }

        ctx.push_raw("<span class=\"tile-title\">");
        ctx.push_text(&tile.title);
        ctx.push_raw("</span>");
        if let Some(description) = content::non_empty(&tile.description) {
            ctx.push_raw("<span class=\"tile-description\">");
            ctx.push_text(description);
            ctx.push_raw("</span>");
        }

        ctx.push_raw(if url.is_some() { "</a>" } else { "</div>" });
    }
    ctx.push_raw("</div>");
}

fn render_row(cells: &[String], width: usize, tag: &str, ctx: &mut Context) {
    ctx.push_raw("<tr>");
    for index in 0..width {
        ctx.push_raw("<");
        ctx.push_raw(tag);
        ctx.push_raw(">");
        if let Some(cell) = cells.get(index) {
            ctx.push_text(cell);
        }
        ctx.push_raw("</");
        ctx.push_raw(tag);
        ctx.push_raw(">");
    }
    ctx.push_raw("</tr>");
}

fn render_table(block: &Block, options: &VariantOptions, ctx: &mut Context) {
    let table: TableContent = content::decode(&block.content);
    let header = table.header.unwrap_or(options.header_row) && !table.rows.is_empty();
    let width = table.width();

    ctx.push_raw("<table>");
    if let Some(caption) = content::non_empty(&table.caption) {
        ctx.push_raw("<caption>");
        ctx.push_text(caption);
        ctx.push_raw("</caption>");
    }

    let body = if header {
        ctx.push_raw("<thead>");
        render_row(&table.rows[0], width, "th", ctx);
        ctx.push_raw("</thead>");
        &table.rows[1..]
    } else {
        &table.rows[..]
    };

    ctx.push_raw("<tbody>");
    for row in body {
        render_row(row, width, "td", ctx);
    }
    ctx.push_raw("</tbody></table>");
}

//! The built-in block catalogue.
//!
//! Every sub-variant's default content carries its own `variant` flag so a
//! stored block keeps its presentation even if its type tag is rewritten.

use serde_json::{Value, json};

use super::types::{Family, MediaPosition, Orientation, Registry, SubVariant, VariantOptions};
use crate::block::Content;

/// Creates the built-in registry of 25 block types.
///
/// # Example
///
/// ```
/// use pageblocks_core::registry::{Family, defaults::builtin_registry};
///
/// let registry = builtin_registry();
/// let template = registry.template(Family::Image, "IM02").unwrap();
/// assert_eq!(template.block_type, "IM02");
/// assert_eq!(template.content["variant"], "IM02");
/// ```
pub fn builtin_registry() -> Registry {
    let styled = |style: &str| VariantOptions {
        style: Some(style.to_string()),
        ..VariantOptions::EMPTY
    };

    Registry::new(vec![
        // Text
        variant("TX01", Family::Text, "Plain text", json!({ "html": "" }), styled("plain")),
        variant("TX02", Family::Text, "Lead paragraph", json!({ "html": "" }), styled("lead")),
        variant(
            "TX03",
            Family::Text,
            "Two-column text",
            json!({ "html": "" }),
            styled("split"),
        ),
        // Buttons
        variant(
            "BT01",
            Family::Button,
            "Primary button",
            json!({ "label": "Read more", "url": "", "new_tab": false }),
            styled("primary"),
        ),
        variant(
            "BT02",
            Family::Button,
            "Outline button",
            json!({ "label": "Read more", "url": "", "new_tab": false }),
            styled("outline"),
        ),
        variant(
            "BT03",
            Family::Button,
            "Button group",
            json!({ "buttons": [] }),
            VariantOptions {
                group: true,
                ..styled("primary")
            },
        ),
        // Questions & answers
        variant(
            "QA01",
            Family::Qa,
            "Accordion",
            json!({ "items": [] }),
            VariantOptions {
                single_open: true,
                ..styled("accordion")
            },
        ),
        variant(
            "QA02",
            Family::Qa,
            "Expanded list",
            json!({ "items": [] }),
            styled("expanded"),
        ),
        // Notes
        variant(
            "NT01",
            Family::Note,
            "Info note",
            json!({ "title": "", "html": "" }),
            styled("info"),
        ),
        variant(
            "NT02",
            Family::Note,
            "Warning note",
            json!({ "title": "", "html": "" }),
            styled("warning"),
        ),
        variant(
            "NT03",
            Family::Note,
            "Quote",
            json!({ "html": "", "author": "" }),
            styled("quote"),
        ),
        // Tabs
        variant(
            "TB01",
            Family::Tabs,
            "Horizontal tabs",
            json!({}),
            container(Orientation::Horizontal),
        ),
        variant(
            "TB02",
            Family::Tabs,
            "Vertical sections",
            json!({}),
            container(Orientation::Vertical),
        ),
        // Columns
        variant(
            "CL01",
            Family::Columns,
            "Two columns",
            json!({ "columns": [{ "html": "" }, { "html": "" }] }),
            VariantOptions {
                columns: Some(2),
                ..VariantOptions::EMPTY
            },
        ),
        variant(
            "CL02",
            Family::Columns,
            "Three columns",
            json!({ "columns": [{ "html": "" }, { "html": "" }, { "html": "" }] }),
            VariantOptions {
                columns: Some(3),
                ..VariantOptions::EMPTY
            },
        ),
        // Images
        variant(
            "IM01",
            Family::Image,
            "Full-width image",
            json!({ "src": "", "alt": "", "caption": "" }),
            image(MediaPosition::Full),
        ),
        variant(
            "IM02",
            Family::Image,
            "Image left, text right",
            json!({ "src": "", "alt": "", "html": "" }),
            image(MediaPosition::Left),
        ),
        variant(
            "IM03",
            Family::Image,
            "Text left, image right",
            json!({ "src": "", "alt": "", "html": "" }),
            image(MediaPosition::Right),
        ),
        // Galleries
        variant(
            "GL01",
            Family::Gallery,
            "Grid gallery",
            json!({ "images": [] }),
            VariantOptions {
                allow_caption: true,
                max_images: Some(12),
                allow_reorder: true,
                ..styled("grid")
            },
        ),
        variant(
            "GL02",
            Family::Gallery,
            "Slider",
            json!({ "images": [] }),
            VariantOptions {
                allow_caption: true,
                max_images: Some(8),
                allow_reorder: true,
                ..styled("slider")
            },
        ),
        variant(
            "GL03",
            Family::Gallery,
            "Masonry",
            json!({ "images": [] }),
            VariantOptions {
                max_images: Some(20),
                ..styled("masonry")
            },
        ),
        // Tiles
        variant(
            "TL01",
            Family::Tiles,
            "Image tiles",
            json!({ "tiles": [] }),
            styled("image"),
        ),
        variant(
            "TL02",
            Family::Tiles,
            "Icon tiles",
            json!({ "tiles": [] }),
            VariantOptions {
                icon_tiles: true,
                ..styled("icon")
            },
        ),
        // Tables
        variant(
            "TA01",
            Family::Table,
            "Simple table",
            json!({ "rows": [["", ""], ["", ""]], "header": false }),
            VariantOptions::EMPTY,
        ),
        variant(
            "TA02",
            Family::Table,
            "Table with header",
            json!({ "rows": [["", ""], ["", ""]], "header": true }),
            VariantOptions {
                header_row: true,
                ..VariantOptions::EMPTY
            },
        ),
    ])
}

fn variant(
    id: &str,
    family: Family,
    label: &str,
    content: Value,
    options: VariantOptions,
) -> SubVariant {
    let mut default_content = match content {
        Value::Object(map) => map,
        _ => Content::new(),
    };
    default_content.insert("variant".to_string(), Value::String(id.to_string()));

    SubVariant {
        id: id.to_string(),
        family,
        label: label.to_string(),
        default_content,
        options,
    }
}

/// Tab containers accept every family except other containers.
fn container(orientation: Orientation) -> VariantOptions {
    VariantOptions {
        orientation: Some(orientation),
        accepts: Family::ALL
            .into_iter()
            .filter(|f| !f.is_container())
            .collect(),
        ..VariantOptions::EMPTY
    }
}

fn image(media: MediaPosition) -> VariantOptions {
    VariantOptions {
        media: Some(media),
        allow_caption: matches!(media, MediaPosition::Full),
        ..VariantOptions::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_has_every_family() {
        let registry = builtin_registry();
        assert_eq!(registry.variants().len(), 25);
        assert_eq!(registry.families(), Family::ALL.to_vec());
    }

    #[test]
    fn test_type_tags_are_unique_and_prefixed() {
        let registry = builtin_registry();
        let mut seen = HashSet::new();
        for v in registry.variants() {
            assert!(seen.insert(v.id.clone()), "duplicate type {}", v.id);
            assert_eq!(Family::from_type(&v.id), Some(v.family));
        }
    }

    #[test]
    fn test_template_is_a_deep_copy() {
        let registry = builtin_registry();
        let mut first = registry.template(Family::Columns, "CL01").unwrap();
        first.content.insert("columns".into(), json!([]));

        let second = registry.template(Family::Columns, "CL01").unwrap();
        assert_eq!(second.content["columns"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_template_rejects_foreign_variant() {
        let registry = builtin_registry();
        assert!(registry.template(Family::Text, "IM01").is_none());
        assert!(registry.template(Family::Text, "TX99").is_none());
    }

    #[test]
    fn test_try_template_errors() {
        let registry = builtin_registry();
        assert!(registry.try_template("text", "TX02").is_ok());
        assert!(matches!(
            registry.try_template("video", "VD01"),
            Err(crate::BlockError::UnknownFamily(_))
        ));
        assert!(matches!(
            registry.try_template("text", "TX42"),
            Err(crate::BlockError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_tabs_do_not_nest_tabs() {
        let registry = builtin_registry();
        assert!(registry.allows_nested("TB01", Family::Text));
        assert!(registry.allows_nested("TB02", Family::Gallery));
        assert!(!registry.allows_nested("TB01", Family::Tabs));
        assert!(!registry.allows_nested("TX01", Family::Text));
    }

    #[test]
    fn test_gallery_limits() {
        let registry = builtin_registry();
        let grid = registry.get("GL01").unwrap();
        assert_eq!(grid.options.max_images, Some(12));
        assert!(grid.options.allow_reorder);

        let masonry = registry.get("GL03").unwrap();
        assert!(!masonry.options.allow_caption);
        assert!(!masonry.options.allow_reorder);
    }
}

//! Content merging and typed, lenient views over block content.
//!
//! Stored content is an open JSON object. Engines read it through the typed
//! views below, which never fail: a missing field takes its default and a
//! malformed field is treated as missing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::{Block, Content, NodeId};
use crate::registry::MergeRule;

/// Key a tabs patch uses to replace the container's tab list.
pub const TABS_KEY: &str = "tabs";

/// One entry of a `tabs` patch.
///
/// An entry without `children` renames or repositions a tab the container
/// already has and keeps its current blocks. An entry with `children`
/// replaces the tab wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabPatch {
    /// Tab id
    pub id: NodeId,
    /// New title, the current one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

/// Applies `patch` to `content` under `rule`, returning the new content.
///
/// The tab list of a container is not part of `content`; the `tabs` key of a
/// [`MergeRule::ShallowWithTabs`] patch is skipped here and handled by the
/// caller.
pub fn merge(rule: MergeRule, content: &Content, patch: &Content) -> Content {
    match rule {
        MergeRule::Replace => patch
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        MergeRule::Shallow => merge_shallow(content, patch, None),
        MergeRule::ShallowWithTabs => merge_shallow(content, patch, Some(TABS_KEY)),
    }
}

fn merge_shallow(content: &Content, patch: &Content, skip: Option<&str>) -> Content {
    let mut merged = content.clone();
    for (key, value) in patch {
        if Some(key.as_str()) == skip {
            continue;
        }
        if value.is_null() {
            merged.remove(key);
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Minimal shallow patch turning `before` into `after`.
///
/// Keys missing from `after` are emitted as `null` so a shallow merge
/// removes them.
pub fn diff(before: &Content, after: &Content) -> Content {
    let mut patch = Content::new();
    for (key, value) in after {
        if before.get(key) != Some(value) {
            patch.insert(key.clone(), value.clone());
        }
    }
    for key in before.keys() {
        if !after.contains_key(key) {
            patch.insert(key.clone(), Value::Null);
        }
    }
    patch
}

/// Decodes a typed view, falling back to the default on malformed content.
pub fn decode<T>(content: &Content) -> T
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_value(Value::Object(content.clone())) {
        Ok(view) => view,
        Err(e) => {
            log::debug!("Content did not match its typed view, using defaults: {}", e);
            T::default()
        }
    }
}

/// Encodes a typed view back into a content object.
pub fn encode<T: Serialize>(view: &T) -> Content {
    match serde_json::to_value(view) {
        Ok(Value::Object(map)) => map,
        _ => Content::new(),
    }
}

/// Returns the string if it is present and not blank.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Text family content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    /// Sub-variant flag.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub variant: Option<String>,
    /// Pre-sanitized rich text.
    #[serde(deserialize_with = "lenient::string")]
    pub html: String,
}

/// One link button.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonLink {
    /// Visible text.
    #[serde(deserialize_with = "lenient::string")]
    pub label: String,
    /// Target URL.
    #[serde(deserialize_with = "lenient::string")]
    pub url: String,
    /// Open in a new browser tab.
    #[serde(deserialize_with = "lenient::flag")]
    pub new_tab: bool,
    /// Per-button style override inside a group.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub style: Option<String>,
}

/// Button family content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonContent {
    /// Sub-variant flag.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub variant: Option<String>,
    /// Label of a single button.
    #[serde(deserialize_with = "lenient::string")]
    pub label: String,
    /// URL of a single button.
    #[serde(deserialize_with = "lenient::string")]
    pub url: String,
    /// A single button opens a new browser tab.
    #[serde(deserialize_with = "lenient::flag")]
    pub new_tab: bool,
    /// Buttons of a group.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::seq")]
    pub buttons: Vec<ButtonLink>,
}

/// One question with its answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaItem {
    /// Plain-text question.
    #[serde(deserialize_with = "lenient::string")]
    pub question: String,
    /// Rich-text answer.
    #[serde(deserialize_with = "lenient::string")]
    pub answer: String,
}

/// Q&A family content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaContent {
    /// Sub-variant flag.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub variant: Option<String>,
    /// Items in display order.
    #[serde(deserialize_with = "lenient::seq")]
    pub items: Vec<QaItem>,
}

/// Note family content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteContent {
    /// Sub-variant flag.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub variant: Option<String>,
    /// Optional heading.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    /// Rich-text body.
    #[serde(deserialize_with = "lenient::string")]
    pub html: String,
    /// Attribution of a quote.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub author: Option<String>,
}

/// One column of rich text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    /// Rich-text body.
    #[serde(deserialize_with = "lenient::string")]
    pub html: String,
}

/// Columns family content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsContent {
    /// Sub-variant flag.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub variant: Option<String>,
    /// Columns left to right.
    #[serde(deserialize_with = "lenient::seq")]
    pub columns: Vec<Column>,
}

/// Image family content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageContent {
    /// Sub-variant flag.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub variant: Option<String>,
    /// Upload path or absolute URL.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub src: Option<String>,
    /// Alternative text.
    #[serde(deserialize_with = "lenient::string")]
    pub alt: String,
    /// Caption below the image.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub caption: Option<String>,
    /// Link wrapping the image.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub link: Option<String>,
    /// Rich text beside the image.
    #[serde(deserialize_with = "lenient::string")]
    pub html: String,
}

/// One gallery image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryImage {
    /// Upload path or absolute URL.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub src: Option<String>,
    /// Alternative text.
    #[serde(deserialize_with = "lenient::string")]
    pub alt: String,
    /// Caption below the image.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub caption: Option<String>,
}

/// Gallery family content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryContent {
    /// Sub-variant flag.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub variant: Option<String>,
    /// Images in display order.
    #[serde(deserialize_with = "lenient::seq")]
    pub images: Vec<GalleryImage>,
}

/// One linked tile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tile {
    /// Tile heading.
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    /// Link target.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
    /// Upload path of the tile image.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub image: Option<String>,
    /// Icon name for icon tiles.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub icon: Option<String>,
    /// Short description.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
}

/// Tiles family content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilesContent {
    /// Sub-variant flag.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub variant: Option<String>,
    /// Tiles in display order.
    #[serde(deserialize_with = "lenient::seq")]
    pub tiles: Vec<Tile>,
}

/// Table family content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableContent {
    /// Sub-variant flag.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub variant: Option<String>,
    /// Plain-text cells, row-major.
    #[serde(deserialize_with = "lenient::rows")]
    pub rows: Vec<Vec<String>>,
    /// Header row override; the sub-variant decides when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<bool>,
    /// Table caption.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub caption: Option<String>,
}

impl TableContent {
    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Field deserializers that coerce instead of failing.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar_text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(scalar_text(&value).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(scalar_text(&value))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(match value {
            Value::Bool(b) => b,
            Value::String(s) => matches!(s.as_str(), "true" | "1" | "yes"),
            Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
            _ => false,
        })
    }

    /// Keeps the items that decode and drops the rest.
    pub fn seq<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(d)?;
        let Value::Array(items) = value else {
            return Ok(Vec::new());
        };
        Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    pub fn rows<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Vec<String>>, D::Error> {
        let value = Value::deserialize(d)?;
        let Value::Array(rows) = value else {
            return Ok(Vec::new());
        };
        Ok(rows
            .iter()
            .map(|row| match row {
                Value::Array(cells) => cells
                    .iter()
                    .map(|cell| scalar_text(cell).unwrap_or_default())
                    .collect(),
                _ => Vec::new(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Content {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_shallow_merge_replaces_arrays_wholesale() {
        let content = obj(json!({ "columns": [{ "html": "a" }, { "html": "b" }], "variant": "CL01" }));
        let patch = obj(json!({ "columns": [{ "html": "c" }] }));

        let merged = merge(MergeRule::Shallow, &content, &patch);
        assert_eq!(merged["columns"], json!([{ "html": "c" }]));
        assert_eq!(merged["variant"], "CL01");
    }

    #[test]
    fn test_shallow_merge_null_removes_key() {
        let content = obj(json!({ "caption": "x", "src": "a.png" }));
        let merged = merge(MergeRule::Shallow, &content, &obj(json!({ "caption": null })));
        assert!(!merged.contains_key("caption"));
        assert_eq!(merged["src"], "a.png");
    }

    #[test]
    fn test_replace_drops_unpatched_keys() {
        let content = obj(json!({ "rows": [["a"]], "caption": "old" }));
        let merged = merge(MergeRule::Replace, &content, &obj(json!({ "rows": [["b"]] })));
        assert_eq!(merged, obj(json!({ "rows": [["b"]] })));
    }

    #[test]
    fn test_tabs_key_is_not_stored_in_content() {
        let merged = merge(
            MergeRule::ShallowWithTabs,
            &Content::new(),
            &obj(json!({ "tabs": [], "variant": "TB02" })),
        );
        assert!(!merged.contains_key(TABS_KEY));
        assert_eq!(merged["variant"], "TB02");
    }

    #[test]
    fn test_diff_emits_changes_and_removals() {
        let before = obj(json!({ "a": 1, "b": 2, "c": 3 }));
        let after = obj(json!({ "a": 1, "b": 5 }));
        assert_eq!(diff(&before, &after), obj(json!({ "b": 5, "c": null })));
    }

    #[test]
    fn test_decode_coerces_scalars_and_skips_bad_items() {
        let content = obj(json!({
            "rows": [[1, "x", true], "broken", [null]],
            "header": true,
        }));
        let table: TableContent = decode(&content);
        assert_eq!(
            table.rows,
            vec![
                vec!["1".to_string(), "x".to_string(), "true".to_string()],
                vec![],
                vec![String::new()],
            ]
        );
        assert_eq!(table.width(), 3);

        let qa: QaContent = decode(&obj(json!({ "items": [{ "question": "Q" }, 42] })));
        assert_eq!(qa.items.len(), 1);
        assert_eq!(qa.items[0].answer, "");
    }

    #[test]
    fn test_decode_missing_fields_use_defaults() {
        let image: ImageContent = decode(&Content::new());
        assert_eq!(image, ImageContent::default());
        assert_eq!(non_empty(&image.src), None);
        assert_eq!(non_empty(&Some("  ".into())), None);
    }

    #[test]
    fn test_encode_skips_absent_optionals() {
        let note = NoteContent {
            html: "<p>x</p>".into(),
            ..Default::default()
        };
        let content = encode(&note);
        assert_eq!(content, obj(json!({ "html": "<p>x</p>" })));
    }
}

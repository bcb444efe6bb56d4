//! The persisted block tree: blocks, tabs and their ids.
//!
//! The serde shape of [`Block`] and [`Tab`] is the storage format handed to
//! the page persistence layer:
//!
//! ```text
//! Block := { id, type, content, order, children?: Tab[] }
//! Tab   := { id, title, children: Block[] }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;

use crate::registry::Family;

/// Opaque JSON object holding a block's type-specific fields.
pub type Content = Map<String, Value>;

/// Identifier of a block or a tab, unique within one tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wraps a raw id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One node of page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Stable identity, never reused within the owning tree.
    pub id: NodeId,
    /// Type tag such as `TX01`; its two-letter prefix selects the family.
    #[serde(rename = "type")]
    pub block_type: String,
    /// Type-specific fields; every field is optional.
    #[serde(default, deserialize_with = "content_or_empty")]
    pub content: Content,
    /// Position among siblings.
    #[serde(default)]
    pub order: usize,
    /// Tabs of a container block. Always `None` for other types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Tab>>,
}

/// A tab of a container block, hosting its own ordered sibling list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    /// Stable identity, unique across blocks and tabs of the tree.
    pub id: NodeId,
    /// Label shown in the tab strip or section header.
    #[serde(default)]
    pub title: String,
    /// Blocks shown inside this tab.
    #[serde(default)]
    pub children: Vec<Block>,
}

fn content_or_empty<'de, D>(deserializer: D) -> Result<Content, D::Error>
where
    D: Deserializer<'de>,
{
    // Stored pages sometimes carry `content: null`; treat it like a missing object.
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => map,
        _ => Content::new(),
    })
}

impl Block {
    /// Creates a block at order 0 with no children.
    pub fn new(id: impl Into<NodeId>, block_type: impl Into<String>, content: Content) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            content,
            order: 0,
            children: None,
        }
    }

    /// Returns the block with `order` replaced.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Returns the block with its tab list replaced.
    pub fn with_tabs(mut self, tabs: Vec<Tab>) -> Self {
        self.children = Some(tabs);
        self
    }

    /// Family derived from the type prefix, `None` for unrecognized types.
    pub fn family(&self) -> Option<Family> {
        Family::from_type(&self.block_type)
    }

    /// True when this block's type hosts tabs.
    pub fn is_container(&self) -> bool {
        self.family().is_some_and(Family::is_container)
    }

    /// Sub-variant flag from `content.variant`, falling back to the type tag.
    ///
    /// A flag naming a sub-variant of another family is ignored, so the
    /// flag can refine presentation but never change dispatch.
    pub fn variant(&self) -> &str {
        match self.content.get("variant").and_then(Value::as_str) {
            Some(flag) if Family::from_type(flag).is_some_and(|f| Some(f) == self.family()) => flag,
            _ => &self.block_type,
        }
    }

    /// Tabs of a container, empty for every other block.
    pub fn tabs(&self) -> &[Tab] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// String field of `content`, `None` when missing, empty or not a string.
    pub fn content_str(&self, key: &str) -> Option<&str> {
        self.content
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl Tab {
    /// Creates an empty tab.
    pub fn new(id: impl Into<NodeId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// Returns the tab with its children replaced.
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_wire_shape() {
        let block: Block = serde_json::from_value(json!({
            "id": "b1",
            "type": "TX01",
            "content": { "html": "<p>A</p>" },
            "order": 0
        }))
        .unwrap();

        assert_eq!(block.id, "b1");
        assert_eq!(block.block_type, "TX01");
        assert_eq!(block.content_str("html"), Some("<p>A</p>"));
        assert!(block.children.is_none());
    }

    #[test]
    fn test_missing_and_null_content_are_empty() {
        let missing: Block = serde_json::from_value(json!({ "id": "a", "type": "TX01" })).unwrap();
        let null: Block =
            serde_json::from_value(json!({ "id": "b", "type": "TX01", "content": null })).unwrap();

        assert!(missing.content.is_empty());
        assert!(null.content.is_empty());
        assert_eq!(missing.order, 0);
    }

    #[test]
    fn test_leaf_serializes_without_children() {
        let block = Block::new("b1", "TX01", Content::new());
        let value = serde_json::to_value(&block).unwrap();
        assert!(value.get("children").is_none());
        assert_eq!(value["type"], "TX01");
    }

    #[test]
    fn test_variant_flag_only_refines_within_family() {
        let mut block = Block::new("i", "IM01", Content::new());
        assert_eq!(block.variant(), "IM01");

        block.content.insert("variant".into(), json!("IM02"));
        assert_eq!(block.variant(), "IM02");

        block.content.insert("variant".into(), json!("TA01"));
        assert_eq!(block.variant(), "IM01");
    }

    #[test]
    fn test_container_detection() {
        assert!(Block::new("t", "TB01", Content::new()).is_container());
        assert!(!Block::new("x", "TX01", Content::new()).is_container());
        assert!(!Block::new("u", "UNKNOWN", Content::new()).is_container());
    }
}

//! Loading and saving the stored page format.
//!
//! A page is persisted as a JSON array of top-level blocks. Loading is
//! forgiving about order values and stray tabs, which are repaired, but not
//! about the basic shape of the document.

use crate::block::Block;
use crate::error::{BlockError, TreeDiagnostics};
use crate::tree;

/// Parses a stored page and normalizes it.
///
/// Returns the repaired tree together with whatever was wrong with the
/// input, so callers can decide whether to surface it.
///
/// # Example
///
/// ```
/// use pageblocks_core::codec::decode_blocks;
///
/// let (blocks, diagnostics) = decode_blocks(
///     r#"[{"id":"b","type":"TX01","content":{},"order":4},
///         {"id":"a","type":"TX01","content":{},"order":2}]"#,
/// )
/// .unwrap();
/// assert_eq!(blocks[0].id, "a");
/// assert_eq!(blocks[1].order, 1);
/// assert!(!diagnostics.is_clean());
/// ```
pub fn decode_blocks(json: &str) -> Result<(Vec<Block>, TreeDiagnostics), BlockError> {
    let raw: Vec<Block> = serde_json::from_str(json)?;
    Ok(tree::normalize(&raw))
}

/// Parses already-decoded JSON, e.g. a field of a larger payload.
pub fn decode_value(value: serde_json::Value) -> Result<(Vec<Block>, TreeDiagnostics), BlockError> {
    let raw: Vec<Block> = serde_json::from_value(value)?;
    Ok(tree::normalize(&raw))
}

/// Serializes a tree in the stored page format.
pub fn encode_blocks(blocks: &[Block]) -> Result<String, BlockError> {
    Ok(serde_json::to_string(blocks)?)
}

/// Same as [`encode_blocks`], indented for humans.
pub fn encode_blocks_pretty(blocks: &[Block]) -> Result<String, BlockError> {
    Ok(serde_json::to_string_pretty(blocks)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_array_payload() {
        let err = decode_blocks(r#"{"id":"a"}"#).unwrap_err();
        assert!(matches!(err, BlockError::Json(_)));
    }

    #[test]
    fn test_encode_then_decode_keeps_tree() {
        let json = r#"[{"id":"t","type":"TB01","content":{"variant":"TB01"},"order":0,
            "children":[{"id":"x","title":"X","children":[
                {"id":"n","type":"NT01","content":{"html":"<p>n</p>"},"order":0}]}]}]"#;
        let (blocks, diagnostics) = decode_blocks(json).unwrap();
        assert!(diagnostics.is_clean());

        let (again, _) = decode_blocks(&encode_blocks(&blocks).unwrap()).unwrap();
        assert_eq!(again, blocks);
        assert_eq!(again[0].tabs()[0].children[0].id, "n");
    }

    #[test]
    fn test_strips_tabs_from_leaves() {
        let json = r#"[{"id":"a","type":"TX01","content":{},"order":0,"children":[]}]"#;
        let (blocks, diagnostics) = decode_blocks(json).unwrap();
        assert!(blocks[0].children.is_none());
        assert_eq!(diagnostics.count(), 1);
    }
}

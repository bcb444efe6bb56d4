//! Type definitions for the block renderer.

use pageblocks_core::NodeId;
use serde::Serialize;

/// Result of rendering one tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderOutput {
    /// Rendered markup.
    pub html: String,
    /// Blocks with an unrecognized type that were rendered as text.
    pub fallback_blocks: Vec<NodeId>,
}

impl RenderOutput {
    /// True when every block had a recognized type.
    pub fn is_exact(&self) -> bool {
        self.fallback_blocks.is_empty()
    }
}

#![deny(missing_docs)]
//! Pageblocks core: the block tree, the variant registry and copy-on-write
//! tree maintenance shared by the rendering and editing engines.

/// Block, tab and id types of the stored tree.
pub mod block;
/// Loading and saving stored pages.
pub mod codec;
/// Editor configuration.
pub mod config;
/// Content merge rules and typed content views.
pub mod content;
/// Core error and diagnostic types.
pub mod error;
/// Id generation.
pub mod ids;
/// Registry of block families and sub-variants.
pub mod registry;
/// Operations over one sibling list.
pub mod siblings;
/// Whole-tree queries and invariant checks.
pub mod tree;

pub use block::{Block, Content, NodeId, Tab};
pub use codec::{decode_blocks, encode_blocks};
pub use config::EditorOptions;
pub use error::{BlockError, TreeDiagnostics, TreeViolation};
pub use ids::{IdAllocator, IdSource, SequentialIds, UuidIds};
pub use registry::{
    Family, MediaPosition, MergeRule, Orientation, Registry, SubVariant, Template, VariantOptions,
    registry,
};
pub use siblings::Direction;

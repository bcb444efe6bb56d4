use thiserror::Error;

use crate::block::NodeId;

/// Errors raised at the decoding and configuration boundaries.
///
/// Editing and rendering never fail; only turning external text into blocks
/// or options can.
#[derive(Debug, Error)]
pub enum BlockError {
    /// Stored page payload or patch was not valid JSON for the block shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Options file was not valid YAML for the options shape.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// No family with this identifier exists in the registry.
    #[error("Unknown block family: {0}")]
    UnknownFamily(String),
    /// The family exists but has no sub-variant with this identifier.
    #[error("Unknown sub-variant {variant} in family {family}")]
    UnknownVariant {
        /// Family identifier
        family: String,
        /// Requested sub-variant
        variant: String,
    },
}

impl BlockError {
    /// Create an unknown sub-variant error
    pub fn unknown_variant(family: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::UnknownVariant {
            family: family.into(),
            variant: variant.into(),
        }
    }
}

/// A broken tree invariant found while checking or normalizing a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeViolation {
    /// Two nodes (blocks or tabs) share an id.
    DuplicateId(NodeId),
    /// Sibling orders are not the dense sequence `0..N-1`.
    OrderNotDense {
        /// Owning tab, or `None` for the page's top-level list
        parent: Option<NodeId>,
        /// Order values in array position
        found: Vec<usize>,
    },
    /// A non-container block carries tabs.
    ChildrenOnLeaf(NodeId),
    /// A container holds a block of a family it does not accept.
    NestingNotAllowed {
        /// Container block id
        container: NodeId,
        /// Offending child block id
        block: NodeId,
    },
}

impl TreeViolation {
    /// True for violations that normalizing a tree repairs; the others
    /// can only be reported.
    pub fn is_repairable(&self) -> bool {
        matches!(self, TreeViolation::OrderNotDense { .. } | TreeViolation::ChildrenOnLeaf(_))
    }
}

impl std::fmt::Display for TreeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeViolation::DuplicateId(id) => write!(f, "duplicate id {}", id),
            TreeViolation::OrderNotDense { parent, found } => match parent {
                Some(tab) => write!(f, "orders {:?} in tab {} are not dense", found, tab),
                None => write!(f, "top-level orders {:?} are not dense", found),
            },
            TreeViolation::ChildrenOnLeaf(id) => {
                write!(f, "block {} carries tabs but is not a container", id)
            }
            TreeViolation::NestingNotAllowed { container, block } => {
                write!(f, "container {} does not accept block {}", container, block)
            }
        }
    }
}

/// Violations collected while checking a tree.
#[derive(Debug, Clone, Default)]
pub struct TreeDiagnostics {
    /// Violations in discovery order
    pub violations: Vec<TreeViolation>,
}

impl TreeDiagnostics {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn push(&mut self, violation: TreeViolation) {
        self.violations.push(violation);
    }

    /// Check if the tree was clean
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations recorded
    pub fn count(&self) -> usize {
        self.violations.len()
    }
}

//! Collision-free id generation for blocks and tabs.

use std::collections::HashSet;
use std::fmt;

use crate::block::{Block, NodeId};
use crate::tree;

/// A source of candidate ids.
///
/// Candidates need not be unique on their own; [`IdAllocator`] rejects the
/// ones that collide with ids already in use.
pub trait IdSource: Send {
    /// Produces the next candidate.
    fn next_id(&mut self) -> String;
}

/// Random ids: `prefix` followed by a hyphen-free UUID v4.
#[derive(Debug, Clone)]
pub struct UuidIds {
    prefix: String,
}

impl UuidIds {
    /// Creates a source emitting `{prefix}-{uuid}`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        format!("{}-{}", self.prefix, uuid::Uuid::new_v4().simple())
    }
}

/// Deterministic ids `{prefix}-1`, `{prefix}-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    count: u64,
}

impl SequentialIds {
    /// Creates a counter starting at 1.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            count: 0,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.prefix, self.count)
    }
}

/// Hands out ids that are unique across everything it has seen.
pub struct IdAllocator {
    source: Box<dyn IdSource>,
    issued: HashSet<NodeId>,
}

impl IdAllocator {
    /// Wraps `source`; nothing is reserved yet.
    pub fn new(source: impl IdSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            issued: HashSet::new(),
        }
    }

    /// Marks every id of `blocks` as taken.
    pub fn reserve_tree(&mut self, blocks: &[Block]) {
        self.issued.extend(tree::collect_ids(blocks));
    }

    /// Marks one id as taken.
    pub fn reserve(&mut self, id: &NodeId) {
        self.issued.insert(id.clone());
    }

    /// True when `id` was issued or reserved.
    pub fn is_taken(&self, id: &str) -> bool {
        self.issued.contains(id)
    }

    /// Returns a fresh id. Ids are never handed out twice, even after the
    /// node that carried one is deleted.
    pub fn allocate(&mut self) -> NodeId {
        loop {
            let candidate = NodeId::new(self.source.next_id());
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
            log::debug!("Id {} already in use, drawing another", candidate);
        }
    }
}

impl fmt::Debug for IdAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdAllocator")
            .field("issued", &self.issued.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Content;

    #[test]
    fn test_sequential_ids_skip_reserved() {
        let mut ids = IdAllocator::new(SequentialIds::new("b"));
        ids.reserve_tree(&[Block::new("b-1", "TX01", Content::new())]);

        assert_eq!(ids.allocate(), "b-2");
        assert_eq!(ids.allocate(), "b-3");
        assert!(ids.is_taken("b-1"));
    }

    #[test]
    fn test_uuid_ids_are_prefixed_and_distinct() {
        let mut ids = IdAllocator::new(UuidIds::new("blk"));
        let a = ids.allocate();
        let b = ids.allocate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("blk-"));
        assert_eq!(a.as_str().len(), "blk-".len() + 32);
    }

    struct Stuck(u32);

    impl IdSource for Stuck {
        fn next_id(&mut self) -> String {
            self.0 += 1;
            if self.0 < 3 { "same".into() } else { format!("x{}", self.0) }
        }
    }

    #[test]
    fn test_collisions_are_retried() {
        let mut ids = IdAllocator::new(Stuck(0));
        assert_eq!(ids.allocate(), "same");
        assert_eq!(ids.allocate(), "x3");
    }
}

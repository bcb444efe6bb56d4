//! Whole-tree queries, copy-on-write container edits and invariant checks.
//!
//! Containers may sit at any depth: every lookup walks into tab children of
//! container blocks and stops at leaves.

use std::collections::HashSet;

use crate::block::{Block, NodeId, Tab};
use crate::error::{TreeDiagnostics, TreeViolation};
use crate::registry::registry;
use crate::siblings;

/// Finds a block anywhere in the tree.
pub fn find_block<'a>(blocks: &'a [Block], id: &str) -> Option<&'a Block> {
    for block in blocks {
        if block.id == id {
            return Some(block);
        }
        for tab in block.tabs() {
            if let Some(found) = find_block(&tab.children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Finds a container block anywhere in the tree.
pub fn find_container<'a>(blocks: &'a [Block], id: &str) -> Option<&'a Block> {
    find_block(blocks, id).filter(|b| b.is_container())
}

/// Finds a tab of the container `container_id`.
pub fn find_tab<'a>(blocks: &'a [Block], container_id: &str, tab_id: &str) -> Option<&'a Tab> {
    find_container(blocks, container_id)?
        .tabs()
        .iter()
        .find(|tab| tab.id == tab_id)
}

/// Every container block in the tree, outermost first.
pub fn containers(blocks: &[Block]) -> Vec<&Block> {
    let mut found = Vec::new();
    collect_containers(blocks, &mut found);
    found
}

fn collect_containers<'a>(blocks: &'a [Block], found: &mut Vec<&'a Block>) {
    for block in blocks.iter().filter(|b| b.is_container()) {
        found.push(block);
        for tab in block.tabs() {
            collect_containers(&tab.children, found);
        }
    }
}

/// Every block and tab id in the tree.
pub fn collect_ids(blocks: &[Block]) -> HashSet<NodeId> {
    let mut ids = HashSet::new();
    for block in blocks {
        collect_subtree_ids(block, &mut ids);
    }
    ids
}

/// Ids of a block, its tabs and everything nested below it.
pub fn subtree_ids(block: &Block) -> HashSet<NodeId> {
    let mut ids = HashSet::new();
    collect_subtree_ids(block, &mut ids);
    ids
}

fn collect_subtree_ids(block: &Block, ids: &mut HashSet<NodeId>) {
    ids.insert(block.id.clone());
    for tab in block.tabs() {
        ids.insert(tab.id.clone());
        for child in &tab.children {
            collect_subtree_ids(child, ids);
        }
    }
}

/// Number of blocks in the tree, nested ones included.
pub fn count_blocks(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .map(|b| 1 + b.tabs().iter().map(|t| count_blocks(&t.children)).sum::<usize>())
        .sum()
}

/// Replaces the container `container_id` with `f(container)`.
///
/// Returns the new tree, or `None` when the container does not exist or
/// `f` declines by returning `None`. The input is never modified.
pub fn map_container<F>(blocks: &[Block], container_id: &str, f: F) -> Option<Vec<Block>>
where
    F: FnOnce(&Block) -> Option<Block>,
{
    let mut f = Some(f);
    map_container_in(blocks, container_id, &mut f)
}

fn map_container_in<F>(blocks: &[Block], container_id: &str, f: &mut Option<F>) -> Option<Vec<Block>>
where
    F: FnOnce(&Block) -> Option<Block>,
{
    for (i, block) in blocks.iter().enumerate() {
        if block.id == container_id && block.is_container() {
            let replaced = f.take()?(block)?;
            let mut next = blocks.to_vec();
            next[i] = replaced;
            return Some(next);
        }
        for (j, tab) in block.tabs().iter().enumerate() {
            if let Some(children) = map_container_in(&tab.children, container_id, f) {
                let mut tabs = block.tabs().to_vec();
                tabs[j].children = children;
                let mut next = blocks.to_vec();
                next[i] = block.clone().with_tabs(tabs);
                return Some(next);
            }
        }
    }
    None
}

/// Replaces the tab list of the container `container_id` with `f(tabs)`.
pub fn map_tabs<F>(blocks: &[Block], container_id: &str, f: F) -> Option<Vec<Block>>
where
    F: FnOnce(&[Tab]) -> Option<Vec<Tab>>,
{
    map_container(blocks, container_id, |container| {
        let tabs = f(container.tabs())?;
        Some(container.clone().with_tabs(tabs))
    })
}

/// Replaces the children of one tab with `f(children)`.
pub fn map_tab_children<F>(
    blocks: &[Block],
    container_id: &str,
    tab_id: &str,
    f: F,
) -> Option<Vec<Block>>
where
    F: FnOnce(&[Block]) -> Vec<Block>,
{
    map_tabs(blocks, container_id, |tabs| {
        let index = tabs.iter().position(|t| t.id == tab_id)?;
        let mut next = tabs.to_vec();
        next[index].children = f(&tabs[index].children);
        Some(next)
    })
}

/// Checks identity, order density, containment and nesting rules for the
/// whole tree.
pub fn validate(blocks: &[Block]) -> TreeDiagnostics {
    let mut diagnostics = TreeDiagnostics::new();
    let mut seen = HashSet::new();
    validate_list(blocks, None, &mut seen, &mut diagnostics);
    diagnostics
}

fn validate_list(
    blocks: &[Block],
    parent: Option<&NodeId>,
    seen: &mut HashSet<NodeId>,
    diagnostics: &mut TreeDiagnostics,
) {
    let mut orders: Vec<usize> = blocks.iter().map(|b| b.order).collect();
    orders.sort_unstable();
    if orders.iter().enumerate().any(|(i, &order)| order != i) {
        diagnostics.push(TreeViolation::OrderNotDense {
            parent: parent.cloned(),
            found: blocks.iter().map(|b| b.order).collect(),
        });
    }

    for block in blocks {
        if !seen.insert(block.id.clone()) {
            diagnostics.push(TreeViolation::DuplicateId(block.id.clone()));
        }
        if block.children.is_some() && !block.is_container() {
            diagnostics.push(TreeViolation::ChildrenOnLeaf(block.id.clone()));
        }
        for tab in block.tabs() {
            if !seen.insert(tab.id.clone()) {
                diagnostics.push(TreeViolation::DuplicateId(tab.id.clone()));
            }
            for child in &tab.children {
                if !accepts(block, child) {
                    diagnostics.push(TreeViolation::NestingNotAllowed {
                        container: block.id.clone(),
                        block: child.id.clone(),
                    });
                }
            }
            validate_list(&tab.children, Some(&tab.id), seen, diagnostics);
        }
    }
}

/// Nesting rule of the built-in registry. Unregistered container or child
/// types are not judged.
fn accepts(container: &Block, child: &Block) -> bool {
    let registry = registry();
    match (registry.get(&container.block_type), child.family()) {
        (Some(_), Some(family)) => registry.allows_nested(&container.block_type, family),
        _ => true,
    }
}

/// Repairs a loaded tree.
///
/// Every sibling list is stably sorted by `order` and renumbered, and tabs
/// are dropped from non-container blocks. Duplicate ids cannot be repaired
/// without changing identity, so they are only reported.
pub fn normalize(blocks: &[Block]) -> (Vec<Block>, TreeDiagnostics) {
    let diagnostics = validate(blocks);
    for violation in &diagnostics.violations {
        match violation {
            TreeViolation::OrderNotDense { .. } => log::debug!("Normalizing tree: {}", violation),
            _ => log::warn!("Loaded tree is inconsistent: {}", violation),
        }
    }
    (normalize_list(blocks), diagnostics)
}

/// Sorts and renumbers every sibling list and strips tabs from leaves.
pub(crate) fn normalize_list(blocks: &[Block]) -> Vec<Block> {
    siblings::normalize(blocks)
        .into_iter()
        .map(|mut block| {
            if block.is_container() {
                let tabs = block
                    .tabs()
                    .iter()
                    .map(|tab| tab.clone().with_children(normalize_list(&tab.children)))
                    .collect();
                block.children = Some(tabs);
            } else {
                block.children = None;
            }
            block
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Content;

    fn leaf(id: &str, order: usize) -> Block {
        Block::new(id, "TX01", Content::new()).with_order(order)
    }

    fn page() -> Vec<Block> {
        let tabs = vec![
            Tab::new("tab1", "One").with_children(vec![leaf("n1", 0), leaf("n2", 1)]),
            Tab::new("tab2", "Two"),
        ];
        vec![
            leaf("a", 0),
            Block::new("c", "TB01", Content::new()).with_order(1).with_tabs(tabs),
        ]
    }

    #[test]
    fn test_find_nested_block_and_tab() {
        let blocks = page();
        assert_eq!(find_block(&blocks, "n2").unwrap().order, 1);
        assert_eq!(find_tab(&blocks, "c", "tab2").unwrap().title, "Two");
        assert!(find_tab(&blocks, "a", "tab2").is_none());
        assert!(find_container(&blocks, "a").is_none());
    }

    #[test]
    fn test_collect_and_count() {
        let blocks = page();
        let ids = collect_ids(&blocks);
        assert_eq!(ids.len(), 6);
        assert!(ids.contains("tab1"));
        assert_eq!(count_blocks(&blocks), 4);
        assert_eq!(containers(&blocks).len(), 1);
    }

    #[test]
    fn test_map_tab_children_is_copy_on_write() {
        let blocks = page();
        let next = map_tab_children(&blocks, "c", "tab2", |children| {
            siblings::insert(children, leaf("n3", 0))
        })
        .unwrap();

        assert_eq!(find_tab(&next, "c", "tab2").unwrap().children.len(), 1);
        assert!(find_tab(&blocks, "c", "tab2").unwrap().children.is_empty());
        assert_eq!(next[0], blocks[0]);
    }

    #[test]
    fn test_map_unknown_targets() {
        let blocks = page();
        assert!(map_tab_children(&blocks, "c", "nope", |c| c.to_vec()).is_none());
        assert!(map_tab_children(&blocks, "nope", "tab1", |c| c.to_vec()).is_none());
        assert!(map_tabs(&blocks, "a", |t| Some(t.to_vec())).is_none());
    }

    #[test]
    fn test_map_container_at_depth() {
        let inner = Block::new("inner", "TB02", Content::new())
            .with_tabs(vec![Tab::new("it", "Inner")]);
        let outer = Block::new("outer", "TB01", Content::new())
            .with_tabs(vec![Tab::new("ot", "Outer").with_children(vec![inner])]);

        let next = map_tab_children(&[outer], "inner", "it", |c| {
            siblings::insert(c, leaf("deep", 0))
        })
        .unwrap();
        assert!(find_block(&next, "deep").is_some());
    }

    #[test]
    fn test_validate_reports_violations() {
        let mut blocks = page();
        assert!(validate(&blocks).is_clean());

        blocks[0].order = 5;
        blocks[0].children = Some(vec![Tab::new("n1", "dup")]);
        let diagnostics = validate(&blocks);
        assert!(diagnostics.violations.iter().any(|v| matches!(v, TreeViolation::OrderNotDense { parent: None, .. })));
        assert!(diagnostics.violations.contains(&TreeViolation::ChildrenOnLeaf("a".into())));
        assert!(diagnostics.violations.contains(&TreeViolation::DuplicateId("n1".into())));
    }

    #[test]
    fn test_validate_reports_tabs_inside_tabs() {
        let inner = Block::new("inner", "TB02", Content::new()).with_tabs(vec![Tab::new("it", "Inner")]);
        let outer = Block::new("outer", "TB01", Content::new())
            .with_tabs(vec![Tab::new("ot", "Outer").with_children(vec![inner])]);

        let diagnostics = validate(&[outer]);
        assert_eq!(
            diagnostics.violations,
            vec![TreeViolation::NestingNotAllowed {
                container: "outer".into(),
                block: "inner".into(),
            }]
        );
        assert!(!diagnostics.violations[0].is_repairable());
    }

    #[test]
    fn test_normalize_repairs_order_and_shape() {
        let mut blocks = page();
        blocks[0].order = 7;
        blocks[0].children = Some(vec![]);

        let (fixed, diagnostics) = normalize(&blocks);
        assert_eq!(diagnostics.count(), 2);
        assert_eq!(fixed[0].id, "c");
        assert_eq!(fixed[1].id, "a");
        assert!(fixed[1].children.is_none());
        assert!(validate(&fixed).is_clean());
    }
}

//! Copy-on-write operations over one sibling list.
//!
//! The same functions serve the page's top-level blocks and the children of
//! a tab. Every operation takes a slice and returns a new list whose orders
//! are the dense sequence `0..N-1`; the input is never touched.

use serde::{Deserialize, Serialize};

use crate::block::{Block, Content, NodeId, Tab};
use crate::content::{self, TABS_KEY, TabPatch};
use crate::registry::{Family, MergeRule};
use crate::tree;

/// Direction of an adjacent move.
///
/// `Up` and `Left` move towards the start of the list; `Down` and `Right`
/// towards its end. Horizontal tab strips use the latter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards index 0.
    Up,
    /// Towards the end.
    Down,
    /// Towards index 0.
    Left,
    /// Towards the end.
    Right,
}

impl Direction {
    fn is_backward(self) -> bool {
        matches!(self, Direction::Up | Direction::Left)
    }
}

/// Something that lives in an ordered sibling list.
pub trait Sibling: Clone {
    /// Identity of the node.
    fn node_id(&self) -> &NodeId;

    /// Records the node's position after a reorder. Nodes ordered purely by
    /// array position keep the default no-op.
    fn set_position(&mut self, _index: usize) {}
}

impl Sibling for Block {
    fn node_id(&self) -> &NodeId {
        &self.id
    }

    fn set_position(&mut self, index: usize) {
        self.order = index;
    }
}

impl Sibling for Tab {
    fn node_id(&self) -> &NodeId {
        &self.id
    }
}

/// Index of the neighbor in `direction`, `None` at the boundary.
pub fn neighbor_index(len: usize, index: usize, direction: Direction) -> Option<usize> {
    if index >= len {
        return None;
    }
    if direction.is_backward() {
        index.checked_sub(1)
    } else {
        Some(index + 1).filter(|&next| next < len)
    }
}

fn renumber<T: Sibling>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_position(index);
    }
}

fn position<T: Sibling>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.node_id() == id)
}

/// Appends `item` at the end.
pub fn push_item<T: Sibling>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    next.push(item);
    renumber(&mut next);
    next
}

/// Inserts `item` right after the node `anchor`, or at the end if the anchor
/// is missing.
pub fn insert_item_after<T: Sibling>(items: &[T], anchor: &str, item: T) -> Vec<T> {
    let mut next = items.to_vec();
    let at = position(items, anchor).map_or(next.len(), |i| i + 1);
    next.insert(at, item);
    renumber(&mut next);
    next
}

/// Drops the node `id`, keeping the relative order of the rest.
pub fn remove_item<T: Sibling>(items: &[T], id: &str) -> Vec<T> {
    let mut next: Vec<T> = items
        .iter()
        .filter(|item| item.node_id() != id)
        .cloned()
        .collect();
    renumber(&mut next);
    next
}

/// Swaps the node `id` with its neighbor in `direction`.
///
/// At a boundary, or when `id` is missing, the list comes back unchanged.
pub fn swap_item<T: Sibling>(items: &[T], id: &str, direction: Direction) -> Vec<T> {
    let mut next = items.to_vec();
    if let Some(index) = position(items, id) {
        if let Some(other) = neighbor_index(items.len(), index, direction) {
            next.swap(index, other);
        }
    }
    renumber(&mut next);
    next
}

/// Whether the node `id` has a neighbor in `direction`.
pub fn can_swap<T: Sibling>(items: &[T], id: &str, direction: Direction) -> bool {
    position(items, id).is_some_and(|i| neighbor_index(items.len(), i, direction).is_some())
}

/// Appends `block` with `order = list.len()`.
pub fn insert(list: &[Block], block: Block) -> Vec<Block> {
    push_item(list, block)
}

/// Removes the block `id` and re-densifies the orders of the survivors.
pub fn remove(list: &[Block], id: &str) -> Vec<Block> {
    remove_item(list, id)
}

/// Swaps the block `id` with its neighbor; a no-op at the boundary.
pub fn move_adjacent(list: &[Block], id: &str, direction: Direction) -> Vec<Block> {
    swap_item(list, id, direction)
}

/// Applies `patch` to the content of block `id` using its family's merge
/// rule. `id`, `type` and `order` are left untouched, as is every other block.
pub fn update_content(list: &[Block], id: &str, patch: &Content) -> Vec<Block> {
    list.iter()
        .map(|block| {
            if block.id == id {
                patched(block, patch)
            } else {
                block.clone()
            }
        })
        .collect()
}

/// Returns `block` with `patch` applied.
///
/// Unrecognized types merge shallowly. The `tabs` value of a container
/// patch is rebuilt against the container's current tabs (see
/// [`TabPatch`]); one that does not decode, or that would repeat an id or
/// nest a block the container does not accept, is ignored.
pub fn patched(block: &Block, patch: &Content) -> Block {
    let rule = block.family().map_or(MergeRule::Shallow, Family::merge_rule);
    let mut next = block.clone();
    next.content = content::merge(rule, &block.content, patch);

    if rule == MergeRule::ShallowWithTabs {
        if let Some(value) = patch.get(TABS_KEY) {
            match serde_json::from_value::<Vec<TabPatch>>(value.clone()) {
                Ok(entries) => {
                    let candidate = next.clone().with_tabs(patched_tabs(block.tabs(), entries));
                    let diagnostics = tree::validate(std::slice::from_ref(&candidate));
                    match diagnostics.violations.iter().find(|v| !v.is_repairable()) {
                        Some(violation) => {
                            log::warn!("Ignoring tabs patch for {}: {}", block.id, violation)
                        }
                        None => next = candidate,
                    }
                }
                Err(e) => log::debug!("Ignoring malformed tabs patch for {}: {}", block.id, e),
            }
        }
    }
    next
}

fn patched_tabs(current: &[Tab], entries: Vec<TabPatch>) -> Vec<Tab> {
    entries
        .into_iter()
        .filter_map(|entry| match entry.children {
            Some(children) => Some(
                Tab::new(entry.id, entry.title.unwrap_or_default())
                    .with_children(tree::normalize_list(&children)),
            ),
            None => {
                let Some(live) = current.iter().find(|tab| tab.id == entry.id) else {
                    log::debug!("Skipping tab {}: no longer in the container", entry.id);
                    return None;
                };
                let mut tab = live.clone();
                if let Some(title) = entry.title {
                    tab.title = title;
                }
                Some(tab)
            }
        })
        .collect()
}

/// Stable sort by `order`; ties keep their array order.
pub fn sorted(list: &[Block]) -> Vec<Block> {
    let mut next = list.to_vec();
    next.sort_by_key(|block| block.order);
    next
}

/// Stable sort by `order`, then renumber densely.
pub fn normalize(list: &[Block]) -> Vec<Block> {
    let mut next = sorted(list);
    renumber(&mut next);
    next
}

/// True when orders equal array positions.
pub fn is_dense(list: &[Block]) -> bool {
    list.iter().enumerate().all(|(i, block)| block.order == i)
}

//! Ephemeral UI state consulted while rendering.
//!
//! Which tab is selected, which vertical sections and which answers are
//! open is never part of the stored tree. It is keyed by block and tab id,
//! passed explicitly into every render, and pruned when ids disappear.

use std::collections::{BTreeSet, HashMap, HashSet};

use pageblocks_core::{Block, NodeId, tree};

/// Selection and open/closed state of containers and accordions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    selected_tabs: HashMap<NodeId, NodeId>,
    open_sections: HashSet<(NodeId, NodeId)>,
    open_answers: HashMap<NodeId, BTreeSet<usize>>,
}

impl ViewState {
    /// Everything collapsed, every horizontal container on its first tab.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no state has been recorded.
    pub fn is_empty(&self) -> bool {
        self.selected_tabs.is_empty() && self.open_sections.is_empty() && self.open_answers.is_empty()
    }

    /// Selects `tab` in the horizontal container `container`.
    pub fn select_tab(&mut self, container: &NodeId, tab: &NodeId) {
        self.selected_tabs.insert(container.clone(), tab.clone());
    }

    /// Forgets the selection of `container`; it falls back to its first tab.
    pub fn clear_selected_tab(&mut self, container: &NodeId) {
        self.selected_tabs.remove(container);
    }

    /// Explicitly selected tab of `container`, if any.
    pub fn selected_tab(&self, container: &str) -> Option<&NodeId> {
        self.selected_tabs.get(container)
    }

    /// Flips a vertical section and returns its new state.
    pub fn toggle_section(&mut self, container: &NodeId, tab: &NodeId) -> bool {
        let open = !self.is_section_open(container, tab);
        self.set_section_open(container, tab, open);
        open
    }

    /// Opens or closes a vertical section.
    pub fn set_section_open(&mut self, container: &NodeId, tab: &NodeId, open: bool) {
        let key = (container.clone(), tab.clone());
        if open {
            self.open_sections.insert(key);
        } else {
            self.open_sections.remove(&key);
        }
    }

    /// Whether a vertical section is expanded. Sections start collapsed.
    pub fn is_section_open(&self, container: &NodeId, tab: &NodeId) -> bool {
        self.open_sections
            .contains(&(container.clone(), tab.clone()))
    }

    /// Flips answer `index` of the Q&A block `block` and returns its new
    /// state.
    ///
    /// With `single_open`, opening an answer closes every other answer of
    /// the same block.
    pub fn toggle_qa_item(&mut self, block: &NodeId, index: usize, single_open: bool) -> bool {
        let open = self.open_answers.entry(block.clone()).or_default();
        if open.remove(&index) {
            if open.is_empty() {
                self.open_answers.remove(block);
            }
            return false;
        }
        if single_open {
            open.clear();
        }
        open.insert(index);
        true
    }

    /// Whether answer `index` of `block` is expanded.
    pub fn is_qa_open(&self, block: &str, index: usize) -> bool {
        self.open_answers
            .get(block)
            .is_some_and(|open| open.contains(&index))
    }

    /// Open answer indices of `block`, ascending.
    pub fn open_answers(&self, block: &str) -> impl Iterator<Item = usize> + '_ {
        self.open_answers
            .get(block)
            .into_iter()
            .flat_map(|open| open.iter().copied())
    }

    /// Drops state that refers to ids not in `ids`.
    pub fn retain_present(&mut self, ids: &HashSet<NodeId>) {
        self.selected_tabs
            .retain(|container, tab| ids.contains(container) && ids.contains(tab));
        self.open_sections
            .retain(|(container, tab)| ids.contains(container) && ids.contains(tab));
        self.open_answers.retain(|block, _| ids.contains(block));
    }

    /// Drops state for everything no longer present in `blocks`.
    pub fn retain_tree(&mut self, blocks: &[Block]) {
        self.retain_present(&tree::collect_ids(blocks));
    }
}

//! Per-container sub-editor: which tab is being edited and its add flow.
//!
//! ```text
//! NoTabSelected -> TabSelected(Closed) -> ChoosingFamily -> ChoosingVariant -> TabSelected(Closed)
//! ```
//!
//! Cancelling from either choosing state returns to viewing the tab without
//! touching the tree.

use pageblocks_core::{Family, NodeId, Tab};

use crate::picker::Picker;

/// State of one container's sub-editor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TabEditor {
    /// The container has no tab to show.
    #[default]
    NoTabSelected,
    /// Viewing `tab`, possibly while adding a block to it.
    TabSelected {
        /// Selected tab.
        tab: NodeId,
        /// Add flow inside the tab.
        picker: Picker,
    },
}

impl TabEditor {
    /// Viewing `tab` with the add flow closed.
    pub fn viewing(tab: NodeId) -> Self {
        TabEditor::TabSelected {
            tab,
            picker: Picker::Closed,
        }
    }

    /// Initial state for a container: its first tab, or nothing.
    pub fn for_tabs(tabs: &[Tab]) -> Self {
        tabs.first()
            .map_or(TabEditor::NoTabSelected, |tab| Self::viewing(tab.id.clone()))
    }

    /// Selected tab, if any.
    pub fn selected(&self) -> Option<&NodeId> {
        match self {
            TabEditor::TabSelected { tab, .. } => Some(tab),
            TabEditor::NoTabSelected => None,
        }
    }

    /// Add flow state; always closed without a selected tab.
    pub fn picker(&self) -> Picker {
        match self {
            TabEditor::TabSelected { picker, .. } => *picker,
            TabEditor::NoTabSelected => Picker::Closed,
        }
    }

    fn update_picker(&mut self, f: impl FnOnce(Picker) -> Picker) -> bool {
        match self {
            TabEditor::TabSelected { picker, .. } => {
                let next = f(*picker);
                let changed = next != *picker;
                *picker = next;
                changed
            }
            TabEditor::NoTabSelected => false,
        }
    }

    /// Starts adding a block to the selected tab.
    pub fn begin_add(&mut self) -> bool {
        self.update_picker(Picker::open)
    }

    /// Picks the family of the block being added.
    pub fn choose_family(&mut self, family: Family) -> bool {
        self.update_picker(|p| p.choose_family(family))
    }

    /// One step back in the add flow.
    pub fn back(&mut self) -> bool {
        self.update_picker(Picker::back)
    }

    /// Leaves the add flow, back to viewing.
    pub fn cancel_add(&mut self) -> bool {
        self.update_picker(Picker::cancel)
    }

    /// Re-anchors the selection after the container's tabs changed.
    ///
    /// A selection whose tab is gone moves to the first remaining tab, or
    /// to no tab at all. Returns true when the selection changed.
    pub fn reconcile(&mut self, tabs: &[Tab]) -> bool {
        let still_there = self
            .selected()
            .is_some_and(|selected| tabs.iter().any(|tab| &tab.id == selected));
        if still_there {
            return false;
        }
        let next = Self::for_tabs(tabs);
        let changed = next != *self;
        *self = next;
        changed
    }
}

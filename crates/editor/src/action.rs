//! Serializable editing commands, so a host UI can drive the engine with
//! JSON messages.

use pageblocks_core::{BlockError, Content, Family, NodeId};
use pageblocks_core::siblings::Direction;
use serde::{Deserialize, Serialize};

use crate::editor::{BlockRef, Editor, Mode};

/// One command of the editing engine.
///
/// Block operations take an optional `container`/`tab` pair; without it
/// they address the page's top-level list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditorAction {
    /// Appends a block built from a registry template.
    AddBlock {
        /// Family of the new block
        family: Family,
        /// Sub-variant type tag
        variant: String,
        /// Target tab, top-level when absent
        #[serde(flatten)]
        scope: Option<TabScope>,
    },
    /// Applies a content patch.
    UpdateBlock {
        /// Block id
        id: NodeId,
        /// Content patch
        patch: Content,
        /// Owning tab, top-level when absent
        #[serde(flatten)]
        scope: Option<TabScope>,
    },
    /// Removes a block.
    RemoveBlock {
        /// Block id
        id: NodeId,
        /// Owning tab, top-level when absent
        #[serde(flatten)]
        scope: Option<TabScope>,
    },
    /// Swaps a block with its neighbor.
    MoveBlock {
        /// Block id
        id: NodeId,
        /// Towards the start or the end
        direction: Direction,
        /// Owning tab, top-level when absent
        #[serde(flatten)]
        scope: Option<TabScope>,
    },
    /// Copies a block right after itself.
    DuplicateBlock {
        /// Block id
        id: NodeId,
        /// Owning tab, top-level when absent
        #[serde(flatten)]
        scope: Option<TabScope>,
    },
    /// Appends an empty tab.
    AddTab {
        /// Container block id
        container: NodeId,
    },
    /// Removes a tab and its blocks.
    RemoveTab {
        /// Container block id
        container: NodeId,
        /// Tab id
        tab: NodeId,
    },
    /// Changes a tab title.
    RenameTab {
        /// Container block id
        container: NodeId,
        /// Tab id
        tab: NodeId,
        /// New title
        title: String,
    },
    /// Swaps a tab with its neighbor.
    MoveTab {
        /// Container block id
        container: NodeId,
        /// Tab id
        tab: NodeId,
        /// Towards the start or the end
        direction: Direction,
    },
    /// Shows a tab.
    SelectTab {
        /// Container block id
        container: NodeId,
        /// Tab id
        tab: NodeId,
    },
    /// Expands or collapses a vertical section.
    ToggleSection {
        /// Container block id
        container: NodeId,
        /// Tab id
        tab: NodeId,
    },
    /// Expands or collapses one answer.
    ToggleQaItem {
        /// Q&A block id
        id: NodeId,
        /// Item position
        index: usize,
    },
    /// Opens a detail form.
    OpenDetail {
        /// Block to edit
        target: BlockRef,
    },
    /// Applies the open form.
    CommitDetail,
    /// Discards the open form.
    CancelDetail,
    /// Switches between editing and preview.
    SetMode {
        /// Mode to enter
        mode: Mode,
    },
}

/// The tab whose children a block operation addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabScope {
    /// Container block id
    pub container: NodeId,
    /// Tab id within the container
    pub tab: NodeId,
}

impl EditorAction {
    /// Parses one command.
    pub fn from_json(source: &str) -> Result<Self, BlockError> {
        Ok(serde_json::from_str(source)?)
    }
}

impl Editor {
    /// Runs `action`. Returns true when the tree or the UI state changed.
    pub fn apply(&mut self, action: &EditorAction) -> bool {
        match action {
            EditorAction::AddBlock {
                family,
                variant,
                scope,
            } => match scope {
                Some(s) => self
                    .add_block_to_container(s.container.as_str(), s.tab.as_str(), *family, variant)
                    .is_some(),
                None => self.add_block(*family, variant).is_some(),
            },
            EditorAction::UpdateBlock { id, patch, scope } => match scope {
                Some(s) => self.update_nested_block(s.container.as_str(), s.tab.as_str(), id.as_str(), patch),
                None => self.update_block(id.as_str(), patch),
            },
            EditorAction::RemoveBlock { id, scope } => match scope {
                Some(s) => self.remove_nested_block(s.container.as_str(), s.tab.as_str(), id.as_str()),
                None => self.remove_block(id.as_str()),
            },
            EditorAction::MoveBlock {
                id,
                direction,
                scope,
            } => match scope {
                Some(s) => self.move_nested_block(
                    s.container.as_str(),
                    s.tab.as_str(),
                    id.as_str(),
                    *direction,
                ),
                None => self.move_block(id.as_str(), *direction),
            },
            EditorAction::DuplicateBlock { id, scope } => match scope {
                Some(s) => self
                    .duplicate_nested_block(s.container.as_str(), s.tab.as_str(), id.as_str())
                    .is_some(),
                None => self.duplicate_block(id.as_str()).is_some(),
            },
            EditorAction::AddTab { container } => self.add_tab(container.as_str()).is_some(),
            EditorAction::RemoveTab { container, tab } => self.remove_tab(container.as_str(), tab.as_str()),
            EditorAction::RenameTab {
                container,
                tab,
                title,
            } => self.rename_tab(container.as_str(), tab.as_str(), title),
            EditorAction::MoveTab {
                container,
                tab,
                direction,
            } => self.move_tab(container.as_str(), tab.as_str(), *direction),
            EditorAction::SelectTab { container, tab } => self.select_tab(container.as_str(), tab.as_str()),
            EditorAction::ToggleSection { container, tab } => {
                let known = pageblocks_core::tree::find_tab(self.blocks(), container.as_str(), tab.as_str()).is_some();
                self.toggle_section(container.as_str(), tab.as_str());
                known
            }
            EditorAction::ToggleQaItem { id, index } => {
                let known = pageblocks_core::tree::find_block(self.blocks(), id.as_str())
                    .is_some_and(|b| b.family() == Some(Family::Qa));
                self.toggle_qa_item(id.as_str(), *index);
                known
            }
            EditorAction::OpenDetail { target } => self.open_detail(target.clone()),
            EditorAction::CommitDetail => self.commit_detail(),
            EditorAction::CancelDetail => {
                let open = self.detail().is_some();
                self.cancel_detail();
                open
            }
            EditorAction::SetMode { mode } => {
                let changed = self.mode() != *mode;
                self.set_mode(*mode);
                changed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageblocks_core::{Block, EditorOptions, SequentialIds};

    #[test]
    fn test_parse_scoped_and_unscoped() {
        let top = EditorAction::from_json(r#"{"action":"remove_block","id":"b1"}"#).unwrap();
        assert_eq!(
            top,
            EditorAction::RemoveBlock {
                id: "b1".into(),
                scope: None
            }
        );

        let nested = EditorAction::from_json(
            r#"{"action":"move_block","id":"n","direction":"up","container":"c","tab":"t"}"#,
        )
        .unwrap();
        assert_eq!(
            nested,
            EditorAction::MoveBlock {
                id: "n".into(),
                direction: Direction::Up,
                scope: Some(TabScope {
                    container: "c".into(),
                    tab: "t".into()
                }),
            }
        );
    }

    #[test]
    fn test_unknown_action_is_an_error() {
        assert!(matches!(
            EditorAction::from_json(r#"{"action":"explode"}"#),
            Err(BlockError::Json(_))
        ));
    }

    #[test]
    fn test_apply_runs_commands() {
        let mut editor =
            Editor::with_id_source(Vec::<Block>::new(), EditorOptions::default(), SequentialIds::new("x"));
        let add = EditorAction::from_json(r#"{"action":"add_block","family":"text","variant":"TX02"}"#).unwrap();
        assert!(editor.apply(&add));
        assert_eq!(editor.blocks()[0].block_type, "TX02");

        let stale = EditorAction::RemoveBlock {
            id: "nope".into(),
            scope: None,
        };
        assert!(!editor.apply(&stale));
        assert_eq!(editor.blocks().len(), 1);
    }
}

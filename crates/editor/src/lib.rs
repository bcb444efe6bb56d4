#![deny(missing_docs)]
//! Pageblocks editing engine: a stateful controller over one page's block
//! tree, with the add-block pickers, per-container tab sub-editors and
//! per-family detail forms of the admin panel.
//!
//! ```
//! use pageblocks_core::{Direction, Family};
//! use pageblocks_editor::Editor;
//!
//! let mut editor = Editor::default();
//! let first = editor.add_block(Family::Text, "TX01").unwrap();
//! editor.add_block(Family::Note, "NT01").unwrap();
//! assert!(editor.move_block(first.as_str(), Direction::Down));
//! assert_eq!(editor.blocks()[1].id, first);
//! ```

/// Serializable editing commands.
pub mod action;
/// Per-family detail forms.
pub mod detail;
/// The editing engine.
pub mod editor;
/// The family and sub-variant add flow.
pub mod picker;
/// Per-container tab sub-editor.
pub mod tab_editor;

pub use action::{EditorAction, TabScope};
pub use detail::DetailForm;
pub use editor::{BlockRef, Editor, Mode};
pub use picker::Picker;
pub use tab_editor::TabEditor;

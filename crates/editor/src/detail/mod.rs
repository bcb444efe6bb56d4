//! Per-family detail forms.
//!
//! A form snapshots a block's content when opened, buffers every edit, and
//! hands the engine nothing but a content patch on commit. Closing a form
//! without committing writes nothing.

mod button;
mod columns;
mod gallery;
mod image;
mod note;
mod qa;
mod table;
mod tabs;
mod text;
mod tiles;

pub use button::ButtonForm;
pub use columns::ColumnsForm;
pub use gallery::GalleryForm;
pub use image::ImageForm;
pub use note::NoteForm;
pub use qa::QaForm;
pub use table::TableForm;
pub use tabs::TabsForm;
pub use text::TextForm;
pub use tiles::TilesForm;

use pageblocks_core::content;
use pageblocks_core::siblings::{self, Direction};
use pageblocks_core::{Block, Content, Family, Registry};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// An original snapshot and the edited copy of a typed content view.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffered<T> {
    original: T,
    current: T,
}

impl<T> Buffered<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + Default,
{
    /// Decodes `content` into both copies.
    pub fn open(content: &Content) -> Self {
        Self::from_view(content::decode(content))
    }

    /// Starts from an already decoded view.
    pub fn from_view(view: T) -> Self {
        Self {
            original: view.clone(),
            current: view,
        }
    }

    /// The edited copy.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Mutable access to the edited copy.
    pub fn current_mut(&mut self) -> &mut T {
        &mut self.current
    }

    /// True when the edited copy differs from the snapshot.
    pub fn is_dirty(&self) -> bool {
        self.original != self.current
    }

    /// Drops every edit.
    pub fn reset(&mut self) {
        self.current = self.original.clone();
    }

    /// Shallow patch turning the snapshot into the edited copy.
    pub fn shallow_patch(&self) -> Content {
        content::diff(&content::encode(&self.original), &content::encode(&self.current))
    }

    /// The edited copy as complete content.
    pub fn full_content(&self) -> Content {
        content::encode(&self.current)
    }
}

/// Swaps item `index` with its neighbor; false at the boundary.
pub(crate) fn move_item<T>(items: &mut [T], index: usize, direction: Direction) -> bool {
    match siblings::neighbor_index(items.len(), index, direction) {
        Some(other) => {
            items.swap(index, other);
            true
        }
        None => false,
    }
}

/// Removes item `index`; false when out of range.
pub(crate) fn remove_item<T>(items: &mut Vec<T>, index: usize) -> bool {
    if index < items.len() {
        items.remove(index);
        true
    } else {
        false
    }
}

/// Empty strings are stored as absent.
pub(crate) fn optional(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// The open form of one block.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailForm {
    /// Rich text.
    Text(TextForm),
    /// Single button or button group.
    Button(ButtonForm),
    /// Questions and answers.
    Qa(QaForm),
    /// Note or quote.
    Note(NoteForm),
    /// Tab titles and order of a container.
    Tabs(TabsForm),
    /// Column texts.
    Columns(ColumnsForm),
    /// Single image.
    Image(ImageForm),
    /// Gallery images.
    Gallery(GalleryForm),
    /// Link tiles.
    Tiles(TilesForm),
    /// Table cells.
    Table(TableForm),
}

impl DetailForm {
    /// Opens the form matching the block's family.
    ///
    /// Blocks of unrecognized type have no form.
    pub fn open(block: &Block, registry: &Registry) -> Option<Self> {
        let options = registry.options_for(block);
        let form = match block.family()? {
            Family::Text => DetailForm::Text(TextForm::open(&block.content)),
            Family::Button => DetailForm::Button(ButtonForm::open(&block.content, options)),
            Family::Qa => DetailForm::Qa(QaForm::open(&block.content)),
            Family::Note => DetailForm::Note(NoteForm::open(&block.content)),
            Family::Tabs => DetailForm::Tabs(TabsForm::open(block.tabs())),
            Family::Columns => DetailForm::Columns(ColumnsForm::open(&block.content, options)),
            Family::Image => DetailForm::Image(ImageForm::open(&block.content, options)),
            Family::Gallery => DetailForm::Gallery(GalleryForm::open(&block.content, options)),
            Family::Tiles => DetailForm::Tiles(TilesForm::open(&block.content, options)),
            Family::Table => DetailForm::Table(TableForm::open(&block.content)),
        };
        Some(form)
    }

    /// Family the form edits.
    pub fn family(&self) -> Family {
        match self {
            DetailForm::Text(_) => Family::Text,
            DetailForm::Button(_) => Family::Button,
            DetailForm::Qa(_) => Family::Qa,
            DetailForm::Note(_) => Family::Note,
            DetailForm::Tabs(_) => Family::Tabs,
            DetailForm::Columns(_) => Family::Columns,
            DetailForm::Image(_) => Family::Image,
            DetailForm::Gallery(_) => Family::Gallery,
            DetailForm::Tiles(_) => Family::Tiles,
            DetailForm::Table(_) => Family::Table,
        }
    }

    /// True when committing would change the block.
    pub fn is_dirty(&self) -> bool {
        match self {
            DetailForm::Text(f) => f.is_dirty(),
            DetailForm::Button(f) => f.is_dirty(),
            DetailForm::Qa(f) => f.is_dirty(),
            DetailForm::Note(f) => f.is_dirty(),
            DetailForm::Tabs(f) => f.is_dirty(),
            DetailForm::Columns(f) => f.is_dirty(),
            DetailForm::Image(f) => f.is_dirty(),
            DetailForm::Gallery(f) => f.is_dirty(),
            DetailForm::Tiles(f) => f.is_dirty(),
            DetailForm::Table(f) => f.is_dirty(),
        }
    }

    /// Content patch for the block's merge rule.
    pub fn patch(&self) -> Content {
        match self {
            DetailForm::Text(f) => f.patch(),
            DetailForm::Button(f) => f.patch(),
            DetailForm::Qa(f) => f.patch(),
            DetailForm::Note(f) => f.patch(),
            DetailForm::Tabs(f) => f.patch(),
            DetailForm::Columns(f) => f.patch(),
            DetailForm::Image(f) => f.patch(),
            DetailForm::Gallery(f) => f.patch(),
            DetailForm::Tiles(f) => f.patch(),
            DetailForm::Table(f) => f.patch(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageblocks_core::content::NoteContent;
    use serde_json::json;

    #[test]
    fn test_unedited_buffer_has_empty_patch() {
        let mut content = Content::new();
        content.insert("html".into(), json!("<p>x</p>"));
        let buffer: Buffered<NoteContent> = Buffered::open(&content);
        assert!(!buffer.is_dirty());
        assert!(buffer.shallow_patch().is_empty());
    }

    #[test]
    fn test_reset_drops_edits() {
        let mut buffer = Buffered::from_view(NoteContent::default());
        buffer.current_mut().author = Some("Ada".into());
        assert!(buffer.is_dirty());
        buffer.reset();
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_open_dispatches_by_family() {
        let registry = pageblocks_core::registry();
        let block = Block::new("t", "TA01", Content::new());
        let form = DetailForm::open(&block, registry).unwrap();
        assert_eq!(form.family(), Family::Table);

        let unknown = Block::new("u", "ZZ01", Content::new());
        assert!(DetailForm::open(&unknown, registry).is_none());
    }

    #[test]
    fn test_move_and_remove_helpers() {
        let mut items = vec![1, 2, 3];
        assert!(move_item(&mut items, 0, Direction::Down));
        assert_eq!(items, [2, 1, 3]);
        assert!(!move_item(&mut items, 2, Direction::Down));
        assert!(remove_item(&mut items, 1));
        assert!(!remove_item(&mut items, 9));
        assert_eq!(items, [2, 3]);
        assert_eq!(optional("  "), None);
    }
}

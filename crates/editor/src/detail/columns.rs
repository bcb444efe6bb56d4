use pageblocks_core::content::{Column, ColumnsContent};
use pageblocks_core::{Content, VariantOptions};

use super::Buffered;

/// Column texts; the column count is fixed by the sub-variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnsForm {
    buffer: Buffered<ColumnsContent>,
}

impl ColumnsForm {
    /// Snapshots `content`, padded or cut to the sub-variant's column count.
    pub fn open(content: &Content, options: &VariantOptions) -> Self {
        let mut view: ColumnsContent = pageblocks_core::content::decode(content);
        if let Some(count) = options.columns {
            view.columns.resize_with(count, Column::default);
        }
        Self {
            buffer: Buffered::from_view(view),
        }
    }

    /// Column texts left to right.
    pub fn columns(&self) -> &[Column] {
        &self.buffer.current().columns
    }

    /// Replaces the text of column `index`; false when out of range.
    pub fn set_column(&mut self, index: usize, html: impl Into<String>) -> bool {
        match self.buffer.current_mut().columns.get_mut(index) {
            Some(column) => {
                column.html = html.into();
                true
            }
            None => false,
        }
    }

    /// True when there is something to commit.
    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Patch replacing the whole `columns` array.
    pub fn patch(&self) -> Content {
        self.buffer.shallow_patch()
    }
}

use pageblocks_core::Content;
use pageblocks_core::content::TableContent;

use super::{Buffered, optional};

/// Table grid form.
///
/// Tables merge by replacement, so the patch is always the complete
/// content.
#[derive(Debug, Clone, PartialEq)]
pub struct TableForm {
    buffer: Buffered<TableContent>,
}

impl TableForm {
    /// Snapshots `content`.
    pub fn open(content: &Content) -> Self {
        Self {
            buffer: Buffered::open(content),
        }
    }

    /// Current content.
    pub fn table(&self) -> &TableContent {
        self.buffer.current()
    }

    /// Appends an empty row as wide as the widest row.
    pub fn add_row(&mut self) {
        let table = self.buffer.current_mut();
        let width = table.width().max(1);
        table.rows.push(vec![String::new(); width]);
    }

    /// Removes row `index`.
    pub fn remove_row(&mut self, index: usize) -> bool {
        super::remove_item(&mut self.buffer.current_mut().rows, index)
    }

    /// Appends an empty cell to every row, squaring ragged rows first.
    pub fn add_column(&mut self) {
        let table = self.buffer.current_mut();
        let width = table.width() + 1;
        for row in &mut table.rows {
            row.resize(width, String::new());
        }
    }

    /// Removes column `index` from every row that has it.
    pub fn remove_column(&mut self, index: usize) -> bool {
        let table = self.buffer.current_mut();
        if index >= table.width() {
            return false;
        }
        for row in &mut table.rows {
            if index < row.len() {
                row.remove(index);
            }
        }
        true
    }

    /// Sets a cell, padding a short row up to the column.
    ///
    /// Refused outside the current grid.
    pub fn set_cell(&mut self, row: usize, column: usize, text: impl Into<String>) -> bool {
        let table = self.buffer.current_mut();
        let width = table.width();
        let Some(cells) = table.rows.get_mut(row) else {
            return false;
        };
        if column >= width {
            return false;
        }
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = text.into();
        true
    }

    /// Overrides whether the first row is a header; `None` defers to the
    /// sub-variant.
    pub fn set_header(&mut self, header: Option<bool>) {
        self.buffer.current_mut().header = header;
    }

    /// Sets the caption; blank clears it.
    pub fn set_caption(&mut self, caption: &str) {
        self.buffer.current_mut().caption = optional(caption);
    }

    /// True when there is something to commit.
    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// The complete edited content.
    pub fn patch(&self) -> Content {
        self.buffer.full_content()
    }
}

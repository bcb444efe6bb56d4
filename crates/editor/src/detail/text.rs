use pageblocks_core::Content;
use pageblocks_core::content::TextContent;

use super::Buffered;

/// Rich-text form.
#[derive(Debug, Clone, PartialEq)]
pub struct TextForm {
    buffer: Buffered<TextContent>,
}

impl TextForm {
    /// Snapshots `content`.
    pub fn open(content: &Content) -> Self {
        Self {
            buffer: Buffered::open(content),
        }
    }

    /// Current rich text.
    pub fn html(&self) -> &str {
        &self.buffer.current().html
    }

    /// Replaces the rich text with already sanitized HTML.
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.buffer.current_mut().html = html.into();
    }

    /// True when there is something to commit.
    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Patch for the edited fields.
    pub fn patch(&self) -> Content {
        self.buffer.shallow_patch()
    }
}

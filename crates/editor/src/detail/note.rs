use pageblocks_core::Content;
use pageblocks_core::content::NoteContent;

use super::{Buffered, optional};

/// Note and quote form.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteForm {
    buffer: Buffered<NoteContent>,
}

impl NoteForm {
    /// Snapshots `content`.
    pub fn open(content: &Content) -> Self {
        Self {
            buffer: Buffered::open(content),
        }
    }

    /// Current content.
    pub fn note(&self) -> &NoteContent {
        self.buffer.current()
    }

    /// Sets the heading; blank clears it.
    pub fn set_title(&mut self, title: &str) {
        self.buffer.current_mut().title = optional(title);
    }

    /// Sets the body.
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.buffer.current_mut().html = html.into();
    }

    /// Sets the quote attribution; blank clears it.
    pub fn set_author(&mut self, author: &str) {
        self.buffer.current_mut().author = optional(author);
    }

    /// True when there is something to commit.
    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Patch for the edited fields; cleared fields become `null`.
    pub fn patch(&self) -> Content {
        self.buffer.shallow_patch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_clearing_title_removes_key() {
        let mut content = Content::new();
        content.insert("title".into(), json!("Heads up"));
        content.insert("html".into(), json!("<p>x</p>"));

        let mut form = NoteForm::open(&content);
        form.set_title("   ");
        assert_eq!(form.patch()["title"], Value::Null);
        assert!(form.note().title.is_none());
    }
}

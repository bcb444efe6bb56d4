use pageblocks_core::content::ImageContent;
use pageblocks_core::{Content, VariantOptions};

use super::{Buffered, optional};

/// Single image form.
///
/// Uploading happens elsewhere; the form only receives the resulting URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageForm {
    buffer: Buffered<ImageContent>,
    allow_caption: bool,
}

impl ImageForm {
    /// Snapshots `content`.
    pub fn open(content: &Content, options: &VariantOptions) -> Self {
        Self {
            buffer: Buffered::open(content),
            allow_caption: options.allow_caption,
        }
    }

    /// Current content.
    pub fn image(&self) -> &ImageContent {
        self.buffer.current()
    }

    /// Whether the sub-variant shows a caption.
    pub fn allows_caption(&self) -> bool {
        self.allow_caption
    }

    /// Uses an uploaded file; blank clears the image.
    pub fn set_src(&mut self, url: &str) {
        self.buffer.current_mut().src = optional(url);
    }

    /// Sets the alternative text.
    pub fn set_alt(&mut self, alt: impl Into<String>) {
        self.buffer.current_mut().alt = alt.into();
    }

    /// Sets the caption; refused when the sub-variant has none.
    pub fn set_caption(&mut self, caption: &str) -> bool {
        if !self.allow_caption {
            return false;
        }
        self.buffer.current_mut().caption = optional(caption);
        true
    }

    /// Wraps the image in a link; blank removes it.
    pub fn set_link(&mut self, link: &str) {
        self.buffer.current_mut().link = optional(link);
    }

    /// Sets the text shown beside the image.
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

#[cfg(test)]
mod tests {
    use super::*;
    use pageblocks_core::{Block, registry};
    use serde_json::{Value, json};

    fn form(block_type: &str, content: Value) -> ImageForm {
        let content = match content {
            Value::Object(map) => map,
            _ => Content::new(),
        };
        let block = Block::new("i", block_type, content);
        ImageForm::open(&block.content, registry().options_for(&block))
    }

    #[test]
    fn test_caption_only_where_allowed() {
        let mut side = form("IM02", json!({}));
        assert!(!side.set_caption("nope"));
        assert!(!side.is_dirty());

        let mut full = form("IM01", json!({}));
        assert!(full.set_caption("A cat"));
        assert_eq!(full.patch()["caption"], "A cat");
    }

    #[test]
    fn test_clearing_src_removes_key() {
        let mut form = form("IM01", json!({ "src": "/u/a.png", "alt": "A" }));
        form.set_src("");
        let patch = form.patch();
        assert_eq!(patch["src"], Value::Null);
        assert!(!patch.contains_key("alt"));
    }
}

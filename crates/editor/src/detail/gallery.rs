use pageblocks_core::content::{GalleryContent, GalleryImage};
use pageblocks_core::siblings::Direction;
use pageblocks_core::{Content, VariantOptions};

use super::{Buffered, move_item, optional, remove_item};

/// Gallery form honoring the sub-variant's limits.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryForm {
    buffer: Buffered<GalleryContent>,
    max_images: Option<usize>,
    allow_reorder: bool,
    allow_caption: bool,
}

impl GalleryForm {
    /// Snapshots `content`.
    pub fn open(content: &Content, options: &VariantOptions) -> Self {
        Self {
            buffer: Buffered::open(content),
            max_images: options.max_images,
            allow_reorder: options.allow_reorder,
            allow_caption: options.allow_caption,
        }
    }

    /// Images in display order.
    pub fn images(&self) -> &[GalleryImage] {
        &self.buffer.current().images
    }

    /// Whether another image fits.
    pub fn can_add(&self) -> bool {
        self.max_images
            .is_none_or(|max| self.images().len() < max)
    }

    /// Whether images can be reordered.
    pub fn allows_reorder(&self) -> bool {
        self.allow_reorder
    }

    /// Whether images carry captions.
    pub fn allows_caption(&self) -> bool {
        self.allow_caption
    }

    /// Appends an uploaded image; refused at the limit.
    pub fn add_image(&mut self, url: &str, alt: &str) -> bool {
        if !self.can_add() {
            return false;
        }
        self.buffer.current_mut().images.push(GalleryImage {
            src: optional(url),
            alt: alt.to_string(),
            caption: None,
        });
        true
    }

    /// Removes image `index`.
    pub fn remove_image(&mut self, index: usize) -> bool {
        remove_item(&mut self.buffer.current_mut().images, index)
    }

    /// Sets the alternative text of image `index`.
    pub fn set_alt(&mut self, index: usize, alt: impl Into<String>) -> bool {
        match self.buffer.current_mut().images.get_mut(index) {
            Some(image) => {
                image.alt = alt.into();
                true
            }
            None => false,
        }
    }

    /// Sets the caption of image `index`; refused without captions.
    pub fn set_caption(&mut self, index: usize, caption: &str) -> bool {
        if !self.allow_caption {
            return false;
        }
        match self.buffer.current_mut().images.get_mut(index) {
            Some(image) => {
                image.caption = optional(caption);
                true
            }
            None => false,
        }
    }

    /// Moves image `index` one step; refused without reordering.
    pub fn move_image(&mut self, index: usize, direction: Direction) -> bool {
        self.allow_reorder && move_item(&mut self.buffer.current_mut().images, index, direction)
    }

    /// True when there is something to commit.
    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Patch replacing the whole `images` array.
    pub fn patch(&self) -> Content {
        self.buffer.shallow_patch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageblocks_core::{Block, registry};

    fn form(block_type: &str) -> GalleryForm {
        let block = Block::new("g", block_type, Content::new());
        GalleryForm::open(&block.content, registry().options_for(&block))
    }

    #[test]
    fn test_limit_is_enforced() {
        let mut form = form("GL02");
        for n in 0..8 {
            assert!(form.add_image(&format!("/u/{}.png", n), ""));
        }
        assert!(!form.can_add());
        assert!(!form.add_image("/u/9.png", ""));
        assert_eq!(form.images().len(), 8);
    }

    #[test]
    fn test_masonry_has_no_reorder_or_caption() {
        let mut form = form("GL03");
        form.add_image("/u/a.png", "A");
        form.add_image("/u/b.png", "B");
        assert!(!form.move_image(0, Direction::Down));
        assert!(!form.set_caption(0, "x"));
        assert_eq!(form.images()[0].alt, "A");
    }

    #[test]
    fn test_grid_reorders() {
        let mut form = form("GL01");
        form.add_image("/u/a.png", "A");
        form.add_image("/u/b.png", "B");
        assert!(form.move_image(1, Direction::Left));
        assert!(form.set_caption(0, "first"));
        let patch = form.patch();
        assert_eq!(patch["images"][0]["src"], "/u/b.png");
        assert_eq!(patch["images"][0]["caption"], "first");
    }
}

use pageblocks_core::content::{ButtonContent, ButtonLink};
use pageblocks_core::siblings::Direction;
use pageblocks_core::{Content, VariantOptions};

use super::{Buffered, move_item, optional, remove_item};

/// Button form: one link, or an ordered list of links for groups.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonForm {
    buffer: Buffered<ButtonContent>,
    group: bool,
}

impl ButtonForm {
    /// Snapshots `content`.
    pub fn open(content: &Content, options: &VariantOptions) -> Self {
        Self {
            buffer: Buffered::open(content),
            group: options.group,
        }
    }

    /// True for button groups.
    pub fn is_group(&self) -> bool {
        self.group
    }

    /// Current content.
    pub fn button(&self) -> &ButtonContent {
        self.buffer.current()
    }

    /// Sets the label of a single button.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.buffer.current_mut().label = label.into();
    }

    /// Sets the target of a single button.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.buffer.current_mut().url = url.into();
    }

    /// Opens a single button's target in a new browser tab.
    pub fn set_new_tab(&mut self, new_tab: bool) {
        self.buffer.current_mut().new_tab = new_tab;
    }

    /// Appends a group button and returns its index; `None` for single
    /// buttons.
    pub fn add_button(&mut self, label: &str, url: &str) -> Option<usize> {
        if !self.group {
            return None;
        }
        let buttons = &mut self.buffer.current_mut().buttons;
        buttons.push(ButtonLink {
            label: label.to_string(),
            url: url.to_string(),
            ..ButtonLink::default()
        });
        Some(buttons.len() - 1)
    }

    /// Replaces group button `index`.
    pub fn update_button(&mut self, index: usize, link: ButtonLink) -> bool {
        match self.buffer.current_mut().buttons.get_mut(index) {
            Some(slot) => {
                *slot = link;
                true
            }
            None => false,
        }
    }

    /// Sets a per-button style override; blank clears it.
    pub fn set_button_style(&mut self, index: usize, style: &str) -> bool {
        match self.buffer.current_mut().buttons.get_mut(index) {
            Some(slot) => {
                slot.style = optional(style);
                true
            }
            None => false,
        }
    }

    /// Removes group button `index`.
    pub fn remove_button(&mut self, index: usize) -> bool {
        remove_item(&mut self.buffer.current_mut().buttons, index)
    }

    /// Moves group button `index` one step.
    pub fn move_button(&mut self, index: usize, direction: Direction) -> bool {
        move_item(&mut self.buffer.current_mut().buttons, index, direction)
    }

    /// True when there is something to commit.
    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Patch for the edited fields; the `buttons` array is replaced whole.
    pub fn patch(&self) -> Content {
        self.buffer.shallow_patch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageblocks_core::{Block, registry};
    use serde_json::json;

    fn form(block_type: &str) -> ButtonForm {
        let block = Block::new("b", block_type, Content::new());
        ButtonForm::open(&block.content, registry().options_for(&block))
    }

    #[test]
    fn test_group_buttons_reorder() {
        let mut form = form("BT03");
        assert_eq!(form.add_button("One", "/1"), Some(0));
        assert_eq!(form.add_button("Two", "/2"), Some(1));
        assert!(form.move_button(1, Direction::Up));
        assert!(form.set_button_style(0, "outline"));

        let patch = form.patch();
        assert_eq!(patch["buttons"][0]["label"], "Two");
        assert_eq!(patch["buttons"][0]["style"], "outline");
        assert_eq!(patch["buttons"][1]["url"], "/1");
    }

    #[test]
    fn test_single_button_fields() {
        let mut form = form("BT01");
        assert_eq!(form.add_button("x", "y"), None);
        form.set_label("Buy");
        form.set_new_tab(true);
        let patch = form.patch();
        assert_eq!(patch["label"], "Buy");
        assert_eq!(patch["new_tab"], json!(true));
        assert!(!patch.contains_key("url"));
    }
}

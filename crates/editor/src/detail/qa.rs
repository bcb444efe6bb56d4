use pageblocks_core::Content;
use pageblocks_core::content::{QaContent, QaItem};
use pageblocks_core::siblings::Direction;

use super::{Buffered, move_item, remove_item};

/// Question and answer list form.
#[derive(Debug, Clone, PartialEq)]
pub struct QaForm {
    buffer: Buffered<QaContent>,
}

impl QaForm {
    /// Snapshots `content`.
    pub fn open(content: &Content) -> Self {
        Self {
            buffer: Buffered::open(content),
        }
    }

    /// Items in display order.
    pub fn items(&self) -> &[QaItem] {
        &self.buffer.current().items
    }

    /// Appends an item and returns its index.
    pub fn add_item(&mut self, question: impl Into<String>, answer: impl Into<String>) -> usize {
        let items = &mut self.buffer.current_mut().items;
        items.push(QaItem {
            question: question.into(),
            answer: answer.into(),
        });
        items.len() - 1
    }

    /// Sets the plain-text question of item `index`.
    pub fn set_question(&mut self, index: usize, question: impl Into<String>) -> bool {
        match self.buffer.current_mut().items.get_mut(index) {
            Some(item) => {
                item.question = question.into();
                true
            }
            None => false,
        }
    }

    /// Sets the rich-text answer of item `index`.
    pub fn set_answer(&mut self, index: usize, answer: impl Into<String>) -> bool {
        match self.buffer.current_mut().items.get_mut(index) {
            Some(item) => {
                item.answer = answer.into();
                true
            }
            None => false,
        }
    }

    /// Removes item `index`.
    pub fn remove_item(&mut self, index: usize) -> bool {
        remove_item(&mut self.buffer.current_mut().items, index)
    }

    /// Moves item `index` one step.
    pub fn move_item(&mut self, index: usize, direction: Direction) -> bool {
        move_item(&mut self.buffer.current_mut().items, index, direction)
    }

    /// True when there is something to commit.
    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Patch replacing the whole `items` array.
    pub fn patch(&self) -> Content {
        self.buffer.shallow_patch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_items_edit_cycle() {
        let mut content = Content::new();
        content.insert("items".into(), json!([{ "question": "Old?", "answer": "a" }]));

        let mut form = QaForm::open(&content);
        let index = form.add_item("New?", "<p>b</p>");
        assert_eq!(index, 1);
        assert!(form.move_item(1, Direction::Up));
        assert!(form.set_question(1, "Older?"));
        assert!(!form.set_answer(5, "x"));
        assert!(!form.move_item(0, Direction::Up));

        assert_eq!(
            form.patch()["items"],
            json!([
                { "question": "New?", "answer": "<p>b</p>" },
                { "question": "Older?", "answer": "a" }
            ])
        );
    }

    #[test]
    fn test_remove_last_item_leaves_empty_list() {
        let mut content = Content::new();
        content.insert("items".into(), json!([{ "question": "Q", "answer": "A" }]));
        let mut form = QaForm::open(&content);
        assert!(form.remove_item(0));
        assert_eq!(form.patch()["items"], json!([]));
    }
}

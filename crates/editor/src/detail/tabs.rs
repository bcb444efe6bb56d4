use pageblocks_core::content::{TABS_KEY, TabPatch};
use pageblocks_core::siblings::{self, Direction};
use pageblocks_core::{Content, Tab};

/// Tab titles and order of a container.
///
/// The form holds tab layout only. Its patch lists ids and titles under
/// the `tabs` key, so committing never touches the blocks inside a tab.
#[derive(Debug, Clone, PartialEq)]
pub struct TabsForm {
    original: Vec<Tab>,
    current: Vec<Tab>,
}

impl TabsForm {
    /// Snapshots the ids and titles of `tabs`.
    pub fn open(tabs: &[Tab]) -> Self {
        Self {
            original: layout(tabs),
            current: layout(tabs),
        }
    }

    /// Follows changes made to the container while the form is open.
    ///
    /// Tabs removed elsewhere leave the form, tabs added elsewhere are
    /// appended, and titles the form has not edited take the new value.
    pub fn rebase(&mut self, live: &[Tab]) {
        let known = std::mem::replace(&mut self.original, layout(live));
        self.current.retain(|tab| live.iter().any(|l| l.id == tab.id));
        for tab in &mut self.current {
            let untouched = known.iter().any(|k| k.id == tab.id && k.title == tab.title);
            if let Some(l) = live.iter().find(|l| l.id == tab.id).filter(|_| untouched) {
                tab.title = l.title.clone();
            }
        }
        for l in live {
            if !known.iter().any(|k| k.id == l.id) {
                self.current.push(Tab::new(l.id.clone(), l.title.clone()));
            }
        }
    }

    /// Tabs in display order, without their blocks.
    pub fn tabs(&self) -> &[Tab] {
        &self.current
    }

    /// Renames tab `id`.
    pub fn rename(&mut self, id: &str, title: impl Into<String>) -> bool {
        match self.current.iter_mut().find(|tab| tab.id == id) {
            Some(tab) => {
                tab.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Moves tab `id` one step.
    pub fn move_tab(&mut self, id: &str, direction: Direction) -> bool {
        if !siblings::can_swap(&self.current, id, direction) {
            return false;
        }
        self.current = siblings::swap_item(&self.current, id, direction);
        true
    }

    /// Removes tab `id` together with its blocks.
    pub fn remove_tab(&mut self, id: &str) -> bool {
        let before = self.current.len();
        self.current = siblings::remove_item(&self.current, id);
        self.current.len() != before
    }

    /// True when there is something to commit.
    pub fn is_dirty(&self) -> bool {
        self.original != self.current
    }

    /// `{"tabs": [{"id", "title"}, ...]}` when edited, empty otherwise.
    pub fn patch(&self) -> Content {
        let mut patch = Content::new();
        if self.is_dirty() {
            let entries: Vec<TabPatch> = self
                .current
                .iter()
                .map(|tab| TabPatch {
                    id: tab.id.clone(),
                    title: Some(tab.title.clone()),
                    children: None,
                })
                .collect();
            match serde_json::to_value(&entries) {
                Ok(tabs) => {
                    patch.insert(TABS_KEY.to_string(), tabs);
                }
                Err(e) => log::warn!("Could not encode tab list: {}", e),
            }
        }
        patch
    }
}

fn layout(tabs: &[Tab]) -> Vec<Tab> {
    tabs.iter()
        .map(|tab| Tab::new(tab.id.clone(), tab.title.clone()))
        .collect()
}

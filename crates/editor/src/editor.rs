//! The editing engine: one page's tree plus the ephemeral state of the
//! admin UI around it.
//!
//! Every mutation builds a complete new tree through the copy-on-write
//! helpers of `pageblocks_core` and swaps it in at once. Targets that do not
//! resolve (a stale id, a tab that was just removed) turn the operation into
//! a logged no-op.

use std::collections::{HashMap, HashSet};

use pageblocks_core::tree;
use pageblocks_core::siblings::{self, Direction};
use pageblocks_core::{
    Block, BlockError, Content, EditorOptions, Family, IdAllocator, IdSource, NodeId, Registry,
    Tab, Template, UuidIds, codec, registry,
};
use pageblocks_render::{AssetResolver, RenderOutput, Renderer, ViewState};
use serde::{Deserialize, Serialize};

use crate::detail::DetailForm;
use crate::picker::Picker;
use crate::tab_editor::TabEditor;

/// Whether the page is being edited or looked at as visitors will see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Editing controls are live.
    #[default]
    Edit,
    /// Read-only rendering; pickers and detail forms are closed.
    Preview,
}

/// Address of a block: either top-level or inside one tab of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum BlockRef {
    /// A block of the page's top-level list.
    Page {
        /// Block id
        id: NodeId,
    },
    /// A block among the children of a tab.
    Tab {
        /// Container block id
        container: NodeId,
        /// Tab id within the container
        tab: NodeId,
        /// Block id within the tab
        id: NodeId,
    },
}

impl BlockRef {
    /// A top-level block.
    pub fn page(id: impl Into<NodeId>) -> Self {
        BlockRef::Page { id: id.into() }
    }

    /// A block nested in `tab` of `container`.
    pub fn nested(
        container: impl Into<NodeId>,
        tab: impl Into<NodeId>,
        id: impl Into<NodeId>,
    ) -> Self {
        BlockRef::Tab {
            container: container.into(),
            tab: tab.into(),
            id: id.into(),
        }
    }

    /// Id of the addressed block.
    pub fn id(&self) -> &NodeId {
        match self {
            BlockRef::Page { id } | BlockRef::Tab { id, .. } => id,
        }
    }

    fn parent(&self) -> Parent<'_> {
        match self {
            BlockRef::Page { .. } => Parent::Page,
            BlockRef::Tab { container, tab, .. } => Parent::Tab {
                container: container.as_str(),
                tab: tab.as_str(),
            },
        }
    }
}

/// Owner of one sibling list.
#[derive(Debug, Clone, Copy)]
enum Parent<'a> {
    Page,
    Tab { container: &'a str, tab: &'a str },
}

/// Stateful controller over one page.
#[derive(Debug)]
pub struct Editor {
    blocks: Vec<Block>,
    ids: IdAllocator,
    options: EditorOptions,
    registry: &'static Registry,
    picker: Picker,
    tab_editors: HashMap<NodeId, TabEditor>,
    detail: Option<(BlockRef, DetailForm)>,
    view: ViewState,
    mode: Mode,
    version: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Editor {
    /// Opens `blocks` with default options and random ids.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self::with_options(blocks, EditorOptions::default())
    }

    /// Opens `blocks` with `options`; ids are random with the configured
    /// prefix.
    pub fn with_options(blocks: Vec<Block>, options: EditorOptions) -> Self {
        let source = UuidIds::new(options.id_prefix.clone());
        Self::with_id_source(blocks, options, source)
    }

    /// Opens `blocks` drawing new ids from `source`.
    ///
    /// The tree is normalized first and every id already in it is reserved.
    pub fn with_id_source(
        blocks: Vec<Block>,
        options: EditorOptions,
        source: impl IdSource + 'static,
    ) -> Self {
        let (blocks, _) = tree::normalize(&blocks);
        let mut editor = Self {
            blocks: Vec::new(),
            ids: IdAllocator::new(source),
            options,
            registry: registry(),
            picker: Picker::Closed,
            tab_editors: HashMap::new(),
            detail: None,
            view: ViewState::new(),
            mode: Mode::Edit,
            version: 0,
        };
        editor.replace_tree(blocks);
        editor.version = 0;
        editor
    }

    /// Opens a stored page payload.
    pub fn from_json(json: &str, options: EditorOptions) -> Result<Self, BlockError> {
        let (blocks, _) = codec::decode_blocks(json)?;
        Ok(Self::with_options(blocks, options))
    }

    /// Serializes the tree for the persistence layer.
    pub fn to_json(&self) -> Result<String, BlockError> {
        codec::encode_blocks(&self.blocks)
    }

    /// Current tree.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Hands the tree over, dropping all UI state.
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Number of tree mutations applied since the page was opened.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Options the editor was opened with.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Catalogue used for templates and presentation options.
    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// View state rendered by the preview.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn list(&self, parent: Parent<'_>) -> Option<&[Block]> {
        match parent {
            Parent::Page => Some(&self.blocks),
            Parent::Tab { container, tab } => {
                tree::find_tab(&self.blocks, container, tab).map(|t| t.children.as_slice())
            }
        }
    }

    fn contains(&self, parent: Parent<'_>, id: &str) -> bool {
        self.list(parent)
            .is_some_and(|list| list.iter().any(|block| block.id == id))
    }

    fn resolve(&self, target: &BlockRef) -> Option<&Block> {
        self.list(target.parent())?
            .iter()
            .find(|block| block.id == *target.id())
    }

    /// Rebuilds the sibling list owned by `parent` and installs the new tree.
    fn replace_list<F>(&mut self, parent: Parent<'_>, f: F) -> bool
    where
        F: FnOnce(&[Block]) -> Vec<Block>,
    {
        let next = match parent {
            Parent::Page => Some(f(&self.blocks)),
            Parent::Tab { container, tab } => tree::map_tab_children(&self.blocks, container, tab, f),
        };
        match next {
            Some(blocks) => {
                self.replace_tree(blocks);
                true
            }
            None => false,
        }
    }

    /// Installs a new tree and brings the UI state in line with it.
    fn replace_tree(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
        self.version += 1;
        self.ids.reserve_tree(&self.blocks);
        self.view.retain_tree(&self.blocks);
        self.sync_tab_editors();

        let stale = self
            .detail
            .as_ref()
            .is_some_and(|(target, _)| self.resolve(target).is_none());
        if stale {
            log::debug!("Closing detail form: its block is gone");
            self.detail = None;
        }

        let live = match &self.detail {
            Some((target, DetailForm::Tabs(_))) => self.resolve(target).map(|b| b.tabs().to_vec()),
            _ => None,
        };
        if let (Some(live), Some((_, DetailForm::Tabs(form)))) = (live, self.detail.as_mut()) {
            form.rebase(&live);
        }
    }

    fn sync_tab_editors(&mut self) {
        let containers = tree::containers(&self.blocks);
        let present: HashSet<&NodeId> = containers.iter().map(|c| &c.id).collect();
        self.tab_editors.retain(|id, _| present.contains(id));

        for container in containers {
            let editor = self
                .tab_editors
                .entry(container.id.clone())
                .or_insert_with(|| TabEditor::for_tabs(container.tabs()));
            editor.reconcile(container.tabs());
            match editor.selected() {
                Some(tab) => self.view.select_tab(&container.id, tab),
                None => self.view.clear_selected_tab(&container.id),
            }
        }
    }

    fn instantiate(&mut self, template: Template) -> Block {
        let block = Block::new(self.ids.allocate(), template.block_type, template.content);
        if !template.container {
            return block;
        }
        let mut tabs = Vec::with_capacity(self.options.initial_tabs);
        for n in 1..=self.options.initial_tabs {
            tabs.push(Tab::new(self.ids.allocate(), self.options.tab_title(n)));
        }
        block.with_tabs(tabs)
    }

    /// Copy of `block` with fresh ids for it and everything below it.
    fn reissue(&mut self, block: &Block) -> Block {
        let mut copy = block.clone();
        copy.id = self.ids.allocate();
        if let Some(tabs) = &block.children {
            let mut fresh = Vec::with_capacity(tabs.len());
            for tab in tabs {
                let mut children = Vec::with_capacity(tab.children.len());
                for child in &tab.children {
                    children.push(self.reissue(child));
                }
                fresh.push(Tab::new(self.ids.allocate(), tab.title.clone()).with_children(children));
            }
            copy.children = Some(fresh);
        }
        copy
    }

    fn add_in(&mut self, parent: Parent<'_>, family: Family, variant: &str) -> Option<NodeId> {
        let Some(template) = self.registry.template(family, variant) else {
            log::debug!("No sub-variant {} in family {}", variant, family.id());
            return None;
        };
        if let Parent::Tab { container, tab } = parent {
            let Some(host) = tree::find_container(&self.blocks, container) else {
                log::debug!("Ignoring add: no container {}", container);
                return None;
            };
            if !self.registry.allows_nested(&host.block_type, family) {
                log::debug!("Container {} does not accept {} blocks", container, family.id());
                return None;
            }
            if tree::find_tab(&self.blocks, container, tab).is_none() {
                log::debug!("Ignoring add: no tab {} in {}", tab, container);
                return None;
            }
        }
        let block = self.instantiate(template);
        let id = block.id.clone();
        self.replace_list(parent, |list| siblings::insert(list, block))
            .then_some(id)
    }

    fn update_in(&mut self, parent: Parent<'_>, id: &str, patch: &Content) -> bool {
        if !self.contains(parent, id) {
            log::debug!("Ignoring update of unknown block {}", id);
            return false;
        }
        let next = match parent {
            Parent::Page => Some(siblings::update_content(&self.blocks, id, patch)),
            Parent::Tab { container, tab } => tree::map_tab_children(&self.blocks, container, tab, |list| {
                siblings::update_content(list, id, patch)
            }),
        };
        let Some(next) = next else {
            return false;
        };
        if next == self.blocks {
            log::debug!("Update of {} changed nothing", id);
            return false;
        }
        if unrepairable(&next) > unrepairable(&self.blocks) {
            log::warn!("Rejecting update of {}: it would repeat an id or break nesting", id);
            return false;
        }
        self.replace_tree(next);
        true
    }

    fn remove_in(&mut self, parent: Parent<'_>, id: &str) -> bool {
        if !self.contains(parent, id) {
            log::debug!("Ignoring removal of unknown block {}", id);
            return false;
        }
        self.replace_list(parent, |list| siblings::remove(list, id))
    }

    fn can_move_in(&self, parent: Parent<'_>, id: &str, direction: Direction) -> bool {
        self.list(parent)
            .is_some_and(|list| siblings::can_swap(list, id, direction))
    }

    fn move_in(&mut self, parent: Parent<'_>, id: &str, direction: Direction) -> bool {
        if !self.can_move_in(parent, id, direction) {
            log::debug!("Ignoring move of {} {:?}", id, direction);
            return false;
        }
        self.replace_list(parent, |list| siblings::move_adjacent(list, id, direction))
    }

    fn duplicate_in(&mut self, parent: Parent<'_>, id: &str) -> Option<NodeId> {
        let Some(original) = self
            .list(parent)
            .and_then(|list| list.iter().find(|block| block.id == id))
            .cloned()
        else {
            log::debug!("Ignoring duplication of unknown block {}", id);
            return None;
        };
        let copy = self.reissue(&original);
        let new_id = copy.id.clone();
        self.replace_list(parent, |list| siblings::insert_item_after(list, id, copy))
            .then_some(new_id)
    }

    /// Appends a new top-level block built from the registry template.
    pub fn add_block(&mut self, family: Family, variant: &str) -> Option<NodeId> {
        self.add_in(Parent::Page, family, variant)
    }

    /// Appends a new block to one tab of a container.
    ///
    /// Refused when the container or tab is unknown or the container does
    /// not accept the family.
    pub fn add_block_to_container(
        &mut self,
        container: &str,
        tab: &str,
        family: Family,
        variant: &str,
    ) -> Option<NodeId> {
        self.add_in(Parent::Tab { container, tab }, family, variant)
    }

    /// Applies a content patch to a top-level block.
    ///
    /// Returns false, leaving the tree alone, when the block is unknown,
    /// the patch changes nothing, or the result would repeat an id or nest
    /// a block its container does not accept.
    pub fn update_block(&mut self, id: &str, patch: &Content) -> bool {
        self.update_in(Parent::Page, id, patch)
    }

    /// Applies a content patch to a nested block.
    pub fn update_nested_block(
        &mut self,
        container: &str,
        tab: &str,
        id: &str,
        patch: &Content,
    ) -> bool {
        self.update_in(Parent::Tab { container, tab }, id, patch)
    }

    /// Removes a top-level block with everything nested in it.
    pub fn remove_block(&mut self, id: &str) -> bool {
        self.remove_in(Parent::Page, id)
    }

    /// Removes a nested block.
    pub fn remove_nested_block(&mut self, container: &str, tab: &str, id: &str) -> bool {
        self.remove_in(Parent::Tab { container, tab }, id)
    }

    /// Whether a top-level block has a neighbor in `direction`.
    pub fn can_move_block(&self, id: &str, direction: Direction) -> bool {
        self.can_move_in(Parent::Page, id, direction)
    }

    /// Whether a nested block has a neighbor in `direction`.
    pub fn can_move_nested_block(
        &self,
        container: &str,
        tab: &str,
        id: &str,
        direction: Direction,
    ) -> bool {
        self.can_move_in(Parent::Tab { container, tab }, id, direction)
    }

    /// Swaps a top-level block with its neighbor.
    pub fn move_block(&mut self, id: &str, direction: Direction) -> bool {
        self.move_in(Parent::Page, id, direction)
    }

    /// Swaps a nested block with its neighbor.
    pub fn move_nested_block(
        &mut self,
        container: &str,
        tab: &str,
        id: &str,
        direction: Direction,
    ) -> bool {
        self.move_in(Parent::Tab { container, tab }, id, direction)
    }

    /// Copies a top-level block right after the original.
    pub fn duplicate_block(&mut self, id: &str) -> Option<NodeId> {
        self.duplicate_in(Parent::Page, id)
    }

    /// Copies a nested block right after the original.
    pub fn duplicate_nested_block(&mut self, container: &str, tab: &str, id: &str) -> Option<NodeId> {
        self.duplicate_in(Parent::Tab { container, tab }, id)
    }

    /// Appends an empty tab titled after its position.
    pub fn add_tab(&mut self, container: &str) -> Option<NodeId> {
        let Some(count) = tree::find_container(&self.blocks, container).map(|c| c.tabs().len()) else {
            log::debug!("Ignoring add_tab: no container {}", container);
            return None;
        };
        let tab = Tab::new(self.ids.allocate(), self.options.tab_title(count + 1));
        let id = tab.id.clone();
        let next = tree::map_tabs(&self.blocks, container, |tabs| Some(siblings::push_item(tabs, tab)))?;
        self.replace_tree(next);
        Some(id)
    }

    /// Removes a tab and every block inside it.
    ///
    /// When it was the selected tab, selection falls back to the first
    /// remaining tab, or to none.
    pub fn remove_tab(&mut self, container: &str, tab: &str) -> bool {
        if tree::find_tab(&self.blocks, container, tab).is_none() {
            log::debug!("Ignoring remove_tab: no tab {} in {}", tab, container);
            return false;
        }
        match tree::map_tabs(&self.blocks, container, |tabs| Some(siblings::remove_item(tabs, tab))) {
            Some(next) => {
                self.replace_tree(next);
                true
            }
            None => false,
        }
    }

    /// Changes a tab title.
    pub fn rename_tab(&mut self, container: &str, tab: &str, title: &str) -> bool {
        let next = tree::map_tabs(&self.blocks, container, |tabs| {
            let index = tabs.iter().position(|t| t.id == tab)?;
            let mut next = tabs.to_vec();
            next[index].title = title.to_string();
            Some(next)
        });
        match next {
            Some(next) => {
                self.replace_tree(next);
                true
            }
            None => {
                log::debug!("Ignoring rename_tab: no tab {} in {}", tab, container);
                false
            }
        }
    }

    /// Whether a tab has a neighbor in `direction`.
    pub fn can_move_tab(&self, container: &str, tab: &str, direction: Direction) -> bool {
        tree::find_container(&self.blocks, container)
            .is_some_and(|c| siblings::can_swap(c.tabs(), tab, direction))
    }

    /// Swaps a tab with its neighbor.
    pub fn move_tab(&mut self, container: &str, tab: &str, direction: Direction) -> bool {
        if !self.can_move_tab(container, tab, direction) {
            log::debug!("Ignoring move of tab {} {:?}", tab, direction);
            return false;
        }
        match tree::map_tabs(&self.blocks, container, |tabs| {
            Some(siblings::swap_item(tabs, tab, direction))
        }) {
            Some(next) => {
                self.replace_tree(next);
                true
            }
            None => false,
        }
    }

    /// Shows `tab` of `container`, abandoning any add flow in the
    /// previously selected tab.
    pub fn select_tab(&mut self, container: &str, tab: &str) -> bool {
        if tree::find_tab(&self.blocks, container, tab).is_none() {
            log::debug!("Ignoring select_tab: no tab {} in {}", tab, container);
            return false;
        }
        let container = NodeId::from(container);
        let tab = NodeId::from(tab);
        self.view.select_tab(&container, &tab);
        self.tab_editors.insert(container, TabEditor::viewing(tab));
        true
    }

    /// Sub-editor state of a container.
    pub fn tab_editor(&self, container: &str) -> Option<&TabEditor> {
        self.tab_editors.get(container)
    }

    /// Families a container accepts, in picker order.
    pub fn tab_families(&self, container: &str) -> Vec<Family> {
        let accepts = tree::find_container(&self.blocks, container)
            .and_then(|c| self.registry.get(&c.block_type))
            .map(|v| v.options.accepts.as_slice())
            .unwrap_or(&[]);
        Picker::families(self.registry, Some(accepts))
    }

    fn with_tab_editor(&mut self, container: &str, f: impl FnOnce(&mut TabEditor) -> bool) -> bool {
        if self.mode == Mode::Preview {
            log::debug!("Ignoring tab add flow in preview mode");
            return false;
        }
        match self.tab_editors.get_mut(container) {
            Some(editor) => f(editor),
            None => {
                log::debug!("No sub-editor for container {}", container);
                false
            }
        }
    }

    /// Starts adding a block to the selected tab of `container`.
    pub fn begin_add_in_tab(&mut self, container: &str) -> bool {
        self.with_tab_editor(container, TabEditor::begin_add)
    }

    /// Picks the family of the block being added to a tab.
    pub fn choose_family_in_tab(&mut self, container: &str, family: Family) -> bool {
        if !self.tab_families(container).contains(&family) {
            log::debug!("Container {} does not accept {} blocks", container, family.id());
            return false;
        }
        self.with_tab_editor(container, |editor| editor.choose_family(family))
    }

    /// One step back in a tab's add flow.
    pub fn tab_picker_back(&mut self, container: &str) -> bool {
        self.with_tab_editor(container, TabEditor::back)
    }

    /// Leaves a tab's add flow without touching the tree.
    pub fn cancel_add_in_tab(&mut self, container: &str) -> bool {
        self.with_tab_editor(container, TabEditor::cancel_add)
    }

    /// Finishes a tab's add flow with `variant` and returns to viewing.
    pub fn choose_variant_in_tab(&mut self, container: &str, variant: &str) -> Option<NodeId> {
        let (tab, family) = match self.tab_editors.get(container) {
            Some(TabEditor::TabSelected { tab, picker }) => (tab.clone(), picker.family()?),
            _ => return None,
        };
        let id = self.add_block_to_container(container, tab.as_str(), family, variant)?;
        if let Some(editor) = self.tab_editors.get_mut(container) {
            editor.cancel_add();
        }
        Some(id)
    }

    /// State of the top-level add flow.
    pub fn picker(&self) -> Picker {
        self.picker
    }

    /// Opens the top-level family list.
    pub fn open_picker(&mut self) -> bool {
        if self.mode == Mode::Preview {
            log::debug!("Ignoring picker in preview mode");
            return false;
        }
        self.picker = self.picker.open();
        true
    }

    /// Picks the family of the top-level block being added.
    pub fn choose_family(&mut self, family: Family) -> bool {
        let next = self.picker.choose_family(family);
        let changed = next != self.picker;
        self.picker = next;
        changed
    }

    /// One step back in the top-level add flow.
    pub fn picker_back(&mut self) {
        self.picker = self.picker.back();
    }

    /// Closes the top-level add flow.
    pub fn cancel_picker(&mut self) {
        self.picker = self.picker.cancel();
    }

    /// Finishes the top-level add flow with `variant`.
    pub fn choose_variant(&mut self, variant: &str) -> Option<NodeId> {
        let family = self.picker.family()?;
        let id = self.add_block(family, variant)?;
        self.picker = Picker::Closed;
        Some(id)
    }

    /// Opens the detail form of a block, replacing any open form.
    pub fn open_detail(&mut self, target: BlockRef) -> bool {
        if self.mode == Mode::Preview {
            log::debug!("Ignoring detail form in preview mode");
            return false;
        }
        let Some(block) = self.resolve(&target) else {
            log::debug!("Ignoring detail form for unknown block {}", target.id());
            return false;
        };
        let Some(form) = DetailForm::open(block, self.registry) else {
            log::debug!("Block {} of type {} has no detail form", block.id, block.block_type);
            return false;
        };
        self.detail = Some((target, form));
        true
    }

    /// Block the open form edits.
    pub fn detail_target(&self) -> Option<&BlockRef> {
        self.detail.as_ref().map(|(target, _)| target)
    }

    /// The open form.
    pub fn detail(&self) -> Option<&DetailForm> {
        self.detail.as_ref().map(|(_, form)| form)
    }

    /// The open form, for editing fields.
    pub fn detail_mut(&mut self) -> Option<&mut DetailForm> {
        self.detail.as_mut().map(|(_, form)| form)
    }

    /// Closes the form and applies its patch. Returns true when the tree
    /// changed.
    pub fn commit_detail(&mut self) -> bool {
        let Some((target, form)) = self.detail.take() else {
            return false;
        };
        if !form.is_dirty() {
            return false;
        }
        self.update_in(target.parent(), target.id().as_str(), &form.patch())
    }

    /// Closes the form, discarding its edits.
    pub fn cancel_detail(&mut self) {
        self.detail = None;
    }

    /// Switches mode. Entering preview closes every picker and the detail
    /// form without writing anything.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == Mode::Preview {
            self.picker = Picker::Closed;
            self.detail = None;
            for editor in self.tab_editors.values_mut() {
                editor.cancel_add();
            }
        }
        self.mode = mode;
    }

    /// Renders the tree exactly as the public site would, with the
    /// editor's view state.
    pub fn preview<R: AssetResolver>(&self, renderer: &Renderer<R>) -> RenderOutput {
        renderer.render(&self.blocks, &self.view)
    }

    /// Expands or collapses a section of a vertical container.
    pub fn toggle_section(&mut self, container: &str, tab: &str) -> bool {
        if tree::find_tab(&self.blocks, container, tab).is_none() {
            log::debug!("Ignoring toggle of unknown section {} in {}", tab, container);
            return false;
        }
        self.view
            .toggle_section(&NodeId::from(container), &NodeId::from(tab))
    }

    /// Expands or collapses answer `index` of a Q&A block, honoring its
    /// sub-variant's single-open rule. Returns the new state.
    pub fn toggle_qa_item(&mut self, block: &str, index: usize) -> bool {
        let Some(found) = tree::find_block(&self.blocks, block).filter(|b| b.family() == Some(Family::Qa))
        else {
            log::debug!("Ignoring answer toggle on {}", block);
            return false;
        };
        let single_open = self.registry.options_for(found).single_open;
        let id = found.id.clone();
        self.view.toggle_qa_item(&id, index, single_open)
    }
}

fn unrepairable(blocks: &[Block]) -> usize {
    tree::validate(blocks)
        .violations
        .iter()
        .filter(|v| !v.is_repairable())
        .count()
}

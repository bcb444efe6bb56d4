//! Registry type definitions for block families and sub-variants.

use serde::{Deserialize, Serialize};

use crate::block::{Block, Content};
use crate::error::BlockError;

/// A group of block types sharing one editing and rendering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Rich text (`TX`).
    Text,
    /// Call-to-action buttons (`BT`).
    Button,
    /// Question and answer lists (`QA`).
    Qa,
    /// Callouts and quotes (`NT`).
    Note,
    /// Tabbed containers (`TB`).
    Tabs,
    /// Side-by-side rich text columns (`CL`).
    Columns,
    /// Single image with optional text (`IM`).
    Image,
    /// Multi-image galleries (`GL`).
    Gallery,
    /// Linked tiles (`TL`).
    Tiles,
    /// Text grids (`TA`).
    Table,
}

/// How a content patch combines with existing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Each patch key replaces the whole value under that key; `null` removes it.
    Shallow,
    /// The patch becomes the new content.
    Replace,
    /// Shallow merge, except a `tabs` key replaces the container's tab list.
    ShallowWithTabs,
}

/// Layout of tabs in a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Tab strip, one visible panel.
    Horizontal,
    /// Stack of independently collapsible sections.
    Vertical,
}

/// Where the image sits relative to its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaPosition {
    /// Image only, full width.
    Full,
    /// Image first, text second.
    Left,
    /// Text first, image second.
    Right,
}

impl Family {
    /// Every family, in picker order.
    pub const ALL: [Family; 10] = [
        Family::Text,
        Family::Button,
        Family::Qa,
        Family::Note,
        Family::Tabs,
        Family::Columns,
        Family::Image,
        Family::Gallery,
        Family::Tiles,
        Family::Table,
    ];

    /// Two-letter type prefix shared by the family's types.
    pub fn prefix(self) -> &'static str {
        match self {
            Family::Text => "TX",
            Family::Button => "BT",
            Family::Qa => "QA",
            Family::Note => "NT",
            Family::Tabs => "TB",
            Family::Columns => "CL",
            Family::Image => "IM",
            Family::Gallery => "GL",
            Family::Tiles => "TL",
            Family::Table => "TA",
        }
    }

    /// Identifier used by pickers and serialized actions.
    pub fn id(self) -> &'static str {
        match self {
            Family::Text => "text",
            Family::Button => "button",
            Family::Qa => "qa",
            Family::Note => "note",
            Family::Tabs => "tabs",
            Family::Columns => "columns",
            Family::Image => "image",
            Family::Gallery => "gallery",
            Family::Tiles => "tiles",
            Family::Table => "table",
        }
    }

    /// Human label for the family picker.
    pub fn label(self) -> &'static str {
        match self {
            Family::Text => "Text",
            Family::Button => "Button",
            Family::Qa => "Questions & answers",
            Family::Note => "Note",
            Family::Tabs => "Tabs",
            Family::Columns => "Columns",
            Family::Image => "Image",
            Family::Gallery => "Gallery",
            Family::Tiles => "Link tiles",
            Family::Table => "Table",
        }
    }

    /// Resolves a family from its picker identifier.
    pub fn from_id(id: &str) -> Option<Family> {
        Family::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Resolves the family of a type tag by its prefix.
    pub fn from_type(block_type: &str) -> Option<Family> {
        let prefix = block_type.get(..2)?;
        Family::ALL.into_iter().find(|f| f.prefix() == prefix)
    }

    /// True for families whose blocks host tabs of child blocks.
    pub fn is_container(self) -> bool {
        matches!(self, Family::Tabs)
    }

    /// Merge rule applied by content updates.
    pub fn merge_rule(self) -> MergeRule {
        match self {
            Family::Table => MergeRule::Replace,
            Family::Tabs => MergeRule::ShallowWithTabs,
            _ => MergeRule::Shallow,
        }
    }
}

/// Presentation options of one sub-variant.
///
/// Only the fields relevant to a family are set; the rest keep their
/// empty defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantOptions {
    /// CSS modifier such as `primary`, `warning` or `grid`.
    pub style: Option<String>,
    /// Image and gallery captions are editable and rendered.
    pub allow_caption: bool,
    /// Gallery item limit.
    pub max_images: Option<usize>,
    /// Gallery items can be reordered in the editor.
    pub allow_reorder: bool,
    /// Fixed column count for the columns family.
    pub columns: Option<usize>,
    /// Tab layout for containers.
    pub orientation: Option<Orientation>,
    /// Only one answer may be open at a time.
    pub single_open: bool,
    /// Button blocks hold a list of buttons instead of one.
    pub group: bool,
    /// Image position for the image family.
    pub media: Option<MediaPosition>,
    /// Tiles show an icon instead of an image.
    pub icon_tiles: bool,
    /// The first table row is a header row by default.
    pub header_row: bool,
    /// Families a container accepts as children.
    pub accepts: Vec<Family>,
}

impl VariantOptions {
    /// Options with every flag off.
    pub const EMPTY: VariantOptions = VariantOptions {
        style: None,
        allow_caption: false,
        max_images: None,
        allow_reorder: false,
        columns: None,
        orientation: None,
        single_open: false,
        group: false,
        media: None,
        icon_tiles: false,
        header_row: false,
        accepts: Vec::new(),
    };
}

impl Default for VariantOptions {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// One selectable sub-variant: a concrete block type.
#[derive(Debug, Clone, Serialize)]
pub struct SubVariant {
    /// Type tag written to `Block::block_type`, e.g. `IM02`.
    pub id: String,
    /// Owning family.
    pub family: Family,
    /// Human label for the sub-variant picker.
    pub label: String,
    /// Content seeded into new blocks of this type.
    pub default_content: Content,
    /// Presentation options.
    pub options: VariantOptions,
}

/// Owned seed for a new block.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Type tag of the new block.
    pub block_type: String,
    /// Deep copy of the registry's default content.
    pub content: Content,
    /// The new block hosts tabs.
    pub container: bool,
}

/// Static catalogue of block types.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    variants: Vec<SubVariant>,
}

static FALLBACK_OPTIONS: VariantOptions = VariantOptions::EMPTY;

impl Registry {
    /// Build a registry from sub-variants in picker order.
    pub fn new(variants: Vec<SubVariant>) -> Self {
        Self { variants }
    }

    /// All sub-variants in picker order.
    pub fn variants(&self) -> &[SubVariant] {
        &self.variants
    }

    /// Families that have at least one sub-variant, in picker order.
    pub fn families(&self) -> Vec<Family> {
        let mut families: Vec<Family> = Vec::new();
        for variant in &self.variants {
            if !families.contains(&variant.family) {
                families.push(variant.family);
            }
        }
        families
    }

    /// Sub-variants of one family.
    pub fn variants_of(&self, family: Family) -> impl Iterator<Item = &SubVariant> {
        self.variants.iter().filter(move |v| v.family == family)
    }

    /// Look up a sub-variant by type tag.
    pub fn get(&self, block_type: &str) -> Option<&SubVariant> {
        self.variants.iter().find(|v| v.id == block_type)
    }

    /// Owned seed for a new block of `variant` within `family`.
    ///
    /// Returns `None` when the sub-variant does not exist or belongs to
    /// another family.
    pub fn template(&self, family: Family, variant: &str) -> Option<Template> {
        let entry = self.get(variant).filter(|v| v.family == family)?;
        Some(Template {
            block_type: entry.id.clone(),
            content: entry.default_content.clone(),
            container: family.is_container(),
        })
    }

    /// Same as [`Registry::template`], keyed by picker identifiers, with a
    /// descriptive error.
    pub fn try_template(&self, family_id: &str, variant: &str) -> Result<Template, BlockError> {
        let family =
            Family::from_id(family_id).ok_or_else(|| BlockError::UnknownFamily(family_id.to_string()))?;
        self.template(family, variant)
            .ok_or_else(|| BlockError::unknown_variant(family_id, variant))
    }

    /// Presentation options that apply to a block.
    ///
    /// Resolution order: the `content.variant` flag, the type tag, the
    /// family's first sub-variant. Unknown types get empty options.
    pub fn options_for(&self, block: &Block) -> &VariantOptions {
        self.get(block.variant())
            .or_else(|| self.get(&block.block_type))
            .or_else(|| block.family().and_then(|f| self.variants_of(f).next()))
            .map(|v| &v.options)
            .unwrap_or(&FALLBACK_OPTIONS)
    }

    /// Whether a container of `container_type` may hold a block of `child`.
    pub fn allows_nested(&self, container_type: &str, child: Family) -> bool {
        self.get(container_type)
            .is_some_and(|v| v.family.is_container() && v.options.accepts.contains(&child))
    }
}

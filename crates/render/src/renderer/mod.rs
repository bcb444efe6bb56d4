//! Block tree to HTML renderer.
//!
//! One [`render`] function serves both the public site and the editor
//! preview. It never fails: unknown block types fall back to text, and
//! missing or malformed content fields take their defaults.
//!
//! # Module Structure
//!
//! - `types` - Output type
//! - `context` - Output buffer and borrowed inputs of one render
//! - `render` - Per-family rendering functions

mod context;
pub mod render;
mod types;

pub use context::Context;
pub use types::RenderOutput;

use pageblocks_core::{Block, BlockError};
use serde::{Deserialize, Serialize};

use crate::assets::AssetResolver;
use crate::view_state::ViewState;

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Whether to add `loading="lazy"` to images.
    #[serde(default = "default_true")]
    pub lazy_images: bool,
    /// Whether to emit `data-block-id`, `data-tab-id` and `data-qa-index`
    /// hooks for client-side behavior and the editor preview.
    #[serde(default = "default_true")]
    pub interactive: bool,
    /// `rel` value of links opening in a new browser tab.
    #[serde(default = "default_new_tab_rel")]
    pub new_tab_rel: String,
}

fn default_true() -> bool {
    true
}

fn default_new_tab_rel() -> String {
    "noopener noreferrer".to_string()
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            lazy_images: true,
            interactive: true,
            new_tab_rel: default_new_tab_rel(),
        }
    }
}

impl RenderOptions {
    /// Options for static publishing: no client hooks.
    pub fn published() -> Self {
        Self {
            interactive: false,
            ..Self::default()
        }
    }

    /// Parses options from YAML; missing keys take their defaults.
    pub fn from_yaml(source: &str) -> Result<Self, BlockError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parses options from JSON; missing keys take their defaults.
    pub fn from_json(source: &str) -> Result<Self, BlockError> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Renders a block tree.
///
/// Siblings are rendered by `order` (stable on ties), so the result does not
/// depend on the input array order.
///
/// # Example
///
/// ```
/// use pageblocks_core::{Block, Content};
/// use pageblocks_render::{IdentityResolver, RenderOptions, ViewState, render};
///
/// let mut content = Content::new();
/// content.insert("html".into(), "<p>Hello</p>".into());
/// let blocks = vec![Block::new("b1", "TX01", content)];
///
/// let out = render(&blocks, &ViewState::new(), &IdentityResolver, &RenderOptions::published());
/// assert_eq!(out.html, r#"<div class="block block--text block--tx01"><p>Hello</p></div>"#);
/// ```
pub fn render(
    blocks: &[Block],
    view: &ViewState,
    assets: &dyn AssetResolver,
    options: &RenderOptions,
) -> RenderOutput {
    let mut ctx = Context::new(view, assets, options);
    render::render_blocks(blocks, &mut ctx);
    ctx.finish()
}

/// A resolver and options bundled for repeated renders.
#[derive(Debug, Clone)]
pub struct Renderer<R> {
    resolver: R,
    options: RenderOptions,
}

impl<R: AssetResolver> Renderer<R> {
    /// Creates a renderer with default options.
    pub fn new(resolver: R) -> Self {
        Self::with_options(resolver, RenderOptions::default())
    }

    /// Creates a renderer with explicit options.
    pub fn with_options(resolver: R, options: RenderOptions) -> Self {
        Self { resolver, options }
    }

    /// The options every render uses.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The asset resolver every render uses.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Renders `blocks` with the given view state.
    pub fn render(&self, blocks: &[Block], view: &ViewState) -> RenderOutput {
        render(blocks, view, &self.resolver, &self.options)
    }

    /// Renders `blocks` as first shown: first tabs, everything collapsed.
    pub fn render_initial(&self, blocks: &[Block]) -> RenderOutput {
        self.render(blocks, &ViewState::new())
    }
}

//! Rendering context threaded through the tree walk.

use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};
use pageblocks_core::{Block, Family, NodeId, Registry, VariantOptions};

use super::RenderOptions;
use super::types::RenderOutput;
use crate::assets::AssetResolver;
use crate::view_state::ViewState;

/// Output buffer plus the read-only inputs of one render.
///
/// Everything the walk may consult is borrowed; the only thing a render
/// produces is the HTML string and the list of blocks that fell back to
/// text.
pub struct Context<'a> {
    html: String,
    fallbacks: Vec<NodeId>,
    view: &'a ViewState,
    assets: &'a dyn AssetResolver,
    options: &'a RenderOptions,
    registry: &'a Registry,
}

impl<'a> Context<'a> {
    /// Creates a context rendering against the built-in registry.
    pub fn new(
        view: &'a ViewState,
        assets: &'a dyn AssetResolver,
        options: &'a RenderOptions,
    ) -> Self {
        Self::with_registry(view, assets, options, pageblocks_core::registry())
    }

    /// Creates a context rendering against a custom registry.
    pub fn with_registry(
        view: &'a ViewState,
        assets: &'a dyn AssetResolver,
        options: &'a RenderOptions,
        registry: &'a Registry,
    ) -> Self {
        Self {
            html: String::with_capacity(4096),
            fallbacks: Vec::new(),
            view,
            assets,
            options,
            registry,
        }
    }

    /// Writes a raw string without escaping (for markup and trusted HTML).
    pub fn push_raw(&mut self, s: &str) {
        self.html.push_str(s);
    }

    /// Writes text content with HTML escaping.
    pub fn push_text(&mut self, s: &str) {
        encode_text_to_string(s, &mut self.html);
    }

    /// Writes an escaped value for use inside a double-quoted attribute.
    pub fn push_attr_value(&mut self, s: &str) {
        encode_double_quoted_attribute_to_string(s, &mut self.html);
    }

    /// Writes ` name="value"` with the value escaped.
    pub fn push_attr(&mut self, name: &str, value: &str) {
        self.html.push(' ');
        self.html.push_str(name);
        self.html.push_str("=\"");
        self.push_attr_value(value);
        self.html.push('"');
    }

    /// Writes a `data-*` hook, only when interactive output is enabled.
    pub fn push_data_attr(&mut self, name: &str, value: &str) {
        if self.options.interactive {
            self.push_attr(name, value);
        }
    }

    /// Ephemeral UI state of this render.
    pub fn view(&self) -> &ViewState {
        self.view
    }

    /// Render options.
    pub fn options(&self) -> &RenderOptions {
        self.options
    }

    /// Presentation options that apply to `block`.
    pub fn variant_options(&self, block: &Block) -> &'a VariantOptions {
        self.registry.options_for(block)
    }

    /// Family of `block`, `None` when its type tag is not registered.
    pub fn registered_family(&self, block: &Block) -> Option<Family> {
        self.registry.get(&block.block_type).map(|entry| entry.family)
    }

    /// Resolves an upload path to a public URL.
    pub fn resolve_url(&self, path: &str) -> String {
        self.assets.resolve_url(path)
    }

    /// Records that `id` was rendered through the text fallback.
    pub fn note_fallback(&mut self, id: &NodeId) {
        self.fallbacks.push(id.clone());
    }

    /// Consumes the context and returns the finished output.
    pub fn finish(self) -> RenderOutput {
        RenderOutput {
            html: self.html,
            fallback_blocks: self.fallbacks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::IdentityResolver;

    #[test]
    fn test_escaping_helpers() {
        let view = ViewState::new();
        let options = RenderOptions::default();
        let mut ctx = Context::new(&view, &IdentityResolver, &options);

        ctx.push_raw("<p>");
        ctx.push_text("a < b & c");
        ctx.push_attr("title", "say \"hi\"");
        ctx.push_raw("</p>");

        let out = ctx.finish();
        assert_eq!(out.html, "<p>a &lt; b &amp; c title=\"say &quot;hi&quot;\"</p>");
        assert!(out.fallback_blocks.is_empty());
    }

    #[test]
    fn test_data_attrs_follow_interactive_flag() {
        let view = ViewState::new();
        let options = RenderOptions {
            interactive: false,
            ..RenderOptions::default()
        };
        let mut ctx = Context::new(&view, &IdentityResolver, &options);
        ctx.push_data_attr("data-block-id", "b1");
        assert_eq!(ctx.finish().html, "");
    }
}

#![deny(missing_docs)]
//! Pageblocks rendering engine: block trees to HTML, view state and asset
//! resolution.

/// Upload path to URL resolution.
pub mod assets;
/// Parallel rendering of stored pages.
pub mod batch;
/// Block renderer.
pub mod renderer;
/// Ephemeral UI state consulted while rendering.
pub mod view_state;

pub use assets::{AssetResolver, BaseUrlResolver, IdentityResolver};
pub use batch::{BatchOptions, BatchRenderResult, PageInput, PageResult, render_batch};
pub use renderer::{RenderOptions, RenderOutput, Renderer, render};
pub use view_state::ViewState;

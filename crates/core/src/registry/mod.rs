//! Variant registry: the single source of truth for block types.

/// Built-in catalogue of block types.
pub mod defaults;
/// Family, sub-variant and option types.
pub mod types;

pub use types::{
    Family, MediaPosition, MergeRule, Orientation, Registry, SubVariant, Template, VariantOptions,
};

use once_cell::sync::Lazy;

static BUILTIN: Lazy<Registry> = Lazy::new(defaults::builtin_registry);

/// The process-wide built-in registry, built once on first use.
pub fn registry() -> &'static Registry {
    &BUILTIN
}

//! Mapping upload paths to public URLs.

/// Turns a stored asset path into a URL the browser can load.
///
/// The renderer calls this for every image source; it is the only
/// collaborator a render touches. Implementations must be shareable across
/// threads so pages can be rendered in parallel.
pub trait AssetResolver: Sync {
    /// Returns the public URL for `path`.
    fn resolve_url(&self, path: &str) -> String;
}

impl<F> AssetResolver for F
where
    F: Fn(&str) -> String + Sync,
{
    fn resolve_url(&self, path: &str) -> String {
        self(path)
    }
}

/// Leaves every path as stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl AssetResolver for IdentityResolver {
    fn resolve_url(&self, path: &str) -> String {
        path.to_string()
    }
}

/// Prefixes relative upload paths with a base URL.
///
/// Absolute URLs (`scheme://`), protocol-relative URLs and `data:` URIs are
/// passed through untouched.
#[derive(Debug, Clone)]
pub struct BaseUrlResolver {
    base: String,
}

impl BaseUrlResolver {
    /// Creates a resolver for `base`; a trailing slash is ignored.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

fn is_absolute(path: &str) -> bool {
    path.contains("://") || path.starts_with("//") || path.starts_with("data:")
}

impl AssetResolver for BaseUrlResolver {
    fn resolve_url(&self, path: &str) -> String {
        if is_absolute(path) {
            return path.to_string();
        }
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

//! Parallel rendering of many stored pages for static publishing.

use std::time::Instant;

use pageblocks_core::codec;
use rayon::prelude::*;
use serde::Serialize;

use crate::assets::AssetResolver;
use crate::renderer::{RenderOptions, RenderOutput, render};
use crate::view_state::ViewState;

/// One stored page to render.
#[derive(Debug, Clone)]
pub struct PageInput {
    /// Page identifier, echoed in the result.
    pub id: String,
    /// Stored page payload: a JSON array of top-level blocks.
    pub json: String,
}

/// Result for a single page in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    /// Page identifier matching the input.
    pub id: String,
    /// Rendered output (present on success).
    pub output: Option<RenderOutput>,
    /// Number of structural problems repaired while loading.
    pub repaired: usize,
    /// Error message (present when the payload could not be decoded).
    pub error: Option<String>,
}

/// Statistics for batch rendering.
#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    /// Total number of pages processed.
    pub total: usize,
    /// Number of pages rendered.
    pub succeeded: usize,
    /// Number of pages whose payload failed to decode.
    pub failed: usize,
    /// Blocks rendered through the text fallback, across all pages.
    pub fallback_blocks: usize,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch rendering.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to the number of CPU cores.
    pub max_threads: Option<usize>,
    /// Render options applied to every page.
    pub render: RenderOptions,
}

/// All page results, in input order, plus statistics.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRenderResult {
    /// Individual results for each input page.
    pub results: Vec<PageResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Decodes and renders every page in parallel.
///
/// Pages are rendered in their initial view state. A page that fails to
/// decode is reported in its result; the others are unaffected.
pub fn render_batch(
    pages: Vec<PageInput>,
    assets: &dyn AssetResolver,
    options: &BatchOptions,
) -> BatchRenderResult {
    let start = Instant::now();
    let total = pages.len();

    let pool = options.max_threads.and_then(|threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| log::warn!("Falling back to the global thread pool: {}", e))
            .ok()
    });

    let view = ViewState::new();
    let process = |page: PageInput| -> PageResult {
        match codec::decode_blocks(&page.json) {
            Ok((blocks, diagnostics)) => PageResult {
                output: Some(render(&blocks, &view, assets, &options.render)),
                repaired: diagnostics.count(),
                error: None,
                id: page.id,
            },
            Err(e) => {
                log::warn!("Skipping page {}: {}", page.id, e);
                PageResult {
                    id: page.id,
                    output: None,
                    repaired: 0,
                    error: Some(e.to_string()),
                }
            }
        }
    };

    let results: Vec<PageResult> = match pool {
        Some(pool) => pool.install(|| pages.into_par_iter().map(process).collect()),
        None => pages.into_par_iter().map(process).collect(),
    };

    let succeeded = results.iter().filter(|r| r.output.is_some()).count();
    let fallback_blocks = results
        .iter()
        .filter_map(|r| r.output.as_ref())
        .map(|o| o.fallback_blocks.len())
        .sum();

    BatchRenderResult {
        stats: BatchStats {
            total,
            succeeded,
            failed: total - succeeded,
            fallback_blocks,
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::IdentityResolver;

    fn page(id: &str, json: &str) -> PageInput {
        PageInput {
            id: id.to_string(),
            json: json.to_string(),
        }
    }

    #[test]
    fn test_batch_keeps_input_order_and_isolates_failures() {
        let pages = vec![
            page("a", r#"[{"id":"x","type":"TX01","content":{"html":"A"},"order":0}]"#),
            page("b", "not json"),
            page("c", r#"[{"id":"y","type":"OLD1","content":{"html":"C"},"order":0}]"#),
        ];
        let options = BatchOptions {
            max_threads: Some(2),
            ..BatchOptions::default()
        };

        let result = render_batch(pages, &IdentityResolver, &options);
        let ids: Vec<&str> = result.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(result.results[1].error.is_some());
        assert_eq!(result.stats.succeeded, 2);
        assert_eq!(result.stats.failed, 1);
        assert_eq!(result.stats.fallback_blocks, 1);
    }
}

// src/context/mod.rs
//! Smart context: the ranked, signature-level map of a project, fitted to a
//! token budget.

use std::path::{Path, PathBuf};

use crate::budget::try_fit_to_budget;
use crate::config::Config;
use crate::discovery::ScanOptions;
use crate::error::{MapError, Result};
use crate::graph::extract::{build_symbol_graph_with, TagExtractor, TreeSitterExtractor};
use crate::graph::rank::{get_ranked_files, PageRankOptions, RankOptions, DEFAULT_BOOST_FACTOR};
use crate::render::{renderer_for, OutputFormat, RenderOptions};
use crate::signatures::{extract_signatures_for_ranked_files, MAX_SIGNATURES_PER_FILE};
use crate::tokens::{TokenCounter, Tokenizer};

pub const DEFAULT_BUDGET: usize = 4000;

#[derive(Debug, Clone)]
pub struct SmartContextOptions {
    /// Token budget for the rendered output.
    pub budget: usize,
    pub feature: Option<String>,
    pub format: OutputFormat,
    pub show_scores: bool,
    pub max_signatures_per_file: usize,
    /// Files to centre the ranking on, relative to the root or absolute.
    pub focus: Vec<PathBuf>,
    pub scan: ScanOptions,
    pub ranking: PageRankOptions,
    pub boost_factor: f64,
}

impl Default for SmartContextOptions {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            feature: None,
            format: OutputFormat::default(),
            show_scores: false,
            max_signatures_per_file: MAX_SIGNATURES_PER_FILE,
            focus: Vec::new(),
            scan: ScanOptions::default(),
            ranking: PageRankOptions::default(),
            boost_factor: DEFAULT_BOOST_FACTOR,
        }
    }
}

impl SmartContextOptions {
    /// Options seeded from a loaded `contextmap.toml`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            budget: config.output.budget,
            format: config.output.format,
            show_scores: config.output.show_scores,
            max_signatures_per_file: config.output.max_signatures_per_file,
            scan: config.scan_options(),
            ranking: config.pagerank_options(),
            boost_factor: config.ranking.boost_factor,
            ..Self::default()
        }
    }

    /// # Errors
    /// Returns `InvalidOption` for unusable ranking or output settings.
    pub fn validate(&self) -> Result<()> {
        self.ranking.validate()?;
        if self.boost_factor.is_nan() || self.boost_factor <= 0.0 {
            return Err(MapError::invalid("boost_factor", "must be positive"));
        }
        if self.max_signatures_per_file == 0 {
            return Err(MapError::invalid("max_signatures_per_file", "must be at least 1"));
        }
        Ok(())
    }
}

/// Builds the smart context for `root`.
///
/// `domains` are path hints (for example `bookings` or `api/`) that bias
/// ranking toward matching files. Returns an empty string when no source
/// files are found.
///
/// # Errors
/// Returns error if the options are invalid, `root` cannot be scanned, or
/// rendering fails.
pub fn build_smart_context(root: &Path, domains: &[String], opts: &SmartContextOptions) -> Result<String> {
    build_smart_context_with(root, domains, opts, &TreeSitterExtractor, &Tokenizer)
}

/// [`build_smart_context`] with a custom extractor and token counter.
///
/// # Errors
/// Same as [`build_smart_context`].
pub fn build_smart_context_with<E, C>(
    root: &Path,
    domains: &[String],
    opts: &SmartContextOptions,
    extractor: &E,
    counter: &C,
) -> Result<String>
where
    E: TagExtractor,
    C: TokenCounter + ?Sized,
{
    opts.validate()?;

    let mut graph = build_symbol_graph_with(root, &opts.scan, extractor)?;
    if graph.is_empty() {
        tracing::info!(root = %root.display(), "no source files found");
        return Ok(String::new());
    }

    let rank_opts = RankOptions {
        feature: opts.feature.clone(),
        domains: domains.to_vec(),
        focus: opts.focus.iter().map(|f| relative_to(root, f)).collect(),
        boost_factor: opts.boost_factor,
        pagerank: opts.ranking.clone(),
    };
    let ranked = get_ranked_files(&mut graph, &rank_opts);
    let signatures = extract_signatures_for_ranked_files(&graph, &ranked, opts.max_signatures_per_file);

    let renderer = renderer_for(opts.format);
    let render_opts = RenderOptions {
        max_signatures_per_file: opts.max_signatures_per_file,
        show_scores: opts.show_scores,
    };
    let fit = try_fit_to_budget(
        &ranked,
        |prefix| renderer.render(prefix, &signatures, &render_opts),
        counter,
        opts.budget,
    )?;

    tracing::info!(
        files = fit.items.len(),
        ranked = ranked.len(),
        tokens = fit.tokens_used,
        budget = opts.budget,
        "built smart context"
    );
    Ok(fit.output)
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}

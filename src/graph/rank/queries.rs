// src/graph/rank/queries.rs
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use super::builder;
use super::pagerank::{self, PageRankOptions};
use super::personalization::{create_personalization, PathPattern, DEFAULT_BOOST_FACTOR};
use crate::graph::symbols::SymbolGraph;

/// Knobs for one ranking request.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Feature hint: boosts matching symbols and files.
    pub feature: Option<String>,
    /// Domain hints matched against file paths.
    pub domains: Vec<String>,
    /// Files to centre the ranking on.
    pub focus: Vec<PathBuf>,
    pub boost_factor: f64,
    pub pagerank: PageRankOptions,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            feature: None,
            domains: Vec::new(),
            focus: Vec::new(),
            boost_factor: DEFAULT_BOOST_FACTOR,
            pagerank: PageRankOptions::default(),
        }
    }
}

impl RankOptions {
    fn feature(&self) -> Option<&str> {
        self.feature.as_deref().map(str::trim).filter(|f| !f.is_empty())
    }

    fn path_patterns(&self) -> Vec<PathPattern> {
        self.domains
            .iter()
            .map(String::as_str)
            .chain(self.feature())
            .filter(|s| !s.trim().is_empty())
            .map(PathPattern::from)
            .chain(self.focus.iter().map(|f| PathPattern::exact(f)))
            .collect()
    }
}

/// A file with its score and tag counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFile {
    pub path: PathBuf,
    pub rank: f64,
    pub def_count: usize,
    pub ref_count: usize,
}

/// Scores every file in `graph`.
///
/// Domain hints, the feature string and focus paths all feed the
/// personalization vector. Without any of them the teleport is uniform and an
/// explicit `options.pagerank.personalization` is used as given.
#[must_use]
pub fn rank_files(graph: &mut SymbolGraph, options: &RankOptions) -> IndexMap<PathBuf, f64> {
    let adjacency = builder::build_adjacency(graph, options.feature());

    let mut pr_options = options.pagerank.clone();
    let patterns = options.path_patterns();
    if !patterns.is_empty() {
        pr_options.personalization = Some(create_personalization(
            adjacency.nodes(),
            &patterns,
            options.boost_factor,
        ));
    }

    pagerank::compute(&adjacency, &pr_options)
}

/// Ranks files and attaches definition/reference counts, best first.
/// Ties keep node order.
#[must_use]
pub fn get_ranked_files(graph: &mut SymbolGraph, options: &RankOptions) -> Vec<RankedFile> {
    let scores = rank_files(graph, options);
    let mut ranked: Vec<RankedFile> = scores
        .into_iter()
        .map(|(path, rank)| {
            let def_count = graph.tags(&path).iter().filter(|t| t.is_def()).count();
            let ref_count = inbound_ref_count(graph, &path);
            RankedFile {
                path,
                rank,
                def_count,
                ref_count,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.rank.total_cmp(&a.rank));
    ranked
}

/// The `n` best files.
#[must_use]
pub fn get_top_files(graph: &mut SymbolGraph, n: usize, options: &RankOptions) -> Vec<RankedFile> {
    let mut ranked = get_ranked_files(graph, options);
    ranked.truncate(n);
    ranked
}

/// Reference tags in other files naming a symbol defined in `path`.
/// Each defined name counts once; repeated references all count.
fn inbound_ref_count(graph: &SymbolGraph, path: &Path) -> usize {
    let defined: HashSet<&str> = graph
        .tags(path)
        .iter()
        .filter(|t| t.is_def())
        .map(|t| t.name.as_str())
        .collect();

    defined
        .into_iter()
        .map(|symbol| graph.reference_count(symbol) - graph.count_refs_in(path, symbol))
        .sum()
}

// src/graph/rank/builder.rs
//! Adjacency construction: symbol graph to weighted file-to-file graph.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

use super::weights;
use crate::graph::symbols::SymbolGraph;

/// Weighted directed file graph. `out_edges` and `in_edges` are transposes
/// of each other and no node links to itself.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    pub(crate) nodes: IndexSet<PathBuf>,
    pub(crate) out_edges: IndexMap<PathBuf, IndexMap<PathBuf, f64>>,
    pub(crate) in_edges: IndexMap<PathBuf, IndexSet<PathBuf>>,
}

impl AdjacencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node; returns its position in node order.
    pub fn add_node(&mut self, path: &Path) -> usize {
        if let Some(idx) = self.nodes.get_index_of(path) {
            return idx;
        }
        self.nodes.insert_full(path.to_path_buf()).0
    }

    /// Adds `weight` to the edge `from -> to`, creating it if needed.
    /// Self-edges are ignored.
    pub fn add_edge(&mut self, from: &Path, to: &Path, weight: f64) {
        if from == to {
            return;
        }
        self.add_node(from);
        self.add_node(to);
        *self
            .out_edges
            .entry(from.to_path_buf())
            .or_default()
            .entry(to.to_path_buf())
            .or_insert(0.0) += weight;
        self.in_edges
            .entry(to.to_path_buf())
            .or_default()
            .insert(from.to_path_buf());
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PathBuf> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.out_edges.values().map(IndexMap::len).sum()
    }

    #[must_use]
    pub fn contains_node(&self, path: &Path) -> bool {
        self.nodes.contains(path)
    }

    /// Accumulated weight of `from -> to`, or 0.0 if there is no such edge.
    #[must_use]
    pub fn edge_weight(&self, from: &Path, to: &Path) -> f64 {
        self.out_edges
            .get(from)
            .and_then(|targets| targets.get(to))
            .copied()
            .unwrap_or(0.0)
    }

    /// Outgoing neighbours of `path` with edge weights.
    pub fn successors(&self, path: &Path) -> impl Iterator<Item = (&PathBuf, f64)> {
        self.out_edges
            .get(path)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(p, w)| (p, *w)))
    }

    /// Incoming neighbours of `path`.
    pub fn predecessors(&self, path: &Path) -> impl Iterator<Item = &PathBuf> {
        self.in_edges.get(path).into_iter().flatten()
    }

    /// Sum of outgoing edge weights of `path`.
    #[must_use]
    pub fn out_weight(&self, path: &Path) -> f64 {
        self.successors(path).map(|(_, w)| w).sum()
    }
}

/// Builds the weighted reference graph.
///
/// Every file in `graph` becomes a node, isolated files included. For each
/// symbol, every referencing file gets an edge to every defining file,
/// weighted by [`weights::symbol_weight`]. Paths only seen in the indices are
/// registered in `graph` as zero-tag files.
///
/// An edge's weight is the sum of its symbols' weights taken in symbol-name
/// order, and edges are inserted sorted by `(from, to)`, so the result does
/// not depend on the order files or symbols were indexed.
pub fn build_adjacency(graph: &mut SymbolGraph, feature: Option<&str>) -> AdjacencyGraph {
    let mut adjacency = AdjacencyGraph::new();
    for file in graph.files() {
        adjacency.add_node(file);
    }

    let mut unseen: Vec<PathBuf> = Vec::new();
    let mut contributions: EdgeContributions = IndexMap::new();
    for (symbol, def_files) in &graph.definitions {
        if def_files.is_empty() {
            continue;
        }
        let Some(ref_files) = graph.references.get(symbol) else {
            continue;
        };

        let is_feature = feature.is_some_and(|f| weights::matches_feature(symbol, f));
        let weight = weights::symbol_weight(symbol, def_files.len(), is_feature);

        for ref_file in ref_files {
            for def_file in def_files {
                for p in [ref_file, def_file] {
                    if !adjacency.contains_node(p) {
                        unseen.push(p.clone());
                        adjacency.add_node(p);
                    }
                }
                if ref_file != def_file {
                    contributions
                        .entry((ref_file.clone(), def_file.clone()))
                        .or_default()
                        .push((symbol.as_str(), weight));
                }
            }
        }
    }

    contributions.sort_keys();
    for ((from, to), mut parts) in contributions {
        adjacency.add_edge(&from, &to, ordered_sum(&mut parts));
    }

    for path in unseen {
        if graph.ensure_file(&path) {
            tracing::debug!(path = %path.display(), "registered index-only file");
        }
    }

    tracing::debug!(
        nodes = adjacency.node_count(),
        edges = adjacency.edge_count(),
        "built adjacency graph"
    );
    adjacency
}

/// Per-symbol weights of each `(from, to)` edge.
type EdgeContributions<'a> = IndexMap<(PathBuf, PathBuf), Vec<(&'a str, f64)>>;

fn ordered_sum(parts: &mut [(&str, f64)]) -> f64 {
    parts.sort_unstable_by(|a, b| a.0.cmp(b.0).then(a.1.total_cmp(&b.1)));
    parts.iter().map(|(_, w)| w).sum()
}

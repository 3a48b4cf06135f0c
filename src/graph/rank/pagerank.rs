// src/graph/rank/pagerank.rs
//! Weighted, personalizable `PageRank` over the file graph.

use std::collections::HashMap;
use std::path::PathBuf;

use indexmap::IndexMap;

use super::builder::AdjacencyGraph;
use crate::error::{MapError, Result};

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Teleport weights per file. Files missing from the map get no teleport mass.
pub type Personalization = HashMap<PathBuf, f64>;

#[derive(Debug, Clone)]
pub struct PageRankOptions {
    pub damping: f64,
    pub max_iterations: usize,
    pub epsilon: f64,
    pub personalization: Option<Personalization>,
}

impl Default for PageRankOptions {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            epsilon: DEFAULT_EPSILON,
            personalization: None,
        }
    }
}

impl PageRankOptions {
    #[must_use]
    pub fn with_personalization(mut self, personalization: Personalization) -> Self {
        self.personalization = Some(personalization);
        self
    }

    /// Checks the options before a run.
    ///
    /// # Errors
    /// Returns `InvalidOption` if damping is outside [0, 1], epsilon is
    /// negative or NaN, iterations are zero, or a personalization weight is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(MapError::invalid("damping", format!("{} is outside [0, 1]", self.damping)));
        }
        if self.epsilon.is_nan() || self.epsilon < 0.0 {
            return Err(MapError::invalid("epsilon", "must be non-negative"));
        }
        if self.max_iterations == 0 {
            return Err(MapError::invalid("max_iterations", "must be at least 1"));
        }
        let bad_weight = self
            .personalization
            .iter()
            .flat_map(HashMap::values)
            .any(|w| !w.is_finite() || *w < 0.0);
        if bad_weight {
            return Err(MapError::invalid("personalization", "weights must be finite and non-negative"));
        }
        Ok(())
    }
}

/// Computes `PageRank` scores for every node, keyed in node order.
///
/// Scores are not renormalized after the final iteration. A run that hits
/// `max_iterations` returns the scores reached so far.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute(graph: &AdjacencyGraph, options: &PageRankOptions) -> IndexMap<PathBuf, f64> {
    let n = graph.node_count();
    if n == 0 {
        return IndexMap::new();
    }

    let teleport = build_teleport(graph, options.personalization.as_ref());
    let inbound = build_inbound(graph);
    let dangling: Vec<usize> = (0..n).filter(|&i| is_dangling(graph, i)).collect();

    let mut scores = teleport.clone();
    let mut next = vec![0.0; n];
    let mut converged = false;
    let mut iterations = 0;

    while iterations < options.max_iterations {
        iterations += 1;
        let diff = iterate_once(&scores, &mut next, &inbound, &dangling, &teleport, options.damping);
        std::mem::swap(&mut scores, &mut next);
        if diff < options.epsilon {
            converged = true;
            break;
        }
    }

    if converged {
        tracing::debug!(iterations, nodes = n, "pagerank converged");
    } else {
        tracing::debug!(iterations, nodes = n, "pagerank hit iteration cap");
    }

    graph.nodes().cloned().zip(scores).collect()
}

/// Normalized personalization, or uniform when absent or carrying no mass.
#[allow(clippy::cast_precision_loss)]
fn build_teleport(graph: &AdjacencyGraph, personalization: Option<&Personalization>) -> Vec<f64> {
    let n = graph.node_count();
    let uniform = vec![1.0 / n as f64; n];
    let Some(pers) = personalization else {
        return uniform;
    };

    let raw: Vec<f64> = graph
        .nodes()
        .map(|p| pers.get(p).copied().unwrap_or(0.0))
        .collect();
    let total: f64 = raw.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        tracing::debug!("personalization carries no mass for this graph; using uniform teleport");
        return uniform;
    }
    raw.into_iter().map(|w| w / total).collect()
}

/// For each node, the (source index, normalized weight) of every inbound edge.
/// Sources with zero outgoing weight use 1.0 as the denominator.
fn build_inbound(graph: &AdjacencyGraph) -> Vec<Vec<(usize, f64)>> {
    let out_sums: Vec<f64> = graph
        .nodes()
        .map(|p| {
            let sum = graph.out_weight(p);
            if sum > 0.0 { sum } else { 1.0 }
        })
        .collect();

    graph
        .nodes()
        .map(|target| {
            graph
                .predecessors(target)
                .filter_map(|source| {
                    let idx = graph.nodes.get_index_of(source)?;
                    Some((idx, graph.edge_weight(source, target) / out_sums[idx]))
                })
                .collect()
        })
        .collect()
}

fn is_dangling(graph: &AdjacencyGraph, idx: usize) -> bool {
    graph
        .nodes
        .get_index(idx)
        .map_or(true, |p| graph.successors(p).next().is_none())
}

/// One power-iteration step into `next`. Returns the L1 change.
fn iterate_once(
    scores: &[f64],
    next: &mut [f64],
    inbound: &[Vec<(usize, f64)>],
    dangling: &[usize],
    teleport: &[f64],
    damping: f64,
) -> f64 {
    let dangling_sum: f64 = dangling.iter().map(|&i| scores[i]).sum();
    let mut diff = 0.0;

    for (node, slot) in next.iter_mut().enumerate() {
        let incoming: f64 = inbound[node]
            .iter()
            .map(|&(src, share)| scores[src] * share)
            .sum();
        let value = (1.0 - damping) * teleport[node]
            + damping * dangling_sum * teleport[node]
            + damping * incoming;
        diff += (value - scores[node]).abs();
        *slot = value;
    }

    diff
}

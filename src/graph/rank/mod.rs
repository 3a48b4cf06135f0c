// src/graph/rank/mod.rs
//! File ranking: symbol weights, adjacency, and personalized `PageRank`.

pub mod builder;
pub mod pagerank;
pub mod personalization;
pub mod queries;
pub mod weights;

pub use builder::{build_adjacency, AdjacencyGraph};
pub use pagerank::{compute, PageRankOptions, Personalization};
pub use personalization::{create_personalization, PathPattern, DEFAULT_BOOST_FACTOR};
pub use queries::{get_ranked_files, get_top_files, rank_files, RankOptions, RankedFile};
pub use weights::{matches_feature, symbol_weight};

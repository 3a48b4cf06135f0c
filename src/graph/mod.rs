// src/graph/mod.rs
pub mod extract;
pub mod rank;
pub mod symbols;
pub mod tags;

pub use extract::{build_symbol_graph, build_symbol_graph_with, TagExtractor, TreeSitterExtractor};
pub use symbols::SymbolGraph;
pub use tags::{SymbolType, Tag, TagKind};

pub mod budget;
pub mod cli;
pub mod config;
pub mod context;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod graph;
pub mod lang;
pub mod render;
pub mod signatures;
pub mod tokens;

pub use budget::{fit_to_budget, BudgetFit};
pub use context::{build_smart_context, SmartContextOptions};
pub use error::{MapError, Result};
pub use graph::build_symbol_graph;
pub use graph::rank::{create_personalization, get_ranked_files, get_top_files, rank_files};
pub use signatures::{extract_signatures_for_ranked_files, format_tag_as_signature};

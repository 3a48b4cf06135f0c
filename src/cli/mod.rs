// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands};

use anyhow::Result;

use crate::exit::ContextMapExit;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: &Commands) -> Result<ContextMapExit> {
    match command {
        Commands::Map(args) => handlers::handle_map(args),
        Commands::Rank(args) => handlers::handle_rank(args),
    }
}

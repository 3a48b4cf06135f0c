// src/cli/handlers.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use super::args::{MapArgs, RankArgs, ScopeArgs};
use crate::config::Config;
use crate::context::{build_smart_context, SmartContextOptions};
use crate::exit::ContextMapExit;
use crate::graph::extract::build_symbol_graph;
use crate::graph::rank::{get_top_files, RankOptions};
use crate::signatures::rank_tier;
use crate::tokens::Tokenizer;

const OUTPUT_FILE: &str = "context.txt";

/// Handles the map command.
///
/// # Errors
/// Returns error if config loading, scanning, or writing fails.
pub fn handle_map(args: &MapArgs) -> Result<ContextMapExit> {
    let Some(config) = load_config(&args.scope)? else {
        return Ok(ContextMapExit::InvalidInput);
    };

    let mut opts = SmartContextOptions::from_config(&config);
    opts.feature.clone_from(&args.scope.feature);
    opts.focus.clone_from(&args.scope.focus);
    if let Some(budget) = args.budget {
        opts.budget = budget;
    }
    if let Some(format) = args.format {
        opts.format = format;
    }
    opts.show_scores |= args.scores;

    if !args.stdout {
        print_start_message(&args.scope);
    }
    if let Some(warning) = tokenizer_warning(Tokenizer::is_available()) {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }

    let content = build_smart_context(&args.scope.root, &args.scope.domains, &opts)?;
    if content.is_empty() {
        eprintln!(
            "{}",
            "Nothing to write: no source files found, or the budget is too small.".yellow()
        );
        return Ok(ContextMapExit::Success);
    }

    output_result(&content, Tokenizer::count(&content), opts.budget, args.stdout)?;
    Ok(ContextMapExit::Success)
}

/// Handles the rank command.
///
/// # Errors
/// Returns error if config loading or scanning fails.
pub fn handle_rank(args: &RankArgs) -> Result<ContextMapExit> {
    let Some(config) = load_config(&args.scope)? else {
        return Ok(ContextMapExit::InvalidInput);
    };

    let mut graph = build_symbol_graph(&args.scope.root, &config.scan_options())?;
    let opts = RankOptions {
        feature: args.scope.feature.clone(),
        domains: args.scope.domains.clone(),
        focus: args
            .scope
            .focus
            .iter()
            .map(|f| f.strip_prefix(&args.scope.root).map_or_else(|_| f.clone(), Path::to_path_buf))
            .collect(),
        boost_factor: config.ranking.boost_factor,
        pagerank: config.pagerank_options(),
    };
    let top = get_top_files(&mut graph, args.top, &opts);

    if top.is_empty() {
        println!("{}", "No source files found.".yellow());
        return Ok(ContextMapExit::Success);
    }

    println!(
        "{}",
        format!("{:>4}  {:<6} {:>8}  {:>4}  {:>4}  PATH", "#", "TIER", "RANK", "DEFS", "REFS").bold()
    );
    for (i, file) in top.iter().enumerate() {
        let tier = match rank_tier(file.rank) {
            "CORE" => "CORE".red().bold(),
            "HIGH" => "HIGH".yellow(),
            "MID" => "MID".cyan(),
            other => other.dimmed(),
        };
        println!(
            "{:>4}  {:<6} {:>8.5}  {:>4}  {:>4}  {}",
            i + 1,
            tier,
            file.rank,
            file.def_count,
            file.ref_count,
            file.path.display()
        );
    }
    println!("\n{} of {} files", top.len(), graph.file_count());
    Ok(ContextMapExit::Success)
}

/// Loads `contextmap.toml` from the root and applies scan overrides.
/// Returns `None` after reporting if the root is unusable.
fn load_config(scope: &ScopeArgs) -> Result<Option<Config>> {
    if !scope.root.is_dir() {
        eprintln!("{} {} is not a directory", "error:".red().bold(), scope.root.display());
        return Ok(None);
    }

    let mut config = Config::load(&scope.root)
        .with_context(|| format!("failed to load config from {}", scope.root.display()))?;
    if !scope.include.is_empty() {
        config.scan.include.clone_from(&scope.include);
    }
    config.scan.exclude.extend(scope.exclude.iter().cloned());
    config.validate()?;
    Ok(Some(config))
}

fn print_start_message(scope: &ScopeArgs) {
    match &scope.feature {
        Some(feature) => println!("🗺  Mapping {} (feature: {feature})...", scope.root.display()),
        None => println!("🗺  Mapping {}...", scope.root.display()),
    }
}

/// Without the encoding every count is 0, so the budget cannot limit output.
fn tokenizer_warning(available: bool) -> Option<&'static str> {
    (!available).then_some("tokenizer unavailable; token counts are 0 and the budget is not enforced")
}

fn output_result(content: &str, tokens: usize, budget: usize, stdout: bool) -> Result<()> {
    let info = format!(
        "\n📊 Context Size: {} / {budget} tokens",
        tokens.to_string().yellow().bold()
    );

    if stdout {
        print!("{content}");
        eprintln!("{info}");
        return Ok(());
    }

    write_to_file(Path::new(OUTPUT_FILE), content)?;
    println!("{info}");
    Ok(())
}

fn write_to_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    let shown = fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));
    println!("{} {}", "✅ Generated".green(), shown.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warns_only_without_tokenizer() {
        assert!(tokenizer_warning(true).is_none());
        assert!(tokenizer_warning(false).is_some_and(|w| w.contains("budget is not enforced")));
    }

    #[test]
    fn test_tokenizer_loads_for_map() {
        assert!(tokenizer_warning(Tokenizer::is_available()).is_none());
    }
}

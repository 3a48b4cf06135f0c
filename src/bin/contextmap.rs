use clap::Parser;
use colored::Colorize;
use contextmap_core::cli::{self, Cli};
use contextmap_core::exit::ContextMapExit;
use tracing::Level;

fn main() -> ContextMapExit {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = if let Some(cmd) = &cli.command {
        cli::execute(cmd)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(ContextMapExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ContextMapExit::Error
        }
    }
}

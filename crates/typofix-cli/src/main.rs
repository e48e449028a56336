//! typofix CLI
//!
//! Interactive tool for batch-fixing one-word typos across forked
//! repositories.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("verbose mode enabled");

    let ctx = Context::from_cli(&cli)?;

    match cli.command {
        Some(cmd) => execute_command(&ctx, cmd),
        None => interactive::run(&ctx),
    }
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List { json } => commands::run_list(&ctx.store, json),
        Commands::Typo { path, save } => commands::run_typo(&ctx.store, &path, save),
        Commands::Status { name } => commands::run_status(&ctx.store, &name),
    }
}

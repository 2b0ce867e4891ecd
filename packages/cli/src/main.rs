mod commands;
mod config;
mod loader;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, init, insertion_index, inspect, resolve_style, validate, ApplyArgs, InitArgs,
    InsertionArgs, InspectArgs, ResolveStyleArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Pageblocks CLI - inspect and validate block-tree page documents
#[derive(Parser, Debug)]
#[command(name = "pageblocks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default pageblocks.config.json
    Init(InitArgs),

    /// Run publish checks over one document or a directory of documents
    Validate(ValidateArgs),

    /// Print a document's block outline
    Inspect(InspectArgs),

    /// Apply a JSON mutation script to a document as one commit
    Apply(ApplyArgs),

    /// Print the flat style of a node at a breakpoint
    ResolveStyle(ResolveStyleArgs),

    /// Compute the drop index and marker for a pointer position
    InsertionIndex(InsertionArgs),
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()
        .context("Cannot get current directory")?
        .display()
        .to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
        Command::Inspect(args) => inspect(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::ResolveStyle(args) => resolve_style(args, &cwd),
        Command::InsertionIndex(args) => insertion_index(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

use crate::config::Config;
use crate::loader::resolve_path;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pageblocks_editor::{Document, Mutation, Outcome, TreeMutationEngine};
use pageblocks_registry::Registry;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Page document (.json)
    pub input: PathBuf,

    /// JSON array of mutations to apply in order
    pub script: PathBuf,

    /// Write the result here instead of over the input
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Apply and report without saving
    #[arg(long)]
    pub dry_run: bool,
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Created(id) => format!("created {}", id),
        Outcome::Moved => "moved".to_string(),
        Outcome::Unchanged => "unchanged".to_string(),
        Outcome::Deleted(ids) => format!("deleted {} node(s)", ids.len()),
        Outcome::Updated => "updated".to_string(),
    }
}

/// Apply `mutations` as one commit, stopping at the first rejection
fn run_script(
    document: Document,
    mutations: Vec<Mutation>,
    config: &Config,
    label: &str,
) -> Result<(Document, Vec<Outcome>)> {
    let registry = Arc::new(Registry::builtin());
    let metadata = document.metadata;
    let mut engine = TreeMutationEngine::with_config(document.tree, registry, config.engine_config())?;

    let mut outcomes = Vec::with_capacity(mutations.len());
    for (i, mutation) in mutations.into_iter().enumerate() {
        let outcome = engine
            .apply(mutation)
            .with_context(|| format!("Mutation #{} rejected", i + 1))?;
        outcomes.push(outcome);
    }

    if engine.has_uncommitted_changes() {
        engine.commit(label);
    }

    let document = Document {
        tree: engine.into_tree(),
        metadata,
    };
    Ok((document, outcomes))
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = resolve_path(cwd, &args.input);
    let script_path = resolve_path(cwd, &args.script);

    let document = Document::load(&input, &Registry::builtin())?;
    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read {}", script_path.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid mutation script {}", script_path.display()))?;

    println!("🛠️  {} {} mutation(s)", "Applying".green().bold(), mutations.len());

    let label = format!("apply {}", args.script.display());
    let (document, outcomes) = run_script(document, mutations, &config, &label)?;
    for (i, outcome) in outcomes.iter().enumerate() {
        println!("  {} #{} {}", "✓".green(), i + 1, describe(outcome));
    }

    if args.dry_run {
        println!();
        println!("{}", "Dry run, nothing written".yellow());
        return Ok(());
    }

    let out = args
        .out
        .map(|path| resolve_path(cwd, &path))
        .unwrap_or(input);
    document.save(&out)?;
    println!();
    println!("✨ {} {}", "Saved".green().bold(), out.display());

    Ok(())
}

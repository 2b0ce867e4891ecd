use crate::loader::{read_json, resolve_path};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pageblocks_editor::check_invariants;
use pageblocks_model::{walk_tree, BlockNode, BlockTree, TreeVisitor, WalkControl};
use pageblocks_registry::Registry;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Page document (.json)
    pub input: PathBuf,
}

/// One line of the outline
#[derive(Debug, Clone, PartialEq)]
struct OutlineEntry {
    depth: usize,
    id: String,
    name: String,
    block_type: String,
    known: bool,
    flags: Vec<&'static str>,
}

struct OutlineBuilder<'a> {
    registry: &'a Registry,
    entries: Vec<OutlineEntry>,
    missing: Vec<String>,
}

impl TreeVisitor for OutlineBuilder<'_> {
    fn enter(&mut self, node: &BlockNode, depth: usize) -> WalkControl {
        let mut flags = Vec::new();
        if node.meta.locked {
            flags.push("locked");
        }
        if node.meta.hidden {
            flags.push("hidden");
        }

        self.entries.push(OutlineEntry {
            depth,
            id: node.id.to_string(),
            name: node.display_name().to_string(),
            block_type: node.block_type.clone(),
            known: self.registry.contains(&node.block_type),
            flags,
        });
        WalkControl::Continue
    }

    fn missing(&mut self, id: &str, _depth: usize) {
        self.missing.push(id.to_string());
    }
}

fn outline(tree: &BlockTree, registry: &Registry) -> (Vec<OutlineEntry>, Vec<String>) {
    let mut builder = OutlineBuilder {
        registry,
        entries: Vec::new(),
        missing: Vec::new(),
    };
    walk_tree(&mut builder, tree);
    (builder.entries, builder.missing)
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let path = resolve_path(cwd, &args.input);
    let tree = BlockTree::from_value(read_json(&path)?)
        .with_context(|| format!("Not a block tree: {}", args.input.display()))?;
    let registry = Registry::builtin();

    println!("📄 {}", args.input.display().to_string().bright_white().bold());
    println!("   Nodes: {}", tree.len());
    println!();

    let (entries, missing) = outline(&tree, &registry);
    for entry in &entries {
        let indent = "  ".repeat(entry.depth + 1);
        let kind = if entry.known {
            entry.block_type.dimmed()
        } else {
            format!("{} (unknown type)", entry.block_type).yellow()
        };
        let flags = if entry.flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", entry.flags.join(", "))
        };
        println!(
            "{}{} {} {}{}",
            indent,
            entry.name,
            kind,
            entry.id.dimmed(),
            flags.cyan()
        );
    }

    for id in &missing {
        println!("  {} Missing child node: {}", "✗".red(), id);
    }

    let unreachable = tree.len().saturating_sub(entries.len());
    if unreachable > 0 {
        println!("  {} {} node(s) not reachable from the root", "⚠️".yellow(), unreachable);
    }

    println!();
    match check_invariants(&tree, &registry) {
        Ok(()) => println!("   {} Tree is well-formed", "✓".green()),
        Err(err) => println!("   {} {}", "✗".red(), err),
    }

    Ok(())
}

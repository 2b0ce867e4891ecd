use crate::config::Config;
use crate::loader::resolve_path;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pageblocks_editor::Document;
use pageblocks_model::StyleMap;
use pageblocks_registry::Registry;
use pageblocks_style::{overridden_keys, Breakpoint, StyleResolver};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ResolveStyleArgs {
    /// Page document (.json)
    pub input: PathBuf,

    /// Node to resolve
    pub node_id: String,

    /// Breakpoint (desktop, tablet, mobile)
    #[arg(short, long, default_value = "desktop", conflicts_with = "width")]
    pub breakpoint: Breakpoint,

    /// Viewport width in px, mapped to a breakpoint via the config
    #[arg(short, long)]
    pub width: Option<f64>,

    /// Print the style as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn resolve_style(args: ResolveStyleArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let resolver = StyleResolver::new(config.breakpoints);

    let document = Document::load(resolve_path(cwd, &args.input), &Registry::builtin())?;
    let node = document
        .tree
        .get(&args.node_id)
        .ok_or_else(|| anyhow!("Node not found: {}", args.node_id))?;

    let breakpoint = match args.width {
        Some(width) => resolver.breakpoint_for_width(width),
        None => args.breakpoint,
    };
    let style = resolver.resolve_node(node, breakpoint);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&style)?);
        return Ok(());
    }

    println!(
        "🎨 {} {} @ {}",
        node.display_name().bright_white().bold(),
        node.id.as_str().dimmed(),
        breakpoint.as_str().cyan()
    );
    let overridden = overridden_keys(&node.props.style, breakpoint);
    print_style(&style, &overridden);

    Ok(())
}

fn print_style(style: &StyleMap, overridden: &[&str]) {
    if style.is_empty() {
        println!("   (no style)");
        return;
    }

    for (key, value) in style {
        if overridden.contains(&key.as_str()) {
            println!("   {}: {} {}", key, value, "(override)".yellow());
        } else {
            println!("   {}: {}", key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ResolveStyleArgs,
    }

    #[test]
    fn test_breakpoint_flag_parses() {
        let cli = TestCli::try_parse_from(["test", "home.json", "h1", "--breakpoint", "Tablet"]).unwrap();
        assert_eq!(cli.args.breakpoint, Breakpoint::Tablet);
        assert_eq!(cli.args.node_id, "h1");
    }

    #[test]
    fn test_breakpoint_and_width_conflict() {
        let result =
            TestCli::try_parse_from(["test", "home.json", "h1", "-b", "mobile", "--width", "320"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_breakpoint_rejected() {
        assert!(TestCli::try_parse_from(["test", "home.json", "h1", "-b", "watch"]).is_err());
    }
}

use crate::config::Config;
use crate::loader::{find_documents, read_json, resolve_path};
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use pageblocks_registry::Registry;
use pageblocks_validator::{PublishValidator, Severity, ValidationReport};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Page document (.json) or directory of documents
    pub input: PathBuf,

    /// Enable a module key in addition to those in the config
    #[arg(short, long = "enable", value_name = "KEY")]
    pub enable: Vec<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let json = match args.format.as_str() {
        "text" => false,
        "json" => true,
        other => bail!("Unknown format: {}. Use: text or json", other),
    };

    let config = Config::load(cwd)?;
    let enabled = config.enabled_modules_with(&args.enable);
    let validator = PublishValidator::new(Arc::new(Registry::builtin()));

    let input = resolve_path(cwd, &args.input);
    let files = if input.is_file() {
        vec![input]
    } else if input.is_dir() {
        find_documents(&input)?
    } else {
        bail!("Input path does not exist: {}", args.input.display());
    };

    debug!(files = files.len(), modules = enabled.len(), "running publish check");

    if !json {
        println!("🔍 {} Pageblocks publish check", "Starting".green().bold());
        println!("   Input: {}", args.input.display());
        println!("   Files: {}", files.len());
        println!();
    }

    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        reports.push((file.as_path(), check_file(&validator, file, &enabled)?));
    }

    let fatal: usize = reports.iter().map(|(_, r)| r.fatal_count()).sum();
    let warnings: usize = reports
        .iter()
        .map(|(_, r)| r.errors.len() - r.fatal_count())
        .sum();

    if json {
        let out: Vec<FileReport> = reports
            .iter()
            .map(|(file, report)| FileReport {
                file: file.display().to_string(),
                report,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (file, report) in &reports {
            print_report(file, report);
        }
        print_summary(files.len(), fatal, warnings);
    }

    if fatal > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn check_file(
    validator: &PublishValidator,
    file: &Path,
    enabled: &HashSet<String>,
) -> Result<ValidationReport> {
    let value = read_json(file)?;
    Ok(validator.validate_value(&value, enabled))
}

fn print_report(file: &Path, report: &ValidationReport) {
    if report.errors.is_empty() {
        println!("{} {}", "✓".green(), file.display());
        return;
    }

    println!("{}", file.display().to_string().bright_white().bold());
    for issue in &report.errors {
        let label = match issue.severity {
            Severity::Fatal => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        println!(
            "  {}[{}] {} ({} {})",
            label,
            issue.code,
            issue.message,
            issue.block_type.dimmed(),
            issue.node_id.as_str().dimmed()
        );
        if let Some(suggestion) = &issue.suggestion {
            println!("    💡 {}", suggestion.bright_blue());
        }
    }
    println!();
}

fn print_summary(files: usize, fatal: usize, warnings: usize) {
    println!();
    println!(
        "✨ {} Publish check complete!",
        if fatal > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", files);

    if fatal > 0 {
        println!("   {} {}", "Errors:".red(), fatal);
    }
    if warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), warnings);
    }
    if fatal == 0 && warnings == 0 {
        println!("   {} Ready to publish!", "✓".green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_page(dir: &Path, gated: bool) -> PathBuf {
        let block_type = if gated { "product-grid" } else { "text" };
        let page = json!({
            "rootId": "root",
            "nodes": {
                "root": { "id": "root", "type": "page", "childIds": ["b1"] },
                "b1": { "id": "b1", "type": block_type, "parentId": "root" }
            }
        });
        let path = dir.join("home.json");
        std::fs::write(&path, page.to_string()).unwrap();
        path
    }

    #[test]
    fn test_check_file_reports_disabled_module() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_page(dir.path(), true);
        let validator = PublishValidator::new(Arc::new(Registry::builtin()));

        let report = check_file(&validator, &path, &HashSet::new()).unwrap();
        assert!(!report.valid);

        let shop: HashSet<String> = ["shop".to_string()].into_iter().collect();
        let report = check_file(&validator, &path, &shop).unwrap();
        assert!(report.valid);
    }

    #[test]
    fn test_check_file_clean_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_page(dir.path(), false);
        let validator = PublishValidator::new(Arc::new(Registry::builtin()));

        let report = check_file(&validator, &path, &HashSet::new()).unwrap();
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_file_report_json_shape() {
        let report = ValidationReport::empty();
        let value = serde_json::to_value(FileReport {
            file: "home.json".to_string(),
            report: &report,
        })
        .unwrap();
        assert_eq!(value, json!({ "file": "home.json", "valid": true, "errors": [] }));
    }
}

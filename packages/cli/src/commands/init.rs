use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Module keys to enable (repeatable)
    #[arg(short, long = "enable", value_name = "KEY")]
    pub enable: Vec<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pageblocks project...".bright_blue().bold());

    let config = Config {
        enabled_modules: args.enable,
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✨ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} Check a page before publishing:", "1.".bright_white());
    println!("     {}", "pageblocks validate pages/".bright_cyan());
    println!("  {} Print a page's block outline:", "2.".bright_white());
    println!("     {}", "pageblocks inspect pages/home.json".bright_cyan());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd(dir: &tempfile::TempDir) -> String {
        dir.path().display().to_string()
    }

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                enable: vec!["shop".to_string()],
                force: false,
            },
            &cwd(&dir),
        )
        .unwrap();

        let config = Config::load(&cwd(&dir)).unwrap();
        assert_eq!(config.enabled_modules, vec!["shop"]);
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, r#"{ "historyLimit": 7 }"#).unwrap();

        init(InitArgs { enable: vec![], force: false }, &cwd(&dir)).unwrap();
        assert_eq!(Config::load(&cwd(&dir)).unwrap().history_limit, 7);

        init(InitArgs { enable: vec![], force: true }, &cwd(&dir)).unwrap();
        assert_eq!(Config::load(&cwd(&dir)).unwrap().history_limit, 100);
    }
}

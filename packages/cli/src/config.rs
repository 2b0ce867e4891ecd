use anyhow::Context;
use pageblocks_editor::EngineConfig;
use pageblocks_geometry::DEFAULT_MARKER_OFFSET;
use pageblocks_style::BreakpointWidths;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "pageblocks.config.json";

/// Pageblocks configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Undo levels kept per editing session (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Insertion marker distance from a lone edge, in px
    #[serde(default = "default_marker_offset")]
    pub marker_offset: f64,

    /// Module keys available to the site
    #[serde(default)]
    pub enabled_modules: Vec<String>,

    /// Viewport breakpoints in px
    #[serde(default)]
    pub breakpoints: BreakpointWidths,
}

fn default_history_limit() -> usize {
    100
}

fn default_marker_offset() -> f64 {
    DEFAULT_MARKER_OFFSET
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid config {}", config_path.display()))?;
            debug!(path = %config_path.display(), "config loaded");
            Ok(config)
        } else {
            debug!(cwd, "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            history_limit: self.history_limit,
            marker_offset: self.marker_offset,
        }
    }

    /// Configured modules plus any enabled on the command line
    pub fn enabled_modules_with(&self, extra: &[String]) -> HashSet<String> {
        self.enabled_modules
            .iter()
            .chain(extra)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            marker_offset: default_marker_offset(),
            enabled_modules: vec![],
            breakpoints: BreakpointWidths::default(),
        }
    }
}

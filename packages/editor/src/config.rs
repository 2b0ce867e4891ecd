use pageblocks_geometry::DEFAULT_MARKER_OFFSET;
use serde::{Deserialize, Serialize};

/// Tunables for an editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Undo levels kept in history (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Marker distance from a lone edge during drag, in px
    #[serde(default = "default_marker_offset")]
    pub marker_offset: f64,
}

fn default_history_limit() -> usize {
    100
}

fn default_marker_offset() -> f64 {
    DEFAULT_MARKER_OFFSET
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            marker_offset: default_marker_offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config: EngineConfig = serde_json::from_str(r#"{ "historyLimit": 5 }"#).unwrap();
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.marker_offset, 4.0);
    }
}

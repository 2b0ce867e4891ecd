use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Viewport tier used for the style override cascade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    /// Key used in `style.responsive`
    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Breakpoint::Desktop
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown breakpoint '{0}' (expected desktop, tablet or mobile)")]
pub struct ParseBreakpointError(pub String);

impl FromStr for Breakpoint {
    type Err = ParseBreakpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(Breakpoint::Desktop),
            "tablet" => Ok(Breakpoint::Tablet),
            "mobile" => Ok(Breakpoint::Mobile),
            _ => Err(ParseBreakpointError(s.to_string())),
        }
    }
}

/// Minimum viewport widths (px) for each tier above mobile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointWidths {
    #[serde(default = "default_tablet")]
    pub tablet: f64,
    #[serde(default = "default_desktop")]
    pub desktop: f64,
}

fn default_tablet() -> f64 {
    768.0
}

fn default_desktop() -> f64 {
    1024.0
}

impl Default for BreakpointWidths {
    fn default() -> Self {
        Self {
            tablet: default_tablet(),
            desktop: default_desktop(),
        }
    }
}

impl BreakpointWidths {
    pub fn breakpoint_for_width(&self, width: f64) -> Breakpoint {
        if width >= self.desktop {
            Breakpoint::Desktop
        } else if width >= self.tablet {
            Breakpoint::Tablet
        } else {
            Breakpoint::Mobile
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for bp in Breakpoint::ALL {
            assert_eq!(bp.to_string().parse::<Breakpoint>(), Ok(bp));
        }
        assert_eq!(" Mobile ".parse::<Breakpoint>(), Ok(Breakpoint::Mobile));
        assert!("watch".parse::<Breakpoint>().is_err());
        assert_eq!(Breakpoint::default(), Breakpoint::Desktop);
    }

    #[test]
    fn test_width_tiers() {
        let widths = BreakpointWidths::default();
        assert_eq!(widths.breakpoint_for_width(1440.0), Breakpoint::Desktop);
        assert_eq!(widths.breakpoint_for_width(1024.0), Breakpoint::Desktop);
        assert_eq!(widths.breakpoint_for_width(800.0), Breakpoint::Tablet);
        assert_eq!(widths.breakpoint_for_width(375.0), Breakpoint::Mobile);
    }

    #[test]
    fn test_widths_config_defaults() {
        let widths: BreakpointWidths = serde_json::from_str(r#"{ "tablet": 600 }"#).unwrap();
        assert_eq!(widths.tablet, 600.0);
        assert_eq!(widths.desktop, 1024.0);
    }
}

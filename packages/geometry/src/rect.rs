use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Rendered bounding box of a block, in viewport pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self {
            top,
            bottom,
            left: 0.0,
            right: 0.0,
        }
    }

    pub fn with_horizontal(mut self, left: f64, right: f64) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Vertical midpoint
    pub fn midpoint(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid rect '{0}' (expected top:bottom)")]
pub struct ParseRectError(pub String);

/// Parses `top:bottom`
impl FromStr for Rect {
    type Err = ParseRectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRectError(s.to_string());
        let (top, bottom) = s.split_once(':').ok_or_else(err)?;
        let top = top.trim().parse::<f64>().map_err(|_| err())?;
        let bottom = bottom.trim().parse::<f64>().map_err(|_| err())?;
        Ok(Rect::new(top, bottom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let rect = Rect::new(100.0, 140.0);
        assert_eq!(rect.midpoint(), 120.0);
        assert_eq!(rect.height(), 40.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("0:40".parse::<Rect>(), Ok(Rect::new(0.0, 40.0)));
        assert_eq!(" 12.5 : 80 ".parse::<Rect>(), Ok(Rect::new(12.5, 80.0)));
        assert!("12".parse::<Rect>().is_err());
        assert!("a:b".parse::<Rect>().is_err());
    }

    #[test]
    fn test_deserialize_without_horizontal() {
        let rect: Rect = serde_json::from_str(r#"{ "top": 1, "bottom": 2 }"#).unwrap();
        assert_eq!(rect, Rect::new(1.0, 2.0));
    }
}

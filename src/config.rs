use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sizing and styling parameters shared by every figure a grouping renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub panel_width: u32,
    pub panel_height: u32,
    pub marker_size: u32,
    pub font_family: String,
    pub font_size: u32,
    pub title_font_size: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            panel_width: 800,
            panel_height: 600,
            marker_size: 3,
            font_family: "sans-serif".to_string(),
            font_size: 14,
            title_font_size: 24,
        }
    }
}

impl PlotConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pixel size of a figure holding `panels` stacked panels.
    pub fn figure_size(&self, panels: usize) -> (u32, u32) {
        (self.panel_width, self.panel_height * panels.max(1) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = PlotConfig::from_json(r#"{ "panel_height": 400 }"#).unwrap();
        assert_eq!(config.panel_height, 400);
        assert_eq!(config.panel_width, 800);
        assert_eq!(config.font_family, "sans-serif");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(PlotConfig::from_json("{ panel_height: }").is_err());
    }

    #[test]
    fn figure_grows_with_panels() {
        let config = PlotConfig::default();
        assert_eq!(config.figure_size(1), (800, 600));
        assert_eq!(config.figure_size(3), (800, 1800));
    }
}

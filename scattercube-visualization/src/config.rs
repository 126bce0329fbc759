//! Scene configuration

use scattercube_core::{Anchor, Color, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a pick that hits no data point does to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// Keep the current highlight
    #[default]
    Keep,
    /// Clear the current highlight
    Clear,
}

/// Legend panel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub enabled: bool,
    pub title: String,
    pub anchor: Anchor,
    pub position: [f32; 2],
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Legend".to_string(),
            anchor: Anchor::RightTop,
            position: [0.8, 0.9],
        }
    }
}

/// Visual and interaction settings for a scatter scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Position of the plot group in world space
    pub group_position: [f32; 3],
    pub group_scale: f32,
    pub box_color: Color,
    pub box_alpha: f32,
    pub axis_thickness: f32,
    pub point_radius: f32,
    pub highlight_color: Color,
    pub miss_policy: MissPolicy,
    /// Callback priority used when registering on proxy devices
    pub proxy_priority: i32,
    pub legend: LegendConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            group_position: [0.0, 1.7, 0.0],
            group_scale: 1.0,
            box_color: Color::WHITE,
            box_alpha: 0.1,
            axis_thickness: 0.005,
            point_radius: 0.02,
            highlight_color: Color::YELLOW,
            miss_policy: MissPolicy::Keep,
            proxy_priority: 1,
            legend: LegendConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Configuration(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.point_radius.is_finite() && self.point_radius > 0.0) {
            return Err(Error::Configuration(format!(
                "point_radius must be positive, got {}",
                self.point_radius
            )));
        }
        if !(self.axis_thickness.is_finite() && self.axis_thickness > 0.0) {
            return Err(Error::Configuration(format!(
                "axis_thickness must be positive, got {}",
                self.axis_thickness
            )));
        }
        if !(self.group_scale.is_finite() && self.group_scale > 0.0) {
            return Err(Error::Configuration(format!(
                "group_scale must be positive, got {}",
                self.group_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.box_alpha) {
            return Err(Error::Configuration(format!(
                "box_alpha must lie in [0, 1], got {}",
                self.box_alpha
            )));
        }
        if self.group_position.iter().any(|v| !v.is_finite()) {
            return Err(Error::Configuration("group_position must be finite".to_string()));
        }
        for (name, color) in [
            ("box_color", self.box_color),
            ("highlight_color", self.highlight_color),
        ] {
            if !color.is_valid() {
                return Err(Error::Configuration(format!("{} is out of range", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_layout() {
        let config = SceneConfig::default();
        assert_eq!(config.group_position, [0.0, 1.7, 0.0]);
        assert_eq!(config.highlight_color, Color::YELLOW);
        assert_eq!(config.miss_policy, MissPolicy::Keep);
        assert_eq!(config.proxy_priority, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SceneConfig::from_json_str(
            r#"{ "point_radius": 0.05, "miss_policy": "clear", "legend": { "enabled": false } }"#,
        )
        .unwrap();
        assert_eq!(config.point_radius, 0.05);
        assert_eq!(config.miss_policy, MissPolicy::Clear);
        assert!(!config.legend.enabled);
        assert_eq!(config.legend.title, "Legend");
        assert_eq!(config.box_alpha, 0.1);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SceneConfig::default();
        let parsed = SceneConfig::from_json_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(SceneConfig::from_json_str(r#"{ "point_radius": 0.0 }"#).is_err());
        assert!(SceneConfig::from_json_str(r#"{ "box_alpha": 1.5 }"#).is_err());
        assert!(SceneConfig::from_json_str("not json").is_err());
    }
}

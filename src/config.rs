//! Rendering and confidence settings.
//!
//! Loaded from a TOML file; every section and field is optional and falls
//! back to the values the web client renders with.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::axis::LOW_CONFIDENCE_THRESHOLD;
use crate::error::{CompassError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassConfig {
    pub render: RenderConfig,
    pub export: ExportConfig,
    pub chart: ChartConfig,
    pub confidence: ConfidenceConfig,
}

/// 3D sphere view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Perspective field-of-view constant
    pub fov: f64,
    /// Axis spokes are drawn this much longer than the data radius
    pub axis_overshoot: f64,
    /// Yaw increment per animation frame (radians)
    pub rotate_speed: f64,
    /// Frames per second the rotate speed is calibrated against
    pub frame_rate: f64,
    /// Fixed pitch of the animated view (radians)
    pub pitch: f64,
    pub max_width: f64,
    pub max_height: f64,
    /// Sphere radius as a fraction of the smaller canvas side
    pub scale_factor: f64,
    /// Distance labels sit beyond the axis end (px)
    pub label_offset: f64,
    pub grid_rings: Vec<f64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov: 600.0,
            axis_overshoot: 1.15,
            rotate_speed: 0.003,
            frame_rate: 60.0,
            pitch: 0.35,
            max_width: 520.0,
            max_height: 420.0,
            scale_factor: 0.32,
            label_offset: 18.0,
            grid_rings: vec![0.33, 0.66, 1.0],
        }
    }
}

/// Static "nice angle" used for exported images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub yaw: f64,
    pub pitch: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.35,
        }
    }
}

/// 2D political compass chart geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub size: f64,
    /// Room reserved around the grid for labels
    pub pad: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            size: 480.0,
            pad: 64.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub low_threshold: u32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            low_threshold: LOW_CONFIDENCE_THRESHOLD,
        }
    }
}

impl CompassConfig {
    /// Parse from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CompassConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or defaults if no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let config = Self::from_toml(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        let render = &self.render;
        let floats = [
            ("render.fov", render.fov),
            ("render.axis_overshoot", render.axis_overshoot),
            ("render.rotate_speed", render.rotate_speed),
            ("render.frame_rate", render.frame_rate),
            ("render.pitch", render.pitch),
            ("render.max_width", render.max_width),
            ("render.max_height", render.max_height),
            ("render.scale_factor", render.scale_factor),
            ("render.label_offset", render.label_offset),
            ("export.yaw", self.export.yaw),
            ("export.pitch", self.export.pitch),
            ("chart.size", self.chart.size),
            ("chart.pad", self.chart.pad),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(CompassError::InvalidArgument(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        let positive = [
            ("render.fov", render.fov),
            ("render.frame_rate", render.frame_rate),
            ("render.max_width", render.max_width),
            ("render.max_height", render.max_height),
            ("render.scale_factor", render.scale_factor),
            ("render.axis_overshoot", render.axis_overshoot),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(CompassError::InvalidArgument(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if let Some(ring) = render
            .grid_rings
            .iter()
            .find(|r| !r.is_finite() || !(0.0..=1.0).contains(*r))
        {
            return Err(CompassError::InvalidArgument(format!(
                "render.grid_rings entries must lie in 0..=1, got {}",
                ring
            )));
        }

        // Nearest spoke tip sits at z = -radius; the perspective divisor must stay positive
        let max_radius =
            render.max_width.min(render.max_height) * render.scale_factor * render.axis_overshoot;
        if max_radius >= render.fov {
            return Err(CompassError::InvalidArgument(format!(
                "render.fov ({}) must exceed the largest spoke radius ({})",
                render.fov, max_radius
            )));
        }

        if self.chart.pad * 2.0 >= self.chart.size {
            return Err(CompassError::InvalidArgument(format!(
                "chart.pad ({}) leaves no drawable area in a {} chart",
                self.chart.pad, self.chart.size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_rendering() {
        let config = CompassConfig::default();
        assert_eq!(config.render.fov, 600.0);
        assert_eq!(config.render.axis_overshoot, 1.15);
        assert_eq!(config.export.yaw, 0.6);
        assert_eq!(config.export.pitch, 0.35);
        assert_eq!(config.chart.size, 480.0);
        assert_eq!(config.confidence.low_threshold, 4);
    }

    #[test]
    fn test_partial_override() {
        let config = CompassConfig::from_toml(
            r#"
[render]
fov = 800.0

[confidence]
low_threshold = 6
"#,
        )
        .unwrap();
        assert_eq!(config.render.fov, 800.0);
        assert_eq!(config.render.pitch, 0.35);
        assert_eq!(config.confidence.low_threshold, 6);
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(CompassConfig::from_toml("[render]\nfov = 0.0\n").is_err());
        assert!(CompassConfig::from_toml("[chart]\nsize = 100.0\npad = 50.0\n").is_err());
        assert!(CompassConfig::from_toml("[render]\nfov = nan\n").is_err());
        assert!(CompassConfig::from_toml("[export]\nyaw = inf\n").is_err());
        assert!(CompassConfig::from_toml("[render]\nscale_factor = 5.0\n").is_err());
        assert!(CompassConfig::from_toml("[render]\naxis_overshoot = -1.0\n").is_err());
        assert!(CompassConfig::from_toml("[render]\ngrid_rings = [0.5, 1.5]\n").is_err());
        assert!(matches!(
            CompassConfig::from_toml("[render\n"),
            Err(CompassError::Config(_))
        ));
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(CompassConfig::load(None).unwrap(), CompassConfig::default());
    }
}

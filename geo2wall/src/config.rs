use crate::error::{Error, Result};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Folder holding the walls in the KML exports this tool was built around
pub const DEFAULT_KML_FOLDER: &str = "Waende";

/// How rings are turned into wall segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Every ring edge is a candidate wall segment
    #[default]
    Outline,
    /// Every closed ring is a thin wall polygon collapsed to its centre line
    Centerline,
}

/// Point the rotation is applied around
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationOrigin {
    /// Centroid of the whole input geometry
    #[default]
    Centroid,
    Point(Point),
}

/// Tolerances and options controlling wall extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// ε: maximum angle (degrees) between a segment and an axis
    #[serde(default = "default_angular_tolerance")]
    pub angular_tolerance_deg: f64,
    /// δ: maximum perpendicular distance between segments on the same wall line
    #[serde(default = "default_offset_tolerance")]
    pub offset_tolerance: f64,
    /// γ: maximum gap along the wall axis bridged by a merge
    #[serde(default = "default_gap_tolerance")]
    pub gap_tolerance: f64,
    /// Counter-clockwise rotation applied before classification
    #[serde(default)]
    pub rotation_angle_deg: f64,
    #[serde(default)]
    pub rotation_origin: RotationOrigin,
    /// Shift the rotated geometry so its bounding box starts at (0, 0)
    #[serde(default)]
    pub translate_to_origin: bool,
    #[serde(default)]
    pub mode: ExtractionMode,
    /// KML folder / DXF layer to read; everything when unset
    #[serde(default)]
    pub layer: Option<String>,
    /// Uniform scale for DXF drawing units
    #[serde(default)]
    pub dxf_scale: Option<f64>,
}

fn default_angular_tolerance() -> f64 {
    1.0
}

fn default_offset_tolerance() -> f64 {
    0.01
}

fn default_gap_tolerance() -> f64 {
    0.0
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            angular_tolerance_deg: default_angular_tolerance(),
            offset_tolerance: default_offset_tolerance(),
            gap_tolerance: default_gap_tolerance(),
            rotation_angle_deg: 0.0,
            rotation_origin: RotationOrigin::default(),
            translate_to_origin: false,
            mode: ExtractionMode::default(),
            layer: None,
            dxf_scale: None,
        }
    }
}

impl ExtractionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_angular_tolerance(mut self, degrees: f64) -> Self {
        self.angular_tolerance_deg = degrees;
        self
    }

    pub fn with_offset_tolerance(mut self, tolerance: f64) -> Self {
        self.offset_tolerance = tolerance;
        self
    }

    pub fn with_gap_tolerance(mut self, tolerance: f64) -> Self {
        self.gap_tolerance = tolerance;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_angle_deg = degrees;
        self
    }

    pub fn with_rotation_origin(mut self, origin: RotationOrigin) -> Self {
        self.rotation_origin = origin;
        self
    }

    pub fn with_translate_to_origin(mut self, enabled: bool) -> Self {
        self.translate_to_origin = enabled;
        self
    }

    pub fn with_mode(mut self, mode: ExtractionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    pub fn with_dxf_scale(mut self, scale: f64) -> Self {
        self.dxf_scale = Some(scale);
        self
    }

    /// Check every option against its accepted range
    pub fn validate(&self) -> Result<()> {
        let eps = self.angular_tolerance_deg;
        if !eps.is_finite() || !(0.0..45.0).contains(&eps) {
            return Err(Error::InvalidConfig(format!(
                "angular_tolerance_deg must be in [0, 45), got {}",
                eps
            )));
        }
        if !self.offset_tolerance.is_finite() || self.offset_tolerance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "offset_tolerance must be a non-negative number, got {}",
                self.offset_tolerance
            )));
        }
        if !self.gap_tolerance.is_finite() || self.gap_tolerance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "gap_tolerance must be a non-negative number, got {}",
                self.gap_tolerance
            )));
        }
        if !self.rotation_angle_deg.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "rotation_angle_deg must be finite, got {}",
                self.rotation_angle_deg
            )));
        }
        if let RotationOrigin::Point(p) = self.rotation_origin {
            if !p.is_finite() {
                return Err(Error::InvalidConfig(
                    "rotation_origin point must have finite coordinates".to_string(),
                ));
            }
        }
        if let Some(scale) = self.dxf_scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "dxf_scale must be positive, got {}",
                    scale
                )));
            }
        }
        Ok(())
    }
}

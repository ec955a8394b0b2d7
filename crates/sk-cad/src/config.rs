//! Editor configuration structures
//!
//! Tolerances and defaults used by the editing engines. The configuration
//! can be serialized and loaded from RON files; missing sections fall back
//! to their defaults.

use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

/// Snap resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SnapConfig {
    /// Maximum snap distance (exclusive)
    pub tolerance: f64,
    /// Snap to path endpoints
    pub endpoints: bool,
    /// Snap to midpoints of two-segment paths
    pub midpoints: bool,
    /// Snap to crossings with the path under construction
    pub intersections: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            tolerance: 6.0,
            endpoints: true,
            midpoints: true,
            intersections: false,
        }
    }
}

impl SnapConfig {
    /// Configuration with every source switched off
    pub fn disabled() -> Self {
        Self {
            endpoints: false,
            midpoints: false,
            intersections: false,
            ..Self::default()
        }
    }
}

/// Fillet engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilletConfig {
    /// Radius applied on confirm when none was typed
    pub default_radius: f64,
    /// Corner angles within this many radians of 0 or π are refused
    pub angle_epsilon: f64,
    /// Distance within which a click selects a corner
    pub pick_tolerance: f64,
}

impl Default for FilletConfig {
    fn default() -> Self {
        Self {
            default_radius: 10.0,
            angle_epsilon: 0.01,
            pick_tolerance: 10.0,
        }
    }
}

/// Trim engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrimConfig {
    /// Distance within which a click selects a path
    pub pick_tolerance: f64,
    /// Intersection offsets this close to a path end are ignored when splitting loops
    pub endpoint_epsilon: f64,
    /// Resampling steps for the closed-path fallback
    pub resample_steps: usize,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            pick_tolerance: 8.0,
            endpoint_epsilon: 1e-2,
            resample_steps: 32,
        }
    }
}

/// Curve-fit configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SplineConfig {
    /// Catmull-Rom parametrization exponent (0.5 is centripetal)
    pub blend_factor: f64,
    /// Distance within which a click grabs a handle
    pub handle_pick_tolerance: f64,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            blend_factor: 0.5,
            handle_pick_tolerance: 10.0,
        }
    }
}

/// Select tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectConfig {
    /// Distance within which a click grabs a vertex or path
    pub pick_tolerance: f64,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            pick_tolerance: 5.0,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Snap settings
    #[serde(default)]
    pub snap: SnapConfig,
    /// Fillet settings
    #[serde(default)]
    pub fillet: FilletConfig,
    /// Trim settings
    #[serde(default)]
    pub trim: TrimConfig,
    /// Spline settings
    #[serde(default)]
    pub spline: SplineConfig,
    /// Selection settings
    #[serde(default)]
    pub select: SelectConfig,
    /// Constructions shorter than this are discarded on commit
    #[serde(default = "default_min_construction_length")]
    pub min_construction_length: f64,
}

fn default_min_construction_length() -> f64 {
    1.0
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap: SnapConfig::default(),
            fillet: FilletConfig::default(),
            trim: TrimConfig::default(),
            spline: SplineConfig::default(),
            select: SelectConfig::default(),
            min_construction_length: default_min_construction_length(),
        }
    }
}

impl EditorConfig {
    /// Create a new editor configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Load a configuration from a RON file
    pub fn load(path: &FsPath) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Serialize to pretty RON text
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Failed to parse configuration: {0}")]
    Deserialize(String),
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),
}

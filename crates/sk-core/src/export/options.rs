//! Export options for interchange output

use serde::{Deserialize, Serialize};

/// Export options for interchange output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Points sampled along a path that has no exact primitive
    pub sample_count: usize,
    /// Largest |dot| between consecutive unit edges still treated as a right angle
    pub rectangle_tolerance: f64,
    /// Layer name written on every entity
    pub layer: String,
    /// Suggested file name for the written document
    pub file_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sample_count: 24,
            rectangle_tolerance: 0.01,
            layer: "0".to_string(),
            file_name: "timber-profile.dxf".to_string(),
        }
    }
}

//! Interchange document model

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::is_finite_point;
use crate::scene::PathId;

use super::ExportError;

/// One interchange entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Straight line
    Line {
        /// Start point
        start: DVec2,
        /// End point
        end: DVec2,
    },
    /// Counter-clockwise arc with `end_angle > start_angle`
    Arc {
        /// Center
        center: DVec2,
        /// Radius
        radius: f64,
        /// Start angle in degrees
        start_angle: f64,
        /// End angle in degrees
        end_angle: f64,
    },
    /// Full circle
    Circle {
        /// Center
        center: DVec2,
        /// Radius
        radius: f64,
    },
    /// Polyline through straight vertices
    Polyline {
        /// Vertices in order
        vertices: Vec<DVec2>,
        /// Whether the last vertex joins the first
        closed: bool,
    },
    /// B-spline curve
    Spline {
        /// Control points
        control_points: Vec<DVec2>,
        /// Fit points, empty when unknown
        fit_points: Vec<DVec2>,
        /// Curve degree
        degree: u32,
        /// Whether the curve is closed
        closed: bool,
    },
}

impl Primitive {
    /// Entity name as written to DXF
    pub fn entity_name(&self) -> &'static str {
        match self {
            Primitive::Line { .. } => "LINE",
            Primitive::Arc { .. } => "ARC",
            Primitive::Circle { .. } => "CIRCLE",
            Primitive::Polyline { .. } => "LWPOLYLINE",
            Primitive::Spline { .. } => "SPLINE",
        }
    }

    /// Reject entities that a reader could not reconstruct
    pub fn validate(&self) -> Result<(), ExportError> {
        let failure = |reason: &str| {
            Err(ExportError::PrimitiveFailure(format!(
                "{}: {}",
                self.entity_name(),
                reason
            )))
        };

        match self {
            Primitive::Line { start, end } => {
                if !is_finite_point(*start) || !is_finite_point(*end) {
                    return failure("non-finite endpoint");
                }
            }
            Primitive::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                if !is_finite_point(*center) || !radius.is_finite() || *radius <= 0.0 {
                    return failure("invalid center or radius");
                }
                if !start_angle.is_finite() || !end_angle.is_finite() || end_angle <= start_angle
                {
                    return failure("invalid angles");
                }
            }
            Primitive::Circle { center, radius } => {
                if !is_finite_point(*center) || !radius.is_finite() || *radius <= 0.0 {
                    return failure("invalid center or radius");
                }
            }
            Primitive::Polyline { vertices, .. } => {
                if vertices.len() < 2 {
                    return failure("fewer than two vertices");
                }
                if !vertices.iter().all(|v| is_finite_point(*v)) {
                    return failure("non-finite vertex");
                }
            }
            Primitive::Spline {
                control_points,
                fit_points,
                degree,
                ..
            } => {
                if control_points.len() < 2 || *degree == 0 {
                    return failure("too few control points");
                }
                if !control_points
                    .iter()
                    .chain(fit_points.iter())
                    .all(|p| is_finite_point(*p))
                {
                    return failure("non-finite control point");
                }
            }
        }
        Ok(())
    }
}

/// Which export rule a path matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Lines plus one arc per rounded corner
    FilletedPolygon,
    /// Circle primitive
    Circle,
    /// Closed four-vertex polyline
    Rectangle,
    /// Arc primitive
    Arc,
    /// Single line
    Line,
    /// Spline primitive
    Spline,
    /// Line approximation from equal arc-length samples
    Sampled,
}

/// How one path was exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOutcome {
    /// Exported path
    pub path: PathId,
    /// Rule the path matched
    pub classification: Classification,
    /// Whether the rule's primitive failed and a fallback was written instead
    pub fallback: bool,
    /// Number of primitives written for this path
    pub primitive_count: usize,
}

/// Everything produced by one export call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterchangeDocument {
    /// Entities in scene order
    pub primitives: Vec<Primitive>,
    /// One entry per exported path
    pub outcomes: Vec<ExportOutcome>,
}

impl InterchangeDocument {
    /// Whether the document has no entities
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Number of entities with a given DXF name
    pub fn count(&self, entity_name: &str) -> usize {
        self.primitives
            .iter()
            .filter(|p| p.entity_name() == entity_name)
            .count()
    }

    /// Outcome recorded for a path
    pub fn outcome(&self, path: PathId) -> Option<&ExportOutcome> {
        self.outcomes.iter().find(|o| o.path == path)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Serialization(e.to_string()))
    }
}

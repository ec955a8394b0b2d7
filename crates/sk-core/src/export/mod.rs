//! Interchange export
//!
//! Every committed path is classified by the first matching rule below and
//! turned into the closest interchange primitives:
//!
//! 1. filleted polygon: lines between tangent points plus one arc per fillet
//! 2. circle
//! 3. four segments at right angles: closed polyline
//! 4. arc
//! 5. two segments: line
//! 6. anything else: spline when handles are present, sampled lines otherwise
//!
//! A primitive that fails validation is replaced by a fallback so that the
//! document is always complete.

mod document;
mod dxf;
mod options;

use glam::DVec2;

use crate::geometry::points_equal;
use crate::path::{Fillet, Path, PathKind};
use crate::scene::{PathId, Scene};

pub use document::{Classification, ExportOutcome, InterchangeDocument, Primitive};
pub use dxf::format_number;
pub use options::ExportOptions;

use dxf::generate_dxf_string;

/// Classify every committed path of the scene
pub fn export_scene(scene: &Scene, options: &ExportOptions) -> InterchangeDocument {
    let mut document = InterchangeDocument::default();

    for (id, path) in scene.exportable() {
        let (classification, primitives, fallback) = export_path(id, path, options);
        document.outcomes.push(ExportOutcome {
            path: id,
            classification,
            fallback,
            primitive_count: primitives.len(),
        });
        document.primitives.extend(primitives);
    }

    tracing::info!(
        "Exported {} paths as {} primitives",
        document.outcomes.len(),
        document.primitives.len()
    );
    document
}

/// Export the scene as DXF text
pub fn export_dxf(scene: &Scene, options: &ExportOptions) -> String {
    generate_dxf_string(&export_scene(scene, options), options)
}

/// Render an already classified document as DXF text
pub fn document_to_dxf(document: &InterchangeDocument, options: &ExportOptions) -> String {
    generate_dxf_string(document, options)
}

fn export_path(
    id: PathId,
    path: &Path,
    options: &ExportOptions,
) -> (Classification, Vec<Primitive>, bool) {
    let sampled = || sample_lines(path, options.sample_count);

    if let PathKind::FilletedPolygon { corners, fillets } = &path.kind
        && !fillets.is_empty()
    {
        return settle(
            id,
            Classification::FilletedPolygon,
            filleted_polygon_primitives(corners, fillets),
            sampled,
        );
    }

    if let PathKind::Circle { center, radius } = path.kind {
        return settle(
            id,
            Classification::Circle,
            single(Primitive::Circle { center, radius }),
            sampled,
        );
    }

    if path.segments.len() == 4 && is_rectangle(path, options.rectangle_tolerance) {
        let vertices: Vec<DVec2> = path.segments.iter().map(|s| s.point).collect();
        let lines = || {
            (0..4)
                .map(|i| Primitive::Line {
                    start: vertices[i],
                    end: vertices[(i + 1) % 4],
                })
                .collect()
        };
        return settle(
            id,
            Classification::Rectangle,
            single(Primitive::Polyline {
                vertices: vertices.clone(),
                closed: true,
            }),
            lines,
        );
    }

    if let PathKind::Arc(arc) = path.kind {
        return settle(
            id,
            Classification::Arc,
            single(arc_primitive(arc.center, arc.radius, arc.start_angle, arc.end_angle)),
            sampled,
        );
    }

    if path.segments.len() == 2 {
        return settle(
            id,
            Classification::Line,
            single(Primitive::Line {
                start: path.segments[0].point,
                end: path.segments[1].point,
            }),
            sampled,
        );
    }

    if path.segments.len() > 2 && path.has_handles() {
        let fit_points = match &path.kind {
            PathKind::Spline { fit_points } => fit_points.clone(),
            _ => Vec::new(),
        };
        return settle(
            id,
            Classification::Spline,
            single(Primitive::Spline {
                control_points: path.segments.iter().map(|s| s.point).collect(),
                fit_points,
                degree: 3,
                closed: path.closed,
            }),
            sampled,
        );
    }

    (Classification::Sampled, sampled(), false)
}

/// Keep the rule's primitives, or log the failure and use the fallback
fn settle(
    id: PathId,
    classification: Classification,
    result: Result<Vec<Primitive>, ExportError>,
    fallback: impl FnOnce() -> Vec<Primitive>,
) -> (Classification, Vec<Primitive>, bool) {
    match result {
        Ok(primitives) => (classification, primitives, false),
        Err(e) => {
            tracing::warn!("Path {} export as {:?} failed: {}", id, classification, e);
            (classification, fallback(), true)
        }
    }
}

fn single(primitive: Primitive) -> Result<Vec<Primitive>, ExportError> {
    primitive.validate()?;
    Ok(vec![primitive])
}

/// Arc primitive with the end angle lifted above the start angle
fn arc_primitive(center: DVec2, radius: f64, start_angle: f64, end_angle: f64) -> Primitive {
    let end_angle = if end_angle < start_angle {
        end_angle + 360.0
    } else {
        end_angle
    };
    Primitive::Arc {
        center,
        radius,
        start_angle,
        end_angle,
    }
}

/// Closed straight quad whose consecutive unit edges are perpendicular
fn is_rectangle(path: &Path, tolerance: f64) -> bool {
    if !path.closed || path.has_handles() {
        return false;
    }
    let points: Vec<DVec2> = path.segments.iter().map(|s| s.point).collect();
    if points.len() != 4 {
        return false;
    }
    (0..4).all(|i| {
        let e1 = (points[(i + 1) % 4] - points[i]).normalize_or_zero();
        let e2 = (points[(i + 2) % 4] - points[(i + 1) % 4]).normalize_or_zero();
        e1.dot(e2).abs() <= tolerance
    })
}

/// Lines between `sample_count` equal arc-length samples
fn sample_lines(path: &Path, sample_count: usize) -> Vec<Primitive> {
    let samples = path.sample(sample_count.max(2));
    samples
        .windows(2)
        .map(|w| Primitive::Line {
            start: w[0],
            end: w[1],
        })
        .collect()
}

/// Polygon outline with each rounded corner replaced by its tangent points
///
/// Duplicate points are dropped wherever they occur, including a last point
/// that repeats the first.
pub fn filleted_polygon_points(corners: &[DVec2], fillets: &[Fillet]) -> Vec<DVec2> {
    let mut points: Vec<DVec2> = Vec::with_capacity(corners.len() + fillets.len());
    for (index, corner) in corners.iter().enumerate() {
        let expanded = match fillets.iter().find(|f| f.corner_index == index) {
            Some(fillet) => vec![fillet.tangent_point1, fillet.tangent_point2],
            None => vec![*corner],
        };
        for point in expanded {
            if !points.iter().any(|p| points_equal(*p, point)) {
                points.push(point);
            }
        }
    }
    if points.len() > 1
        && let (Some(first), Some(last)) = (points.first(), points.last())
        && points_equal(*first, *last)
    {
        points.pop();
    }
    points
}

fn filleted_polygon_primitives(
    corners: &[DVec2],
    fillets: &[Fillet],
) -> Result<Vec<Primitive>, ExportError> {
    if let Some(bad) = fillets.iter().find(|f| f.corner_index >= corners.len()) {
        return Err(ExportError::PrimitiveFailure(format!(
            "fillet corner {} outside polygon of {} corners",
            bad.corner_index,
            corners.len()
        )));
    }

    let points = filleted_polygon_points(corners, fillets);
    let mut primitives = Vec::new();
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        if fillets.iter().any(|f| f.matches_tangent_pair(a, b)) {
            continue;
        }
        primitives.push(Primitive::Line { start: a, end: b });
    }
    for fillet in fillets {
        primitives.push(arc_primitive(
            fillet.center,
            fillet.radius,
            fillet.start_angle,
            fillet.end_angle,
        ));
    }

    for primitive in &primitives {
        primitive.validate()?;
    }
    Ok(primitives)
}

/// Export-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("Primitive construction failed: {0}")]
    PrimitiveFailure(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{ArcGeometry, Segment};

    fn square_corners() -> Vec<DVec2> {
        vec![
            DVec2::ZERO,
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(0.0, 10.0),
        ]
    }

    fn corner_fillet() -> Fillet {
        Fillet {
            corner_index: 1,
            center: DVec2::new(5.0, 5.0),
            radius: 5.0,
            start_angle: 270.0,
            end_angle: 0.0,
            sweep_angle: 90.0,
            tangent_point1: DVec2::new(5.0, 0.0),
            tangent_point2: DVec2::new(10.0, 5.0),
        }
    }

    fn export_single(path: Path) -> InterchangeDocument {
        let mut scene = Scene::new();
        scene.insert(path);
        export_scene(&scene, &ExportOptions::default())
    }

    #[test]
    fn test_filleted_square_exports_lines_and_arc() {
        let doc = export_single(Path::filleted_polygon(square_corners(), vec![corner_fillet()]));
        assert_eq!(doc.count("LINE"), 4);
        assert_eq!(doc.count("ARC"), 1);
        assert_eq!(doc.outcomes[0].classification, Classification::FilletedPolygon);

        match doc.primitives.last() {
            Some(Primitive::Arc {
                radius,
                start_angle,
                end_angle,
                ..
            }) => {
                assert_eq!(*radius, 5.0);
                assert_eq!(*start_angle, 270.0);
                assert_eq!(*end_angle, 360.0);
            }
            other => panic!("Expected arc, got {:?}", other),
        }
    }

    #[test]
    fn test_filleted_points_have_no_adjacent_duplicates() {
        // A fillet whose tangent points land on the neighbouring corners
        let fillet = Fillet {
            corner_index: 1,
            center: DVec2::new(0.0, 10.0),
            radius: 10.0,
            start_angle: 270.0,
            end_angle: 0.0,
            sweep_angle: 90.0,
            tangent_point1: DVec2::new(0.0, 0.0),
            tangent_point2: DVec2::new(10.0, 10.0),
        };
        let points = filleted_polygon_points(&square_corners(), &[fillet]);
        assert_eq!(points.len(), 3);
        for i in 0..points.len() {
            assert!(!points_equal(points[i], points[(i + 1) % points.len()]));
        }

        let doc = export_single(Path::filleted_polygon(square_corners(), vec![fillet]));
        // 3 export segments, one of which is the skipped tangent pair
        assert_eq!(doc.count("LINE") + doc.count("ARC"), 3 - 1 + 1);
    }

    #[test]
    fn test_circle_exports_circle() {
        let doc = export_single(Path::circle(DVec2::new(3.0, 4.0), 2.0));
        assert_eq!(
            doc.primitives,
            vec![Primitive::Circle {
                center: DVec2::new(3.0, 4.0),
                radius: 2.0
            }]
        );
    }

    #[test]
    fn test_bad_circle_falls_back_to_samples() {
        let path = Path::circle(DVec2::ZERO, 5.0).with_kind(PathKind::Circle {
            center: DVec2::ZERO,
            radius: -1.0,
        });
        let doc = export_single(path);
        assert_eq!(doc.count("LINE"), 23);
        assert!(doc.outcomes[0].fallback);
    }

    #[test]
    fn test_rectangle_exports_closed_polyline() {
        let doc = export_single(Path::rectangle(DVec2::ZERO, DVec2::new(20.0, 10.0)));
        assert_eq!(doc.primitives.len(), 1);
        match &doc.primitives[0] {
            Primitive::Polyline { vertices, closed } => {
                assert_eq!(vertices.len(), 4);
                assert!(*closed);
            }
            other => panic!("Expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_skewed_quad_is_not_rectangle() {
        let quad = Path::polyline(
            &[
                DVec2::ZERO,
                DVec2::new(10.0, 0.0),
                DVec2::new(12.0, 10.0),
                DVec2::new(0.0, 10.0),
            ],
            true,
        );
        let doc = export_single(quad);
        assert_eq!(doc.outcomes[0].classification, Classification::Sampled);
        assert_eq!(doc.count("LINE"), 23);
    }

    #[test]
    fn test_arc_end_angle_lifted() {
        let geometry = ArcGeometry::from_sweep(DVec2::ZERO, 4.0, 300.0, 120.0);
        let doc = export_single(Path::arc(geometry));
        match &doc.primitives[0] {
            Primitive::Arc {
                start_angle,
                end_angle,
                ..
            } => {
                assert!((*start_angle - 300.0).abs() < 1e-9);
                assert!((*end_angle - 420.0).abs() < 1e-9);
            }
            other => panic!("Expected arc, got {:?}", other),
        }
    }

    #[test]
    fn test_two_segment_path_is_line() {
        let doc = export_single(Path::line(DVec2::ZERO, DVec2::new(1.0, 1.0)));
        assert_eq!(doc.outcomes[0].classification, Classification::Line);
        assert_eq!(doc.primitives.len(), 1);
    }

    #[test]
    fn test_curved_path_exports_spline_with_fit_points() {
        let segments = vec![
            Segment::with_handles(DVec2::ZERO, DVec2::ZERO, DVec2::new(2.0, 2.0)),
            Segment::with_handles(
                DVec2::new(10.0, 5.0),
                DVec2::new(-2.0, 0.0),
                DVec2::new(2.0, 0.0),
            ),
            Segment::new(DVec2::new(20.0, 0.0)),
        ];
        let fit_points = vec![DVec2::ZERO, DVec2::new(10.0, 5.0), DVec2::new(20.0, 0.0)];
        let path = Path::new(segments, false).with_kind(PathKind::Spline {
            fit_points: fit_points.clone(),
        });
        let doc = export_single(path);
        match &doc.primitives[0] {
            Primitive::Spline {
                control_points,
                fit_points: fits,
                degree,
                closed,
            } => {
                assert_eq!(control_points.len(), 3);
                assert_eq!(fits, &fit_points);
                assert_eq!(*degree, 3);
                assert!(!closed);
            }
            other => panic!("Expected spline, got {:?}", other),
        }
    }

    #[test]
    fn test_straight_polyline_is_sampled() {
        let path = Path::polyline(
            &[DVec2::ZERO, DVec2::new(10.0, 0.0), DVec2::new(10.0, 10.0)],
            false,
        );
        let doc = export_single(path);
        assert_eq!(doc.count("LINE"), 23);
        assert_eq!(doc.outcomes[0].classification, Classification::Sampled);
    }

    #[test]
    fn test_export_totality() {
        let mut scene = Scene::new();
        assert!(export_scene(&scene, &ExportOptions::default()).is_empty());

        let ids = vec![
            scene.insert(Path::line(DVec2::ZERO, DVec2::new(5.0, 0.0))),
            scene.insert(Path::circle(DVec2::ZERO, 1.0)),
            scene.insert(Path::new(vec![Segment::new(DVec2::ONE)], false)),
        ];
        scene.insert(Path::line(DVec2::ZERO, DVec2::ONE).with_temporary(true));

        let doc = export_scene(&scene, &ExportOptions::default());
        assert_eq!(doc.outcomes.len(), 3);
        for id in ids {
            assert!(doc.outcome(id).is_some_and(|o| o.primitive_count > 0));
        }
    }

    #[test]
    fn test_export_dxf_text() {
        let mut scene = Scene::new();
        scene.insert(Path::line(DVec2::ZERO, DVec2::new(5.0, 0.0)));
        let text = export_dxf(&scene, &ExportOptions::default());
        assert!(text.contains("LINE"));
        assert!(text.trim_end().ends_with("EOF"));
    }
}

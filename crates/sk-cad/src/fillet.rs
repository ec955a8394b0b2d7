//! Fillet engine
//!
//! Rounds a corner with a tangent arc of a given radius. A corner is either
//! a vertex of a closed polygon or the shared endpoint of two open paths.
//! Every check runs before the scene is touched, so a refused fillet leaves
//! the drawing exactly as it was.

use std::f64::consts::PI;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use sk_core::geometry::{angle_degrees, normalize_degrees, points_equal};
use sk_core::{ArcGeometry, Fillet, Path, PathId, PathKind, Scene};

use crate::config::FilletConfig;

/// Fillet-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilletError {
    #[error("Corner is too close to straight or folded back ({0:.4} rad)")]
    DegenerateAngle(f64),
    #[error("Radius {radius} needs {required:.4} of edge length but only {available:.4} is available")]
    RadiusTooLarge {
        radius: f64,
        required: f64,
        available: f64,
    },
    #[error("Unsupported corner: {0}")]
    UnsupportedCorner(String),
    #[error("Invalid fillet radius: {0}")]
    InvalidRadius(f64),
    #[error("Path not found: {0}")]
    PathNotFound(PathId),
}

/// Result type for fillet operations
pub type FilletResult<T> = Result<T, FilletError>;

/// The corner to round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FilletCorner {
    /// Vertex of a closed polygon, by its index in the corner list
    Closed {
        /// Polygon path
        path: PathId,
        /// Corner index
        corner: usize,
    },
    /// Shared endpoint of two open paths
    Shared {
        /// First path
        first: PathId,
        /// Second path
        second: PathId,
        /// Shared endpoint
        corner: DVec2,
    },
}

/// Scene changes made by a fillet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Replacement {
    /// Paths taken out of the scene
    pub removed: Vec<PathId>,
    /// Paths added to the scene
    pub inserted: Vec<PathId>,
    /// Paths edited in place
    pub modified: Vec<PathId>,
}

/// How the raw sweep of a corner arc is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepBranch {
    /// Corner of a closed polygon
    PolygonCorner,
    /// Corner between two open paths
    LineToLine,
}

/// Tangent arc computed for one corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerGeometry {
    /// Corner vertex
    pub corner: DVec2,
    /// Interior angle in radians
    pub angle: f64,
    /// Distance from the corner to each tangent point
    pub tangent_distance: f64,
    /// Tangent point towards the first neighbour
    pub tangent_point1: DVec2,
    /// Tangent point towards the second neighbour
    pub tangent_point2: DVec2,
    /// The arc joining the tangent points
    pub arc: ArcGeometry,
}

/// Compute the tangent arc of radius `radius` at `corner`
///
/// `previous` and `next` are the neighbouring points along the two edges.
pub fn corner_geometry(
    corner: DVec2,
    previous: DVec2,
    next: DVec2,
    radius: f64,
    angle_epsilon: f64,
    branch: SweepBranch,
) -> FilletResult<CornerGeometry> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(FilletError::InvalidRadius(radius));
    }

    let v1 = (previous - corner).normalize_or_zero();
    let v2 = (next - corner).normalize_or_zero();
    if v1 == DVec2::ZERO || v2 == DVec2::ZERO {
        return Err(FilletError::DegenerateAngle(0.0));
    }

    let angle = v1.dot(v2).clamp(-1.0, 1.0).acos();
    if angle < angle_epsilon || PI - angle < angle_epsilon {
        return Err(FilletError::DegenerateAngle(angle));
    }

    let half = angle / 2.0;
    let tangent_distance = radius / half.tan();
    let tangent_point1 = corner + v1 * tangent_distance;
    let tangent_point2 = corner + v2 * tangent_distance;
    let center = corner + (v1 + v2).normalize() * (radius / half.sin());

    let start = angle_degrees(center, tangent_point1);
    let end = angle_degrees(center, tangent_point2);
    let sweep = normalize_degrees(end - start);
    let (start_angle, end_angle, sweep_angle) = settle_sweep(branch, start, end, sweep);

    Ok(CornerGeometry {
        corner,
        angle,
        tangent_distance,
        tangent_point1,
        tangent_point2,
        arc: ArcGeometry {
            center,
            radius,
            start_angle,
            end_angle,
            sweep_angle,
        },
    })
}

/// Pick the drawn direction of a corner arc
fn settle_sweep(branch: SweepBranch, start: f64, end: f64, sweep: f64) -> (f64, f64, f64) {
    match branch {
        // Polygon corners keep the shorter way round
        SweepBranch::PolygonCorner => {
            if sweep > 180.0 {
                (end, start, 360.0 - sweep)
            } else {
                (start, end, sweep)
            }
        }
        // Line-to-line corners take the complement of a reflex sweep
        SweepBranch::LineToLine => {
            if sweep > 180.0 {
                (end, start, 360.0 - sweep)
            } else {
                (start, end, sweep)
            }
        }
    }
}

/// Round a corner
pub fn apply_fillet(
    scene: &mut Scene,
    corner: FilletCorner,
    radius: f64,
    config: &FilletConfig,
) -> FilletResult<Replacement> {
    match corner {
        FilletCorner::Closed { path, corner } => {
            fillet_polygon_corner(scene, path, corner, radius, config)
        }
        FilletCorner::Shared {
            first,
            second,
            corner,
        } => fillet_shared_corner(scene, first, second, corner, radius, config),
    }
}

/// Corner list and existing fillets of a closed path that can take a fillet
fn polygon_corners(path: &Path) -> FilletResult<(Vec<DVec2>, Vec<Fillet>)> {
    if !path.closed {
        return Err(FilletError::UnsupportedCorner(
            "path is not closed".to_string(),
        ));
    }
    let (corners, fillets) = match &path.kind {
        PathKind::FilletedPolygon { corners, fillets } => (corners.clone(), fillets.clone()),
        PathKind::Circle { .. } | PathKind::Arc(_) | PathKind::Spline { .. } => {
            return Err(FilletError::UnsupportedCorner(format!(
                "{} has no corners",
                path.kind.name()
            )));
        }
        _ if path.has_handles() => {
            return Err(FilletError::UnsupportedCorner(
                "curved polygon edges".to_string(),
            ));
        }
        _ => (path.segments.iter().map(|s| s.point).collect(), Vec::new()),
    };
    if corners.len() < 3 {
        return Err(FilletError::UnsupportedCorner(
            "polygon needs at least three corners".to_string(),
        ));
    }
    Ok((corners, fillets))
}

fn fillet_polygon_corner(
    scene: &mut Scene,
    id: PathId,
    index: usize,
    radius: f64,
    config: &FilletConfig,
) -> FilletResult<Replacement> {
    let path = scene.get(id).ok_or(FilletError::PathNotFound(id))?;
    let (corners, mut fillets) = polygon_corners(path)?;
    let n = corners.len();
    if index >= n {
        return Err(FilletError::UnsupportedCorner(format!(
            "corner {} out of range for {} corners",
            index, n
        )));
    }

    let corner = corners[index];
    let previous = corners[(index + n - 1) % n];
    let next = corners[(index + 1) % n];
    let geometry = corner_geometry(
        corner,
        previous,
        next,
        radius,
        config.angle_epsilon,
        SweepBranch::PolygonCorner,
    )?;

    // Edge length left over after a neighbouring fillet took its share
    let available = |neighbour_index: usize, neighbour: DVec2| {
        let used = fillets
            .iter()
            .find(|f| f.corner_index == neighbour_index)
            .map_or(0.0, |f| f.tangent_distance(neighbour));
        corner.distance(neighbour) - used
    };
    let available = available((index + n - 1) % n, previous).min(available((index + 1) % n, next));
    if geometry.tangent_distance > available {
        return Err(FilletError::RadiusTooLarge {
            radius,
            required: geometry.tangent_distance,
            available,
        });
    }

    let fillet = Fillet {
        corner_index: index,
        center: geometry.arc.center,
        radius,
        start_angle: geometry.arc.start_angle,
        end_angle: geometry.arc.end_angle,
        sweep_angle: geometry.arc.sweep_angle,
        tangent_point1: geometry.tangent_point1,
        tangent_point2: geometry.tangent_point2,
    };
    match fillets.iter_mut().find(|f| f.corner_index == index) {
        Some(existing) => *existing = fillet,
        None => fillets.push(fillet),
    }

    let mut rounded = Path::filleted_polygon(corners, fillets).with_style(path.style);
    rounded.visible = path.visible;
    let inserted = scene
        .replace(id, vec![rounded])
        .ok_or(FilletError::PathNotFound(id))?;

    tracing::info!(
        "Filleted corner {} of path {} with radius {} (sweep {:.2}°)",
        index,
        id,
        radius,
        fillet.sweep_angle
    );
    Ok(Replacement {
        removed: vec![id],
        inserted,
        modified: Vec::new(),
    })
}

/// Which end of an open path sits on the corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathEnd {
    Start,
    End,
}

/// End index, neighbour point and edge length of an open path at `corner`
fn open_corner_edge(path: &Path, id: PathId, corner: DVec2) -> FilletResult<(usize, DVec2, f64)> {
    if path.closed {
        return Err(FilletError::UnsupportedCorner(format!(
            "path {} is closed",
            id
        )));
    }
    if matches!(path.kind, PathKind::Arc(_) | PathKind::Circle { .. }) {
        return Err(FilletError::UnsupportedCorner(format!(
            "{} edges cannot be filleted",
            path.kind.name()
        )));
    }
    let n = path.segments.len();
    if n < 2 {
        return Err(FilletError::UnsupportedCorner(format!(
            "path {} has a single point",
            id
        )));
    }

    let end = if path.first_point().is_some_and(|p| points_equal(p, corner)) {
        PathEnd::Start
    } else if path.last_point().is_some_and(|p| points_equal(p, corner)) {
        PathEnd::End
    } else {
        return Err(FilletError::UnsupportedCorner(format!(
            "path {} does not end at the corner",
            id
        )));
    };

    let (index, neighbour, curve) = match end {
        PathEnd::Start => (0, path.segments[1].point, path.curve(0)),
        PathEnd::End => (n - 1, path.segments[n - 2].point, path.curve(n - 2)),
    };
    if !curve.is_some_and(|c| c.is_linear()) {
        return Err(FilletError::UnsupportedCorner(format!(
            "path {} is curved at the corner",
            id
        )));
    }
    Ok((index, neighbour, corner.distance(neighbour)))
}

fn fillet_shared_corner(
    scene: &mut Scene,
    first: PathId,
    second: PathId,
    corner: DVec2,
    radius: f64,
    config: &FilletConfig,
) -> FilletResult<Replacement> {
    if first == second {
        return Err(FilletError::UnsupportedCorner(
            "both edges belong to the same path".to_string(),
        ));
    }
    let path1 = scene.get(first).ok_or(FilletError::PathNotFound(first))?;
    let path2 = scene.get(second).ok_or(FilletError::PathNotFound(second))?;
    let (index1, neighbour1, length1) = open_corner_edge(path1, first, corner)?;
    let (index2, neighbour2, length2) = open_corner_edge(path2, second, corner)?;

    let geometry = corner_geometry(
        corner,
        neighbour1,
        neighbour2,
        radius,
        config.angle_epsilon,
        SweepBranch::LineToLine,
    )?;
    if geometry.tangent_distance > length1 || geometry.tangent_distance > length2 {
        return Err(FilletError::RadiusTooLarge {
            radius,
            required: geometry.tangent_distance,
            available: length1.min(length2),
        });
    }

    let mut arc = Path::arc(geometry.arc).with_style(path1.style);
    arc.visible = path1.visible;
    let position = scene
        .position(first)
        .max(scene.position(second))
        .map_or(scene.len(), |p| p + 1);

    // All checks passed; mutate
    if let Some(path) = scene.get_mut(first) {
        path.segments[index1].point = geometry.tangent_point1;
    }
    if let Some(path) = scene.get_mut(second) {
        path.segments[index2].point = geometry.tangent_point2;
    }
    let arc_id = scene.insert_at(position, arc);

    tracing::info!(
        "Filleted corner at ({:.3}, {:.3}) between {} and {} with radius {}",
        corner.x,
        corner.y,
        first,
        second,
        radius
    );
    Ok(Replacement {
        removed: Vec::new(),
        inserted: vec![arc_id],
        modified: vec![first, second],
    })
}

/// Find the corner under a click
///
/// A closed polygon corner within the pick tolerance wins; otherwise the
/// nearest open-path endpoint is used and exactly one other open path must
/// share it.
pub fn locate_corner(
    scene: &Scene,
    point: DVec2,
    config: &FilletConfig,
) -> FilletResult<FilletCorner> {
    let tolerance = config.pick_tolerance;

    let mut closed_hit: Option<(PathId, usize, f64)> = None;
    for (id, path) in scene.candidates().filter(|(_, p)| p.closed) {
        let Ok((corners, _)) = polygon_corners(path) else {
            continue;
        };
        for (index, corner) in corners.iter().enumerate() {
            let distance = corner.distance(point);
            if distance <= tolerance && closed_hit.is_none_or(|(_, _, d)| distance < d) {
                closed_hit = Some((id, index, distance));
            }
        }
    }
    if let Some((path, corner, _)) = closed_hit {
        return Ok(FilletCorner::Closed { path, corner });
    }

    let open_endpoints = || {
        scene
            .candidates()
            .filter(|(_, p)| !p.closed)
            .flat_map(|(id, p)| {
                [p.first_point(), p.last_point()]
                    .into_iter()
                    .flatten()
                    .map(move |e| (id, e))
            })
    };

    let corner = open_endpoints()
        .map(|(_, e)| (e, e.distance(point)))
        .filter(|(_, d)| *d <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(e, _)| e)
        .ok_or_else(|| FilletError::UnsupportedCorner("no corner at the clicked point".to_string()))?;

    let mut sharing: Vec<PathId> = open_endpoints()
        .filter(|(_, e)| points_equal(*e, corner))
        .map(|(id, _)| id)
        .collect();
    sharing.dedup();

    match sharing.as_slice() {
        [first, second] => Ok(FilletCorner::Shared {
            first: *first,
            second: *second,
            corner,
        }),
        [_] => Err(FilletError::UnsupportedCorner(
            "no second path meets this endpoint".to_string(),
        )),
        _ => Err(FilletError::UnsupportedCorner(format!(
            "{} paths meet at this endpoint",
            sharing.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_core::{ExportOptions, Primitive, export_scene};

    fn config() -> FilletConfig {
        FilletConfig::default()
    }

    fn right_angle_lines(scene: &mut Scene) -> (PathId, PathId) {
        let a = scene.insert(Path::line(DVec2::ZERO, DVec2::new(10.0, 0.0)));
        let b = scene.insert(Path::line(DVec2::new(10.0, 0.0), DVec2::new(10.0, 10.0)));
        (a, b)
    }

    fn assert_sweep_consistent(arc: &ArcGeometry) {
        assert!(arc.sweep_angle > 0.0 && arc.sweep_angle < 360.0);
        let expected = normalize_degrees(arc.start_angle + arc.sweep_angle);
        let diff = (expected - arc.end_angle).abs();
        assert!(
            diff < 1e-9 || (360.0 - diff) < 1e-9,
            "end {} != start {} + sweep {}",
            arc.end_angle,
            arc.start_angle,
            arc.sweep_angle
        );
    }

    #[test]
    fn test_tangent_law() {
        for degrees in [30.0_f64, 60.0, 90.0, 120.0, 150.0] {
            let theta = degrees.to_radians();
            let corner = DVec2::new(3.0, 4.0);
            let previous = corner + DVec2::new(100.0, 0.0);
            let next = corner + DVec2::new(theta.cos(), theta.sin()) * 100.0;
            let radius = 4.0;

            let geometry =
                corner_geometry(corner, previous, next, radius, 0.01, SweepBranch::PolygonCorner)
                    .unwrap();
            let expected = radius / (theta / 2.0).tan();
            assert!((geometry.tangent_distance - expected).abs() < 1e-9);
            assert!((corner.distance(geometry.tangent_point1) - expected).abs() < 1e-9);
            assert!((corner.distance(geometry.tangent_point2) - expected).abs() < 1e-9);
            assert!((geometry.arc.center.distance(geometry.tangent_point1) - radius).abs() < 1e-9);
            assert!((geometry.arc.center.distance(geometry.tangent_point2) - radius).abs() < 1e-9);
            assert!(geometry.arc.sweep_angle < 180.0);
            assert_sweep_consistent(&geometry.arc);
        }
    }

    #[test]
    fn test_degenerate_angles_refused() {
        let corner = DVec2::ZERO;
        let straight = corner_geometry(
            corner,
            DVec2::new(-10.0, 0.0),
            DVec2::new(10.0, 0.0),
            2.0,
            0.01,
            SweepBranch::LineToLine,
        );
        assert!(matches!(straight, Err(FilletError::DegenerateAngle(_))));

        let folded = corner_geometry(
            corner,
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 0.001),
            2.0,
            0.01,
            SweepBranch::LineToLine,
        );
        assert!(matches!(folded, Err(FilletError::DegenerateAngle(_))));

        let coincident = corner_geometry(
            corner,
            corner,
            DVec2::new(10.0, 0.0),
            2.0,
            0.01,
            SweepBranch::LineToLine,
        );
        assert!(matches!(coincident, Err(FilletError::DegenerateAngle(_))));
    }

    #[test]
    fn test_invalid_radius() {
        let result = corner_geometry(
            DVec2::ZERO,
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 10.0),
            0.0,
            0.01,
            SweepBranch::LineToLine,
        );
        assert_eq!(result, Err(FilletError::InvalidRadius(0.0)));
    }

    #[test]
    fn test_two_lines_filleted() {
        let mut scene = Scene::new();
        let (a, b) = right_angle_lines(&mut scene);
        let corner = FilletCorner::Shared {
            first: a,
            second: b,
            corner: DVec2::new(10.0, 0.0),
        };

        let replacement = apply_fillet(&mut scene, corner, 3.0, &config()).unwrap();
        assert_eq!(replacement.modified, vec![a, b]);
        assert_eq!(replacement.inserted.len(), 1);
        assert_eq!(scene.len(), 3);

        let line_a = scene.get(a).unwrap();
        let line_b = scene.get(b).unwrap();
        assert!((line_a.length() - 7.0).abs() < 1e-9, "First line shortened by 3");
        assert!((line_b.length() - 7.0).abs() < 1e-9, "Second line shortened by 3");

        let arc = scene.get(replacement.inserted[0]).unwrap();
        let PathKind::Arc(geometry) = arc.kind else {
            panic!("Expected arc kind");
        };
        assert!((geometry.radius - 3.0).abs() < 1e-12);
        assert!(geometry.center.distance(DVec2::new(7.0, 3.0)) < 1e-9);
        assert_sweep_consistent(&geometry);

        let doc = export_scene(&scene, &ExportOptions::default());
        assert_eq!(doc.count("LINE"), 2);
        assert_eq!(doc.count("ARC"), 1);
    }

    #[test]
    fn test_radius_too_large_leaves_scene_untouched() {
        let mut scene = Scene::new();
        let (a, b) = right_angle_lines(&mut scene);
        let before: Vec<Path> = scene.iter().map(|(_, p)| p.clone()).collect();

        let corner = FilletCorner::Shared {
            first: a,
            second: b,
            corner: DVec2::new(10.0, 0.0),
        };
        let result = apply_fillet(&mut scene, corner, 10.5, &config());
        assert!(matches!(result, Err(FilletError::RadiusTooLarge { .. })));

        let after: Vec<Path> = scene.iter().map(|(_, p)| p.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_square_corner_fillet() {
        let mut scene = Scene::new();
        let square = scene.insert(Path::rectangle(DVec2::ZERO, DVec2::new(10.0, 10.0)));

        let corner = FilletCorner::Closed {
            path: square,
            corner: 1,
        };
        let replacement = apply_fillet(&mut scene, corner, 5.0, &config()).unwrap();
        assert_eq!(replacement.removed, vec![square]);
        assert!(!scene.contains(square));

        let rounded = scene.get(replacement.inserted[0]).unwrap();
        let PathKind::FilletedPolygon { corners, fillets } = &rounded.kind else {
            panic!("Expected filleted polygon");
        };
        assert_eq!(corners.len(), 4);
        assert_eq!(fillets.len(), 1);
        assert!(fillets[0].sweep_angle < 180.0);
        assert_sweep_consistent(&fillets[0].arc());

        let doc = export_scene(&scene, &ExportOptions::default());
        assert_eq!(doc.count("ARC"), 1);
        assert_eq!(doc.count("LINE"), 4);
        let arc_radius = doc.primitives.iter().find_map(|p| match p {
            Primitive::Arc { radius, .. } => Some(*radius),
            _ => None,
        });
        assert_eq!(arc_radius, Some(5.0));
    }

    #[test]
    fn test_polygon_fillets_accumulate_and_respect_neighbours() {
        let mut scene = Scene::new();
        let square = scene.insert(Path::rectangle(DVec2::ZERO, DVec2::new(10.0, 10.0)));
        let first = apply_fillet(
            &mut scene,
            FilletCorner::Closed {
                path: square,
                corner: 1,
            },
            6.0,
            &config(),
        )
        .unwrap();
        let rounded = first.inserted[0];

        // Corner 2 shares the edge that already lost 6 units to corner 1
        let result = apply_fillet(
            &mut scene,
            FilletCorner::Closed {
                path: rounded,
                corner: 2,
            },
            6.0,
            &config(),
        );
        assert!(matches!(result, Err(FilletError::RadiusTooLarge { .. })));

        let second = apply_fillet(
            &mut scene,
            FilletCorner::Closed {
                path: rounded,
                corner: 3,
            },
            2.0,
            &config(),
        )
        .unwrap();
        let path = scene.get(second.inserted[0]).unwrap();
        let PathKind::FilletedPolygon { fillets, .. } = &path.kind else {
            panic!("Expected filleted polygon");
        };
        assert_eq!(fillets.len(), 2);
    }

    #[test]
    fn test_refillet_replaces_record() {
        let mut scene = Scene::new();
        let square = scene.insert(Path::rectangle(DVec2::ZERO, DVec2::new(10.0, 10.0)));
        let first = apply_fillet(
            &mut scene,
            FilletCorner::Closed { path: square, corner: 0 },
            2.0,
            &config(),
        )
        .unwrap();
        let second = apply_fillet(
            &mut scene,
            FilletCorner::Closed {
                path: first.inserted[0],
                corner: 0,
            },
            4.0,
            &config(),
        )
        .unwrap();

        let path = scene.get(second.inserted[0]).unwrap();
        let PathKind::FilletedPolygon { fillets, .. } = &path.kind else {
            panic!("Expected filleted polygon");
        };
        assert_eq!(fillets.len(), 1);
        assert_eq!(fillets[0].radius, 4.0);
    }

    #[test]
    fn test_circle_is_unsupported() {
        let mut scene = Scene::new();
        let circle = scene.insert(Path::circle(DVec2::ZERO, 5.0));
        let result = apply_fillet(
            &mut scene,
            FilletCorner::Closed { path: circle, corner: 0 },
            1.0,
            &config(),
        );
        assert!(matches!(result, Err(FilletError::UnsupportedCorner(_))));
    }

    #[test]
    fn test_locate_corner() {
        let mut scene = Scene::new();
        let square = scene.insert(Path::rectangle(
            DVec2::new(100.0, 100.0),
            DVec2::new(150.0, 150.0),
        ));
        let (a, b) = right_angle_lines(&mut scene);

        assert_eq!(
            locate_corner(&scene, DVec2::new(148.0, 103.0), &config()).unwrap(),
            FilletCorner::Closed {
                path: square,
                corner: 1
            }
        );
        assert_eq!(
            locate_corner(&scene, DVec2::new(11.0, 1.0), &config()).unwrap(),
            FilletCorner::Shared {
                first: a,
                second: b,
                corner: DVec2::new(10.0, 0.0)
            }
        );
        assert!(matches!(
            locate_corner(&scene, DVec2::new(0.0, 1.0), &config()),
            Err(FilletError::UnsupportedCorner(_))
        ));
        assert!(matches!(
            locate_corner(&scene, DVec2::new(60.0, 60.0), &config()),
            Err(FilletError::UnsupportedCorner(_))
        ));
    }
}

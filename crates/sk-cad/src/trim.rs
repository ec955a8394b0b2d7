//! Trim engine
//!
//! Removes the part of a path between the clicked position and the nearest
//! crossing with another path. Offsets are arc-length positions along the
//! trimmed path.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use sk_core::geometry::{POINT_EPSILON, points_equal};
use sk_core::{ArcGeometry, Path, PathId, PathKind, Scene};

use crate::config::TrimConfig;

/// Trim-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrimError {
    #[error("Path not found: {0}")]
    PathNotFound(PathId),
    #[error("Path {0} has fewer than two segments")]
    TooFewSegments(PathId),
}

/// Result type for trim operations
pub type TrimResult<T> = Result<T, TrimError>;

/// Arc-length range selected for removal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimRange {
    /// Start offset
    pub from: f64,
    /// End offset
    pub to: f64,
}

/// How a trim was carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrimMethod {
    /// The whole path was removed
    DeletedWhole,
    /// An open path lost a stretch and kept the pieces around it
    OpenSplit,
    /// A closed path was cut into two loops and one was discarded
    LoopSplit,
    /// A closed path was rebuilt from samples of the kept stretch
    Resampled,
}

/// Scene changes made by a trim
#[derive(Debug, Clone, PartialEq)]
pub struct TrimOutcome {
    /// What happened
    pub method: TrimMethod,
    /// Paths taken out of the scene
    pub removed: Vec<PathId>,
    /// Surviving pieces added in their place
    pub inserted: Vec<PathId>,
}

/// Topmost trimmable path under `point`
pub fn pick_path(scene: &Scene, point: DVec2, config: &TrimConfig) -> Option<PathId> {
    scene
        .hit_test(point, config.pick_tolerance)
        .into_iter()
        .find(|id| scene.get(*id).is_some_and(|p| p.segments.len() >= 2))
}

/// Crossing between `id` and any other visible path that lies closest to `click`
pub fn nearest_intersection(scene: &Scene, id: PathId, click: DVec2) -> Option<DVec2> {
    let path = scene.get(id)?;
    scene
        .candidates()
        .filter(|(other_id, _)| *other_id != id)
        .flat_map(|(_, other)| path.intersections(other))
        .min_by(|a, b| a.distance(click).total_cmp(&b.distance(click)))
}

/// Offset range to remove for a click, given the nearest crossing
pub fn trim_range(path: &Path, click: DVec2, intersection: Option<DVec2>) -> TrimRange {
    let length = path.length();
    match intersection {
        Some(point) => {
            let click_offset = path.offset_of(click);
            let intersection_offset = path.offset_of(point);
            if click_offset < intersection_offset {
                TrimRange {
                    from: 0.0,
                    to: intersection_offset,
                }
            } else {
                TrimRange {
                    from: intersection_offset,
                    to: length,
                }
            }
        }
        None if !path.closed => TrimRange {
            from: 0.0,
            to: length,
        },
        None => {
            let to_start = path.first_point().map_or(f64::INFINITY, |p| p.distance(click));
            let to_end = path.last_point().map_or(f64::INFINITY, |p| p.distance(click));
            if to_start < to_end {
                TrimRange {
                    from: 0.0,
                    to: length / 2.0,
                }
            } else {
                TrimRange {
                    from: length / 2.0,
                    to: length,
                }
            }
        }
    }
}

/// Polyline of the stretch a click would remove
pub fn preview(scene: &Scene, id: PathId, click: DVec2) -> TrimResult<Vec<DVec2>> {
    let path = trimmable(scene, id)?;
    let range = trim_range(path, click, nearest_intersection(scene, id, click));
    Ok(path
        .sub_path(range.from, range.to)
        .map(|piece| piece.flatten())
        .unwrap_or_default())
}

/// Trim `id` at the stretch selected by `click`
pub fn trim(
    scene: &mut Scene,
    id: PathId,
    click: DVec2,
    config: &TrimConfig,
) -> TrimResult<TrimOutcome> {
    let path = trimmable(scene, id)?.clone();
    let intersection = nearest_intersection(scene, id, click);
    let range = trim_range(&path, click, intersection);

    if intersection.is_none() && !path.closed {
        return Ok(delete_whole(scene, id));
    }

    if path.closed {
        if let Some(kept) = split_loop(scene, id, &path, click, config) {
            let inserted = replace(scene, id, vec![kept])?;
            tracing::info!("Trimmed loop of path {}", id);
            return Ok(TrimOutcome {
                method: TrimMethod::LoopSplit,
                removed: vec![id],
                inserted,
            });
        }
        return resample_closed(scene, id, &path, range, config);
    }

    trim_open(scene, id, &path, range)
}

fn trimmable(scene: &Scene, id: PathId) -> TrimResult<&Path> {
    let path = scene.get(id).ok_or(TrimError::PathNotFound(id))?;
    if path.segments.len() < 2 {
        return Err(TrimError::TooFewSegments(id));
    }
    Ok(path)
}

fn replace(scene: &mut Scene, id: PathId, pieces: Vec<Path>) -> TrimResult<Vec<PathId>> {
    scene.replace(id, pieces).ok_or(TrimError::PathNotFound(id))
}

fn delete_whole(scene: &mut Scene, id: PathId) -> TrimOutcome {
    scene.remove(id);
    tracing::info!("Trim removed path {}", id);
    TrimOutcome {
        method: TrimMethod::DeletedWhole,
        removed: vec![id],
        inserted: Vec::new(),
    }
}

/// Cut a closed path at exactly two crossings with one other path
///
/// The crossings split the outline into two stretches, each closed by a
/// straight chord. The loop whose stretch carries the clicked position is
/// discarded and the other one returned. The first other path crossing
/// exactly twice decides; a crossing on the start vertex counts as offset 0.
fn split_loop(
    scene: &Scene,
    id: PathId,
    path: &Path,
    click: DVec2,
    config: &TrimConfig,
) -> Option<Path> {
    let length = path.length();
    let eps = config.endpoint_epsilon;
    let click_offset = path.offset_of(click);

    for (_, other) in scene.candidates().filter(|(other_id, _)| *other_id != id) {
        let crossings = path.intersections(other);
        if crossings.len() != 2 {
            continue;
        }
        let mut offsets: Vec<f64> = crossings
            .into_iter()
            .map(|p| path.offset_of(p))
            .map(|o| if o <= eps || o >= length - eps { 0.0 } else { o })
            .collect();
        offsets.sort_by(f64::total_cmp);
        if offsets[1] - offsets[0] <= eps {
            continue;
        }

        let (Some(mut inner), Some(mut outer)) = (
            path.sub_path(offsets[0], offsets[1]),
            path.wrapped_sub_path(offsets[1], offsets[0]),
        ) else {
            continue;
        };
        inner.closed = true;
        outer.closed = true;

        let clicked_inner = click_offset > offsets[0] && click_offset < offsets[1];
        return Some(if clicked_inner { outer } else { inner });
    }
    None
}

/// Remove `[from, to]` from an open path, keeping the stretches around it
fn trim_open(
    scene: &mut Scene,
    id: PathId,
    path: &Path,
    range: TrimRange,
) -> TrimResult<TrimOutcome> {
    let length = path.length();
    if range.from <= POINT_EPSILON && range.to >= length - POINT_EPSILON {
        return Ok(delete_whole(scene, id));
    }

    // Both cuts are taken on the untouched source, so neither offset shifts
    let head = (range.from > POINT_EPSILON)
        .then(|| path.sub_path(0.0, range.from))
        .flatten()
        .map(|piece| typed_piece(path, piece, 0.0, range.from, length));
    let tail = (range.to < length - POINT_EPSILON)
        .then(|| path.sub_path(range.to, length))
        .flatten()
        .map(|piece| typed_piece(path, piece, range.to, length, length));
    let pieces: Vec<Path> = head.into_iter().chain(tail).collect();

    if pieces.is_empty() {
        return Ok(delete_whole(scene, id));
    }

    let inserted = replace(scene, id, pieces)?;
    tracing::info!(
        "Trimmed [{:.3}, {:.3}] from path {} leaving {} piece(s)",
        range.from,
        range.to,
        id,
        inserted.len()
    );
    Ok(TrimOutcome {
        method: TrimMethod::OpenSplit,
        removed: vec![id],
        inserted,
    })
}

/// Carry the source shape over to a piece covering `[from, to]`
fn typed_piece(source: &Path, piece: Path, from: f64, to: f64, length: f64) -> Path {
    match source.kind {
        PathKind::Line if piece.segments.len() == 2 => piece.with_kind(PathKind::Line),
        PathKind::Arc(arc) if length > 0.0 => {
            let mut rebuilt =
                Path::arc(arc.sub_arc(from / length, to / length)).with_style(piece.style);
            rebuilt.visible = piece.visible;
            rebuilt
        }
        _ => piece,
    }
}

/// Rebuild the part of a closed path outside `[from, to]` from samples
///
/// This is an approximation: the kept stretch becomes an open polyline with
/// at most `resample_steps` steps (half per side when it wraps past the
/// path start), never finer than one unit.
fn resample_closed(
    scene: &mut Scene,
    id: PathId,
    path: &Path,
    range: TrimRange,
    config: &TrimConfig,
) -> TrimResult<TrimOutcome> {
    let length = path.length();
    let kept = length - (range.to - range.from);
    if kept <= POINT_EPSILON {
        return Ok(delete_whole(scene, id));
    }

    let steps = config.resample_steps.max(2);
    let mut points = Vec::new();
    let wraps = range.from > POINT_EPSILON && range.to < length - POINT_EPSILON;
    if wraps {
        sample_stretch(path, range.to, length, steps / 2, &mut points);
        sample_stretch(path, 0.0, range.from, steps / 2, &mut points);
    } else if range.from <= POINT_EPSILON {
        sample_stretch(path, range.to, length, steps, &mut points);
    } else {
        sample_stretch(path, 0.0, range.from, steps, &mut points);
    }
    if points.len() < 2 {
        return Ok(delete_whole(scene, id));
    }

    let start = if wraps || range.from <= POINT_EPSILON { range.to } else { 0.0 };
    let mut rebuilt = path.derived(points.into_iter().map(sk_core::Segment::new).collect(), false);
    rebuilt.kind = resampled_kind(path, start, kept, length);

    let inserted = replace(scene, id, vec![rebuilt])?;
    tracing::info!(
        "Trimmed closed path {} by resampling {:.3} of {:.3}",
        id,
        kept,
        length
    );
    Ok(TrimOutcome {
        method: TrimMethod::Resampled,
        removed: vec![id],
        inserted,
    })
}

/// Append samples of `[from, to]` every `max(1, span / steps)` units, end included
fn sample_stretch(path: &Path, from: f64, to: f64, steps: usize, points: &mut Vec<DVec2>) {
    let span = to - from;
    if span <= 0.0 {
        return;
    }
    let step = (span / steps.max(1) as f64).max(1.0);
    let mut offset = from;
    while offset < to - POINT_EPSILON {
        push_distinct(points, path.point_at(offset));
        offset += step;
    }
    push_distinct(points, path.point_at(to));
}

fn push_distinct(points: &mut Vec<DVec2>, point: Option<DVec2>) {
    if let Some(p) = point
        && !points.last().is_some_and(|last| points_equal(*last, p))
    {
        points.push(p);
    }
}

/// Arc metadata for a resampled stretch of an arc or circle
fn resampled_kind(source: &Path, start: f64, kept: f64, length: f64) -> PathKind {
    if length <= 0.0 {
        return PathKind::Untyped;
    }
    let fraction = kept / length;
    match source.kind {
        PathKind::Arc(arc) => {
            PathKind::Arc(arc.sub_arc(start / length, start / length + fraction))
        }
        PathKind::Circle { center, radius } if fraction < 1.0 => PathKind::Arc(
            ArcGeometry::from_sweep(center, radius, start / length * 360.0, fraction * 360.0),
        ),
        _ => PathKind::Untyped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_core::{ExportOptions, export_scene};

    fn config() -> TrimConfig {
        TrimConfig::default()
    }

    #[test]
    fn test_far_side_of_single_intersection_removed() {
        let mut scene = Scene::new();
        let line = scene.insert(Path::line(DVec2::ZERO, DVec2::new(20.0, 0.0)));
        scene.insert(Path::line(DVec2::new(10.0, -10.0), DVec2::new(10.0, 10.0)));

        let outcome = trim(&mut scene, line, DVec2::new(15.0, 0.5), &config()).unwrap();
        assert_eq!(outcome.method, TrimMethod::OpenSplit);
        assert!(!scene.contains(line));
        assert_eq!(outcome.inserted.len(), 1);

        let kept = scene.get(outcome.inserted[0]).unwrap();
        assert_eq!(kept.kind, PathKind::Line);
        assert!(kept.first_point().unwrap().distance(DVec2::ZERO) < 1e-9);
        assert!(kept.last_point().unwrap().distance(DVec2::new(10.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_near_side_trim_shortens() {
        let mut scene = Scene::new();
        let line = scene.insert(Path::line(DVec2::ZERO, DVec2::new(20.0, 0.0)));
        scene.insert(Path::line(DVec2::new(10.0, -10.0), DVec2::new(10.0, 10.0)));

        let outcome = trim(&mut scene, line, DVec2::new(3.0, 0.0), &config()).unwrap();
        let kept = scene.get(outcome.inserted[0]).unwrap();
        assert!((kept.length() - 10.0).abs() < 1e-9);
        assert!(kept.first_point().unwrap().distance(DVec2::new(10.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_unconnected_line_deleted() {
        let mut scene = Scene::new();
        let line = scene.insert(Path::line(DVec2::ZERO, DVec2::new(20.0, 0.0)));
        scene.insert(Path::line(DVec2::new(0.0, 10.0), DVec2::new(20.0, 10.0)));

        let outcome = trim(&mut scene, line, DVec2::new(5.0, 0.0), &config()).unwrap();
        assert_eq!(outcome.method, TrimMethod::DeletedWhole);
        assert!(!scene.contains(line));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_full_range_deletes_and_sub_range_keeps() {
        let path = Path::line(DVec2::ZERO, DVec2::new(20.0, 0.0));

        let mut scene = Scene::new();
        let id = scene.insert(path.clone());
        let outcome = trim_open(&mut scene, id, &path, TrimRange { from: 0.0, to: 20.0 }).unwrap();
        assert_eq!(outcome.method, TrimMethod::DeletedWhole);
        assert!(scene.is_empty());

        let mut scene = Scene::new();
        let id = scene.insert(path.clone());
        let outcome = trim_open(&mut scene, id, &path, TrimRange { from: 5.0, to: 8.0 }).unwrap();
        assert_eq!(outcome.inserted.len(), 2);
        let total: f64 = outcome
            .inserted
            .iter()
            .map(|i| scene.get(*i).unwrap().length())
            .sum();
        assert!((total - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_arc_piece_keeps_arc_metadata() {
        let geometry = ArcGeometry::from_sweep(DVec2::ZERO, 10.0, 0.0, 180.0);
        let mut scene = Scene::new();
        let arc = scene.insert(Path::arc(geometry));
        // Vertical line through the top of the arc
        scene.insert(Path::line(DVec2::new(0.0, 0.0), DVec2::new(0.0, 20.0)));

        let outcome = trim(&mut scene, arc, DVec2::new(-9.0, 2.0), &config()).unwrap();
        let kept = scene.get(outcome.inserted[0]).unwrap();
        let PathKind::Arc(piece) = kept.kind else {
            panic!("Expected arc kind, got {:?}", kept.kind);
        };
        assert!((piece.start_angle - 0.0).abs() < 0.5);
        assert!((piece.sweep_angle - 90.0).abs() < 0.5);
        assert!(piece.is_consistent());
    }

    #[test]
    fn test_rectangle_split_by_line_discards_clicked_loop() {
        let mut scene = Scene::new();
        let rect = scene.insert(Path::rectangle(DVec2::ZERO, DVec2::new(20.0, 10.0)));
        scene.insert(Path::line(DVec2::new(5.0, -5.0), DVec2::new(5.0, 15.0)));

        let outcome = trim(&mut scene, rect, DVec2::new(0.0, 5.0), &config()).unwrap();
        assert_eq!(outcome.method, TrimMethod::LoopSplit);

        let kept = scene.get(outcome.inserted[0]).unwrap();
        assert!(kept.closed);
        assert!(kept.contains(DVec2::new(12.0, 5.0)));
        assert!(!kept.contains(DVec2::new(2.0, 5.0)));
        assert!((kept.length() - 50.0).abs() < 1e-6, "Length {}", kept.length());
    }

    #[test]
    fn test_loop_split_through_start_vertex() {
        let mut scene = Scene::new();
        let rect = scene.insert(Path::rectangle(DVec2::ZERO, DVec2::new(20.0, 10.0)));
        // Diagonal through the start vertex and the opposite corner
        scene.insert(Path::line(DVec2::new(-5.0, -2.5), DVec2::new(25.0, 12.5)));

        let outcome = trim(&mut scene, rect, DVec2::new(15.0, 0.0), &config()).unwrap();
        assert_eq!(outcome.method, TrimMethod::LoopSplit);

        let kept = scene.get(outcome.inserted[0]).unwrap();
        assert!(kept.closed);
        assert_eq!(kept.segments.len(), 3);
        assert!(kept.contains(DVec2::new(2.0, 8.0)));
        assert!(!kept.contains(DVec2::new(15.0, 2.0)));
        let expected = 30.0 + 500.0_f64.sqrt();
        assert!((kept.length() - expected).abs() < 1e-6, "Length {}", kept.length());
    }

    fn assert_no_degenerate_paths(scene: &Scene) {
        for (id, path) in scene.iter() {
            assert!(path.segments.len() >= 2, "Path {id} has {} segments", path.segments.len());
            assert!(path.length() > POINT_EPSILON, "Path {id} has no length");
        }
    }

    #[test]
    fn test_trim_to_an_endpoint_leaves_no_degenerate_piece() {
        // Crossing exactly at the end, click on the near side
        let mut scene = Scene::new();
        let line = scene.insert(Path::line(DVec2::ZERO, DVec2::new(20.0, 0.0)));
        scene.insert(Path::line(DVec2::new(20.0, -5.0), DVec2::new(20.0, 5.0)));
        let outcome = trim(&mut scene, line, DVec2::new(5.0, 0.0), &config()).unwrap();
        assert_eq!(outcome.method, TrimMethod::DeletedWhole);
        assert_eq!(scene.len(), 1);
        assert_no_degenerate_paths(&scene);

        // Crossing exactly at the start, click on the far side
        let mut scene = Scene::new();
        let line = scene.insert(Path::line(DVec2::ZERO, DVec2::new(20.0, 0.0)));
        scene.insert(Path::line(DVec2::new(0.0, -5.0), DVec2::new(0.0, 5.0)));
        trim(&mut scene, line, DVec2::new(15.0, 0.0), &config()).unwrap();
        assert_eq!(scene.len(), 1);
        assert_no_degenerate_paths(&scene);

        // Removing all but a sliver at the end leaves nothing behind
        let path = Path::line(DVec2::ZERO, DVec2::new(20.0, 0.0));
        let mut scene = Scene::new();
        let id = scene.insert(path.clone());
        let range = TrimRange {
            from: 0.0,
            to: 20.0 - POINT_EPSILON / 2.0,
        };
        let outcome = trim_open(&mut scene, id, &path, range).unwrap();
        assert_eq!(outcome.method, TrimMethod::DeletedWhole);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_collapsed_complement_deletes_closed_path() {
        let square = Path::rectangle(DVec2::ZERO, DVec2::new(10.0, 10.0));
        for range in [
            TrimRange { from: 0.0, to: 40.0 },
            TrimRange {
                from: 0.0,
                to: 40.0 - POINT_EPSILON / 2.0,
            },
            TrimRange {
                from: POINT_EPSILON / 2.0,
                to: 40.0,
            },
        ] {
            let mut scene = Scene::new();
            let id = scene.insert(square.clone());
            let outcome = resample_closed(&mut scene, id, &square, range, &config()).unwrap();
            assert_eq!(outcome.method, TrimMethod::DeletedWhole, "Range {range:?}");
            assert!(scene.is_empty());
        }
    }

    #[test]
    fn test_resample_step_counts() {
        let rect = Path::rectangle(DVec2::ZERO, DVec2::new(200.0, 100.0));

        // One stretch: 32 steps
        let mut scene = Scene::new();
        let id = scene.insert(rect.clone());
        let range = TrimRange { from: 0.0, to: 300.0 };
        let outcome = resample_closed(&mut scene, id, &rect, range, &config()).unwrap();
        let kept = scene.get(outcome.inserted[0]).unwrap();
        assert!(!kept.closed);
        assert_eq!(kept.segments.len(), 33);
        assert!(kept.first_point().unwrap().distance(DVec2::new(200.0, 100.0)) < 1e-9);
        assert!(kept.last_point().unwrap().distance(DVec2::ZERO) < 1e-9);

        // Wrapping past the start: 16 steps on each side, start vertex shared
        let mut scene = Scene::new();
        let id = scene.insert(rect.clone());
        let range = TrimRange { from: 100.0, to: 200.0 };
        let outcome = resample_closed(&mut scene, id, &rect, range, &config()).unwrap();
        let kept = scene.get(outcome.inserted[0]).unwrap();
        assert_eq!(kept.segments.len(), 33);
        assert!(kept.first_point().unwrap().distance(DVec2::new(200.0, 0.0)) < 1e-9);
        assert!(kept.last_point().unwrap().distance(DVec2::new(100.0, 0.0)) < 1e-9);
        assert!((kept.length() - 500.0).abs() < 1e-6);
        assert_no_degenerate_paths(&scene);
    }

    #[test]
    fn test_closed_without_intersections_resamples_far_half() {
        let mut scene = Scene::new();
        let rect = scene.insert(Path::rectangle(DVec2::ZERO, DVec2::new(40.0, 20.0)));

        let outcome = trim(&mut scene, rect, DVec2::new(1.0, 1.0), &config()).unwrap();
        assert_eq!(outcome.method, TrimMethod::Resampled);

        let kept = scene.get(outcome.inserted[0]).unwrap();
        assert!(!kept.closed);
        assert_eq!(kept.kind, PathKind::Untyped);
        assert!(kept.first_point().unwrap().distance(DVec2::new(40.0, 20.0)) < 1e-9);
        assert!(kept.last_point().unwrap().distance(DVec2::ZERO) < 1e-9);
        assert!(kept.length() <= 60.0 + 1e-9 && kept.length() > 55.0);
    }

    #[test]
    fn test_trimmed_circle_becomes_arc() {
        let mut scene = Scene::new();
        let circle = scene.insert(Path::circle(DVec2::ZERO, 10.0));

        let outcome = trim(&mut scene, circle, DVec2::new(9.0, 1.0), &config()).unwrap();
        let kept = scene.get(outcome.inserted[0]).unwrap();
        let PathKind::Arc(arc) = kept.kind else {
            panic!("Expected arc kind");
        };
        assert!((arc.start_angle - 180.0).abs() < 1e-6);
        assert!((arc.sweep_angle - 180.0).abs() < 1e-6);
        assert!(arc.is_consistent());

        let doc = export_scene(&scene, &ExportOptions::default());
        assert_eq!(doc.count("ARC"), 1);
    }

    #[test]
    fn test_single_point_path_rejected() {
        let mut scene = Scene::new();
        let dot = scene.insert(Path::polyline(&[DVec2::ZERO], false));
        assert_eq!(
            trim(&mut scene, dot, DVec2::ZERO, &config()),
            Err(TrimError::TooFewSegments(dot))
        );
        assert!(scene.contains(dot));
    }

    #[test]
    fn test_preview_and_pick() {
        let mut scene = Scene::new();
        let line = scene.insert(Path::line(DVec2::ZERO, DVec2::new(20.0, 0.0)));
        scene.insert(Path::line(DVec2::new(10.0, -10.0), DVec2::new(10.0, 10.0)));

        assert_eq!(pick_path(&scene, DVec2::new(15.0, 2.0), &config()), Some(line));
        let highlight = preview(&scene, line, DVec2::new(15.0, 0.0)).unwrap();
        assert_eq!(highlight.len(), 2);
        assert!(highlight[0].distance(DVec2::new(10.0, 0.0)) < 1e-9);
        assert!(highlight[1].distance(DVec2::new(20.0, 0.0)) < 1e-9);
    }
}

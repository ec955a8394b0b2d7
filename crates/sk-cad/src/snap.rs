//! Snap resolver
//!
//! Replaces a raw cursor position with a nearby endpoint, midpoint or
//! intersection of the committed geometry.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use sk_core::{PathId, Scene};

use crate::config::SnapConfig;

/// Where a snap target came from, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapKind {
    /// First or last point of an open path
    Endpoint,
    /// Middle of a two-segment path
    Midpoint,
    /// Single crossing with the path under construction
    Intersection,
}

/// A resolved snap target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    /// Point to use instead of the cursor
    pub point: DVec2,
    /// Source of the candidate
    pub kind: SnapKind,
    /// Path that supplied the candidate
    pub path: PathId,
    /// Distance from the cursor
    pub distance: f64,
}

/// Paths that must not supply candidates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SnapQuery {
    /// Path being drawn; also the source for intersection candidates
    pub construction: Option<PathId>,
    /// Path being edited, e.g. the owner of a dragged vertex
    pub ignore: Option<PathId>,
}

impl SnapQuery {
    /// Query while drawing `path`
    pub fn constructing(path: PathId) -> Self {
        Self {
            construction: Some(path),
            ignore: None,
        }
    }

    /// Query while editing `path`
    pub fn ignoring(path: PathId) -> Self {
        Self {
            construction: None,
            ignore: Some(path),
        }
    }
}

/// Visual marker showing the current snap target
///
/// Implemented by the presentation layer; the engine only tells it where to
/// appear.
pub trait SnapIndicator {
    /// Show the marker at `point`
    fn show(&mut self, point: DVec2);
    /// Hide the marker
    fn hide(&mut self);
}

/// Indicator that only remembers its state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndicatorState {
    /// Marker position while visible
    pub position: Option<DVec2>,
}

impl IndicatorState {
    /// Whether the marker is shown
    pub fn is_visible(&self) -> bool {
        self.position.is_some()
    }
}

impl SnapIndicator for IndicatorState {
    fn show(&mut self, point: DVec2) {
        self.position = Some(point);
    }

    fn hide(&mut self) {
        self.position = None;
    }
}

/// Find the closest snap candidate strictly within the configured tolerance
///
/// Candidates are visited path by path in draw order, endpoints first, then
/// the midpoint, then the intersection; only a strictly closer candidate
/// replaces the current best.
pub fn resolve(
    point: DVec2,
    scene: &Scene,
    config: &SnapConfig,
    query: SnapQuery,
) -> Option<SnapTarget> {
    let construction = query
        .construction
        .and_then(|id| scene.get(id))
        .filter(|p| p.segments.len() > 1);

    let mut best: Option<SnapTarget> = None;
    let mut consider = |candidate: DVec2, kind: SnapKind, path: PathId| {
        let distance = candidate.distance(point);
        if distance < config.tolerance && best.is_none_or(|b| distance < b.distance) {
            best = Some(SnapTarget {
                point: candidate,
                kind,
                path,
                distance,
            });
        }
    };

    for (id, path) in scene.candidates() {
        if path.closed || Some(id) == query.ignore || Some(id) == query.construction {
            continue;
        }
        let length = path.length();
        if length <= 0.0 {
            continue;
        }

        if config.endpoints {
            for endpoint in [path.first_point(), path.last_point()].into_iter().flatten() {
                consider(endpoint, SnapKind::Endpoint, id);
            }
        }

        // Midpoint of the chord between the two vertices, even when the piece is curved
        if config.midpoints
            && path.segments.len() == 2
            && let (Some(first), Some(last)) = (path.first_point(), path.last_point())
        {
            consider(first.lerp(last, 0.5), SnapKind::Midpoint, id);
        }

        if config.intersections
            && let Some(construction) = construction
        {
            // Several crossings mean overlap or tangency; snapping would jump
            let hits = construction.intersections(path);
            if let [hit] = hits.as_slice() {
                consider(*hit, SnapKind::Intersection, id);
            }
        }
    }

    best
}

/// Resolve and move the indicator to the result, hiding it when nothing snaps
pub fn resolve_with_indicator(
    point: DVec2,
    scene: &Scene,
    config: &SnapConfig,
    query: SnapQuery,
    indicator: &mut dyn SnapIndicator,
) -> Option<SnapTarget> {
    let target = resolve(point, scene, config, query);
    match target {
        Some(t) => {
            tracing::debug!("Snapped to {:?} of path {} at {:?}", t.kind, t.path, t.point);
            indicator.show(t.point);
        }
        None => indicator.hide(),
    }
    target
}

//! Curve-fit engine
//!
//! Builds a smooth open path through clicked fit points. Handles are derived
//! from a centripetal Catmull-Rom blend of each point's neighbours and can be
//! edited afterwards, either while drawing or on a finished spline.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use sk_core::{Path, PathId, PathKind, Scene, Segment, SegmentRef};

use crate::config::SplineConfig;

/// Errors from handle and fit-point edits
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveFitError {
    #[error("Path not found: {0}")]
    PathNotFound(PathId),
    #[error("Segment {segment} out of range for path {path}")]
    SegmentOutOfRange { path: PathId, segment: usize },
    #[error("{0} paths are defined by parameters and cannot be edited by handle")]
    AnalyticPath(String),
}

pub type CurveFitResult<T> = Result<T, CurveFitError>;

/// Which handle of a segment is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleSide {
    /// Incoming handle
    In,
    /// Outgoing handle
    Out,
}

impl HandleSide {
    /// The handle on the other side of the vertex
    pub fn opposite(self) -> Self {
        match self {
            HandleSide::In => HandleSide::Out,
            HandleSide::Out => HandleSide::In,
        }
    }
}

/// A single handle of a path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleRef {
    /// Owning segment
    pub segment: SegmentRef,
    /// Incoming or outgoing
    pub side: HandleSide,
}

impl HandleRef {
    pub fn new(segment: SegmentRef, side: HandleSide) -> Self {
        Self { segment, side }
    }
}

/// Recompute every handle of `segments` from its neighbours
///
/// `factor` is the Catmull-Rom parametrization exponent; 0.5 gives the
/// centripetal variant that avoids cusps and self-intersections. An open
/// end stands in for its own missing neighbour, so both of its handles come
/// out zero.
pub fn smooth(segments: &mut [Segment], closed: bool, factor: f64) {
    let n = segments.len();
    if n < 2 {
        if let Some(only) = segments.first_mut() {
            only.straighten();
        }
        return;
    }

    let points: Vec<DVec2> = segments.iter().map(|s| s.point).collect();
    for (i, segment) in segments.iter_mut().enumerate() {
        let p1 = points[i];
        let p0 = if i > 0 {
            points[i - 1]
        } else if closed {
            points[n - 1]
        } else {
            p1
        };
        let p2 = if i + 1 < n {
            points[i + 1]
        } else if closed {
            points[0]
        } else {
            p1
        };

        let d1_a = p0.distance(p1).powf(factor);
        let d2_a = p1.distance(p2).powf(factor);
        let d1_2a = d1_a * d1_a;
        let d2_2a = d2_a * d2_a;

        let a = 2.0 * d2_2a + 3.0 * d1_a * d2_a + d1_2a;
        let denom = 3.0 * d2_a * (d1_a + d2_a);
        segment.handle_in = if denom > 0.0 {
            (d2_2a * p0 - d1_2a * p2 + a * p1) / denom - p1
        } else {
            DVec2::ZERO
        };

        let a = 2.0 * d1_2a + 3.0 * d1_a * d2_a + d2_2a;
        let denom = 3.0 * d1_a * (d1_a + d2_a);
        segment.handle_out = if denom > 0.0 {
            (d1_2a * p2 - d2_2a * p0 + a * p1) / denom - p1
        } else {
            DVec2::ZERO
        };
    }

    if !closed {
        segments[0].handle_in = DVec2::ZERO;
        segments[n - 1].handle_out = DVec2::ZERO;
    }
}

/// Set one handle and mirror its negation onto the opposite handle
///
/// The rest of the curve is left as it is.
pub fn drag_handle(scene: &mut Scene, handle: HandleRef, offset: DVec2) -> CurveFitResult<()> {
    let path = editable_path(scene, handle.segment)?;
    let segment = &mut path.segments[handle.segment.segment];
    match handle.side {
        HandleSide::In => {
            segment.handle_in = offset;
            segment.handle_out = -offset;
        }
        HandleSide::Out => {
            segment.handle_out = offset;
            segment.handle_in = -offset;
        }
    }
    tracing::debug!(
        "Moved {:?} handle of segment {} on path {}",
        handle.side,
        handle.segment.segment,
        handle.segment.path
    );
    Ok(())
}

/// Move a vertex and its fit-point record; handles keep their offsets
pub fn drag_fit_point(scene: &mut Scene, segment: SegmentRef, point: DVec2) -> CurveFitResult<()> {
    let path = editable_path(scene, segment)?;
    path.segments[segment.segment].point = point;
    if let PathKind::Spline { fit_points } = &mut path.kind
        && let Some(fit) = fit_points.get_mut(segment.segment)
    {
        *fit = point;
    }
    Ok(())
}

fn editable_path(scene: &mut Scene, segment: SegmentRef) -> CurveFitResult<&mut Path> {
    let path = scene
        .get_mut(segment.path)
        .ok_or(CurveFitError::PathNotFound(segment.path))?;
    if path.kind.is_analytic() {
        return Err(CurveFitError::AnalyticPath(path.kind.name().to_string()));
    }
    if segment.segment >= path.segments.len() {
        return Err(CurveFitError::SegmentOutOfRange {
            path: segment.path,
            segment: segment.segment,
        });
    }
    Ok(path)
}

/// An in-progress spline
///
/// The path lives in the scene as a temporary `Spline` from the first fit
/// point on, so it can be drawn and snapped against like any construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFitSession {
    path: Option<PathId>,
    preview: bool,
    blend_factor: f64,
}

impl Default for CurveFitSession {
    fn default() -> Self {
        Self::begin(&SplineConfig::default())
    }
}

impl CurveFitSession {
    /// Start an empty session
    pub fn begin(config: &SplineConfig) -> Self {
        Self {
            path: None,
            preview: false,
            blend_factor: config.blend_factor,
        }
    }

    /// Path being drawn, once the first point is placed
    pub fn path(&self) -> Option<PathId> {
        self.path
    }

    /// Whether a preview segment trails the confirmed points
    pub fn has_preview(&self) -> bool {
        self.preview
    }

    /// Number of confirmed fit points
    pub fn point_count(&self, scene: &Scene) -> usize {
        match self.path.and_then(|id| scene.get(id)).map(|p| &p.kind) {
            Some(PathKind::Spline { fit_points }) => fit_points.len(),
            _ => 0,
        }
    }

    /// Confirm a fit point and re-smooth the whole curve
    ///
    /// Manual handle edits made so far are overwritten.
    pub fn add_fit_point(&mut self, scene: &mut Scene, point: DVec2) -> PathId {
        self.discard_preview(scene);

        if let Some(id) = self.path
            && let Some(path) = scene.get_mut(id)
        {
            path.segments.push(Segment::new(point));
            if let PathKind::Spline { fit_points } = &mut path.kind {
                fit_points.push(point);
            }
            smooth(&mut path.segments, path.closed, self.blend_factor);
            return id;
        }

        let path = Path::polyline(&[point], false)
            .with_kind(PathKind::Spline {
                fit_points: vec![point],
            })
            .with_temporary(true);
        let id = scene.insert(path);
        self.path = Some(id);
        id
    }

    /// Move the trailing preview segment to the pointer
    pub fn move_preview(&mut self, scene: &mut Scene, point: DVec2) {
        let Some(path) = self.path.and_then(|id| scene.get_mut(id)) else {
            return;
        };
        if self.preview {
            if let Some(last) = path.segments.last_mut() {
                last.point = point;
            }
        } else {
            path.segments.push(Segment::new(point));
            self.preview = true;
        }
    }

    /// Move a confirmed fit point while drawing
    pub fn drag_fit_point(
        &mut self,
        scene: &mut Scene,
        index: usize,
        point: DVec2,
    ) -> CurveFitResult<()> {
        let id = self.confirmed_index(scene, index)?;
        drag_fit_point(scene, SegmentRef::new(id, index), point)
    }

    /// Edit a handle of a confirmed segment while drawing
    pub fn drag_handle(
        &mut self,
        scene: &mut Scene,
        index: usize,
        side: HandleSide,
        offset: DVec2,
    ) -> CurveFitResult<()> {
        let id = self.confirmed_index(scene, index)?;
        drag_handle(scene, HandleRef::new(SegmentRef::new(id, index), side), offset)
    }

    /// Freeze the curve as a committed spline
    ///
    /// Returns `None` and removes the path when fewer than two points were
    /// confirmed.
    pub fn finish(&mut self, scene: &mut Scene) -> Option<PathId> {
        self.discard_preview(scene);
        let id = self.path.take()?;

        let count = self.point_count_of(scene, id);
        if count < 2 {
            scene.remove(id);
            tracing::debug!("Spline with {} point(s) discarded", count);
            return None;
        }

        let path = scene.get_mut(id)?;
        smooth(&mut path.segments, path.closed, self.blend_factor);
        if let Some(last) = path.segments.last_mut() {
            last.straighten();
        }
        path.temporary = false;
        tracing::info!("Finished spline {} through {} fit points", id, count);
        Some(id)
    }

    /// Drop the curve entirely
    pub fn cancel(&mut self, scene: &mut Scene) {
        self.preview = false;
        if let Some(id) = self.path.take() {
            scene.remove(id);
            tracing::debug!("Spline {} cancelled", id);
        }
    }

    fn point_count_of(&self, scene: &Scene, id: PathId) -> usize {
        match scene.get(id).map(|p| &p.kind) {
            Some(PathKind::Spline { fit_points }) => fit_points.len(),
            _ => 0,
        }
    }

    fn confirmed_index(&self, scene: &Scene, index: usize) -> CurveFitResult<PathId> {
        let Some(id) = self.path else {
            return Err(CurveFitError::SegmentOutOfRange {
                path: PathId::default(),
                segment: index,
            });
        };
        if index >= self.point_count_of(scene, id) {
            return Err(CurveFitError::SegmentOutOfRange { path: id, segment: index });
        }
        Ok(id)
    }

    fn discard_preview(&mut self, scene: &mut Scene) {
        if !self.preview {
            return;
        }
        self.preview = false;
        if let Some(path) = self.path.and_then(|id| scene.get_mut(id)) {
            path.segments.pop();
        }
    }
}

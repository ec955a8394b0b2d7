//! Spline tool
//!
//! Clicks add fit points to a [`CurveFitSession`]; clicking near a handle or
//! an existing point grabs it for dragging instead.

use glam::DVec2;
use sk_core::{Path, PathId, PathKind, Scene, SegmentRef};

use super::{CommandOutcome, EditorResult, EngineCommand, Tool, ToolContext, ToolKind, ToolPhase};
use crate::curve_fit::{CurveFitSession, HandleRef, HandleSide, drag_fit_point, drag_handle};

/// Something held by the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplineGrab {
    Handle(HandleRef),
    FitPoint(SegmentRef),
}

/// Spline tool state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplineTool {
    /// Curve being drawn
    pub session: CurveFitSession,
    /// Handle or point being dragged
    pub grab: Option<SplineGrab>,
}

/// Nearest non-zero handle of `path` within `tolerance` of `point`
pub fn pick_handle(
    path: &Path,
    id: PathId,
    point: DVec2,
    tolerance: f64,
) -> Option<(HandleRef, f64)> {
    let mut best: Option<(HandleRef, f64)> = None;
    for (index, segment) in path.segments.iter().enumerate() {
        for (side, handle) in [
            (HandleSide::In, segment.handle_in),
            (HandleSide::Out, segment.handle_out),
        ] {
            if handle == DVec2::ZERO {
                continue;
            }
            let distance = (segment.point + handle).distance(point);
            if distance < tolerance && best.is_none_or(|(_, d)| distance < d) {
                best = Some((HandleRef::new(SegmentRef::new(id, index), side), distance));
            }
        }
    }
    best
}

/// Nearest of the first `count` vertices of `path` within `tolerance`
fn pick_point(
    path: &Path,
    id: PathId,
    count: usize,
    point: DVec2,
    tolerance: f64,
) -> Option<SegmentRef> {
    path.segments
        .iter()
        .take(count)
        .enumerate()
        .map(|(index, s)| (index, s.point.distance(point)))
        .filter(|(_, d)| *d < tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| SegmentRef::new(id, index))
}

/// Grab on any committed spline
fn pick_committed(scene: &Scene, point: DVec2, tolerance: f64) -> Option<SplineGrab> {
    let splines: Vec<_> = scene
        .candidates()
        .filter(|(_, p)| matches!(p.kind, PathKind::Spline { .. }))
        .collect();
    // Topmost first
    for (id, path) in splines.into_iter().rev() {
        if let Some((handle, _)) = pick_handle(path, id, point, tolerance) {
            return Some(SplineGrab::Handle(handle));
        }
        if let Some(vertex) = pick_point(path, id, path.segments.len(), point, tolerance) {
            return Some(SplineGrab::FitPoint(vertex));
        }
    }
    None
}

impl SplineTool {
    pub fn new(session: CurveFitSession) -> Self {
        Self {
            session,
            grab: None,
        }
    }

    fn pick(&self, ctx: &ToolContext<'_>, point: DVec2) -> Option<SplineGrab> {
        let tolerance = ctx.config.spline.handle_pick_tolerance;
        let Some(id) = self.session.path() else {
            return pick_committed(&*ctx.scene, point, tolerance);
        };
        let path = ctx.scene.get(id)?;
        if let Some((handle, _)) = pick_handle(path, id, point, tolerance) {
            return Some(SplineGrab::Handle(handle));
        }
        let confirmed = self.session.point_count(&*ctx.scene);
        pick_point(path, id, confirmed, point, tolerance).map(SplineGrab::FitPoint)
    }

    fn finish(&mut self, ctx: &mut ToolContext<'_>) -> CommandOutcome {
        self.grab = None;
        match self.session.finish(ctx.scene) {
            Some(id) => ctx.commit_construction(id),
            None => CommandOutcome::Cancelled,
        }
    }
}

impl Tool for SplineTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Spline
    }

    fn phase(&self) -> ToolPhase {
        if self.session.path().is_some() {
            ToolPhase::Constructing
        } else {
            ToolPhase::Idle
        }
    }

    fn handle(
        &mut self,
        command: &EngineCommand,
        ctx: &mut ToolContext<'_>,
    ) -> EditorResult<CommandOutcome> {
        let outcome = match *command {
            EngineCommand::Click { point, .. } => {
                self.grab = self.pick(ctx, point);
                if self.grab.is_none() {
                    self.session.add_fit_point(ctx.scene, point);
                }
                CommandOutcome::Updated
            }
            EngineCommand::PointerMove { point } => {
                if self.session.path().is_none() {
                    return Ok(CommandOutcome::Ignored);
                }
                self.session.move_preview(ctx.scene, point);
                CommandOutcome::Updated
            }
            EngineCommand::Drag { point, .. } => match self.grab {
                Some(SplineGrab::Handle(handle)) => {
                    let anchor = ctx
                        .scene
                        .get(handle.segment.path)
                        .and_then(|p| p.segments.get(handle.segment.segment))
                        .map(|s| s.point)
                        .unwrap_or(point);
                    drag_handle(ctx.scene, handle, point - anchor)?;
                    CommandOutcome::Updated
                }
                Some(SplineGrab::FitPoint(vertex)) => {
                    drag_fit_point(ctx.scene, vertex, point)?;
                    CommandOutcome::Updated
                }
                None => CommandOutcome::Ignored,
            },
            EngineCommand::DoubleClick { .. } | EngineCommand::Confirm
                if self.session.path().is_some() =>
            {
                self.finish(ctx)
            }
            _ => CommandOutcome::Ignored,
        };
        Ok(outcome)
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> CommandOutcome {
        self.grab = None;
        if self.session.path().is_none() {
            return CommandOutcome::Ignored;
        }
        self.session.cancel(ctx.scene);
        CommandOutcome::Cancelled
    }
}

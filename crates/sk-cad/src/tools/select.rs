//! Select tool
//!
//! Picks spline handles, vertices and whole paths. Dragging a handle mirrors
//! it; dragging a vertex snaps it against every other path.

use glam::DVec2;
use sk_core::{PathId, PathKind, Scene, SegmentRef};

use super::spline::pick_handle;
use super::{
    CommandOutcome, EditorError, EditorResult, EngineCommand, Modifiers, Tool, ToolContext,
    ToolKind, ToolPhase,
};
use crate::config::SnapConfig;
use crate::curve_fit::{CurveFitError, HandleRef, drag_fit_point, drag_handle};
use crate::snap::{SnapIndicator, SnapQuery, resolve_with_indicator};

/// Something held by the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectGrab {
    Handle(HandleRef),
    Vertex(SegmentRef),
}

/// Select tool state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectTool {
    /// Selected paths in pick order
    pub selection: Vec<PathId>,
    /// Handle or vertex being dragged
    pub grab: Option<SelectGrab>,
}

/// Move a vertex to `point`, snapped against every path except its own
///
/// Splines keep their handles. Other paths are straightened, and a rectangle
/// stops being one once a corner moves. Circles, arcs and filleted polygons
/// are described by parameters and refuse the edit.
pub fn move_vertex(
    scene: &mut Scene,
    vertex: SegmentRef,
    point: DVec2,
    snap: &SnapConfig,
    indicator: &mut dyn SnapIndicator,
) -> EditorResult<()> {
    let path = scene
        .get(vertex.path)
        .ok_or(EditorError::PathNotFound(vertex.path))?;
    if path.kind.is_analytic() {
        return Err(EditorError::AnalyticPath(path.kind.name().to_string()));
    }
    if vertex.segment >= path.segments.len() {
        return Err(CurveFitError::SegmentOutOfRange {
            path: vertex.path,
            segment: vertex.segment,
        }
        .into());
    }
    let is_spline = matches!(path.kind, PathKind::Spline { .. });

    let query = SnapQuery::ignoring(vertex.path);
    let target = resolve_with_indicator(point, scene, snap, query, indicator)
        .map(|t| t.point)
        .unwrap_or(point);

    if is_spline {
        drag_fit_point(scene, vertex, target)?;
        return Ok(());
    }

    let path = scene
        .get_mut(vertex.path)
        .ok_or(EditorError::PathNotFound(vertex.path))?;
    path.segments[vertex.segment].point = target;
    for segment in &mut path.segments {
        segment.straighten();
    }
    if matches!(path.kind, PathKind::Rectangle { .. }) {
        path.kind = PathKind::Untyped;
    }
    Ok(())
}

impl SelectTool {
    fn pick(&self, ctx: &ToolContext<'_>, point: DVec2) -> (Option<SelectGrab>, Option<PathId>) {
        let scene: &Scene = &*ctx.scene;
        let paths: Vec<_> = scene.candidates().collect();

        let handle_tolerance = ctx.config.spline.handle_pick_tolerance;
        for (id, path) in paths.iter().rev() {
            if matches!(path.kind, PathKind::Spline { .. })
                && let Some((handle, _)) = pick_handle(path, *id, point, handle_tolerance)
            {
                return (Some(SelectGrab::Handle(handle)), Some(*id));
            }
        }

        let tolerance = ctx.config.select.pick_tolerance;
        let mut vertex: Option<(SegmentRef, f64)> = None;
        for (id, path) in paths.iter().rev() {
            for (index, segment) in path.segments.iter().enumerate() {
                let distance = segment.point.distance(point);
                if distance < tolerance && vertex.is_none_or(|(_, d)| distance < d) {
                    vertex = Some((SegmentRef::new(*id, index), distance));
                }
            }
        }
        if let Some((vertex, _)) = vertex {
            return (Some(SelectGrab::Vertex(vertex)), Some(vertex.path));
        }

        (None, scene.hit_test(point, tolerance).first().copied())
    }

    fn select(&mut self, id: Option<PathId>, modifiers: Modifiers) {
        match (id, modifiers.shift) {
            (Some(id), true) => {
                if let Some(pos) = self.selection.iter().position(|s| *s == id) {
                    self.selection.remove(pos);
                } else {
                    self.selection.push(id);
                }
            }
            (Some(id), false) => {
                if !self.selection.contains(&id) {
                    self.selection = vec![id];
                }
            }
            (None, true) => {}
            (None, false) => self.selection.clear(),
        }
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn phase(&self) -> ToolPhase {
        ToolPhase::Idle
    }

    fn handle(
        &mut self,
        command: &EngineCommand,
        ctx: &mut ToolContext<'_>,
    ) -> EditorResult<CommandOutcome> {
        match *command {
            EngineCommand::Click { point, modifiers } => {
                let (grab, path) = self.pick(ctx, point);
                self.grab = grab;
                self.select(path, modifiers);
                Ok(CommandOutcome::Updated)
            }
            EngineCommand::Drag { point, .. } => {
                match self.grab {
                    Some(SelectGrab::Handle(handle)) => {
                        let anchor = ctx
                            .scene
                            .get(handle.segment.path)
                            .and_then(|p| p.segments.get(handle.segment.segment))
                            .map(|s| s.point)
                            .unwrap_or(point);
                        drag_handle(ctx.scene, handle, point - anchor)?;
                    }
                    Some(SelectGrab::Vertex(vertex)) => {
                        let snap = &ctx.config.snap;
                        move_vertex(ctx.scene, vertex, point, snap, &mut *ctx.indicator)?;
                    }
                    None => return Ok(CommandOutcome::Ignored),
                }
                Ok(CommandOutcome::Updated)
            }
            EngineCommand::Delete => {
                let removed: Vec<PathId> = self
                    .selection
                    .drain(..)
                    .filter(|id| ctx.scene.remove(*id).is_some())
                    .collect();
                self.grab = None;
                if removed.is_empty() {
                    return Ok(CommandOutcome::Ignored);
                }
                tracing::info!("Deleted {} path(s)", removed.len());
                Ok(CommandOutcome::removed(removed))
            }
            _ => Ok(CommandOutcome::Ignored),
        }
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> CommandOutcome {
        ctx.indicator.hide();
        if self.selection.is_empty() && self.grab.is_none() {
            return CommandOutcome::Ignored;
        }
        self.selection.clear();
        self.grab = None;
        CommandOutcome::Cancelled
    }
}

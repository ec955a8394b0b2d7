//! Line, rectangle and circle tools
//!
//! Each construction exists in the scene as a temporary path from the first
//! click on, follows the pointer, and is committed by a second click or by
//! typed dimensions.

use glam::DVec2;
use sk_core::geometry::points_equal;
use sk_core::{Path, PathId};

use super::{
    CommandOutcome, EditorError, EditorResult, EngineCommand, NumericField, Tool, ToolContext,
    ToolKind, ToolPhase, positive,
};
use crate::snap::SnapQuery;

/// Line tool state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineTool {
    #[default]
    Idle,
    /// Start placed, end follows the pointer
    Constructing { path: PathId, start: DVec2 },
    /// Part of the length/angle pair has been typed
    AwaitingNumericInput {
        path: PathId,
        start: DVec2,
        length: Option<f64>,
        angle: Option<f64>,
    },
}

/// End point `length` away from `start` at `angle` degrees, counter-clockwise on screen
pub fn polar_end(start: DVec2, length: f64, angle: f64) -> DVec2 {
    let rad = (-angle).to_radians();
    start + length * DVec2::new(rad.cos(), rad.sin())
}

impl LineTool {
    fn construction(&self) -> Option<(PathId, DVec2)> {
        match *self {
            LineTool::Idle => None,
            LineTool::Constructing { path, start }
            | LineTool::AwaitingNumericInput { path, start, .. } => Some((path, start)),
        }
    }

    fn set_end(ctx: &mut ToolContext<'_>, path: PathId, end: DVec2) {
        if let Some(line) = ctx.scene.get_mut(path)
            && let Some(last) = line.segments.last_mut()
        {
            last.point = end;
        }
    }

    fn current_end(ctx: &ToolContext<'_>, path: PathId) -> Option<DVec2> {
        ctx.scene.get(path).and_then(|p| p.last_point())
    }

    fn finish(
        &mut self,
        ctx: &mut ToolContext<'_>,
        path: PathId,
        start: DVec2,
        end: DVec2,
    ) -> CommandOutcome {
        *self = LineTool::Idle;
        if points_equal(start, end) {
            ctx.discard_construction(path);
            tracing::debug!("Zero-length line dropped");
            return CommandOutcome::Discarded(path);
        }
        Self::set_end(ctx, path, end);
        ctx.commit_construction(path)
    }

    fn finish_numeric(
        &mut self,
        ctx: &mut ToolContext<'_>,
        path: PathId,
        start: DVec2,
        length: Option<f64>,
        angle: Option<f64>,
    ) -> CommandOutcome {
        let preview = Self::current_end(ctx, path).unwrap_or(start) - start;
        let length = length.unwrap_or(preview.length());
        let angle = angle.unwrap_or_else(|| (-preview.y).atan2(preview.x).to_degrees());
        self.finish(ctx, path, start, polar_end(start, length, angle))
    }
}

impl Tool for LineTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Line
    }

    fn phase(&self) -> ToolPhase {
        match self {
            LineTool::Idle => ToolPhase::Idle,
            LineTool::Constructing { .. } => ToolPhase::Constructing,
            LineTool::AwaitingNumericInput { .. } => ToolPhase::AwaitingNumericInput,
        }
    }

    fn handle(
        &mut self,
        command: &EngineCommand,
        ctx: &mut ToolContext<'_>,
    ) -> EditorResult<CommandOutcome> {
        let outcome = match (*command, self.construction()) {
            (EngineCommand::Click { point, .. }, None) => {
                let start = ctx.snap(point, SnapQuery::default());
                let path = ctx
                    .scene
                    .insert(Path::line(start, start).with_temporary(true));
                *self = LineTool::Constructing { path, start };
                CommandOutcome::Updated
            }
            (EngineCommand::Click { point, .. }, Some((path, start))) => {
                let end = ctx.snap(point, SnapQuery::constructing(path));
                self.finish(ctx, path, start, end)
            }
            (EngineCommand::PointerMove { point }, None) => {
                ctx.snap(point, SnapQuery::default());
                CommandOutcome::Updated
            }
            (EngineCommand::PointerMove { point }, Some((path, _))) => {
                let end = ctx.snap(point, SnapQuery::constructing(path));
                Self::set_end(ctx, path, end);
                CommandOutcome::Updated
            }
            (EngineCommand::NumericOverride { field, value }, Some((path, start))) => {
                let (mut length, mut angle) = match *self {
                    LineTool::AwaitingNumericInput { length, angle, .. } => (length, angle),
                    _ => (None, None),
                };
                match field {
                    NumericField::Length => length = Some(positive(field, value)?),
                    NumericField::Angle if value.is_finite() => angle = Some(value),
                    NumericField::Angle => {
                        return Err(EditorError::InvalidNumericInput { field, value });
                    }
                    _ => return Ok(CommandOutcome::Ignored),
                }
                if length.is_some() && angle.is_some() {
                    self.finish_numeric(ctx, path, start, length, angle)
                } else {
                    *self = LineTool::AwaitingNumericInput {
                        path,
                        start,
                        length,
                        angle,
                    };
                    CommandOutcome::Updated
                }
            }
            (EngineCommand::Confirm, Some((path, start))) => match *self {
                LineTool::AwaitingNumericInput { length, angle, .. } => {
                    self.finish_numeric(ctx, path, start, length, angle)
                }
                _ => {
                    let end = Self::current_end(ctx, path).unwrap_or(start);
                    self.finish(ctx, path, start, end)
                }
            },
            _ => CommandOutcome::Ignored,
        };
        Ok(outcome)
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> CommandOutcome {
        match self.construction() {
            Some((path, _)) => {
                ctx.discard_construction(path);
                *self = LineTool::Idle;
                CommandOutcome::Cancelled
            }
            None => CommandOutcome::Ignored,
        }
    }
}

/// Rectangle tool state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RectangleTool {
    #[default]
    Idle,
    /// First corner placed, opposite corner follows the pointer
    Constructing { path: PathId, start: DVec2 },
    /// Part of the width/height pair has been typed
    AwaitingNumericInput {
        path: PathId,
        start: DVec2,
        width: Option<f64>,
        height: Option<f64>,
    },
}

impl RectangleTool {
    fn construction(&self) -> Option<(PathId, DVec2)> {
        match *self {
            RectangleTool::Idle => None,
            RectangleTool::Constructing { path, start }
            | RectangleTool::AwaitingNumericInput { path, start, .. } => Some((path, start)),
        }
    }

    /// Rebuild the temporary rectangle in place
    fn reshape(ctx: &mut ToolContext<'_>, path: PathId, start: DVec2, end: DVec2) {
        if let Some(existing) = ctx.scene.get_mut(path) {
            let style = existing.style;
            *existing = Path::rectangle(start, end)
                .with_style(style)
                .with_temporary(true);
        }
    }

    fn finish(
        &mut self,
        ctx: &mut ToolContext<'_>,
        path: PathId,
        start: DVec2,
        end: DVec2,
    ) -> CommandOutcome {
        *self = RectangleTool::Idle;
        Self::reshape(ctx, path, start, end);
        ctx.commit_construction(path)
    }

    /// Lay out typed dimensions from the current top-left corner
    fn finish_numeric(
        &mut self,
        ctx: &mut ToolContext<'_>,
        path: PathId,
        start: DVec2,
        width: Option<f64>,
        height: Option<f64>,
    ) -> CommandOutcome {
        let bounds = ctx.scene.get(path).and_then(|p| p.bounds());
        let (top_left, size) = match bounds {
            Some(b) => (b.min, b.size()),
            None => (start, DVec2::ZERO),
        };
        let size = DVec2::new(width.unwrap_or(size.x), height.unwrap_or(size.y));
        self.finish(ctx, path, top_left, top_left + size)
    }
}

impl Tool for RectangleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Rectangle
    }

    fn phase(&self) -> ToolPhase {
        match self {
            RectangleTool::Idle => ToolPhase::Idle,
            RectangleTool::Constructing { .. } => ToolPhase::Constructing,
            RectangleTool::AwaitingNumericInput { .. } => ToolPhase::AwaitingNumericInput,
        }
    }

    fn handle(
        &mut self,
        command: &EngineCommand,
        ctx: &mut ToolContext<'_>,
    ) -> EditorResult<CommandOutcome> {
        let outcome = match (*command, self.construction()) {
            (EngineCommand::Click { point, .. }, None) => {
                let start = ctx.snap(point, SnapQuery::default());
                let path = ctx
                    .scene
                    .insert(Path::rectangle(start, start).with_temporary(true));
                *self = RectangleTool::Constructing { path, start };
                CommandOutcome::Updated
            }
            (EngineCommand::Click { point, .. }, Some((path, start))) => {
                let end = ctx.snap(point, SnapQuery::constructing(path));
                self.finish(ctx, path, start, end)
            }
            (EngineCommand::PointerMove { point }, None) => {
                ctx.snap(point, SnapQuery::default());
                CommandOutcome::Updated
            }
            (EngineCommand::PointerMove { point }, Some((path, start))) => {
                let end = ctx.snap(point, SnapQuery::constructing(path));
                Self::reshape(ctx, path, start, end);
                CommandOutcome::Updated
            }
            (EngineCommand::NumericOverride { field, value }, Some((path, start))) => {
                let (mut width, mut height) = match *self {
                    RectangleTool::AwaitingNumericInput { width, height, .. } => (width, height),
                    _ => (None, None),
                };
                match field {
                    NumericField::Width => width = Some(positive(field, value)?),
                    NumericField::Height => height = Some(positive(field, value)?),
                    _ => return Ok(CommandOutcome::Ignored),
                }
                if width.is_some() && height.is_some() {
                    self.finish_numeric(ctx, path, start, width, height)
                } else {
                    *self = RectangleTool::AwaitingNumericInput {
                        path,
                        start,
                        width,
                        height,
                    };
                    CommandOutcome::Updated
                }
            }
            (EngineCommand::Confirm, Some((path, start))) => match *self {
                RectangleTool::AwaitingNumericInput { width, height, .. } => {
                    self.finish_numeric(ctx, path, start, width, height)
                }
                _ => {
                    *self = RectangleTool::Idle;
                    ctx.commit_construction(path)
                }
            },
            _ => CommandOutcome::Ignored,
        };
        Ok(outcome)
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> CommandOutcome {
        match self.construction() {
            Some((path, _)) => {
                ctx.discard_construction(path);
                *self = RectangleTool::Idle;
                CommandOutcome::Cancelled
            }
            None => CommandOutcome::Ignored,
        }
    }
}

/// Circle tool state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CircleTool {
    #[default]
    Idle,
    /// Center placed, radius follows the pointer
    Constructing { path: PathId, center: DVec2 },
}

impl CircleTool {
    fn reshape(ctx: &mut ToolContext<'_>, path: PathId, center: DVec2, radius: f64) {
        if let Some(existing) = ctx.scene.get_mut(path) {
            let style = existing.style;
            *existing = Path::circle(center, radius)
                .with_style(style)
                .with_temporary(true);
        }
    }

    fn finish(
        &mut self,
        ctx: &mut ToolContext<'_>,
        path: PathId,
        center: DVec2,
        radius: f64,
    ) -> CommandOutcome {
        *self = CircleTool::Idle;
        Self::reshape(ctx, path, center, radius);
        ctx.commit_construction(path)
    }
}

impl Tool for CircleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Circle
    }

    fn phase(&self) -> ToolPhase {
        match self {
            CircleTool::Idle => ToolPhase::Idle,
            CircleTool::Constructing { .. } => ToolPhase::Constructing,
        }
    }

    fn handle(
        &mut self,
        command: &EngineCommand,
        ctx: &mut ToolContext<'_>,
    ) -> EditorResult<CommandOutcome> {
        let outcome = match (*command, *self) {
            (EngineCommand::Click { point, .. }, CircleTool::Idle) => {
                let center = ctx.snap(point, SnapQuery::default());
                let path = ctx
                    .scene
                    .insert(Path::circle(center, 0.0).with_temporary(true));
                *self = CircleTool::Constructing { path, center };
                CommandOutcome::Updated
            }
            (EngineCommand::Click { point, .. }, CircleTool::Constructing { path, center }) => {
                let rim = ctx.snap(point, SnapQuery::constructing(path));
                self.finish(ctx, path, center, center.distance(rim))
            }
            (EngineCommand::PointerMove { point }, CircleTool::Idle) => {
                ctx.snap(point, SnapQuery::default());
                CommandOutcome::Updated
            }
            (EngineCommand::PointerMove { point }, CircleTool::Constructing { path, center }) => {
                let rim = ctx.snap(point, SnapQuery::constructing(path));
                Self::reshape(ctx, path, center, center.distance(rim));
                CommandOutcome::Updated
            }
            (
                EngineCommand::NumericOverride { field, value },
                CircleTool::Constructing { path, center },
            ) => match field {
                NumericField::Diameter => {
                    let diameter = positive(field, value)?;
                    self.finish(ctx, path, center, diameter / 2.0)
                }
                NumericField::Radius => {
                    let radius = positive(field, value)?;
                    self.finish(ctx, path, center, radius)
                }
                _ => CommandOutcome::Ignored,
            },
            (EngineCommand::Confirm, CircleTool::Constructing { path, .. }) => {
                *self = CircleTool::Idle;
                ctx.commit_construction(path)
            }
            _ => CommandOutcome::Ignored,
        };
        Ok(outcome)
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> CommandOutcome {
        match *self {
            CircleTool::Constructing { path, .. } => {
                ctx.discard_construction(path);
                *self = CircleTool::Idle;
                CommandOutcome::Cancelled
            }
            CircleTool::Idle => CommandOutcome::Ignored,
        }
    }
}

//! Fillet and trim tools

use glam::DVec2;
use sk_core::PathId;

use super::{
    CommandOutcome, EditorResult, EngineCommand, NumericField, Tool, ToolContext, ToolKind,
    ToolPhase, positive,
};
use crate::fillet::{FilletCorner, apply_fillet, locate_corner};
use crate::trim::{pick_path, preview, trim};

/// Fillet tool state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FilletTool {
    #[default]
    Idle,
    /// A corner was picked; a typed radius or confirm rounds it
    AwaitingNumericInput { corner: FilletCorner },
}

impl FilletTool {
    /// Corner waiting for a radius
    pub fn corner(&self) -> Option<FilletCorner> {
        match *self {
            FilletTool::Idle => None,
            FilletTool::AwaitingNumericInput { corner } => Some(corner),
        }
    }

    /// Round the picked corner; on failure the corner stays picked
    fn round(
        &mut self,
        ctx: &mut ToolContext<'_>,
        corner: FilletCorner,
        radius: f64,
    ) -> EditorResult<CommandOutcome> {
        let replacement = match apply_fillet(ctx.scene, corner, radius, &ctx.config.fillet) {
            Ok(replacement) => replacement,
            Err(e) => {
                tracing::warn!("Fillet refused: {}", e);
                return Err(e.into());
            }
        };
        *ctx.last_fillet_radius = radius;
        *self = FilletTool::Idle;
        Ok(CommandOutcome::Committed {
            added: replacement.inserted,
            removed: replacement.removed,
            modified: replacement.modified,
        })
    }
}

impl Tool for FilletTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Fillet
    }

    fn phase(&self) -> ToolPhase {
        match self {
            FilletTool::Idle => ToolPhase::Idle,
            FilletTool::AwaitingNumericInput { .. } => ToolPhase::AwaitingNumericInput,
        }
    }

    fn handle(
        &mut self,
        command: &EngineCommand,
        ctx: &mut ToolContext<'_>,
    ) -> EditorResult<CommandOutcome> {
        match (*command, self.corner()) {
            (EngineCommand::Click { point, .. }, _) => {
                let corner = locate_corner(ctx.scene, point, &ctx.config.fillet)?;
                tracing::debug!("Picked fillet corner {:?}", corner);
                *self = FilletTool::AwaitingNumericInput { corner };
                Ok(CommandOutcome::Updated)
            }
            (
                EngineCommand::NumericOverride {
                    field: NumericField::Radius,
                    value,
                },
                Some(corner),
            ) => {
                let radius = positive(NumericField::Radius, value)?;
                self.round(ctx, corner, radius)
            }
            (EngineCommand::Confirm, Some(corner)) => {
                let radius = *ctx.last_fillet_radius;
                self.round(ctx, corner, radius)
            }
            _ => Ok(CommandOutcome::Ignored),
        }
    }

    fn cancel(&mut self, _ctx: &mut ToolContext<'_>) -> CommandOutcome {
        match self {
            FilletTool::Idle => CommandOutcome::Ignored,
            FilletTool::AwaitingNumericInput { .. } => {
                *self = FilletTool::Idle;
                CommandOutcome::Cancelled
            }
        }
    }
}

/// Trim tool state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrimTool {
    /// Path under the pointer
    pub hovered: Option<PathId>,
    /// Polyline of the stretch a click would remove
    pub preview: Vec<DVec2>,
}

impl TrimTool {
    fn clear(&mut self) {
        self.hovered = None;
        self.preview.clear();
    }
}

impl Tool for TrimTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Trim
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
            EngineCommand::PointerMove { point } => {
                self.clear();
                if let Some(id) = pick_path(ctx.scene, point, &ctx.config.trim) {
                    self.hovered = Some(id);
                    self.preview = preview(ctx.scene, id, point)?;
                }
                Ok(CommandOutcome::Updated)
            }
            EngineCommand::Click { point, .. } => {
                self.clear();
                let Some(id) = pick_path(ctx.scene, point, &ctx.config.trim) else {
                    return Ok(CommandOutcome::Ignored);
                };
                let outcome = trim(ctx.scene, id, point, &ctx.config.trim)?;
                tracing::debug!("Trim of {} finished as {:?}", id, outcome.method);
                Ok(CommandOutcome::Committed {
                    added: outcome.inserted,
                    removed: outcome.removed,
                    modified: Vec::new(),
                })
            }
            _ => Ok(CommandOutcome::Ignored),
        }
    }

    fn cancel(&mut self, _ctx: &mut ToolContext<'_>) -> CommandOutcome {
        if self.hovered.is_none() {
            return CommandOutcome::Ignored;
        }
        self.clear();
        CommandOutcome::Cancelled
    }
}

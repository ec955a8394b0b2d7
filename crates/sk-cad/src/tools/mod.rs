//! Tool state machines
//!
//! Every pointer or keyboard event reaches the engines as an
//! [`EngineCommand`]. The [`Editor`] routes each command to the active tool,
//! which moves between idle, constructing and awaiting-numeric-input phases
//! and calls into the snap, fillet, trim and curve-fit engines.

mod draw;
mod editor;
mod edit;
mod select;
mod spline;

pub use draw::{CircleTool, LineTool, RectangleTool};
pub use edit::{FilletTool, TrimTool};
pub use editor::{ActiveTool, Editor};
pub use select::{SelectTool, move_vertex};
pub use spline::SplineTool;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use sk_core::{PathId, Scene};

use crate::config::EditorConfig;
use crate::curve_fit::CurveFitError;
use crate::fillet::FilletError;
use crate::snap::{IndicatorState, SnapIndicator, SnapQuery, resolve_with_indicator};
use crate::trim::TrimError;

/// Available tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolKind {
    /// Pick, drag and delete
    #[default]
    Select,
    /// Straight line between two clicks
    Line,
    /// Axis-aligned rectangle between two corners
    Rectangle,
    /// Circle from center and radius
    Circle,
    /// Smooth curve through clicked points
    Spline,
    /// Round a corner
    Fillet,
    /// Remove a stretch of a path
    Trim,
}

impl ToolKind {
    /// Get the display name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Spline => "Spline",
            ToolKind::Fillet => "Fillet",
            ToolKind::Trim => "Trim",
        }
    }

    /// Check if this tool creates new paths
    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            ToolKind::Line | ToolKind::Rectangle | ToolKind::Circle | ToolKind::Spline
        )
    }
}

/// Value typed into the numeric entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericField {
    Length,
    /// Degrees, counter-clockwise on screen
    Angle,
    Width,
    Height,
    Diameter,
    Radius,
}

/// Keyboard modifiers held during a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Input delivered to the editor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EngineCommand {
    Click {
        point: DVec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    DoubleClick {
        point: DVec2,
    },
    PointerMove {
        point: DVec2,
    },
    Drag {
        point: DVec2,
        #[serde(default)]
        delta: DVec2,
    },
    Confirm,
    Cancel,
    NumericOverride {
        field: NumericField,
        value: f64,
    },
    SwitchTool(ToolKind),
    Delete,
}

impl EngineCommand {
    /// Plain click without modifiers
    pub fn click(point: DVec2) -> Self {
        EngineCommand::Click {
            point,
            modifiers: Modifiers::default(),
        }
    }

    /// Drag to `point` without a known delta
    pub fn drag(point: DVec2) -> Self {
        EngineCommand::Drag {
            point,
            delta: DVec2::ZERO,
        }
    }
}

/// Phase of the active tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolPhase {
    #[default]
    Idle,
    Constructing,
    AwaitingNumericInput,
}

/// What a command did to the scene
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CommandOutcome {
    /// Not handled by the active tool
    #[default]
    Ignored,
    /// Transient state changed: preview, selection, indicator or a drag
    Updated,
    /// Geometry was committed
    Committed {
        added: Vec<PathId>,
        removed: Vec<PathId>,
        modified: Vec<PathId>,
    },
    /// A finished construction was too short and was dropped
    Discarded(PathId),
    /// The in-progress operation was abandoned
    Cancelled,
}

impl CommandOutcome {
    /// A single new path
    pub fn added(id: PathId) -> Self {
        CommandOutcome::Committed {
            added: vec![id],
            removed: Vec::new(),
            modified: Vec::new(),
        }
    }

    /// Paths taken out of the scene
    pub fn removed(ids: Vec<PathId>) -> Self {
        CommandOutcome::Committed {
            added: Vec::new(),
            removed: ids,
            modified: Vec::new(),
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, CommandOutcome::Committed { .. })
    }
}

/// Editor errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("Fillet error: {0}")]
    Fillet(#[from] FilletError),

    #[error("Trim error: {0}")]
    Trim(#[from] TrimError),

    #[error("Curve edit error: {0}")]
    CurveFit(#[from] CurveFitError),

    #[error("Invalid {field:?} value: {value}")]
    InvalidNumericInput { field: NumericField, value: f64 },

    #[error("Path not found: {0}")]
    PathNotFound(PathId),

    #[error("{0} paths cannot be reshaped by moving a vertex")]
    AnalyticPath(String),
}

/// Result type for editor commands
pub type EditorResult<T> = Result<T, EditorError>;

/// Everything a tool may touch while handling a command
pub struct ToolContext<'a> {
    pub scene: &'a mut Scene,
    pub config: &'a EditorConfig,
    pub indicator: &'a mut IndicatorState,
    /// Radius applied when a fillet is confirmed without typing one
    pub last_fillet_radius: &'a mut f64,
}

impl ToolContext<'_> {
    /// Snap `point` and move the indicator; returns the raw point when nothing is near
    pub fn snap(&mut self, point: DVec2, query: SnapQuery) -> DVec2 {
        resolve_with_indicator(point, &*self.scene, &self.config.snap, query, &mut *self.indicator)
            .map(|target| target.point)
            .unwrap_or(point)
    }

    /// Make a construction permanent, or drop it when it ended up too short
    pub fn commit_construction(&mut self, id: PathId) -> CommandOutcome {
        self.indicator.hide();
        let Some(path) = self.scene.get_mut(id) else {
            return CommandOutcome::Ignored;
        };
        let length = path.length();
        if length < self.config.min_construction_length {
            self.scene.remove(id);
            tracing::debug!("Dropped construction {} of length {:.4}", id, length);
            return CommandOutcome::Discarded(id);
        }
        path.temporary = false;
        tracing::info!("Committed {} {}", path.kind.name(), id);
        CommandOutcome::added(id)
    }

    /// Remove an unconfirmed construction
    pub fn discard_construction(&mut self, id: PathId) {
        self.indicator.hide();
        self.scene.remove(id);
    }
}

/// A tool driven by engine commands
pub trait Tool {
    /// Which tool this is
    fn kind(&self) -> ToolKind;

    /// Current phase
    fn phase(&self) -> ToolPhase;

    /// React to one command; unhandled commands return [`CommandOutcome::Ignored`]
    fn handle(
        &mut self,
        command: &EngineCommand,
        ctx: &mut ToolContext<'_>,
    ) -> EditorResult<CommandOutcome>;

    /// Abandon any unconfirmed work, leaving committed geometry alone
    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> CommandOutcome;
}

/// Reject non-finite and non-positive sizes typed by the user
pub(crate) fn positive(field: NumericField, value: f64) -> EditorResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EditorError::InvalidNumericInput { field, value })
    }
}

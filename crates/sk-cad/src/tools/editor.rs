//! Editor: owns the scene and routes commands to the active tool

use glam::DVec2;
use sk_core::{PathId, Scene};

use super::{
    CircleTool, CommandOutcome, EditorResult, EngineCommand, FilletTool, LineTool, RectangleTool,
    SelectTool, SplineTool, Tool, ToolContext, ToolKind, ToolPhase, TrimTool,
};
use crate::config::EditorConfig;
use crate::curve_fit::CurveFitSession;
use crate::snap::{IndicatorState, SnapIndicator};

/// The active tool with its state
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveTool {
    Select(SelectTool),
    Line(LineTool),
    Rectangle(RectangleTool),
    Circle(CircleTool),
    Spline(SplineTool),
    Fillet(FilletTool),
    Trim(TrimTool),
}

impl ActiveTool {
    /// Fresh state for `kind`
    pub fn new(kind: ToolKind, config: &EditorConfig) -> Self {
        match kind {
            ToolKind::Select => ActiveTool::Select(SelectTool::default()),
            ToolKind::Line => ActiveTool::Line(LineTool::default()),
            ToolKind::Rectangle => ActiveTool::Rectangle(RectangleTool::default()),
            ToolKind::Circle => ActiveTool::Circle(CircleTool::default()),
            ToolKind::Spline => {
                ActiveTool::Spline(SplineTool::new(CurveFitSession::begin(&config.spline)))
            }
            ToolKind::Fillet => ActiveTool::Fillet(FilletTool::default()),
            ToolKind::Trim => ActiveTool::Trim(TrimTool::default()),
        }
    }

    pub fn as_tool(&self) -> &dyn Tool {
        match self {
            ActiveTool::Select(t) => t,
            ActiveTool::Line(t) => t,
            ActiveTool::Rectangle(t) => t,
            ActiveTool::Circle(t) => t,
            ActiveTool::Spline(t) => t,
            ActiveTool::Fillet(t) => t,
            ActiveTool::Trim(t) => t,
        }
    }

    pub fn as_tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            ActiveTool::Select(t) => t,
            ActiveTool::Line(t) => t,
            ActiveTool::Rectangle(t) => t,
            ActiveTool::Circle(t) => t,
            ActiveTool::Spline(t) => t,
            ActiveTool::Fillet(t) => t,
            ActiveTool::Trim(t) => t,
        }
    }
}

/// Interactive editing session over one scene
#[derive(Debug, Clone)]
pub struct Editor {
    scene: Scene,
    config: EditorConfig,
    tool: ActiveTool,
    indicator: IndicatorState,
    last_fillet_radius: f64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor over an empty scene
    pub fn new(config: EditorConfig) -> Self {
        Self::with_scene(Scene::new(), config)
    }

    /// Create an editor over an existing scene
    pub fn with_scene(scene: Scene, config: EditorConfig) -> Self {
        let tool = ActiveTool::new(ToolKind::default(), &config);
        let last_fillet_radius = config.fillet.default_radius;
        Self {
            scene,
            config,
            tool,
            indicator: IndicatorState::default(),
            last_fillet_radius,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> &ActiveTool {
        &self.tool
    }

    pub fn tool_kind(&self) -> ToolKind {
        self.tool.as_tool().kind()
    }

    pub fn phase(&self) -> ToolPhase {
        self.tool.as_tool().phase()
    }

    /// Snap indicator position while visible
    pub fn indicator(&self) -> Option<DVec2> {
        self.indicator.position
    }

    /// Radius a confirmed fillet will use
    pub fn last_fillet_radius(&self) -> f64 {
        self.last_fillet_radius
    }

    /// Paths picked with the select tool
    pub fn selection(&self) -> &[PathId] {
        match &self.tool {
            ActiveTool::Select(select) => &select.selection,
            _ => &[],
        }
    }

    /// Stretch the trim tool would remove at the last pointer position
    pub fn trim_preview(&self) -> &[DVec2] {
        match &self.tool {
            ActiveTool::Trim(trim) => &trim.preview,
            _ => &[],
        }
    }

    /// Apply one command
    ///
    /// Errors are local: the scene is left as it was before the command.
    pub fn handle(&mut self, command: EngineCommand) -> EditorResult<CommandOutcome> {
        let mut ctx = ToolContext {
            scene: &mut self.scene,
            config: &self.config,
            indicator: &mut self.indicator,
            last_fillet_radius: &mut self.last_fillet_radius,
        };

        match command {
            EngineCommand::SwitchTool(kind) => {
                let cancelled = self.tool.as_tool_mut().cancel(&mut ctx);
                ctx.indicator.hide();
                if cancelled != CommandOutcome::Ignored {
                    tracing::debug!("Switching tool cancelled {:?}", cancelled);
                }
                self.tool = ActiveTool::new(kind, &self.config);
                tracing::info!("Selected tool: {}", kind.name());
                Ok(CommandOutcome::Updated)
            }
            EngineCommand::Cancel => {
                let outcome = self.tool.as_tool_mut().cancel(&mut ctx);
                // Escape with nothing in progress leaves the tool
                if outcome == CommandOutcome::Ignored && self.tool_kind() != ToolKind::Select {
                    self.tool = ActiveTool::new(ToolKind::Select, &self.config);
                    tracing::info!("Selected tool: {}", ToolKind::Select.name());
                    return Ok(CommandOutcome::Updated);
                }
                Ok(outcome)
            }
            command => {
                let outcome = self.tool.as_tool_mut().handle(&command, &mut ctx)?;
                if outcome == CommandOutcome::Ignored {
                    tracing::debug!(
                        "{} tool ignored {:?}",
                        self.tool.as_tool().kind().name(),
                        command
                    );
                }
                Ok(outcome)
            }
        }
    }

    /// Apply commands in order, stopping at the first error
    pub fn replay<I>(&mut self, commands: I) -> EditorResult<Vec<CommandOutcome>>
    where
        I: IntoIterator<Item = EngineCommand>,
    {
        commands.into_iter().map(|c| self.handle(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool_is_select() {
        let editor = Editor::default();
        assert_eq!(editor.tool_kind(), ToolKind::Select);
        assert_eq!(editor.phase(), ToolPhase::Idle);
        assert_eq!(editor.last_fillet_radius(), 10.0);
    }

    #[test]
    fn test_cancel_when_idle_returns_to_select() {
        let mut editor = Editor::default();
        editor.handle(EngineCommand::SwitchTool(ToolKind::Trim)).unwrap();
        assert_eq!(editor.tool_kind(), ToolKind::Trim);
        editor.handle(EngineCommand::Cancel).unwrap();
        assert_eq!(editor.tool_kind(), ToolKind::Select);
    }

    #[test]
    fn test_switching_tools_drops_construction() {
        let mut editor = Editor::default();
        editor.handle(EngineCommand::SwitchTool(ToolKind::Line)).unwrap();
        editor.handle(EngineCommand::click(DVec2::ZERO)).unwrap();
        assert_eq!(editor.phase(), ToolPhase::Constructing);
        assert_eq!(editor.scene().len(), 1);

        editor.handle(EngineCommand::SwitchTool(ToolKind::Circle)).unwrap();
        assert!(editor.scene().is_empty());
        assert_eq!(editor.phase(), ToolPhase::Idle);
    }
}

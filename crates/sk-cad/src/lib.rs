//! Profile sketch editing engines
//!
//! Snapping, filleting, trimming and curve fitting over an [`sk_core::Scene`],
//! plus the tool state machines that drive them from input commands.

pub mod config;
pub mod curve_fit;
pub mod fillet;
pub mod snap;
pub mod tools;
pub mod trim;

pub use config::{
    ConfigError, EditorConfig, FilletConfig, SelectConfig, SnapConfig, SplineConfig, TrimConfig,
};
pub use curve_fit::{
    CurveFitError, CurveFitResult, CurveFitSession, HandleRef, HandleSide, drag_fit_point,
    drag_handle, smooth,
};
pub use fillet::{FilletCorner, FilletError, FilletResult, Replacement, apply_fillet, locate_corner};
pub use snap::{IndicatorState, SnapIndicator, SnapKind, SnapQuery, SnapTarget, resolve};
pub use tools::{
    ActiveTool, CommandOutcome, Editor, EditorError, EditorResult, EngineCommand, Modifiers,
    NumericField, Tool, ToolKind, ToolPhase,
};
pub use trim::{TrimError, TrimMethod, TrimOutcome, TrimResult, trim};

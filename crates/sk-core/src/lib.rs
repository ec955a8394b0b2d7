//! Profile sketch core
//!
//! Path model, curve geometry, scene container and interchange export shared
//! by the editing engines.

pub mod export;
pub mod geometry;
pub mod path;
pub mod scene;

pub use export::{
    Classification, ExportError, ExportOptions, ExportOutcome, InterchangeDocument, Primitive,
    export_dxf, export_scene,
};
pub use geometry::{Bounds, CubicBezier, Point};
pub use path::{ArcGeometry, Fillet, Path, PathKind, PathLocation, PathStyle, Segment};
pub use scene::{PathId, Scene, SceneError, SceneResult, SegmentRef};

// Re-export glam for convenience
pub use glam::DVec2;

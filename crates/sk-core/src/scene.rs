//! Scene: the ordered set of paths being edited

use std::fmt;

use glam::DVec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::path::Path;

/// Stable identifier of a path within a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathId(Uuid);

impl PathId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PathId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to one segment of one path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentRef {
    /// Owning path
    pub path: PathId,
    /// Segment index within the path
    pub segment: usize,
}

impl SegmentRef {
    /// Create a segment reference
    pub fn new(path: PathId, segment: usize) -> Self {
        Self { path, segment }
    }
}

/// Scene-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SceneError {
    #[error("Path not found: {0}")]
    PathNotFound(PathId),
    #[error("Segment {segment} out of range for path {path}")]
    SegmentOutOfRange { path: PathId, segment: usize },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// All paths of a drawing in draw order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    paths: IndexMap<PathId, Path>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of paths, temporary ones included
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the scene has no paths
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Add a path on top of the drawing
    pub fn insert(&mut self, path: Path) -> PathId {
        let id = PathId::new();
        self.paths.insert(id, path);
        id
    }

    /// Add a path at a draw-order position
    pub fn insert_at(&mut self, index: usize, path: Path) -> PathId {
        let id = PathId::new();
        let index = index.min(self.paths.len());
        self.paths.shift_insert(index, id, path);
        id
    }

    /// Remove a path, keeping the order of the rest
    pub fn remove(&mut self, id: PathId) -> Option<Path> {
        self.paths.shift_remove(&id)
    }

    /// Look up a path
    pub fn get(&self, id: PathId) -> Option<&Path> {
        self.paths.get(&id)
    }

    /// Look up a path mutably
    pub fn get_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.paths.get_mut(&id)
    }

    /// Look up a path or fail with [`SceneError::PathNotFound`]
    pub fn require(&self, id: PathId) -> SceneResult<&Path> {
        self.get(id).ok_or(SceneError::PathNotFound(id))
    }

    /// Whether a path exists
    pub fn contains(&self, id: PathId) -> bool {
        self.paths.contains_key(&id)
    }

    /// Draw-order position of a path
    pub fn position(&self, id: PathId) -> Option<usize> {
        self.paths.get_index_of(&id)
    }

    /// Swap one path for any number of replacements at the same position
    ///
    /// Returns the ids of the inserted paths, or `None` when `id` is unknown.
    pub fn replace(&mut self, id: PathId, replacements: Vec<Path>) -> Option<Vec<PathId>> {
        let position = self.position(id)?;
        self.paths.shift_remove(&id);
        Some(
            replacements
                .into_iter()
                .enumerate()
                .map(|(offset, path)| self.insert_at(position + offset, path))
                .collect(),
        )
    }

    /// All paths in draw order
    pub fn iter(&self) -> impl Iterator<Item = (PathId, &Path)> {
        self.paths.iter().map(|(id, path)| (*id, path))
    }

    /// All path ids in draw order
    pub fn ids(&self) -> Vec<PathId> {
        self.paths.keys().copied().collect()
    }

    /// Paths eligible for snapping, filleting and trimming
    pub fn candidates(&self) -> impl Iterator<Item = (PathId, &Path)> {
        self.iter().filter(|(_, p)| p.visible && !p.temporary)
    }

    /// Paths that take part in export
    pub fn exportable(&self) -> impl Iterator<Item = (PathId, &Path)> {
        self.iter().filter(|(_, p)| !p.temporary)
    }

    /// Visible committed paths whose stroke passes within `tolerance`, topmost first
    pub fn hit_test(&self, point: DVec2, tolerance: f64) -> Vec<PathId> {
        let mut hits: Vec<(PathId, f64)> = self
            .candidates()
            .map(|(id, p)| (id, p.distance_to(point)))
            .filter(|(_, d)| *d <= tolerance)
            .collect();
        hits.reverse();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits.into_iter().map(|(id, _)| id).collect()
    }

    /// Remove every path
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Serialize to RON text
    pub fn to_ron(&self) -> SceneResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SceneError::Serialization(e.to_string()))
    }

    /// Deserialize from RON text
    pub fn from_ron(text: &str) -> SceneResult<Self> {
        ron::from_str(text).map_err(|e| SceneError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x: f64) -> Path {
        Path::line(DVec2::new(x, 0.0), DVec2::new(x, 10.0))
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut scene = Scene::new();
        let a = scene.insert(line(0.0));
        let b = scene.insert(line(1.0));
        let c = scene.insert(line(2.0));
        assert_eq!(scene.ids(), vec![a, b, c]);
        scene.remove(b);
        assert_eq!(scene.ids(), vec![a, c]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut scene = Scene::new();
        let a = scene.insert(line(0.0));
        let b = scene.insert(line(1.0));
        let c = scene.insert(line(2.0));

        let new_ids = scene.replace(b, vec![line(5.0), line(6.0)]).unwrap();
        assert_eq!(new_ids.len(), 2);
        assert!(!scene.contains(b));
        assert_eq!(scene.ids(), vec![a, new_ids[0], new_ids[1], c]);
    }

    #[test]
    fn test_replace_unknown_returns_none() {
        let mut scene = Scene::new();
        scene.insert(line(0.0));
        assert!(scene.replace(PathId::new(), vec![line(1.0)]).is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_candidates_skip_temporary_and_hidden() {
        let mut scene = Scene::new();
        let a = scene.insert(line(0.0));
        scene.insert(line(1.0).with_temporary(true));
        let mut hidden = line(2.0);
        hidden.visible = false;
        let h = scene.insert(hidden);

        let candidates: Vec<PathId> = scene.candidates().map(|(id, _)| id).collect();
        assert_eq!(candidates, vec![a]);
        let exportable: Vec<PathId> = scene.exportable().map(|(id, _)| id).collect();
        assert_eq!(exportable, vec![a, h]);
    }

    #[test]
    fn test_hit_test_nearest_first() {
        let mut scene = Scene::new();
        let a = scene.insert(line(0.0));
        let b = scene.insert(line(2.0));
        assert_eq!(scene.hit_test(DVec2::new(1.5, 5.0), 2.0), vec![b, a]);
        assert!(scene.hit_test(DVec2::new(10.0, 5.0), 2.0).is_empty());
    }

    #[test]
    fn test_ron_round_trip_keeps_ids() {
        let mut scene = Scene::new();
        let a = scene.insert(Path::circle(DVec2::new(1.0, 2.0), 3.0));
        let text = scene.to_ron().unwrap();
        let loaded = Scene::from_ron(&text).unwrap();
        assert_eq!(loaded.ids(), vec![a]);
        assert_eq!(loaded.get(a), scene.get(a));
    }
}

//! Scenes: named, colored time segments used to organize the timeline.
//!
//! Scenes are intended as sequential segments but overlap is tolerated;
//! lookups resolve ties by stored order.

use serde::{Deserialize, Serialize};

use crate::time::{Seconds, TimeRange};
use crate::ModelError;

/// Suffix appended to the name of the scene created by a split.
pub const SPLIT_SUFFIX: &str = " (Split)";

/// A named, colored time-range marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub name: String,
    pub range: TimeRange,
    /// CSS color string.
    pub color: String,
}

/// Fields for a new [`Scene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDraft {
    pub name: String,
    pub range: TimeRange,
    pub color: String,
}

/// Ordered collection of scenes.
#[derive(Debug, Clone)]
pub struct SceneStore {
    scenes: Vec<Scene>,
    next_seq: u64,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneStore {
    pub fn new() -> Self {
        Self {
            scenes: Vec::new(),
            next_seq: 1,
        }
    }

    fn mint_id(&mut self) -> String {
        let id = format!("scene-{}", self.next_seq);
        self.next_seq += 1;
        id
    }

    /// Append a scene, returning its id.
    pub fn add(&mut self, draft: SceneDraft) -> String {
        let id = self.mint_id();
        self.scenes.push(Scene {
            id: id.clone(),
            name: draft.name,
            range: draft.range.normalized(),
            color: draft.color,
        });
        id
    }

    /// Draft for the next "add scene" action: named `Scene N`, colored by
    /// golden-angle hue stepping, spanning `[t, min(t + span, duration)]`.
    pub fn next_default_draft(&self, t: Seconds, span: Seconds, duration: Seconds) -> SceneDraft {
        let index = self.scenes.len();
        SceneDraft {
            name: format!("Scene {}", index + 1),
            range: TimeRange::starting_at_within(t, span, duration),
            color: scene_color(index),
        }
    }

    /// Split the first scene (in stored order) that is active at `t`.
    ///
    /// The matched scene is shortened to end at `t` and a new scene
    /// `[t, original_end]` named `"<name> (Split)"` with the same color is
    /// appended. Splitting exactly at a scene's start leaves a zero-length
    /// scene behind. Fails with `NotFound` when no scene contains `t`, in
    /// which case the store is unchanged.
    pub fn split_at(&mut self, t: Seconds) -> Result<String, ModelError> {
        let index = self
            .scenes
            .iter()
            .position(|s| s.range.contains(t))
            .ok_or_else(|| ModelError::NotFound {
                message: "No scene to split at current position".to_string(),
            })?;

        let new_id = self.mint_id();
        let original = &mut self.scenes[index];
        let original_end = original.range.end;
        original.range.end = t;

        let split = Scene {
            id: new_id.clone(),
            name: format!("{}{}", original.name, SPLIT_SUFFIX),
            range: TimeRange::new(t, original_end),
            color: original.color.clone(),
        };
        self.scenes.push(split);
        Ok(new_id)
    }

    /// Remove the scene with `id`. Unknown ids are a no-op.
    /// Returns whether a scene was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.scenes.len();
        self.scenes.retain(|s| s.id != id);
        self.scenes.len() != before
    }

    /// First scene in stored order active at `t`.
    pub fn scene_at(&self, t: Seconds) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.range.contains(t))
    }

    pub fn get(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// Smallest range covering every scene, if any.
    pub fn covered_range(&self) -> Option<TimeRange> {
        let start = self.scenes.iter().map(|s| s.range.start).reduce(f64::min)?;
        let end = self.scenes.iter().map(|s| s.range.end).reduce(f64::max)?;
        Some(TimeRange::new(start, end))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn clear(&mut self) {
        self.scenes.clear();
    }
}

/// Color for the scene at `index`: `hsl(index * 137.5 mod 360, 70%, 50%)`.
pub fn scene_color(index: usize) -> String {
    let hue = (index as f64 * 137.5) % 360.0;
    format!("hsl({hue}, 70%, 50%)")
}

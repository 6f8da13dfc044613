//! Text and sticker overlays and the stores that own them.
//!
//! Each overlay kind lives in its own [`OverlayStore`] with its own id
//! namespace. Stores preserve insertion order, which is also the drawing
//! order (later-added overlays draw on top).

use serde::{Deserialize, Serialize};

use crate::time::{Seconds, TimeRange};
use crate::ModelError;

/// Behavior shared by every overlay kind a store can hold.
pub trait Overlay: Clone {
    /// Fields supplied on creation (everything except the id).
    type Draft;

    /// Partial update; `None` fields are left untouched.
    type Patch;

    /// Prefix for ids minted by the store (`"overlay"` -> `overlay-1`).
    const ID_PREFIX: &'static str;

    /// Validate a draft and build the overlay under the given id.
    fn from_draft(id: String, draft: Self::Draft) -> Result<Self, ModelError>;

    /// Apply a partial update in place.
    fn apply_patch(&mut self, patch: Self::Patch);

    fn id(&self) -> &str;

    fn range(&self) -> TimeRange;

    /// Whether the overlay is visible at `t`.
    fn is_active_at(&self, t: Seconds) -> bool {
        self.range().contains(t)
    }
}

/// A text caption drawn over the video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub id: String,
    /// Never empty.
    pub text: String,
    /// Baseline anchor in frame pixels.
    pub x: f64,
    pub y: f64,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS color string.
    pub color: String,
    pub range: TimeRange,
}

/// Fields for a new [`TextOverlay`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlayDraft {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub color: String,
    pub range: TimeRange,
}

/// Partial update for a [`TextOverlay`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOverlayPatch {
    pub text: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub start: Option<Seconds>,
    pub end: Option<Seconds>,
}

impl Overlay for TextOverlay {
    type Draft = TextOverlayDraft;
    type Patch = TextOverlayPatch;

    const ID_PREFIX: &'static str = "overlay";

    fn from_draft(id: String, draft: TextOverlayDraft) -> Result<Self, ModelError> {
        if draft.text.trim().is_empty() {
            return Err(ModelError::ValidationError {
                message: "Overlay text must not be empty".to_string(),
            });
        }
        if !(draft.font_size.is_finite() && draft.font_size > 0.0) {
            return Err(ModelError::ValidationError {
                message: format!("Font size must be positive, got {}", draft.font_size),
            });
        }
        Ok(Self {
            id,
            text: draft.text,
            x: draft.x,
            y: draft.y,
            font_size: draft.font_size,
            color: draft.color,
            range: draft.range.normalized(),
        })
    }

    fn apply_patch(&mut self, patch: TextOverlayPatch) {
        // Blank text or a non-positive size would break the overlay
        // invariants; those fields keep their previous value.
        if let Some(text) = patch.text.filter(|t| !t.trim().is_empty()) {
            self.text = text;
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(size) = patch.font_size.filter(|s| s.is_finite() && *s > 0.0) {
            self.font_size = size;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        self.range = patch_range(self.range, patch.start, patch.end);
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn range(&self) -> TimeRange {
        self.range
    }
}

/// Whether a glyph overlay is an emoji sticker or a typographic symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StickerKind {
    #[default]
    Sticker,
    Symbol,
}

/// A single glyph (emoji or symbol) drawn over the video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerOverlay {
    pub id: String,
    pub kind: StickerKind,
    /// The glyph or short string to draw.
    pub content: String,
    /// Center in frame pixels.
    pub x: f64,
    pub y: f64,
    /// Glyph size in pixels.
    pub size: f64,
    /// Rotation in degrees, clockwise.
    pub rotation: f64,
    /// Opacity in `[0.0, 1.0]`.
    pub opacity: f64,
    pub range: TimeRange,
}

/// Fields for a new [`StickerOverlay`].
#[derive(Debug, Clone, PartialEq)]
pub struct StickerOverlayDraft {
    pub kind: StickerKind,
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub rotation: f64,
    pub opacity: f64,
    pub range: TimeRange,
}

/// Partial update for a [`StickerOverlay`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StickerOverlayPatch {
    pub content: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub size: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub start: Option<Seconds>,
    pub end: Option<Seconds>,
}

impl Overlay for StickerOverlay {
    type Draft = StickerOverlayDraft;
    type Patch = StickerOverlayPatch;

    const ID_PREFIX: &'static str = "sticker";

    fn from_draft(id: String, draft: StickerOverlayDraft) -> Result<Self, ModelError> {
        if draft.content.is_empty() {
            return Err(ModelError::ValidationError {
                message: "Sticker content must not be empty".to_string(),
            });
        }
        Ok(Self {
            id,
            kind: draft.kind,
            content: draft.content,
            x: draft.x,
            y: draft.y,
            size: draft.size.max(0.0),
            rotation: draft.rotation,
            opacity: clamp_opacity(draft.opacity),
            range: draft.range.normalized(),
        })
    }

    fn apply_patch(&mut self, patch: StickerOverlayPatch) {
        if let Some(content) = patch.content.filter(|c| !c.is_empty()) {
            self.content = content;
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(size) = patch.size {
            self.size = size.max(0.0);
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = clamp_opacity(opacity);
        }
        self.range = patch_range(self.range, patch.start, patch.end);
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn range(&self) -> TimeRange {
        self.range
    }
}

fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        1.0
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

fn patch_range(current: TimeRange, start: Option<Seconds>, end: Option<Seconds>) -> TimeRange {
    TimeRange {
        start: start.unwrap_or(current.start),
        end: end.unwrap_or(current.end),
    }
    .normalized()
}

/// Ordered collection of one overlay kind.
#[derive(Debug, Clone)]
pub struct OverlayStore<T: Overlay> {
    items: Vec<T>,
    next_seq: u64,
}

/// Store of text overlays.
pub type TextOverlayStore = OverlayStore<TextOverlay>;

/// Store of sticker and symbol overlays.
pub type StickerOverlayStore = OverlayStore<StickerOverlay>;

impl<T: Overlay> Default for OverlayStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Overlay> OverlayStore<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_seq: 1,
        }
    }

    /// Validate and append a new overlay, returning its id.
    ///
    /// On validation failure the store is unchanged.
    pub fn add(&mut self, draft: T::Draft) -> Result<String, ModelError> {
        let id = format!("{}-{}", T::ID_PREFIX, self.next_seq);
        let overlay = T::from_draft(id.clone(), draft)?;
        self.next_seq += 1;
        self.items.push(overlay);
        Ok(id)
    }

    /// Apply a partial update to the overlay with `id`. Unknown ids are a
    /// no-op. Returns whether an overlay was updated.
    pub fn update(&mut self, id: &str, patch: T::Patch) -> bool {
        match self.items.iter_mut().find(|o| o.id() == id) {
            Some(overlay) => {
                overlay.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Remove the overlay with `id`. Unknown ids are a no-op.
    /// Returns whether an overlay was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|o| o.id() != id);
        self.items.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|o| o.id() == id)
    }

    /// Overlays active at `t`, in insertion order.
    ///
    /// The result is a snapshot of the store at call time.
    pub fn list_active_at(&self, t: Seconds) -> Vec<&T> {
        self.items.iter().filter(|o| o.is_active_at(t)).collect()
    }

    /// All overlays in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every overlay. Ids keep counting up so they are never reused.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

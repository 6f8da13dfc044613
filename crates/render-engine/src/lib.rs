//! Clipdeck Render Engine
//!
//! Draws text and sticker overlays onto a transparent surface stacked over
//! the video element, in sync with playback time.
//!
//! # Pipeline Architecture
//!
//! ```text
//! current time ──┐
//!                ├── list_active_at ──► compose_frame ──► DrawCommand list
//! overlay stores ┘                                              │
//!                                                               ▼
//! display box ──► OverlayCompositor::resize ──register──► DrawSurface
//!                 OverlayCompositor::tick ─────present──────────┘
//! ```

pub mod compositor;
pub mod redraw;

pub use compositor::*;
pub use redraw::*;

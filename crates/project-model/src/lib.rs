//! Clipdeck Project Model
//!
//! Defines the core data contracts for an editing session:
//! - **Time:** Clamped playback positions, inclusive time ranges, display formats
//! - **Overlays:** Text and sticker/symbol overlays with their stores
//! - **Scenes:** Named, colored timeline segments with split support
//! - **Layout:** Registration between the displayed video box and the overlay surface
//!
//! All overlay and scene ranges live in the same time coordinate space as
//! the loaded media's duration; there is no independent clock.

pub mod layout;
pub mod overlay;
pub mod scene;
pub mod time;

pub use layout::*;
pub use overlay::*;
pub use scene::*;
pub use time::*;

/// Errors raised by model operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid input: {message}")]
    ValidationError { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },
}

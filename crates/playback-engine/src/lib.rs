//! Clipdeck Playback Engine
//!
//! Owns the single source of truth for playback position and keeps an
//! external media element in step with it.
//!
//! # Architecture
//!
//! ```text
//!   user input ──► PlaybackController ──commands──► MediaElement
//!   (seek/play)         ▲    │                          │
//!                       │    │ current_time             │
//!        MediaEvent ────┘    ▼                          │
//!   (metadata/time/error)  TimelineMapper, compositor   │
//!                       ◄───────────────────────────────┘
//! ```
//!
//! The controller reacts to two interleaved inputs, user operations and
//! media lifecycle events, on one logical thread. A seek tolerance keeps
//! the two from driving each other in a loop.

pub mod controller;
pub mod media;
pub mod timeline;
pub mod upload;

pub use controller::*;
pub use media::*;
pub use timeline::*;
pub use upload::*;

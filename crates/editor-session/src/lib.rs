//! Clipdeck Editor Session
//!
//! One explicit object per editing session. It owns the playback
//! controller, the overlay and scene stores, the timeline gesture state,
//! the overlay compositor and the stock catalog, and turns outcomes into
//! user-facing notices.
//!
//! The session is single-threaded. The host calls into it from user input
//! handlers, media element callbacks, and its animation-frame callback.

pub mod notice;
pub mod session;

pub use notice::*;
pub use session::*;

//! Clipdeck Stock Library
//!
//! Searchable, paginated stock footage for the editor. Providers are
//! unreliable by assumption: every failure degrades to a static sample
//! set and is reported as a notice, never as a fault.
//!
//! # Providers
//!
//! - [`PexelsProvider`]: HTTP search against a Pexels-compatible API
//! - [`SampleProvider`]: a generated offline catalog, used when no API
//!   key is configured

pub mod catalog;
pub mod error;
pub mod pexels;
pub mod provider;
pub mod video;

pub use catalog::*;
pub use error::*;
pub use pexels::*;
pub use provider::*;
pub use video::*;

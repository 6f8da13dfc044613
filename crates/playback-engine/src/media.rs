//! The media collaborator: what the controller sends to the platform media
//! element and what it hears back.

use serde::{Deserialize, Serialize};

/// Where a loaded source came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceOrigin {
    /// A local file accepted by upload validation.
    Upload {
        file_name: String,
        mime_type: String,
        size_bytes: u64,
    },
    /// A clip picked from the stock footage catalog.
    Stock,
    /// The known-good source substituted after a failed load.
    Fallback,
}

/// An opaque handle to playable media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSource {
    /// URL the media element should load (object URL for uploads).
    pub url: String,
    /// Display title.
    pub title: String,
    pub origin: SourceOrigin,
}

impl MediaSource {
    pub fn stock(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            origin: SourceOrigin::Stock,
        }
    }

    /// Fallback source standing in for the source titled `title`.
    pub fn fallback(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            origin: SourceOrigin::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, SourceOrigin::Fallback)
    }
}

/// Lifecycle events emitted by the media element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaEvent {
    /// Metadata became available.
    MetadataReady {
        duration: f64,
        width: u32,
        height: u32,
    },

    /// Playback position advanced (or settled after a seek).
    TimeAdvanced { time: f64 },

    /// The source failed to fetch or decode.
    Error { reason: String },
}

/// Commands accepted by the platform media element.
///
/// Commands are fire-and-forget; failures come back as
/// [`MediaEvent::Error`].
pub trait MediaElement {
    /// Start loading a new source.
    fn load(&mut self, source: &MediaSource);

    /// Release the current source.
    fn unload(&mut self);

    fn play(&mut self);

    fn pause(&mut self);

    fn set_current_time(&mut self, time: f64);

    fn set_playback_rate(&mut self, rate: f64);
}

impl<M: MediaElement + ?Sized> MediaElement for Box<M> {
    fn load(&mut self, source: &MediaSource) {
        (**self).load(source)
    }

    fn unload(&mut self) {
        (**self).unload()
    }

    fn play(&mut self) {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn set_current_time(&mut self, time: f64) {
        (**self).set_current_time(time)
    }

    fn set_playback_rate(&mut self, rate: f64) {
        (**self).set_playback_rate(rate)
    }
}

//! Playback controller: current time, duration, play/pause, and speed.

use clipdeck_common::clock::MediaDrift;
use clipdeck_common::config::PlaybackDefaults;
use clipdeck_common::error::{ClipdeckError, ClipdeckResult};
use clipdeck_project_model::time::{clamp_time, sanitize_duration, Seconds};

use crate::media::{MediaElement, MediaEvent, MediaSource};

/// How many off-target time reports are dropped after a commanded seek
/// before the element's position is trusted again.
const MAX_STALE_REPORTS: u32 = 4;

/// Progress (seconds at 1x) a playing element may make between a seek
/// and its next time report without that report counting as stale.
const SEEK_SETTLE_WINDOW_SECS: f64 = 1.0;

/// Transport sub-state of a loaded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Paused,
    Playing,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No source loaded.
    Empty,
    /// A source is loaded; entered paused at time zero.
    Loaded(Transport),
}

/// What handling a media event did to controller state.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaOutcome {
    /// State was updated from the event.
    Applied,
    /// The event was dropped (no source, or a stale time report).
    Ignored,
    /// The source failed and the fallback source was loaded in its place.
    FellBack { failed_title: String, reason: String },
}

#[derive(Debug, Clone, Copy)]
struct PendingSeek {
    target: Seconds,
    /// Element position when the seek was commanded.
    from: Seconds,
    stale_reports: u32,
}

/// Single owner of playback state for one editing session.
pub struct PlaybackController<M: MediaElement> {
    media: M,
    settings: PlaybackDefaults,
    source: Option<MediaSource>,
    duration: Seconds,
    current_time: Seconds,
    playing: bool,
    speed: f64,
    frame_size: Option<(u32, u32)>,
    /// Last position the element reported or was commanded to.
    media_position: Seconds,
    pending_seek: Option<PendingSeek>,
}

impl<M: MediaElement> PlaybackController<M> {
    pub fn new(media: M, settings: PlaybackDefaults) -> Self {
        Self {
            media,
            settings,
            source: None,
            duration: 0.0,
            current_time: 0.0,
            playing: false,
            speed: 1.0,
            frame_size: None,
            media_position: 0.0,
            pending_seek: None,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        match (&self.source, self.playing) {
            (None, _) => PlaybackPhase::Empty,
            (Some(_), true) => PlaybackPhase::Loaded(Transport::Playing),
            (Some(_), false) => PlaybackPhase::Loaded(Transport::Paused),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    pub fn duration(&self) -> Seconds {
        self.duration
    }

    pub fn current_time(&self) -> Seconds {
        self.current_time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Intrinsic frame size once metadata is known.
    pub fn frame_size(&self) -> Option<(u32, u32)> {
        self.frame_size
    }

    /// Speeds offered to the user.
    pub fn speed_presets(&self) -> &[f64] {
        &self.settings.speed_presets
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Load a new source. Resets time and duration; metadata arrives later
    /// through [`MediaEvent::MetadataReady`].
    pub fn load_source(&mut self, source: MediaSource) {
        tracing::info!(title = %source.title, url = %source.url, "Loading media source");
        self.media.load(&source);
        self.media.pause();
        self.media.set_playback_rate(self.speed);
        self.source = Some(source);
        self.reset_position();
    }

    /// Release the current source and return to `Empty`.
    pub fn unload(&mut self) {
        if let Some(source) = self.source.take() {
            tracing::info!(title = %source.title, "Unloading media source");
            self.media.pause();
            self.media.unload();
        }
        self.reset_position();
    }

    fn reset_position(&mut self) {
        self.duration = 0.0;
        self.current_time = 0.0;
        self.playing = false;
        self.frame_size = None;
        self.media_position = 0.0;
        self.pending_seek = None;
    }

    /// Start playback. Ignored while no source is loaded.
    pub fn play(&mut self) -> bool {
        if !self.is_loaded() {
            tracing::debug!("Play ignored: no source loaded");
            return false;
        }
        self.playing = true;
        self.media.play();
        tracing::debug!(time = self.current_time, speed = self.speed, "Playback started");
        true
    }

    /// Pause playback. Ignored while no source is loaded.
    pub fn pause(&mut self) -> bool {
        if !self.is_loaded() {
            return false;
        }
        self.playing = false;
        self.media.pause();
        tracing::debug!(time = self.current_time, "Playback paused");
        true
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Move the playhead to `t`, clamped to `[0, duration]`.
    ///
    /// The element is only re-synced when its position is more than the
    /// seek tolerance away from the new time. Returns the clamped time.
    pub fn seek(&mut self, t: Seconds) -> Seconds {
        self.current_time = clamp_time(t, self.duration);
        if self.is_loaded()
            && MediaDrift::new(self.current_time, self.media_position)
                .exceeds(self.settings.seek_tolerance_secs)
        {
            let from = self.media_position;
            self.media.set_current_time(self.current_time);
            self.media_position = self.current_time;
            self.pending_seek = Some(PendingSeek {
                target: self.current_time,
                from,
                stale_reports: 0,
            });
            tracing::debug!(time = self.current_time, "Seek synced to media element");
        }
        self.current_time
    }

    /// Seek relative to the current time.
    pub fn skip(&mut self, delta: Seconds) -> Seconds {
        self.seek(self.current_time + delta)
    }

    pub fn skip_forward(&mut self) -> Seconds {
        self.skip(self.settings.skip_short_secs)
    }

    pub fn skip_back(&mut self) -> Seconds {
        self.skip(-self.settings.skip_short_secs)
    }

    pub fn jump_forward(&mut self) -> Seconds {
        self.skip(self.settings.skip_long_secs)
    }

    pub fn jump_back(&mut self) -> Seconds {
        self.skip(-self.settings.skip_long_secs)
    }

    /// Set the playback rate. Any value is stored as given; only the
    /// presets are offered to the user.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
        self.media.set_playback_rate(speed);
        tracing::debug!(speed, "Playback speed changed");
    }

    /// React to an event from the media element.
    ///
    /// A load error substitutes the fallback source. Fails only when the
    /// fallback itself cannot load, in which case the controller stays
    /// loaded on the fallback, paused at zero.
    pub fn handle_event(&mut self, event: MediaEvent) -> ClipdeckResult<MediaOutcome> {
        if !self.is_loaded() {
            tracing::debug!(?event, "Media event ignored: no source loaded");
            return Ok(MediaOutcome::Ignored);
        }

        match event {
            MediaEvent::MetadataReady {
                duration,
                width,
                height,
            } => {
                self.duration = sanitize_duration(duration);
                self.frame_size = Some((width, height));
                self.current_time = clamp_time(self.current_time, self.duration);
                tracing::info!(duration = self.duration, width, height, "Media metadata ready");
                Ok(MediaOutcome::Applied)
            }
            MediaEvent::TimeAdvanced { time } => Ok(self.apply_time_report(time)),
            MediaEvent::Error { reason } => self.recover_from_error(reason),
        }
    }

    fn apply_time_report(&mut self, reported: Seconds) -> MediaOutcome {
        if let Some(mut pending) = self.pending_seek {
            if !self.report_matches_seek(&pending, reported) {
                pending.stale_reports += 1;
                if pending.stale_reports <= MAX_STALE_REPORTS {
                    tracing::debug!(
                        seek_target = pending.target,
                        reported,
                        "Dropping stale time report after seek"
                    );
                    self.pending_seek = Some(pending);
                    return MediaOutcome::Ignored;
                }
                tracing::warn!(
                    seek_target = pending.target,
                    reported,
                    "Media element never reached seek target; following its position"
                );
            }
            self.pending_seek = None;
        }

        self.media_position = reported;
        self.current_time = clamp_time(reported, self.duration);
        MediaOutcome::Applied
    }

    /// A report reached the seek target when it is within tolerance of it,
    /// or, while playing, slightly past it. After a backward seek a report
    /// past the target only counts when it is clearly behind the position
    /// the element was sought away from.
    fn report_matches_seek(&self, pending: &PendingSeek, reported: Seconds) -> bool {
        let tolerance = self.settings.seek_tolerance_secs;
        let target = pending.target;
        if !MediaDrift::new(target, reported).exceeds(tolerance) {
            return true;
        }
        if !self.playing {
            return false;
        }
        let progress = SEEK_SETTLE_WINDOW_SECS * self.speed.abs().max(1.0);
        let within_window = reported > target && reported <= target + tolerance + progress;
        let backward = target < pending.from;
        within_window && (!backward || reported < pending.from - tolerance)
    }

    fn recover_from_error(&mut self, reason: String) -> ClipdeckResult<MediaOutcome> {
        let Some(failed) = self.source.clone() else {
            return Ok(MediaOutcome::Ignored);
        };

        if failed.is_fallback() {
            tracing::warn!(%reason, url = %failed.url, "Fallback source failed to load");
            self.pause();
            self.reset_position();
            return Err(ClipdeckError::source_load(format!(
                "Fallback video for \"{}\" could not be loaded: {reason}",
                failed.title
            )));
        }

        tracing::warn!(
            %reason,
            title = %failed.title,
            url = %failed.url,
            "Media source failed to load; substituting fallback"
        );
        let fallback = MediaSource::fallback(&self.settings.fallback_source_url, &failed.title);
        self.load_source(fallback);
        Ok(MediaOutcome::FellBack {
            failed_title: failed.title,
            reason,
        })
    }
}

//! The overlay redraw loop and the drawing-surface seam.
//!
//! The host drives [`OverlayCompositor::tick`] from its animation-frame
//! callback. The compositor only draws while a source is loaded
//! ([`start`](OverlayCompositor::start) / [`stop`](OverlayCompositor::stop))
//! and after the surface has been registered against the displayed
//! video box.

use clipdeck_common::clock::RateController;
use clipdeck_common::config::{RedrawMode, RenderDefaults};
use clipdeck_project_model::layout::{DisplayBox, Size};
use clipdeck_project_model::overlay::{StickerOverlayStore, TextOverlayStore};
use clipdeck_project_model::time::Seconds;

use crate::compositor::{compose_frame, FrameComposition};

/// A transparent drawing layer stacked over the video element.
pub trait DrawSurface {
    /// Position and size the layer to cover `display` exactly. The backing
    /// resolution equals the box size.
    fn register(&mut self, display: DisplayBox);

    /// Execute one frame's draw commands.
    fn present(&mut self, frame: &FrameComposition);
}

impl<S: DrawSurface + ?Sized> DrawSurface for Box<S> {
    fn register(&mut self, display: DisplayBox) {
        (**self).register(display)
    }

    fn present(&mut self, frame: &FrameComposition) {
        (**self).present(frame)
    }
}

/// Surface that keeps every registration and frame it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub registrations: Vec<DisplayBox>,
    pub frames: Vec<FrameComposition>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&FrameComposition> {
        self.frames.last()
    }
}

impl DrawSurface for RecordingSurface {
    fn register(&mut self, display: DisplayBox) {
        self.registrations.push(display);
    }

    fn present(&mut self, frame: &FrameComposition) {
        self.frames.push(frame.clone());
    }
}

/// Redraw loop state for one session's overlay surface.
#[derive(Debug, Clone)]
pub struct OverlayCompositor {
    style: RenderDefaults,
    running: bool,
    display: Option<DisplayBox>,
    dirty: bool,
    last_time: Option<Seconds>,
    rate: RateController,
    frames_presented: u64,
}

impl OverlayCompositor {
    pub fn new(style: RenderDefaults) -> Self {
        let rate = RateController::new(style.max_fps);
        Self {
            style,
            running: false,
            display: None,
            dirty: true,
            last_time: None,
            rate,
            frames_presented: 0,
        }
    }

    pub fn style(&self) -> &RenderDefaults {
        &self.style
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn display_box(&self) -> Option<DisplayBox> {
        self.display
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Begin drawing for a newly loaded source.
    pub fn start(&mut self) {
        if !self.running {
            tracing::debug!(mode = ?self.style.redraw, "Overlay redraw loop started");
        }
        self.running = true;
        self.last_time = None;
        self.dirty = true;
        self.rate.reset();
    }

    /// Stop drawing. Ticks are no-ops until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(frames = self.frames_presented, "Overlay redraw loop stopped");
        }
        self.running = false;
        self.last_time = None;
    }

    /// Re-register the surface after the displayed video box changed.
    pub fn resize<S: DrawSurface + ?Sized>(&mut self, display_box: DisplayBox, surface: &mut S) {
        if self.display == Some(display_box) {
            return;
        }
        tracing::debug!(
            x = display_box.x,
            y = display_box.y,
            width = display_box.width,
            height = display_box.height,
            "Overlay surface registered"
        );
        surface.register(display_box);
        self.display = Some(display_box);
        self.dirty = true;
    }

    /// Mark the surface stale (an overlay collection changed).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Map a point in container coordinates onto surface pixels.
    pub fn pointer_to_surface(&self, px: f64, py: f64) -> Option<(f64, f64)> {
        let display = self.display?;
        display.to_surface(px, py, display.size())
    }

    /// One animation-frame callback. Returns whether a frame was presented.
    pub fn tick<S: DrawSurface + ?Sized>(
        &mut self,
        now_secs: f64,
        current_time: Seconds,
        texts: &TextOverlayStore,
        stickers: &StickerOverlayStore,
        surface: &mut S,
    ) -> bool {
        if !self.running {
            return false;
        }
        let Some(display) = self.display else {
            return false;
        };

        if self.style.redraw == RedrawMode::OnChange
            && !self.dirty
            && self.last_time == Some(current_time)
        {
            return false;
        }
        if !self.rate.should_tick(now_secs) {
            return false;
        }

        let frame = compose_frame(
            current_time,
            Size::new(display.width, display.height),
            texts,
            stickers,
            &self.style,
        );
        tracing::trace!(
            time = current_time,
            overlays = frame.overlay_count(),
            "Overlay frame presented"
        );
        surface.present(&frame);

        self.dirty = false;
        self.last_time = Some(current_time);
        self.frames_presented += 1;
        true
    }
}

//! The editing session: every operation the editor UI can invoke.

use clipdeck_common::config::AppConfig;
use clipdeck_common::error::{ClipdeckError, ClipdeckResult};
use clipdeck_playback_engine::{
    position_to_time, ruler_markers, scene_blocks, text_overlay_blocks, time_to_percentage,
    validate_upload, FileCandidate, MediaElement, MediaEvent, MediaOutcome, MediaSource,
    PlaybackController, PlaybackPhase, RulerMarker, ScrubGesture, TrackBlock,
};
use clipdeck_project_model::layout::{DisplayBox, Size};
use clipdeck_project_model::overlay::{
    StickerKind, StickerOverlay, StickerOverlayDraft, StickerOverlayPatch, StickerOverlayStore,
    TextOverlay, TextOverlayDraft, TextOverlayPatch, TextOverlayStore,
};
use clipdeck_project_model::scene::{Scene, SceneStore};
use clipdeck_project_model::time::{format_clock, format_precise, Seconds, TimeRange};
use clipdeck_project_model::ModelError;
use clipdeck_render_engine::{DrawSurface, OverlayCompositor};
use clipdeck_stock_library::{CatalogUpdate, Category, StockCatalog};

use crate::notice::{Notice, NoticeQueue};

/// Default sticker placement box: x in `[100, 300)`, y in `[75, 225)`.
const STICKER_ORIGIN: (u64, u64) = (100, 75);
const STICKER_SPREAD: (u64, u64) = (200, 150);
const STICKER_STEP: (u64, u64) = (37, 53);

/// Convert a model error into the session taxonomy.
pub fn model_error(err: ModelError) -> ClipdeckError {
    match err {
        ModelError::ValidationError { message } => ClipdeckError::validation(message),
        ModelError::NotFound { message } => ClipdeckError::not_found(message),
    }
}

/// State and operations for one editing session.
pub struct EditorSession<M: MediaElement> {
    config: AppConfig,
    playback: PlaybackController<M>,
    texts: TextOverlayStore,
    stickers: StickerOverlayStore,
    scenes: SceneStore,
    scrub: ScrubGesture,
    compositor: OverlayCompositor,
    stock: StockCatalog,
    notices: NoticeQueue,
    container: Option<Size>,
    stickers_placed: u64,
    awaiting_fallback: bool,
}

impl<M: MediaElement> EditorSession<M> {
    /// Session with the stock provider chosen from configuration.
    /// Session configured from the user's saved config file, initializing
    /// logging from its `logging` section.
    pub fn from_saved_config(media: M) -> Self {
        let config = AppConfig::load();
        clipdeck_common::logging::init_logging(&config.logging);
        Self::new(media, config)
    }

    pub fn new(media: M, config: AppConfig) -> Self {
        let stock = StockCatalog::from_config(&config.stock);
        Self::with_stock(media, config, stock)
    }

    pub fn with_stock(media: M, config: AppConfig, stock: StockCatalog) -> Self {
        let playback = PlaybackController::new(media, config.playback.clone());
        let compositor = OverlayCompositor::new(config.render.clone());
        Self {
            config,
            playback,
            texts: TextOverlayStore::new(),
            stickers: StickerOverlayStore::new(),
            scenes: SceneStore::new(),
            scrub: ScrubGesture::new(),
            compositor,
            stock,
            notices: NoticeQueue::new(),
            container: None,
            stickers_placed: 0,
            awaiting_fallback: false,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn playback(&self) -> &PlaybackController<M> {
        &self.playback
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.playback.phase()
    }

    pub fn current_time(&self) -> Seconds {
        self.playback.current_time()
    }

    pub fn duration(&self) -> Seconds {
        self.playback.duration()
    }

    pub fn texts(&self) -> &TextOverlayStore {
        &self.texts
    }

    pub fn stickers(&self) -> &StickerOverlayStore {
        &self.stickers
    }

    pub fn scenes(&self) -> &SceneStore {
        &self.scenes
    }

    pub fn compositor(&self) -> &OverlayCompositor {
        &self.compositor
    }

    pub fn stock(&self) -> &StockCatalog {
        &self.stock
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Take every pending notice, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    // ── Sources ──────────────────────────────────────────────────────────

    /// Validate a picked or dropped file and load it.
    pub fn upload_file(&mut self, file: FileCandidate, object_url: impl Into<String>) -> ClipdeckResult<()> {
        if let Err(e) = validate_upload(&file, self.config.playback.max_upload_bytes) {
            self.notices.error(e.user_message());
            return Err(e);
        }
        self.load(MediaSource::from_upload(file, object_url));
        self.notices.success("Video uploaded successfully!");
        Ok(())
    }

    /// Load a source by URL.
    pub fn load_url(&mut self, url: impl Into<String>, title: impl Into<String>) {
        let source = MediaSource::stock(url, title);
        let title = source.title.clone();
        self.load(source);
        self.notices.success(format!("\"{title}\" loaded successfully!"));
    }

    /// Load an entry from the stock panel.
    pub fn select_stock_video(&mut self, id: &str) -> ClipdeckResult<()> {
        let Some(video) = self.stock.find(id) else {
            let err = ClipdeckError::not_found(format!("Stock video {id} is not listed"));
            self.notices.error("Failed to load video. Please try again.");
            return Err(err);
        };
        self.load_url(video.video_url, video.title);
        Ok(())
    }

    /// Release the source and stop drawing overlays.
    pub fn unload(&mut self) {
        self.playback.unload();
        self.compositor.stop();
        self.scrub.release();
        self.awaiting_fallback = false;
    }

    fn load(&mut self, source: MediaSource) {
        self.playback.load_source(source);
        self.compositor.start();
        self.scrub.release();
        self.awaiting_fallback = false;
    }

    /// Feed a media element callback into the session.
    pub fn handle_media_event(&mut self, event: MediaEvent) -> ClipdeckResult<MediaOutcome> {
        let metadata = matches!(event, MediaEvent::MetadataReady { .. });
        let outcome = match self.playback.handle_event(event) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.awaiting_fallback = false;
                self.notices.error(e.user_message());
                return Err(e);
            }
        };

        match &outcome {
            MediaOutcome::FellBack { failed_title, .. } => {
                self.notices.warning(format!(
                    "Failed to load \"{failed_title}\". Trying an alternative video..."
                ));
                self.awaiting_fallback = true;
                self.compositor.start();
            }
            MediaOutcome::Applied if metadata => {
                if self.awaiting_fallback {
                    self.awaiting_fallback = false;
                    let title = self
                        .playback
                        .source()
                        .map(|s| s.title.clone())
                        .unwrap_or_default();
                    self.notices
                        .success(format!("Alternative video loaded for \"{title}\""));
                }
                self.compositor.invalidate();
            }
            _ => {}
        }
        Ok(outcome)
    }

    // ── Transport ────────────────────────────────────────────────────────

    pub fn play(&mut self) -> bool {
        self.playback.play()
    }

    pub fn pause(&mut self) -> bool {
        self.playback.pause()
    }

    pub fn toggle_play(&mut self) -> bool {
        self.playback.toggle_play()
    }

    pub fn seek(&mut self, t: Seconds) -> Seconds {
        self.playback.seek(t)
    }

    pub fn skip_forward(&mut self) -> Seconds {
        self.playback.skip_forward()
    }

    pub fn skip_back(&mut self) -> Seconds {
        self.playback.skip_back()
    }

    pub fn jump_forward(&mut self) -> Seconds {
        self.playback.jump_forward()
    }

    pub fn jump_back(&mut self) -> Seconds {
        self.playback.jump_back()
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.playback.set_speed(speed);
    }

    /// `MM:SS` read-out of current time and duration.
    pub fn transport_label(&self) -> (String, String) {
        (
            format_clock(self.playback.current_time()),
            format_clock(self.playback.duration()),
        )
    }

    // ── Text overlays ────────────────────────────────────────────────────

    /// Add a caption at the current time using the editor defaults.
    pub fn add_text(&mut self, text: &str) -> ClipdeckResult<String> {
        let defaults = &self.config.editor;
        let draft = TextOverlayDraft {
            text: text.to_string(),
            x: defaults.text_x,
            y: defaults.text_y,
            font_size: defaults.text_font_size,
            color: defaults.text_color.clone(),
            range: TimeRange::starting_at(self.playback.current_time(), defaults.text_span_secs),
        };
        self.add_text_overlay(draft)
    }

    /// Add a caption with explicit fields.
    pub fn add_text_overlay(&mut self, draft: TextOverlayDraft) -> ClipdeckResult<String> {
        match self.texts.add(draft) {
            Ok(id) => {
                tracing::info!(%id, "Text overlay added");
                self.compositor.invalidate();
                self.notices.success("Text overlay added!");
                Ok(id)
            }
            Err(e) => {
                let err = model_error(e);
                self.notices.error(err.user_message());
                Err(err)
            }
        }
    }

    pub fn update_text(&mut self, id: &str, patch: TextOverlayPatch) -> bool {
        let updated = self.texts.update(id, patch);
        if updated {
            self.compositor.invalidate();
        }
        updated
    }

    pub fn remove_text(&mut self, id: &str) -> bool {
        let removed = self.texts.remove(id);
        if removed {
            self.compositor.invalidate();
            self.notices.success("Text overlay removed");
        }
        removed
    }

    pub fn active_texts(&self) -> Vec<&TextOverlay> {
        self.texts.list_active_at(self.playback.current_time())
    }

    // ── Stickers and symbols ─────────────────────────────────────────────

    /// Add a sticker or symbol at the current time with a staggered
    /// default position.
    pub fn add_sticker(&mut self, content: &str, kind: StickerKind) -> ClipdeckResult<String> {
        let defaults = &self.config.editor;
        let (x, y) = staggered_position(self.stickers_placed);
        let size = match kind {
            StickerKind::Sticker => defaults.sticker_size,
            StickerKind::Symbol => defaults.symbol_size,
        };
        let draft = StickerOverlayDraft {
            kind,
            content: content.to_string(),
            x,
            y,
            size,
            rotation: 0.0,
            opacity: 1.0,
            range: TimeRange::starting_at(self.playback.current_time(), defaults.sticker_span_secs),
        };

        match self.stickers.add(draft) {
            Ok(id) => {
                self.stickers_placed += 1;
                tracing::info!(%id, ?kind, "Sticker added");
                self.compositor.invalidate();
                self.notices.success(match kind {
                    StickerKind::Sticker => "Sticker added!",
                    StickerKind::Symbol => "Symbol added!",
                });
                Ok(id)
            }
            Err(e) => {
                let err = model_error(e);
                self.notices.error(err.user_message());
                Err(err)
            }
        }
    }

    pub fn update_sticker(&mut self, id: &str, patch: StickerOverlayPatch) -> bool {
        let updated = self.stickers.update(id, patch);
        if updated {
            self.compositor.invalidate();
        }
        updated
    }

    pub fn remove_sticker(&mut self, id: &str) -> bool {
        let removed = self.stickers.remove(id);
        if removed {
            self.compositor.invalidate();
            self.notices.success("Sticker removed!");
        }
        removed
    }

    pub fn active_stickers(&self) -> Vec<&StickerOverlay> {
        self.stickers.list_active_at(self.playback.current_time())
    }

    // ── Scenes ───────────────────────────────────────────────────────────

    /// Add the next default scene at the current time.
    pub fn add_scene(&mut self) -> String {
        let draft = self.scenes.next_default_draft(
            self.playback.current_time(),
            self.config.editor.scene_span_secs,
            self.playback.duration(),
        );
        let name = draft.name.clone();
        let id = self.scenes.add(draft);
        tracing::info!(%id, %name, "Scene added");
        self.notices.success(format!("Scene \"{name}\" added"));
        id
    }

    /// Split the scene under the playhead.
    pub fn split_scene(&mut self) -> ClipdeckResult<String> {
        let t = self.playback.current_time();
        match self.scenes.split_at(t) {
            Ok(id) => {
                tracing::info!(%id, time = t, "Scene split");
                self.notices.success("Scene split successfully");
                Ok(id)
            }
            Err(e) => {
                let err = model_error(e);
                tracing::debug!(time = t, "No scene to split");
                self.notices.error(err.user_message());
                Err(err)
            }
        }
    }

    pub fn remove_scene(&mut self, id: &str) -> bool {
        self.scenes.remove(id)
    }

    pub fn scene_at_playhead(&self) -> Option<&Scene> {
        self.scenes.scene_at(self.playback.current_time())
    }

    // ── Timeline ─────────────────────────────────────────────────────────

    /// Pointer pressed on the timeline track at `px` of `track_width_px`.
    pub fn timeline_press(&mut self, px: f64, track_width_px: f64) -> Option<Seconds> {
        let target = self
            .scrub
            .press(px, track_width_px, self.playback.duration())?;
        Some(self.playback.seek(target))
    }

    /// Pointer moved; seeks only while a drag is in progress.
    pub fn timeline_drag(&mut self, px: f64, track_width_px: f64) -> Option<Seconds> {
        let target = self
            .scrub
            .drag(px, track_width_px, self.playback.duration())?;
        Some(self.playback.seek(target))
    }

    pub fn timeline_release(&mut self) {
        self.scrub.release();
    }

    /// Time under `px` without seeking (hover read-out).
    pub fn timeline_time_at(&self, px: f64, track_width_px: f64) -> Seconds {
        position_to_time(px, track_width_px, self.playback.duration())
    }

    pub fn playhead_percentage(&self) -> f64 {
        time_to_percentage(self.playback.current_time(), self.playback.duration())
    }

    /// `MM:SS.cc` playhead read-out.
    pub fn playhead_label(&self) -> String {
        format_precise(self.playback.current_time())
    }

    pub fn ruler(&self) -> Vec<RulerMarker> {
        ruler_markers(self.playback.duration())
    }

    pub fn scene_track(&self) -> Vec<TrackBlock> {
        scene_blocks(&self.scenes, self.playback.duration())
    }

    pub fn text_track(&self) -> Vec<TrackBlock> {
        text_overlay_blocks(&self.texts, self.playback.duration())
    }

    // ── Overlay surface ──────────────────────────────────────────────────

    /// The video container was laid out at `container`. The overlay
    /// surface is re-registered on the next tick.
    pub fn resize_display(&mut self, container: Size) {
        self.container = Some(container);
        self.compositor.invalidate();
    }

    /// On-screen box of the video frame inside the container.
    pub fn display_box(&self) -> Option<DisplayBox> {
        let container = self.container?;
        let media = self
            .playback
            .frame_size()
            .map(|(w, h)| Size::new(w as f64, h as f64))
            .unwrap_or(Size::new(0.0, 0.0));
        Some(DisplayBox::contain(container, media))
    }

    /// Map a pointer position in the container onto surface pixels.
    pub fn pointer_to_surface(&self, px: f64, py: f64) -> Option<(f64, f64)> {
        self.compositor.pointer_to_surface(px, py)
    }

    /// Animation-frame callback. Returns whether a frame was drawn.
    pub fn tick<S: DrawSurface + ?Sized>(&mut self, now_secs: f64, surface: &mut S) -> bool {
        if let Some(display) = self.display_box() {
            self.compositor.resize(display, surface);
        }
        self.compositor.tick(
            now_secs,
            self.playback.current_time(),
            &self.texts,
            &self.stickers,
            surface,
        )
    }

    // ── Stock footage ────────────────────────────────────────────────────

    /// Start a stock search, superseding any search still running.
    ///
    /// The request runs on the ambient Tokio runtime and is collected with
    /// [`settle_stock`](Self::settle_stock). Called outside a runtime, the
    /// search fails at once with an error notice and the sample videos stay
    /// listed. Returns whether a request was started.
    pub fn search_stock(&mut self, query: impl Into<String>, category: Category) -> bool {
        let started = self.stock.search(query, category);
        if !started {
            let provider = self.stock.provider_name().to_string();
            self.notices
                .error(format!("Failed to fetch from {provider}, showing sample videos"));
        }
        started
    }

    /// Request the next stock page (infinite scroll).
    pub fn load_more_stock(&mut self) -> bool {
        self.stock.load_more()
    }

    /// Wait for the outstanding stock request and report it.
    pub async fn settle_stock(&mut self) -> CatalogUpdate {
        let update = self.stock.settle().await;
        let provider = self.stock.provider_name().to_string();
        match &update {
            CatalogUpdate::Replaced { count: n } | CatalogUpdate::Appended { added: n } if *n > 0 => {
                self.notices
                    .success(format!("Loaded {n} new videos from {provider}!"));
            }
            CatalogUpdate::Failed { .. } => {
                self.notices
                    .error(format!("Failed to fetch from {provider}, showing sample videos"));
            }
            _ => {}
        }
        update
    }

    // ── Deferred features ────────────────────────────────────────────────

    pub fn export(&mut self) -> ClipdeckResult<()> {
        self.deferred("Export feature coming soon!")
    }

    pub fn trim(&mut self) -> ClipdeckResult<()> {
        self.deferred("Professional trim feature coming soon!")
    }

    fn deferred(&mut self, message: &str) -> ClipdeckResult<()> {
        self.notices.info(message);
        Err(ClipdeckError::unsupported(message))
    }
}

/// Deterministic spread of default sticker positions over the placement box.
fn staggered_position(n: u64) -> (f64, f64) {
    let x = STICKER_ORIGIN.0 + (n * STICKER_STEP.0) % STICKER_SPREAD.0;
    let y = STICKER_ORIGIN.1 + (n * STICKER_STEP.1) % STICKER_SPREAD.1;
    (x as f64, y as f64)
}

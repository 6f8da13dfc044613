//! End-to-end editing scenarios against a scripted media element.

use std::sync::Arc;

use clipdeck_common::config::{AppConfig, RedrawMode};
use clipdeck_common::error::ClipdeckError;
use clipdeck_editor_session::{EditorSession, NoticeLevel};
use clipdeck_playback_engine::{
    FileCandidate, MediaElement, MediaEvent, MediaOutcome, MediaSource, PlaybackPhase, Transport,
};
use clipdeck_project_model::layout::Size;
use clipdeck_project_model::overlay::{StickerKind, TextOverlayPatch};
use clipdeck_project_model::scene::SPLIT_SUFFIX;
use clipdeck_project_model::time::TimeRange;
use clipdeck_render_engine::{DrawCommand, RecordingSurface};
use clipdeck_stock_library::{
    CatalogUpdate, Category, SampleProvider, SearchRequest, StockCatalog, StockError,
    StockPage, StockProvider, StockResult,
};

#[derive(Debug, Default)]
struct ScriptedMedia {
    loaded: Vec<String>,
    seeks: Vec<f64>,
    playing: bool,
    rate: f64,
}

impl MediaElement for ScriptedMedia {
    fn load(&mut self, source: &MediaSource) {
        self.loaded.push(source.url.clone());
    }

    fn unload(&mut self) {}

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_current_time(&mut self, time: f64) {
        self.seeks.push(time);
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}

struct OfflineProvider;

impl StockProvider for OfflineProvider {
    fn search(&self, _request: &SearchRequest) -> StockResult<StockPage> {
        Err(StockError::Http {
            message: "connection refused".to_string(),
        })
    }

    fn page_size(&self) -> usize {
        15
    }

    fn name(&self) -> &str {
        "Pexels"
    }
}

fn session_with(stock: StockCatalog) -> EditorSession<ScriptedMedia> {
    EditorSession::with_stock(ScriptedMedia::default(), AppConfig::default(), stock)
}

fn session() -> EditorSession<ScriptedMedia> {
    session_with(StockCatalog::new(Arc::new(SampleProvider::new())))
}

fn loaded_session(duration: f64) -> EditorSession<ScriptedMedia> {
    let mut s = session();
    s.load_url("https://media.example/clip.mp4", "Clip");
    s.handle_media_event(MediaEvent::MetadataReady {
        duration,
        width: 1280,
        height: 720,
    })
    .unwrap();
    s.drain_notices();
    s
}

#[test]
fn test_add_scene_then_split() {
    let mut s = loaded_session(30.0);
    s.add_scene();
    let first = s.scenes().iter().next().unwrap().clone();
    assert_eq!(first.range, TimeRange::new(0.0, 10.0));
    assert_eq!(first.name, "Scene 1");

    s.seek(4.0);
    let split_id = s.split_scene().unwrap();

    let scenes: Vec<_> = s.scenes().iter().cloned().collect();
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].range, TimeRange::new(0.0, 4.0));
    assert_eq!(scenes[1].id, split_id);
    assert_eq!(scenes[1].range, TimeRange::new(4.0, 10.0));
    assert_eq!(scenes[1].name, format!("Scene 1{SPLIT_SUFFIX}"));
    assert_eq!(scenes[1].color, scenes[0].color);
    assert_eq!(
        s.scenes().covered_range(),
        Some(TimeRange::new(0.0, 10.0))
    );

    let notices = s.drain_notices();
    assert_eq!(notices.last().unwrap().message, "Scene split successfully");
}

#[test]
fn test_scene_is_clamped_to_duration() {
    let mut s = loaded_session(30.0);
    s.seek(25.0);
    s.add_scene();
    let scene = s.scenes().iter().next().unwrap();
    assert_eq!(scene.range, TimeRange::new(25.0, 30.0));
}

#[test]
fn test_split_without_scene_is_reported_and_changes_nothing() {
    let mut s = loaded_session(30.0);
    s.add_scene();
    s.seek(20.0);
    s.drain_notices();

    let before: Vec<_> = s.scenes().iter().cloned().collect();
    let err = s.split_scene().unwrap_err();
    assert!(matches!(err, ClipdeckError::NotFound { .. }));
    let after: Vec<_> = s.scenes().iter().cloned().collect();
    assert_eq!(before, after);

    let notices = s.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "No scene to split at current position");
}

#[test]
fn test_text_overlay_window() {
    let mut s = loaded_session(30.0);
    s.seek(2.0);
    let id = s.add_text("Hello").unwrap();
    let overlay = s.texts().get(&id).unwrap();
    assert_eq!(overlay.range, TimeRange::new(2.0, 7.0));
    assert_eq!((overlay.x, overlay.y, overlay.font_size), (50.0, 50.0, 24.0));

    s.seek(5.0);
    assert_eq!(s.active_texts().len(), 1);
    s.seek(8.0);
    assert!(s.active_texts().is_empty());
}

#[test]
fn test_empty_text_is_rejected_without_state_change() {
    let mut s = loaded_session(30.0);
    let err = s.add_text("   ").unwrap_err();
    assert!(matches!(err, ClipdeckError::Validation { .. }));
    assert!(s.texts().is_empty());
    assert_eq!(s.drain_notices()[0].level, NoticeLevel::Error);
}

#[test]
fn test_unknown_ids_are_noops() {
    let mut s = loaded_session(30.0);
    s.add_text("Keep").unwrap();
    let before: Vec<_> = s.texts().iter().cloned().collect();
    assert!(!s.remove_text("overlay-999"));
    assert!(!s.update_text("overlay-999", TextOverlayPatch::default()));
    assert!(!s.remove_sticker("sticker-1"));
    assert!(!s.remove_scene("scene-1"));
    let after: Vec<_> = s.texts().iter().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn test_stickers_and_symbols_use_kind_sizes() {
    let mut s = loaded_session(30.0);
    let sticker = s.add_sticker("🔥", StickerKind::Sticker).unwrap();
    let symbol = s.add_sticker("★", StickerKind::Symbol).unwrap();

    let sticker = s.stickers().get(&sticker).unwrap();
    let symbol = s.stickers().get(&symbol).unwrap();
    assert_eq!(sticker.size, 48.0);
    assert_eq!(symbol.size, 32.0);
    assert_eq!(sticker.range, TimeRange::new(0.0, 8.0));
    assert_ne!((sticker.x, sticker.y), (symbol.x, symbol.y));

    let messages: Vec<_> = s.drain_notices().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["Sticker added!", "Symbol added!"]);
}

#[test]
fn test_seek_clamps_both_ends() {
    let mut s = loaded_session(30.0);
    assert_eq!(s.seek(45.0), 30.0);
    assert_eq!(s.seek(-3.0), 0.0);
    assert_eq!(s.skip_forward(), 5.0);
    assert_eq!(s.jump_forward(), 30.0);
    assert_eq!(s.transport_label(), ("00:30".to_string(), "00:30".to_string()));
}

#[test]
fn test_failed_source_falls_back_to_loaded_state() {
    let mut s = loaded_session(30.0);
    s.seek(10.0);
    s.play();

    let outcome = s
        .handle_media_event(MediaEvent::Error {
            reason: "MEDIA_ERR_SRC_NOT_SUPPORTED".to_string(),
        })
        .unwrap();
    assert!(matches!(outcome, MediaOutcome::FellBack { .. }));
    assert_eq!(s.phase(), PlaybackPhase::Loaded(Transport::Paused));
    assert_eq!(s.duration(), 0.0);
    assert_eq!(s.current_time(), 0.0);

    let source = s.playback().source().unwrap();
    assert!(source.is_fallback());
    assert_eq!(source.url, AppConfig::default().playback.fallback_source_url);
    assert_eq!(
        s.playback().media().loaded.last().unwrap(),
        &AppConfig::default().playback.fallback_source_url
    );
    assert!(s.compositor().is_running());

    s.handle_media_event(MediaEvent::MetadataReady {
        duration: 596.0,
        width: 1280,
        height: 720,
    })
    .unwrap();
    let messages: Vec<_> = s.drain_notices().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec![
            "Failed to load \"Clip\". Trying an alternative video...".to_string(),
            "Alternative video loaded for \"Clip\"".to_string(),
        ]
    );
}

#[test]
fn test_failing_fallback_reports_error_and_stays_loaded() {
    let mut s = loaded_session(30.0);
    s.handle_media_event(MediaEvent::Error {
        reason: "network".to_string(),
    })
    .unwrap();
    let loads = s.playback().media().loaded.len();

    let err = s
        .handle_media_event(MediaEvent::Error {
            reason: "network".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ClipdeckError::SourceLoad { .. }));
    assert_eq!(s.playback().media().loaded.len(), loads);
    assert!(matches!(s.phase(), PlaybackPhase::Loaded(_)));
}

#[test]
fn test_upload_validation() {
    let mut s = session();
    let pdf = FileCandidate::new("notes.pdf", "application/pdf", 1024);
    assert!(s.upload_file(pdf, "blob:1").is_err());
    assert_eq!(s.phase(), PlaybackPhase::Empty);

    let huge = FileCandidate::new("huge.mp4", "video/mp4", 101 * 1024 * 1024);
    assert!(s.upload_file(huge, "blob:2").is_err());

    let ok = FileCandidate::new("clip.mp4", "video/mp4", 5 * 1024 * 1024);
    s.upload_file(ok, "blob:3").unwrap();
    assert_eq!(s.phase(), PlaybackPhase::Loaded(Transport::Paused));

    let messages: Vec<_> = s.drain_notices().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec![
            "Please select a valid video file",
            "File size must be less than 100MB",
            "Video uploaded successfully!",
        ]
    );
}

#[test]
fn test_transport_ignored_without_source() {
    let mut s = session();
    assert!(!s.play());
    assert!(!s.toggle_play());
    assert_eq!(s.phase(), PlaybackPhase::Empty);
    assert!(!s.playback().media().playing);
}

#[test]
fn test_timeline_scrub_seeks_continuously() {
    let mut s = loaded_session(40.0);
    assert_eq!(s.timeline_press(200.0, 800.0), Some(10.0));
    assert_eq!(s.timeline_drag(400.0, 800.0), Some(20.0));
    assert_eq!(s.timeline_drag(1000.0, 800.0), Some(40.0));
    s.timeline_release();
    assert_eq!(s.timeline_drag(100.0, 800.0), None);
    assert_eq!(s.current_time(), 40.0);
    assert_eq!(s.playhead_percentage(), 100.0);
    assert_eq!(s.playback().media().seeks, vec![10.0, 20.0, 40.0]);
}

#[test]
fn test_ruler_and_tracks() {
    let mut s = loaded_session(30.0);
    assert_eq!(s.ruler().len(), 4);
    s.add_scene();
    s.seek(15.0);
    s.add_text("Mid").unwrap();
    assert_eq!(s.playhead_label(), "00:15.00");

    let scenes = s.scene_track();
    assert_eq!(scenes.len(), 1);
    assert!((scenes[0].width_pct - 100.0 / 3.0).abs() < 1e-9);

    let texts = s.text_track();
    assert!((texts[0].left_pct - 50.0).abs() < 1e-9);
}

#[test]
fn test_overlays_draw_over_registered_frame() {
    let mut s = loaded_session(30.0);
    s.seek(1.0);
    s.add_text("Caption").unwrap();
    s.add_sticker("⭐", StickerKind::Sticker).unwrap();

    let mut surface = RecordingSurface::new();
    assert!(!s.tick(0.0, &mut surface), "nothing to draw on before layout");

    s.resize_display(Size::new(800.0, 600.0));
    assert!(s.tick(0.016, &mut surface));

    let registered = surface.registrations.last().unwrap();
    assert!((registered.width - 800.0).abs() < 1e-9);
    assert!((registered.height - 450.0).abs() < 1e-9);
    assert!((registered.y - 75.0).abs() < 1e-9);

    let frame = surface.last_frame().unwrap();
    assert!(matches!(frame.commands[0], DrawCommand::Clear { .. }));
    assert!(matches!(frame.commands[1], DrawCommand::StrokeText { .. }));
    assert!(matches!(frame.commands[2], DrawCommand::FillText { .. }));
    assert!(matches!(frame.commands[3], DrawCommand::Glyph { .. }));

    assert_eq!(s.pointer_to_surface(400.0, 300.0), Some((400.0, 225.0)));
}

#[test]
fn test_unload_stops_redraw() {
    let mut s = loaded_session(30.0);
    s.resize_display(Size::new(640.0, 360.0));
    let mut surface = RecordingSurface::new();
    assert!(s.tick(0.0, &mut surface));
    s.unload();
    assert!(!s.tick(0.1, &mut surface));
    assert_eq!(s.phase(), PlaybackPhase::Empty);
}

#[test]
fn test_change_driven_redraw() {
    let mut config = AppConfig::default();
    config.render.redraw = RedrawMode::OnChange;
    let mut s = EditorSession::with_stock(
        ScriptedMedia::default(),
        config,
        StockCatalog::new(Arc::new(SampleProvider::new())),
    );
    s.load_url("https://media.example/clip.mp4", "Clip");
    s.handle_media_event(MediaEvent::MetadataReady {
        duration: 30.0,
        width: 640,
        height: 360,
    })
    .unwrap();
    s.resize_display(Size::new(640.0, 360.0));

    let mut surface = RecordingSurface::new();
    assert!(s.tick(0.0, &mut surface));
    assert!(!s.tick(0.016, &mut surface));
    s.add_text("New").unwrap();
    assert!(s.tick(0.032, &mut surface));
    s.seek(3.0);
    assert!(s.tick(0.048, &mut surface));
    assert!(!s.tick(0.064, &mut surface));
}

#[test]
fn test_export_and_trim_are_deferred() {
    let mut s = loaded_session(30.0);
    assert!(matches!(s.export(), Err(ClipdeckError::Unsupported { .. })));
    assert!(matches!(s.trim(), Err(ClipdeckError::Unsupported { .. })));
    let notices = s.drain_notices();
    assert_eq!(notices[0].message, "Export feature coming soon!");
    assert_eq!(notices[1].message, "Professional trim feature coming soon!");
    assert!(notices.iter().all(|n| n.level == NoticeLevel::Info));
}

#[tokio::test]
async fn test_stock_failure_shows_static_samples() {
    let mut s = session_with(StockCatalog::new(Arc::new(OfflineProvider)));
    s.search_stock("", Category::All);
    let update = s.settle_stock().await;
    assert!(matches!(update, CatalogUpdate::Failed { .. }));
    assert_eq!(s.stock().displayed().len(), 6);

    let notices = s.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);

    s.select_stock_video("2").unwrap();
    assert_eq!(s.playback().source().unwrap().title, "Ocean Waves");
}

#[test]
fn test_stock_search_outside_runtime_reports_failure() {
    let mut s = session();
    assert!(!s.search_stock("ocean", Category::Nature));
    assert!(!s.stock().is_loading());

    let notices = s.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(
        notices[0].message,
        "Failed to fetch from Sample Library, showing sample videos"
    );

    let displayed = s.stock().displayed();
    assert_eq!(displayed.len(), 1);
    assert_eq!(displayed[0].title, "Ocean Waves");
}

#[tokio::test]
async fn test_stock_selection_loads_video() {
    let mut s = session();
    s.search_stock("", Category::Tech);
    assert_eq!(s.settle_stock().await, CatalogUpdate::Replaced { count: 5 });
    assert_eq!(
        s.drain_notices()[0].message,
        "Loaded 5 new videos from Sample Library!"
    );

    s.select_stock_video("tech-1-0").unwrap();
    assert_eq!(s.playback().source().unwrap().title, "Code on Screen");
    assert!(s.select_stock_video("missing").is_err());
}

//! Frame compositor: turns the overlays active at a playback time into
//! draw instructions for the overlay surface.
//!
//! A frame is always a full repaint: clear, then every active text overlay
//! (outline first, then fill), then every active sticker. Within each
//! collection, insertion order is drawing order, so later overlays land on
//! top.

use serde::{Deserialize, Serialize};

use clipdeck_common::config::RenderDefaults;
use clipdeck_project_model::layout::Size;
use clipdeck_project_model::overlay::{
    StickerOverlay, StickerOverlayStore, TextOverlay, TextOverlayStore,
};
use clipdeck_project_model::time::Seconds;

/// A single drawing operation on the overlay surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Erase the whole surface to transparent.
    Clear { width: f64, height: f64 },

    /// Outline text with a fixed-width stroke.
    StrokeText {
        text: String,
        x: f64,
        y: f64,
        /// CSS-style font shorthand, e.g. `24px Arial`.
        font: String,
        color: String,
        line_width: f64,
    },

    /// Fill text over its outline.
    FillText {
        text: String,
        x: f64,
        y: f64,
        font: String,
        color: String,
    },

    /// A glyph centered at `(x, y)`, rotated about its center.
    Glyph {
        content: String,
        x: f64,
        y: f64,
        font: String,
        /// Degrees, clockwise.
        rotation: f64,
        opacity: f64,
    },
}

/// Draw instructions for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameComposition {
    /// Playback time the frame was composed for.
    pub time_secs: Seconds,

    /// Backing size of the surface the commands target.
    pub surface: Size,

    pub commands: Vec<DrawCommand>,
}

impl FrameComposition {
    /// Number of overlays drawn (excluding the clear).
    pub fn overlay_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillText { .. } | DrawCommand::Glyph { .. }))
            .count()
    }
}

/// Font shorthand for a pixel size and family.
pub fn css_font(size_px: f64, family: &str) -> String {
    format!("{size_px}px {family}")
}

/// Compose the frame for playback time `time`.
pub fn compose_frame(
    time: Seconds,
    surface: Size,
    texts: &TextOverlayStore,
    stickers: &StickerOverlayStore,
    style: &RenderDefaults,
) -> FrameComposition {
    let active_texts = texts.list_active_at(time);
    let active_stickers = stickers.list_active_at(time);

    let mut commands = Vec::with_capacity(1 + active_texts.len() * 2 + active_stickers.len());
    commands.push(DrawCommand::Clear {
        width: surface.width,
        height: surface.height,
    });

    for overlay in active_texts {
        push_text(&mut commands, overlay, style);
    }
    for sticker in active_stickers {
        commands.push(glyph_command(sticker, style));
    }

    FrameComposition {
        time_secs: time,
        surface,
        commands,
    }
}

fn push_text(commands: &mut Vec<DrawCommand>, overlay: &TextOverlay, style: &RenderDefaults) {
    let font = css_font(overlay.font_size, &style.font_family);
    commands.push(DrawCommand::StrokeText {
        text: overlay.text.clone(),
        x: overlay.x,
        y: overlay.y,
        font: font.clone(),
        color: style.stroke_color.clone(),
        line_width: style.stroke_width,
    });
    commands.push(DrawCommand::FillText {
        text: overlay.text.clone(),
        x: overlay.x,
        y: overlay.y,
        font,
        color: overlay.color.clone(),
    });
}

fn glyph_command(sticker: &StickerOverlay, style: &RenderDefaults) -> DrawCommand {
    DrawCommand::Glyph {
        content: sticker.content.clone(),
        x: sticker.x,
        y: sticker.y,
        font: css_font(sticker.size, &style.font_family),
        rotation: sticker.rotation,
        opacity: sticker.opacity.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipdeck_project_model::overlay::{StickerKind, StickerOverlayDraft, TextOverlayDraft};
    use clipdeck_project_model::time::TimeRange;

    fn text(store: &mut TextOverlayStore, label: &str, start: f64, end: f64) {
        store
            .add(TextOverlayDraft {
                text: label.to_string(),
                x: 50.0,
                y: 50.0,
                font_size: 24.0,
                color: "#ffffff".to_string(),
                range: TimeRange::new(start, end),
            })
            .unwrap();
    }

    fn sticker(store: &mut StickerOverlayStore, glyph: &str, start: f64, end: f64) {
        store
            .add(StickerOverlayDraft {
                kind: StickerKind::Sticker,
                content: glyph.to_string(),
                x: 120.0,
                y: 90.0,
                size: 48.0,
                rotation: 15.0,
                opacity: 0.5,
                range: TimeRange::new(start, end),
            })
            .unwrap();
    }

    #[test]
    fn test_frame_starts_with_clear() {
        let frame = compose_frame(
            1.0,
            Size::new(640.0, 360.0),
            &TextOverlayStore::new(),
            &StickerOverlayStore::new(),
            &RenderDefaults::default(),
        );
        assert_eq!(
            frame.commands,
            vec![DrawCommand::Clear {
                width: 640.0,
                height: 360.0
            }]
        );
        assert_eq!(frame.overlay_count(), 0);
    }

    #[test]
    fn test_text_is_stroked_then_filled() {
        let mut texts = TextOverlayStore::new();
        text(&mut texts, "Hello", 2.0, 7.0);
        let frame = compose_frame(
            5.0,
            Size::new(640.0, 360.0),
            &texts,
            &StickerOverlayStore::new(),
            &RenderDefaults::default(),
        );

        assert_eq!(frame.commands.len(), 3);
        match &frame.commands[1] {
            DrawCommand::StrokeText {
                font,
                color,
                line_width,
                ..
            } => {
                assert_eq!(font, "24px Arial");
                assert_eq!(color, "#000000");
                assert_eq!(*line_width, 2.0);
            }
            other => panic!("expected stroke, got {other:?}"),
        }
        assert!(matches!(&frame.commands[2], DrawCommand::FillText { color, .. } if color == "#ffffff"));
    }

    #[test]
    fn test_inactive_overlays_are_skipped() {
        let mut texts = TextOverlayStore::new();
        text(&mut texts, "Hello", 2.0, 7.0);
        let mut stickers = StickerOverlayStore::new();
        sticker(&mut stickers, "⭐", 0.0, 1.0);

        let frame = compose_frame(
            8.0,
            Size::new(640.0, 360.0),
            &texts,
            &stickers,
            &RenderDefaults::default(),
        );
        assert_eq!(frame.overlay_count(), 0);
    }

    #[test]
    fn test_insertion_order_is_draw_order() {
        let mut texts = TextOverlayStore::new();
        text(&mut texts, "first", 0.0, 10.0);
        text(&mut texts, "second", 0.0, 10.0);
        let mut stickers = StickerOverlayStore::new();
        sticker(&mut stickers, "🔥", 0.0, 10.0);

        let frame = compose_frame(
            3.0,
            Size::new(640.0, 360.0),
            &texts,
            &stickers,
            &RenderDefaults::default(),
        );
        let fills: Vec<_> = frame
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                DrawCommand::Glyph { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec!["first", "second", "🔥"]);
    }

    #[test]
    fn test_draw_command_wire_shape() {
        let json = serde_json::to_string(&DrawCommand::Clear {
            width: 10.0,
            height: 5.0,
        })
        .unwrap();
        assert_eq!(json, r#"{"op":"clear","width":10.0,"height":5.0}"#);
    }

    #[test]
    fn test_glyph_carries_rotation_and_opacity() {
        let mut stickers = StickerOverlayStore::new();
        sticker(&mut stickers, "⭐", 0.0, 4.0);
        let frame = compose_frame(
            4.0,
            Size::new(640.0, 360.0),
            &TextOverlayStore::new(),
            &stickers,
            &RenderDefaults::default(),
        );
        assert_eq!(
            frame.commands[1],
            DrawCommand::Glyph {
                content: "⭐".to_string(),
                x: 120.0,
                y: 90.0,
                font: "48px Arial".to_string(),
                rotation: 15.0,
                opacity: 0.5,
            }
        );
    }
}

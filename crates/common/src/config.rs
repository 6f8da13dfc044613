//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ClipdeckResult;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults applied when overlays and scenes are created.
    pub editor: EditorDefaults,

    /// Playback controller tuning.
    pub playback: PlaybackDefaults,

    /// Overlay compositor styling and redraw behavior.
    pub render: RenderDefaults,

    /// Stock footage provider settings.
    pub stock: StockConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Defaults used by "add text", "add sticker" and "add scene".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorDefaults {
    /// Visible span of a new text overlay (seconds).
    pub text_span_secs: f64,

    /// Visible span of a new sticker or symbol (seconds).
    pub sticker_span_secs: f64,

    /// Span of a new scene before clamping to the media duration (seconds).
    pub scene_span_secs: f64,

    /// Initial text position in frame pixels.
    pub text_x: f64,
    pub text_y: f64,

    /// Initial text font size in pixels.
    pub text_font_size: f64,

    /// Initial text fill color.
    pub text_color: String,

    /// Glyph size for stickers.
    pub sticker_size: f64,

    /// Glyph size for symbols.
    pub symbol_size: f64,
}

/// Playback controller parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackDefaults {
    /// Drift between requested and reported media position (seconds)
    /// below which the media element is left alone.
    pub seek_tolerance_secs: f64,

    /// Short skip distance (seconds).
    pub skip_short_secs: f64,

    /// Long skip distance (seconds).
    pub skip_long_secs: f64,

    /// Speeds offered to the user.
    pub speed_presets: Vec<f64>,

    /// Known-good source substituted when a requested source fails to load.
    pub fallback_source_url: String,

    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: u64,
}

/// How the compositor decides to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedrawMode {
    /// Redraw on every animation tick while a source is loaded.
    #[default]
    Continuous,
    /// Redraw only when the playhead or an overlay collection changed.
    OnChange,
}

/// Overlay compositor parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    /// Font family used for text overlays.
    pub font_family: String,

    /// Outline color drawn behind text fills.
    pub stroke_color: String,

    /// Outline width in pixels.
    pub stroke_width: f64,

    /// Redraw policy.
    pub redraw: RedrawMode,

    /// Redraw rate cap in Hz (0 = follow every animation tick).
    pub max_fps: u32,
}

/// Stock footage provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    /// Environment variable holding the provider API key.
    pub api_key_env: String,

    /// Provider base URL.
    pub base_url: String,

    /// Results requested per page.
    pub per_page: u32,

    /// HTTP timeout (seconds).
    pub timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "clipdeck=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            text_span_secs: 5.0,
            sticker_span_secs: 8.0,
            scene_span_secs: 10.0,
            text_x: 50.0,
            text_y: 50.0,
            text_font_size: 24.0,
            text_color: "#ffffff".to_string(),
            sticker_size: 48.0,
            symbol_size: 32.0,
        }
    }
}

impl Default for PlaybackDefaults {
    fn default() -> Self {
        Self {
            seek_tolerance_secs: 0.1,
            skip_short_secs: 5.0,
            skip_long_secs: 30.0,
            speed_presets: vec![0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 2.0],
            fallback_source_url:
                "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4"
                    .to_string(),
            max_upload_bytes: 100 * 1024 * 1024,
        }
    }
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            stroke_color: "#000000".to_string(),
            stroke_width: 2.0,
            redraw: RedrawMode::Continuous,
            max_fps: 0,
        }
    }
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            api_key_env: "PEXELS_API_KEY".to_string(),
            base_url: "https://api.pexels.com/videos".to_string(),
            per_page: 15,
            timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl StockConfig {
    /// Read the API key from the configured environment variable.
    /// Blank values count as absent.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

impl AppConfig {
    /// Load `$XDG_CONFIG_HOME/clipdeck/config.json`, or the defaults when
    /// it is missing or unusable.
    pub fn load() -> Self {
        Self::load_or_default(&config_file_path())
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::read_from(path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unusable config file");
                Self::default()
            }
        }
    }

    /// Parse the config file at `path`. `None` when there is no file.
    pub fn read_from(path: &Path) -> ClipdeckResult<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Write to the standard location and return the path written.
    pub fn save(&self) -> ClipdeckResult<PathBuf> {
        let path = config_file_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> ClipdeckResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), "Config saved");
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("clipdeck").join("config.json")
}

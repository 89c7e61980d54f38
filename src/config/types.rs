//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::input::mapper::keycodes::{MAX_KEY_CODE, MIN_KEY_CODE};

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in pixels
    pub width: i32,

    /// Window height in pixels
    pub height: i32,

    /// Window title
    pub title: String,

    /// Frame rate cap (0 = uncapped)
    pub target_fps: u32,

    /// Show the mouse cursor
    pub show_cursor: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "rayframe".to_string(),
            target_fps: 60,
            show_cursor: true,
        }
    }
}

/// Input collection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Emit a MouseDrag after a release that lands away from its press
    pub emit_drag_events: bool,

    /// Key codes 1..key_scan_limit are scanned each frame
    pub key_scan_limit: i32,

    /// Log unmapped native codes at warn level (debug otherwise)
    pub warn_unmapped: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            emit_drag_events: false,
            key_scan_limit: MAX_KEY_CODE,
            warn_unmapped: true,
        }
    }
}

impl InputConfig {
    /// Whether the scan limit lies in the native key code range
    pub fn scan_limit_valid(&self) -> bool {
        (MIN_KEY_CODE..=MAX_KEY_CODE).contains(&self.key_scan_limit)
    }
}

/// Texture marshaling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Log a warning with the conversion time when pixels need normalizing
    pub warn_on_slow_path: bool,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            warn_on_slow_path: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    pub level: String,

    /// Output format ("pretty", "compact", "json")
    pub format: String,

    /// Log directory (None = console only)
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            log_dir: None,
        }
    }
}

//! Graphical Text Entries

use std::ffi::CString;
use std::rc::Rc;

use crate::native::ResourceDevice;
use crate::resources::error::{ResourceError, Result};
use crate::resources::font::Font;

/// Spacing between glyphs used for measurement
pub const DEFAULT_SPACING: f32 = 1.0;

/// Default font size in pixels
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Options for a new [`Text`]
///
/// Defaults: native default font, 12 px, black, empty string.
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Font, `None` for the native default font
    pub font: Option<Rc<Font>>,
    /// Font size in pixels
    pub size: u32,
    /// Text color
    pub color: Color,
    /// Initial string
    pub text: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: None,
            size: DEFAULT_FONT_SIZE,
            color: Color::BLACK,
            text: String::new(),
        }
    }
}

/// Text entry with a font, size and color
#[derive(Debug, Clone)]
pub struct Text {
    font: Option<Rc<Font>>,
    size: u32,
    color: Color,
    text: CString,
}

impl Text {
    /// Create a text entry
    pub fn new(config: TextConfig) -> Result<Self> {
        Ok(Self {
            font: config.font,
            size: config.size,
            color: config.color,
            text: to_cstring(config.text)?,
        })
    }

    /// Replace the string
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.text = to_cstring(text.into())?;
        Ok(())
    }

    /// Replace the font, `None` for the native default font
    pub fn set_font(&mut self, font: Option<Rc<Font>>) {
        self.font = font;
    }

    /// Replace the font size in pixels
    pub fn set_size(&mut self, size: u32) {
        self.size = size;
    }

    /// Replace the color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Current string
    pub fn text(&self) -> &str {
        // Built from a String, so always UTF-8
        self.text.to_str().unwrap_or_default()
    }

    /// Current font
    pub fn font(&self) -> Option<&Rc<Font>> {
        self.font.as_ref()
    }

    /// Font size in pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Text color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Rendered (width, height) in whole pixels
    pub fn measure(&self, device: &dyn ResourceDevice) -> (i32, i32) {
        let (width, height) = device.measure_text(
            self.font.as_deref().map(Font::native),
            &self.text,
            self.size as f32,
            DEFAULT_SPACING,
        );
        (width as i32, height as i32)
    }
}

fn to_cstring(text: String) -> Result<CString> {
    CString::new(text).map_err(|e| {
        let text = String::from_utf8_lossy(&e.into_vec()).into_owned();
        ResourceError::InvalidString(text)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{HeadlessBackend, NativeContext};
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let text = Text::new(TextConfig::default()).unwrap();
        assert!(text.font().is_none());
        assert_eq!(text.size(), 12);
        assert_eq!(text.color(), Color::BLACK);
        assert_eq!(text.text(), "");
    }

    #[test]
    fn test_setters() {
        let mut text = Text::new(TextConfig {
            text: "hello".to_string(),
            ..Default::default()
        })
        .unwrap();

        text.set_text("world").unwrap();
        text.set_size(20);
        text.set_color(Color::WHITE);
        assert_eq!(text.text(), "world");
        assert_eq!(text.size(), 20);
        assert_eq!(text.color(), Color::WHITE);

        assert!(matches!(
            text.set_text("nul\0byte"),
            Err(ResourceError::InvalidString(_))
        ));
        assert_eq!(text.text(), "world");
    }

    #[test]
    fn test_measure_with_font() {
        let backend = Rc::new(HeadlessBackend::new());
        backend.register_font_file("mono.ttf");
        let context = NativeContext::new();
        let font = Rc::new(Font::load(backend.clone(), &context, Path::new("mono.ttf")).unwrap());

        let text = Text::new(TextConfig {
            font: Some(font),
            size: 10,
            text: "abcd".to_string(),
            ..Default::default()
        })
        .unwrap();

        // Headless advance is half the size per glyph plus spacing between
        assert_eq!(text.measure(&*backend), (23, 10));
    }
}

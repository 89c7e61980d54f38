//! Window State
//!
//! [`Window`] is the host-facing handle. It owns the backend, the event queue
//! and the frame collector, and drives one collection per [`Window::display`].
//!
//! ```rust
//! use std::rc::Rc;
//! use rayframe::config::WindowConfig;
//! use rayframe::input::Event;
//! use rayframe::native::HeadlessBackend;
//! use rayframe::window::Window;
//!
//! let backend = Rc::new(HeadlessBackend::new());
//! let mut window = Window::open(backend.clone(), &WindowConfig::default()).unwrap();
//!
//! backend.request_close();
//! window.display();
//!
//! assert_eq!(window.poll_event(), Some(Event::WindowClose));
//! assert!(window.is_closing());
//! ```

use std::ffi::CString;
use std::path::Path;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, InputConfig, TextureConfig, WindowConfig};
use crate::input::{CollectorStats, Event, EventQueue, FrameEventCollector, Modifiers, Point};
use crate::native::{Backend, NativeContext, ResourceDevice, TextureDevice};
use crate::resources::{self, Font, Shader, Text};
use crate::texture::{self, PixelView, Texture};

/// Window lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// Native window or GL context creation failed
    #[error("Failed to open {width}x{height} window \"{title}\"")]
    OpenFailed {
        /// Requested width
        width: i32,
        /// Requested height
        height: i32,
        /// Requested title
        title: String,
    },

    /// String cannot be passed to the native library
    #[error("Invalid string for native call: {0:?}")]
    InvalidString(String),
}

fn c_string(s: &str) -> Result<CString, WindowError> {
    CString::new(s).map_err(|_| WindowError::InvalidString(s.to_string()))
}

/// Open native window with its input event queue
pub struct Window<B: Backend> {
    backend: Rc<B>,
    queue: EventQueue,
    collector: FrameEventCollector,
    texture_config: TextureConfig,
    context: NativeContext,
    closing: bool,
    open: bool,
}

impl<B: Backend> Window<B> {
    /// Open a window with default input and texture settings
    pub fn open(backend: Rc<B>, config: &WindowConfig) -> Result<Self, WindowError> {
        Self::open_with(
            backend,
            config,
            InputConfig::default(),
            TextureConfig::default(),
        )
    }

    /// Open a window using every section of `config`
    pub fn open_with_config(backend: Rc<B>, config: &Config) -> Result<Self, WindowError> {
        Self::open_with(
            backend,
            &config.window,
            config.input.clone(),
            config.texture.clone(),
        )
    }

    /// Open a window with explicit settings
    pub fn open_with(
        backend: Rc<B>,
        window: &WindowConfig,
        input: InputConfig,
        texture: TextureConfig,
    ) -> Result<Self, WindowError> {
        let title = c_string(&window.title)?;
        if !backend.open_window(window.width, window.height, &title) {
            return Err(WindowError::OpenFailed {
                width: window.width,
                height: window.height,
                title: window.title.clone(),
            });
        }

        backend.set_target_fps(i32::try_from(window.target_fps).unwrap_or(i32::MAX));
        backend.set_cursor_visible(window.show_cursor);
        backend.begin_frame();

        info!(
            "Window opened: {}x{} \"{}\" (target {} fps)",
            window.width, window.height, window.title, window.target_fps
        );

        Ok(Self {
            backend,
            queue: EventQueue::new(),
            collector: FrameEventCollector::new(input),
            texture_config: texture,
            context: NativeContext::new(),
            closing: false,
            open: true,
        })
    }

    /// Close the window. Also happens on drop.
    ///
    /// Textures, fonts and shaders still alive are freed with the context and
    /// make no further native calls.
    pub fn close(&mut self) {
        if self.open {
            self.context.invalidate();
            self.backend.close_window();
            self.open = false;
            info!("Window closed");
        }
    }

    /// Change the window title
    pub fn set_title(&self, title: &str) -> Result<(), WindowError> {
        self.backend.set_window_title(&c_string(title)?);
        Ok(())
    }

    /// Show or hide the mouse cursor
    pub fn show_cursor(&self, visible: bool) {
        self.backend.set_cursor_visible(visible);
    }

    /// Render width in pixels
    pub fn width(&self) -> i32 {
        self.backend.render_size().0
    }

    /// Render height in pixels
    pub fn height(&self) -> i32 {
        self.backend.render_size().1
    }

    /// Present the frame and collect the input it produced
    ///
    /// Once a close request has been queued, frames are still presented but
    /// no further events are collected. Does nothing after [`Window::close`].
    pub fn display(&mut self) {
        if !self.open {
            return;
        }
        self.backend.present_frame();

        if !self.closing {
            self.collector.collect(&*self.backend, &mut self.queue);

            if self.backend.should_close() {
                self.queue.push(Event::WindowClose);
                self.closing = true;
                info!("Window close requested");
            }
        }

        self.backend.begin_frame();
    }

    /// Next pending event
    pub fn poll_event(&mut self) -> Option<Event> {
        self.queue.poll()
    }

    /// Number of events not yet polled
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Pointer position in window pixels
    pub fn cursor_position(&self) -> Point {
        self.backend.mouse_position()
    }

    /// Warp the pointer
    ///
    /// The next [`Window::display`] reports the jump as a `MouseMove`.
    pub fn set_cursor_position(&self, point: Point) {
        self.backend.set_mouse_position(point);
    }

    /// Modifier keys held right now
    pub fn current_modifiers(&self) -> Modifiers {
        self.collector.current_modifiers(&*self.backend)
    }

    /// Load an image file as a texture
    pub fn load_texture(&self, path: impl AsRef<Path>) -> texture::Result<Texture> {
        Texture::load_file(self.texture_device(), &self.context, path.as_ref())
    }

    /// Upload pixels as a texture
    pub fn load_texture_from_pixels(&self, view: PixelView<'_>) -> texture::Result<Texture> {
        Texture::from_pixels(
            self.texture_device(),
            &self.context,
            view,
            &self.texture_config,
        )
    }

    /// Load a TTF font
    pub fn load_font(&self, path: impl AsRef<Path>) -> resources::Result<Font> {
        Font::load(self.resource_device(), &self.context, path.as_ref())
    }

    /// Compile a shader program
    pub fn load_shader(
        &self,
        vertex: Option<&Path>,
        fragment: Option<&Path>,
    ) -> resources::Result<Shader> {
        Shader::load(self.resource_device(), &self.context, vertex, fragment)
    }

    /// Rendered size of a text entry in pixels
    pub fn text_size(&self, text: &Text) -> (i32, i32) {
        text.measure(&*self.backend)
    }

    /// Whether the close event has been queued
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Collector statistics
    pub fn collector_stats(&self) -> CollectorStats {
        self.collector.stats()
    }

    /// Backend driving this window
    pub fn backend(&self) -> &Rc<B> {
        &self.backend
    }

    fn texture_device(&self) -> Rc<dyn TextureDevice> {
        self.backend.clone()
    }

    fn resource_device(&self) -> Rc<dyn ResourceDevice> {
        self.backend.clone()
    }
}

impl<B: Backend> Drop for Window<B> {
    fn drop(&mut self) {
        debug!(
            "Dropping window after {} frames",
            self.collector.stats().frames_collected
        );
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::HeadlessBackend;

    #[test]
    fn test_open_applies_config() {
        let backend = Rc::new(HeadlessBackend::new());
        let config = WindowConfig {
            title: "demo".to_string(),
            show_cursor: false,
            ..Default::default()
        };

        let window = Window::open(backend.clone(), &config).unwrap();
        assert!(backend.is_window_open());
        assert_eq!(backend.window_title(), "demo");
        assert!(!backend.cursor_visible());
        assert_eq!(backend.target_fps(), 60);
        assert_eq!((window.width(), window.height()), (800, 600));

        drop(window);
        assert!(!backend.is_window_open());
    }

    #[test]
    fn test_open_failure() {
        let backend = Rc::new(HeadlessBackend::new());
        let config = WindowConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            Window::open(backend, &config),
            Err(WindowError::OpenFailed { width: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_title() {
        let backend = Rc::new(HeadlessBackend::new());
        let config = WindowConfig {
            title: "a\0b".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            Window::open(backend, &config),
            Err(WindowError::InvalidString(_))
        ));
    }

    #[test]
    fn test_close_once() {
        let backend = Rc::new(HeadlessBackend::new());
        let mut window = Window::open(backend.clone(), &WindowConfig::default()).unwrap();
        window.close();
        window.close();
        assert!(!backend.is_window_open());
    }

    #[test]
    fn test_display_after_close_is_noop() {
        let backend = Rc::new(HeadlessBackend::new());
        let mut window = Window::open(backend.clone(), &WindowConfig::default()).unwrap();
        window.display();
        window.close();

        backend.type_char('z');
        window.display();
        assert_eq!(backend.frames_presented(), 1);
        assert_eq!(window.poll_event(), None);
    }

    #[test]
    fn test_loading_after_close_fails() {
        let backend = Rc::new(HeadlessBackend::new());
        backend.register_font_file("mono.ttf");
        let mut window = Window::open(backend.clone(), &WindowConfig::default()).unwrap();
        window.close();

        assert!(matches!(
            window.load_font("mono.ttf"),
            Err(resources::ResourceError::ContextClosed)
        ));
        assert!(matches!(
            window.load_texture("any.png"),
            Err(texture::TextureError::ContextClosed)
        ));
        assert_eq!(backend.live_fonts(), 0);
    }

    #[test]
    fn test_set_title() {
        let backend = Rc::new(HeadlessBackend::new());
        let window = Window::open(backend.clone(), &WindowConfig::default()).unwrap();
        window.set_title("renamed").unwrap();
        assert_eq!(backend.window_title(), "renamed");
        assert!(window.set_title("bad\0").is_err());
    }
}

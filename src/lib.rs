//! # rayframe
//!
//! Frame-synchronized input events and texture marshaling over an
//! immediate-mode native graphics library (raylib 4.5).
//!
//! The native library only answers polling questions about input, once per
//! presented frame. This crate turns those answers into a queue of discrete
//! events and moves pixel data between host buffers and GPU textures.
//!
//! # Architecture
//!
//! ```text
//! rayframe
//!   ├─> Window (open / display / poll_event / close)
//!   │     ├─> FrameEventCollector (polling state → Event queue)
//!   │     └─> Backend (raylib FFI or headless)
//!   ├─> Texture (upload, read-back, release)
//!   │     └─> PixelBuffer / PixelView (stride-aware pixel storage)
//!   └─> Font / Shader / Text (owned native resources)
//! ```
//!
//! # Data Flow
//!
//! **Input Path:** native polling → collector → [`input::EventQueue`] → host
//!
//! **Texture Path:** [`texture::PixelView`] → native texture → read-back →
//! [`texture::PixelBuffer`]
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use rayframe::config::Config;
//! use rayframe::input::mapper::keycodes::KEY_A;
//! use rayframe::input::{Event, Key};
//! use rayframe::native::HeadlessBackend;
//! use rayframe::window::Window;
//!
//! let backend = Rc::new(HeadlessBackend::new());
//! let mut window = Window::open_with_config(backend.clone(), &Config::default()).unwrap();
//!
//! backend.press_key(KEY_A);
//! window.display();
//!
//! assert!(matches!(window.poll_event(), Some(Event::KeyPress { key: Key::A, .. })));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Configuration
pub mod config;

/// Crate-level error taxonomy
pub mod error;

/// Frame-synchronized input events
pub mod input;

/// Native library boundary and backends
pub mod native;

/// Fonts, shaders and text
pub mod resources;

/// Pixel buffers and texture marshaling
pub mod texture;

/// Utility functions
pub mod utils;

/// Window lifecycle and event loop
pub mod window;

pub use config::Config;
pub use error::{Error, ErrorClass, RecoveryAction};
pub use input::{Event, Key, Modifier, Modifiers, MouseButton, Point};
pub use texture::{PixelBuffer, PixelFormat, PixelView, Texture};
pub use window::{Window, WindowError};

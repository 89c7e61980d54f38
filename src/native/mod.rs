//! Native Library Boundary
//!
//! Everything the crate needs from the immediate-mode native library is
//! expressed as a small set of traits. The frame collector only sees
//! [`InputSource`], texture marshaling only sees [`TextureDevice`], and the
//! window ties them together through [`Backend`].
//!
//! # Backends
//!
//! - [`headless::HeadlessBackend`] - scriptable in-memory backend, always
//!   available. Tracks every live native resource.
//! - `raylib::RaylibBackend` - links the system raylib (feature `raylib`).
//!
//! The handle structs below are `#[repr(C)]` mirrors of the raylib 4.5
//! structures so the raylib backend can pass them straight through FFI.

use std::cell::Cell;
use std::ffi::{c_void, CStr, CString};
use std::path::Path;
use std::rc::Rc;

use crate::input::Point;

pub mod headless;

#[cfg(feature = "raylib")]
pub mod ffi;
#[cfg(feature = "raylib")]
pub mod raylib;

pub use headless::HeadlessBackend;
#[cfg(feature = "raylib")]
pub use raylib::RaylibBackend;

/// Native pixel format codes (raylib `PixelFormat`)
pub mod pixel_formats {
    pub const UNCOMPRESSED_GRAYSCALE: i32 = 1;
    pub const UNCOMPRESSED_GRAY_ALPHA: i32 = 2;
    pub const UNCOMPRESSED_R5G6B5: i32 = 3;
    pub const UNCOMPRESSED_R8G8B8: i32 = 4;
    pub const UNCOMPRESSED_R5G5B5A1: i32 = 5;
    pub const UNCOMPRESSED_R4G4B4A4: i32 = 6;
    pub const UNCOMPRESSED_R8G8B8A8: i32 = 7;
    pub const UNCOMPRESSED_R32: i32 = 8;
    pub const UNCOMPRESSED_R32G32B32: i32 = 9;
    pub const UNCOMPRESSED_R32G32B32A32: i32 = 10;
}

/// Convert a path for the native library. `None` when it is not UTF-8 or
/// contains a NUL byte.
pub fn path_to_cstring(path: &Path) -> Option<CString> {
    path.to_str().and_then(|s| CString::new(s).ok())
}

/// Shared liveness flag of the native window context
///
/// Every handle created through a window holds a clone. Closing the window
/// destroys the GL context together with the resources it owns, after which
/// handles must not call back into the native library.
#[derive(Debug, Clone)]
pub struct NativeContext {
    alive: Rc<Cell<bool>>,
}

impl NativeContext {
    /// Flag for a freshly opened context
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    /// Whether native calls are still allowed
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Mark the context destroyed for every clone
    pub fn invalidate(&self) {
        self.alive.set(false);
    }
}

impl Default for NativeContext {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU texture handle as reported by the native library
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeTexture {
    /// OpenGL texture id (0 = invalid)
    pub id: u32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Mipmap levels
    pub mipmaps: i32,
    /// Native pixel format code
    pub format: i32,
}

/// CPU-side image owned by the native library
///
/// `data` points to `width * height * bytes_per_pixel(format)` bytes that stay
/// valid until the image is passed to [`TextureDevice::unload_image`].
#[repr(C)]
#[derive(Debug)]
pub struct NativeImage {
    /// Pixel data
    pub data: *mut c_void,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Mipmap levels
    pub mipmaps: i32,
    /// Native pixel format code
    pub format: i32,
}

/// Font handle as reported by the native library
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct NativeFont {
    /// Base size (default chars height)
    pub base_size: i32,
    /// Number of glyph characters
    pub glyph_count: i32,
    /// Padding around the glyph characters
    pub glyph_padding: i32,
    /// Texture atlas containing the glyphs
    pub texture: NativeTexture,
    /// Rectangles in texture for the glyphs
    pub recs: *mut c_void,
    /// Glyphs info data
    pub glyphs: *mut c_void,
}

/// Shader handle as reported by the native library
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct NativeShader {
    /// Shader program id
    pub id: u32,
    /// Shader locations array
    pub locs: *mut i32,
}

/// Polling input queries, refreshed once per presented frame
pub trait InputSource {
    /// Level query: key held right now
    fn is_key_down(&self, key: i32) -> bool;

    /// Edge query: key went down this frame
    fn is_key_pressed(&self, key: i32) -> bool;

    /// Edge query: key went up this frame
    fn is_key_released(&self, key: i32) -> bool;

    /// Level query: mouse button held right now
    fn is_mouse_button_down(&self, button: i32) -> bool;

    /// Edge query: mouse button went down this frame
    fn is_mouse_button_pressed(&self, button: i32) -> bool;

    /// Edge query: mouse button went up this frame
    fn is_mouse_button_released(&self, button: i32) -> bool;

    /// Current pointer position in window pixels
    fn mouse_position(&self) -> Point;

    /// Next pending typed codepoint, `None` once the frame's queue is empty
    fn next_char(&self) -> Option<u32>;
}

/// Texture creation, read-back and release
#[cfg_attr(test, mockall::automock)]
pub trait TextureDevice {
    /// Load and upload an image file. `None` when the native load failed.
    fn load_texture(&self, path: &CStr) -> Option<NativeTexture>;

    /// Upload `pixels` (already in `format`, packed rows) as a new texture
    fn load_texture_from_pixels(
        &self,
        width: i32,
        height: i32,
        format: i32,
        pixels: &[u8],
    ) -> Option<NativeTexture>;

    /// Release a texture
    fn unload_texture(&self, texture: NativeTexture);

    /// Download a texture into a CPU image owned by the native library
    fn load_image_from_texture(&self, texture: &NativeTexture) -> Option<NativeImage>;

    /// Release an image obtained from [`TextureDevice::load_image_from_texture`]
    fn unload_image(&self, image: NativeImage);
}

/// Fonts, text measurement and shaders
pub trait ResourceDevice {
    /// Load a TTF font. `None` when the font is not usable.
    fn load_font(&self, path: &CStr) -> Option<NativeFont>;

    /// Release a font
    fn unload_font(&self, font: NativeFont);

    /// Measure `text` in pixels. `None` selects the library default font.
    fn measure_text(
        &self,
        font: Option<&NativeFont>,
        text: &CStr,
        size: f32,
        spacing: f32,
    ) -> (f32, f32);

    /// Compile a shader program. `None` paths select the default stage.
    fn load_shader(&self, vs_path: Option<&CStr>, fs_path: Option<&CStr>)
        -> Option<NativeShader>;

    /// Release a shader
    fn unload_shader(&self, shader: NativeShader);

    /// Start drawing with a custom shader
    fn begin_shader_mode(&self, shader: &NativeShader);

    /// Return to the default shader
    fn end_shader_mode(&self);
}

/// Window lifecycle and frame presentation
pub trait WindowSystem {
    /// Create the window and its GL context. Returns false on failure.
    fn open_window(&self, width: i32, height: i32, title: &CStr) -> bool;

    /// Destroy the window and its GL context
    fn close_window(&self);

    /// Change the window title
    fn set_window_title(&self, title: &CStr);

    /// Show or hide the cursor
    fn set_cursor_visible(&self, visible: bool);

    /// Current render size in pixels
    fn render_size(&self) -> (i32, i32);

    /// Cap the frame rate (0 = uncapped)
    fn set_target_fps(&self, fps: i32);

    /// Start recording draw calls for a frame
    fn begin_frame(&self);

    /// Swap buffers and poll native input (refreshes [`InputSource`] state)
    fn present_frame(&self);

    /// Window close requested (close button or escape key)
    fn should_close(&self) -> bool;

    /// Warp the pointer
    fn set_mouse_position(&self, point: Point);
}

/// Complete native library surface used by [`crate::window::Window`]
pub trait Backend: InputSource + TextureDevice + ResourceDevice + WindowSystem + 'static {}

impl<T> Backend for T where T: InputSource + TextureDevice + ResourceDevice + WindowSystem + 'static {}

//! Headless Backend
//!
//! In-memory stand-in for the native library. Input is scripted between
//! frames and becomes visible through the edge queries on the next
//! [`WindowSystem::present_frame`], the same way raylib refreshes its input
//! state inside `EndDrawing`. Every texture, image, font and shader handed out
//! is tracked so tests can assert that nothing leaks and nothing is released
//! twice.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::ffi::{c_void, CStr};
use std::ptr;

use tracing::{debug, warn};

use super::{
    pixel_formats, InputSource, NativeFont, NativeImage, NativeShader, NativeTexture,
    ResourceDevice, TextureDevice, WindowSystem,
};
use crate::input::Point;

/// Bytes per pixel for the uncompressed native formats
fn native_bytes_per_pixel(format: i32) -> Option<usize> {
    match format {
        1 => Some(1),
        2 | 3 | 5 | 6 => Some(2),
        4 => Some(3),
        7 | 8 => Some(4),
        9 => Some(12),
        10 => Some(16),
        _ => None,
    }
}

/// Byte length of a packed `width x height` image, `None` for bad sizes
fn packed_len(width: i32, height: i32, format: i32) -> Option<usize> {
    if width <= 0 || height <= 0 {
        return None;
    }
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(native_bytes_per_pixel(format)?)
}

/// Texture contents held by the headless backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTexture {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Native pixel format code
    pub format: i32,
    /// Packed pixel bytes
    pub pixels: Vec<u8>,
}

/// Input scripted during a frame, applied on the next present
#[derive(Debug, Default)]
struct StagedInput {
    key_presses: Vec<i32>,
    key_releases: Vec<i32>,
    button_presses: Vec<i32>,
    button_releases: Vec<i32>,
    mouse: Option<Point>,
    chars: Vec<u32>,
    close: bool,
}

#[derive(Debug, Default)]
struct HeadlessState {
    // Window
    window_open: bool,
    title: String,
    cursor_visible: bool,
    size: (i32, i32),
    target_fps: i32,
    frames_presented: u64,

    // Input visible this frame
    keys_down: BTreeSet<i32>,
    keys_pressed: BTreeSet<i32>,
    keys_released: BTreeSet<i32>,
    buttons_down: BTreeSet<i32>,
    buttons_pressed: BTreeSet<i32>,
    buttons_released: BTreeSet<i32>,
    mouse: Point,
    chars: VecDeque<u32>,
    close_requested: bool,
    staged: StagedInput,

    // Resources
    next_id: u32,
    files: HashMap<String, StoredTexture>,
    font_files: HashSet<String>,
    shader_files: HashSet<String>,
    textures: HashMap<u32, StoredTexture>,
    images: HashMap<usize, Vec<u8>>,
    fonts: HashSet<u32>,
    shaders: HashSet<u32>,
    active_shader: Option<u32>,
    double_releases: u32,
}

impl HeadlessState {
    fn allocate_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn store_texture(&mut self, stored: StoredTexture) -> NativeTexture {
        let id = self.allocate_id();
        let texture = NativeTexture {
            id,
            width: stored.width,
            height: stored.height,
            mipmaps: 1,
            format: stored.format,
        };
        self.textures.insert(id, stored);
        texture
    }

    fn apply_staged_input(&mut self) {
        let staged = std::mem::take(&mut self.staged);

        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();

        for key in staged.key_presses {
            self.keys_down.insert(key);
            self.keys_pressed.insert(key);
        }
        for key in staged.key_releases {
            self.keys_down.remove(&key);
            self.keys_released.insert(key);
        }
        for button in staged.button_presses {
            self.buttons_down.insert(button);
            self.buttons_pressed.insert(button);
        }
        for button in staged.button_releases {
            self.buttons_down.remove(&button);
            self.buttons_released.insert(button);
        }
        if let Some(point) = staged.mouse {
            self.mouse = point;
        }

        // Unread codepoints from the previous frame are discarded
        self.chars = staged.chars.into_iter().collect();
        self.close_requested |= staged.close;
    }
}

/// Scriptable in-memory native backend
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    state: RefCell<HeadlessState>,
}

impl HeadlessBackend {
    /// Create a backend with no window and no pending input
    pub fn new() -> Self {
        let backend = Self::default();
        backend.state.borrow_mut().cursor_visible = true;
        backend
    }

    // -------------------------------------------------------------------------
    // Input scripting (visible after the next present_frame)
    // -------------------------------------------------------------------------

    /// Press a key using its native code
    pub fn press_key(&self, key: i32) {
        self.state.borrow_mut().staged.key_presses.push(key);
    }

    /// Release a key using its native code
    pub fn release_key(&self, key: i32) {
        self.state.borrow_mut().staged.key_releases.push(key);
    }

    /// Press a mouse button using its native code
    pub fn press_button(&self, button: i32) {
        self.state.borrow_mut().staged.button_presses.push(button);
    }

    /// Release a mouse button using its native code
    pub fn release_button(&self, button: i32) {
        self.state.borrow_mut().staged.button_releases.push(button);
    }

    /// Move the pointer
    pub fn move_mouse(&self, point: Point) {
        self.state.borrow_mut().staged.mouse = Some(point);
    }

    /// Type a character
    pub fn type_char(&self, c: char) {
        self.type_codepoint(c as u32);
    }

    /// Type a raw codepoint (may be invalid, e.g. a lone surrogate)
    pub fn type_codepoint(&self, codepoint: u32) {
        self.state.borrow_mut().staged.chars.push(codepoint);
    }

    /// Ask the window to close
    pub fn request_close(&self) {
        self.state.borrow_mut().staged.close = true;
    }

    // -------------------------------------------------------------------------
    // Resource scripting
    // -------------------------------------------------------------------------

    /// Make an image file loadable through [`TextureDevice::load_texture`]
    ///
    /// Returns `false` and registers nothing when the size or format is not
    /// a valid uncompressed image, or `pixels` is shorter than its packed size.
    pub fn register_texture_file(
        &self,
        path: impl Into<String>,
        width: i32,
        height: i32,
        format: i32,
        mut pixels: Vec<u8>,
    ) -> bool {
        let path = path.into();
        let Some(expected) = packed_len(width, height, format) else {
            warn!("Headless file {} rejected: {}x{} format {}", path, width, height, format);
            return false;
        };
        if pixels.len() < expected {
            warn!(
                "Headless file {} rejected: {} bytes for {}x{} format {}",
                path,
                pixels.len(),
                width,
                height,
                format
            );
            return false;
        }

        pixels.truncate(expected);
        self.state.borrow_mut().files.insert(
            path,
            StoredTexture {
                width,
                height,
                format,
                pixels,
            },
        );
        true
    }

    /// Make a font file loadable through [`ResourceDevice::load_font`]
    pub fn register_font_file(&self, path: impl Into<String>) {
        self.state.borrow_mut().font_files.insert(path.into());
    }

    /// Make a shader source loadable through [`ResourceDevice::load_shader`]
    pub fn register_shader_file(&self, path: impl Into<String>) {
        self.state.borrow_mut().shader_files.insert(path.into());
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    /// Contents of a live texture
    pub fn texture(&self, id: u32) -> Option<StoredTexture> {
        self.state.borrow().textures.get(&id).cloned()
    }

    /// Number of live textures (font atlases excluded)
    pub fn live_textures(&self) -> usize {
        self.state.borrow().textures.len()
    }

    /// Number of read-back images not yet released
    pub fn live_images(&self) -> usize {
        self.state.borrow().images.len()
    }

    /// Number of live fonts
    pub fn live_fonts(&self) -> usize {
        self.state.borrow().fonts.len()
    }

    /// Number of live shaders
    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    /// Number of release calls for handles that were not live
    pub fn double_releases(&self) -> u32 {
        self.state.borrow().double_releases
    }

    /// Shader currently bound by `begin_shader_mode`
    pub fn active_shader(&self) -> Option<u32> {
        self.state.borrow().active_shader
    }

    /// Frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.state.borrow().frames_presented
    }

    /// Whether the window is open
    pub fn is_window_open(&self) -> bool {
        self.state.borrow().window_open
    }

    /// Current window title
    pub fn window_title(&self) -> String {
        self.state.borrow().title.clone()
    }

    /// Whether the cursor is shown
    pub fn cursor_visible(&self) -> bool {
        self.state.borrow().cursor_visible
    }

    /// Target frame rate last requested
    pub fn target_fps(&self) -> i32 {
        self.state.borrow().target_fps
    }
}

impl InputSource for HeadlessBackend {
    fn is_key_down(&self, key: i32) -> bool {
        self.state.borrow().keys_down.contains(&key)
    }

    fn is_key_pressed(&self, key: i32) -> bool {
        self.state.borrow().keys_pressed.contains(&key)
    }

    fn is_key_released(&self, key: i32) -> bool {
        self.state.borrow().keys_released.contains(&key)
    }

    fn is_mouse_button_down(&self, button: i32) -> bool {
        self.state.borrow().buttons_down.contains(&button)
    }

    fn is_mouse_button_pressed(&self, button: i32) -> bool {
        self.state.borrow().buttons_pressed.contains(&button)
    }

    fn is_mouse_button_released(&self, button: i32) -> bool {
        self.state.borrow().buttons_released.contains(&button)
    }

    fn mouse_position(&self) -> Point {
        self.state.borrow().mouse
    }

    fn next_char(&self) -> Option<u32> {
        self.state.borrow_mut().chars.pop_front()
    }
}

impl TextureDevice for HeadlessBackend {
    fn load_texture(&self, path: &CStr) -> Option<NativeTexture> {
        let mut state = self.state.borrow_mut();
        let stored = state.files.get(path.to_str().ok()?).cloned()?;
        Some(state.store_texture(stored))
    }

    fn load_texture_from_pixels(
        &self,
        width: i32,
        height: i32,
        format: i32,
        pixels: &[u8],
    ) -> Option<NativeTexture> {
        let expected = packed_len(width, height, format)?;
        if pixels.len() < expected {
            warn!(
                "Headless upload rejected: {} bytes for {}x{} format {}",
                pixels.len(),
                width,
                height,
                format
            );
            return None;
        }

        let stored = StoredTexture {
            width,
            height,
            format,
            pixels: pixels[..expected].to_vec(),
        };
        Some(self.state.borrow_mut().store_texture(stored))
    }

    fn unload_texture(&self, texture: NativeTexture) {
        let mut state = self.state.borrow_mut();
        if state.textures.remove(&texture.id).is_none() {
            warn!("Headless texture {} released twice", texture.id);
            state.double_releases += 1;
        }
    }

    fn load_image_from_texture(&self, texture: &NativeTexture) -> Option<NativeImage> {
        let mut state = self.state.borrow_mut();
        let stored = state.textures.get(&texture.id)?.clone();

        // The image must cover every byte its size and format promise
        let expected = packed_len(stored.width, stored.height, stored.format)?;
        if stored.pixels.len() < expected {
            warn!(
                "Headless texture {} holds {} bytes, {} expected",
                texture.id,
                stored.pixels.len(),
                expected
            );
            return None;
        }

        let mut data = Vec::with_capacity(stored.pixels.len().max(1));
        data.extend_from_slice(&stored.pixels);
        let ptr = data.as_mut_ptr() as *mut c_void;
        state.images.insert(ptr as usize, data);

        Some(NativeImage {
            data: ptr,
            width: stored.width,
            height: stored.height,
            mipmaps: 1,
            format: stored.format,
        })
    }

    fn unload_image(&self, image: NativeImage) {
        let mut state = self.state.borrow_mut();
        if state.images.remove(&(image.data as usize)).is_none() {
            warn!("Headless image {:p} released twice", image.data);
            state.double_releases += 1;
        }
    }
}

impl ResourceDevice for HeadlessBackend {
    fn load_font(&self, path: &CStr) -> Option<NativeFont> {
        let mut state = self.state.borrow_mut();
        if !state.font_files.contains(path.to_str().ok()?) {
            return None;
        }

        let id = state.allocate_id();
        state.fonts.insert(id);
        Some(NativeFont {
            base_size: 32,
            glyph_count: 95,
            glyph_padding: 4,
            texture: NativeTexture {
                id,
                width: 512,
                height: 512,
                mipmaps: 1,
                format: pixel_formats::UNCOMPRESSED_GRAY_ALPHA,
            },
            recs: ptr::null_mut(),
            glyphs: ptr::null_mut(),
        })
    }

    fn unload_font(&self, font: NativeFont) {
        let mut state = self.state.borrow_mut();
        if !state.fonts.remove(&font.texture.id) {
            state.double_releases += 1;
        }
    }

    fn measure_text(
        &self,
        _font: Option<&NativeFont>,
        text: &CStr,
        size: f32,
        spacing: f32,
    ) -> (f32, f32) {
        // Fixed advance of half the font size per character
        let count = text.to_string_lossy().chars().count();
        if count == 0 {
            return (0.0, size);
        }
        let width = count as f32 * size / 2.0 + (count - 1) as f32 * spacing;
        (width, size)
    }

    fn load_shader(
        &self,
        vs_path: Option<&CStr>,
        fs_path: Option<&CStr>,
    ) -> Option<NativeShader> {
        let mut state = self.state.borrow_mut();
        for path in [vs_path, fs_path].into_iter().flatten() {
            if !state.shader_files.contains(path.to_str().ok()?) {
                return None;
            }
        }

        let id = state.allocate_id();
        state.shaders.insert(id);
        Some(NativeShader {
            id,
            locs: ptr::null_mut(),
        })
    }

    fn unload_shader(&self, shader: NativeShader) {
        let mut state = self.state.borrow_mut();
        if !state.shaders.remove(&shader.id) {
            state.double_releases += 1;
        }
    }

    fn begin_shader_mode(&self, shader: &NativeShader) {
        self.state.borrow_mut().active_shader = Some(shader.id);
    }

    fn end_shader_mode(&self) {
        self.state.borrow_mut().active_shader = None;
    }
}

impl WindowSystem for HeadlessBackend {
    fn open_window(&self, width: i32, height: i32, title: &CStr) -> bool {
        let mut state = self.state.borrow_mut();
        if state.window_open || width <= 0 || height <= 0 {
            return false;
        }
        state.window_open = true;
        state.size = (width, height);
        state.title = title.to_string_lossy().into_owned();
        debug!("Headless window opened: {}x{}", width, height);
        true
    }

    fn close_window(&self) {
        let mut state = self.state.borrow_mut();
        state.window_open = false;

        // GPU resources go away with the context
        let freed = state.textures.len() + state.fonts.len() + state.shaders.len();
        state.textures.clear();
        state.fonts.clear();
        state.shaders.clear();
        state.active_shader = None;
        if freed > 0 {
            debug!("Headless context closed with {} live resources", freed);
        }
    }

    fn set_window_title(&self, title: &CStr) {
        self.state.borrow_mut().title = title.to_string_lossy().into_owned();
    }

    fn set_cursor_visible(&self, visible: bool) {
        self.state.borrow_mut().cursor_visible = visible;
    }

    fn render_size(&self) -> (i32, i32) {
        self.state.borrow().size
    }

    fn set_target_fps(&self, fps: i32) {
        self.state.borrow_mut().target_fps = fps;
    }

    fn begin_frame(&self) {}

    fn present_frame(&self) {
        let mut state = self.state.borrow_mut();
        state.frames_presented += 1;
        state.apply_staged_input();
    }

    fn should_close(&self) -> bool {
        self.state.borrow().close_requested
    }

    fn set_mouse_position(&self, point: Point) {
        self.state.borrow_mut().mouse = point;
    }
}

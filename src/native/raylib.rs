//! raylib Backend
//!
//! Forwards every native trait to the system raylib. raylib keeps a single
//! global window and GL context bound to the thread that opened it, so the
//! backend is neither `Send` nor `Sync`.

#![allow(unsafe_code)]

use std::ffi::{c_void, CStr};
use std::marker::PhantomData;
use std::ptr;

use tracing::{debug, warn};

use super::ffi;
use super::{
    InputSource, NativeFont, NativeImage, NativeShader, NativeTexture, ResourceDevice,
    TextureDevice, WindowSystem,
};
use crate::input::Point;

/// Backend linking the system raylib
#[derive(Debug, Default)]
pub struct RaylibBackend {
    _not_send: PhantomData<*const ()>,
}

impl RaylibBackend {
    /// Create the backend. No native call happens until a window is opened.
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for RaylibBackend {
    fn is_key_down(&self, key: i32) -> bool {
        unsafe { ffi::IsKeyDown(key) }
    }

    fn is_key_pressed(&self, key: i32) -> bool {
        unsafe { ffi::IsKeyPressed(key) }
    }

    fn is_key_released(&self, key: i32) -> bool {
        unsafe { ffi::IsKeyReleased(key) }
    }

    fn is_mouse_button_down(&self, button: i32) -> bool {
        unsafe { ffi::IsMouseButtonDown(button) }
    }

    fn is_mouse_button_pressed(&self, button: i32) -> bool {
        unsafe { ffi::IsMouseButtonPressed(button) }
    }

    fn is_mouse_button_released(&self, button: i32) -> bool {
        unsafe { ffi::IsMouseButtonReleased(button) }
    }

    fn mouse_position(&self) -> Point {
        let position = unsafe { ffi::GetMousePosition() };
        Point::from_native(position.x, position.y)
    }

    fn next_char(&self) -> Option<u32> {
        match unsafe { ffi::GetCharPressed() } {
            0 => None,
            codepoint => Some(codepoint as u32),
        }
    }
}

impl TextureDevice for RaylibBackend {
    fn load_texture(&self, path: &CStr) -> Option<NativeTexture> {
        let texture = unsafe { ffi::LoadTexture(path.as_ptr()) };
        (texture.id != 0).then_some(texture)
    }

    fn load_texture_from_pixels(
        &self,
        width: i32,
        height: i32,
        format: i32,
        pixels: &[u8],
    ) -> Option<NativeTexture> {
        // raylib only reads from the image during upload
        let image = NativeImage {
            data: pixels.as_ptr() as *mut c_void,
            width,
            height,
            mipmaps: 1,
            format,
        };
        let texture = unsafe { ffi::LoadTextureFromImage(image) };
        (texture.id != 0).then_some(texture)
    }

    fn unload_texture(&self, texture: NativeTexture) {
        unsafe { ffi::UnloadTexture(texture) }
    }

    fn load_image_from_texture(&self, texture: &NativeTexture) -> Option<NativeImage> {
        let image = unsafe { ffi::LoadImageFromTexture(*texture) };
        if image.data.is_null() {
            warn!("Read-back of texture {} returned no data", texture.id);
            return None;
        }
        Some(image)
    }

    fn unload_image(&self, image: NativeImage) {
        unsafe { ffi::UnloadImage(image) }
    }
}

impl ResourceDevice for RaylibBackend {
    fn load_font(&self, path: &CStr) -> Option<NativeFont> {
        let font = unsafe { ffi::LoadFont(path.as_ptr()) };
        if !unsafe { ffi::IsFontReady(font) } {
            return None;
        }

        // A failed load falls back to the default font, which must not be
        // unloaded by the caller.
        let default = unsafe { ffi::GetFontDefault() };
        if font.texture.id == default.texture.id {
            debug!("Font load fell back to the default font");
            return None;
        }
        Some(font)
    }

    fn unload_font(&self, font: NativeFont) {
        unsafe { ffi::UnloadFont(font) }
    }

    fn measure_text(
        &self,
        font: Option<&NativeFont>,
        text: &CStr,
        size: f32,
        spacing: f32,
    ) -> (f32, f32) {
        let font = match font {
            Some(font) => *font,
            None => unsafe { ffi::GetFontDefault() },
        };
        let size = unsafe { ffi::MeasureTextEx(font, text.as_ptr(), size, spacing) };
        (size.x, size.y)
    }

    fn load_shader(
        &self,
        vs_path: Option<&CStr>,
        fs_path: Option<&CStr>,
    ) -> Option<NativeShader> {
        let vs = vs_path.map_or(ptr::null(), CStr::as_ptr);
        let fs = fs_path.map_or(ptr::null(), CStr::as_ptr);
        let shader = unsafe { ffi::LoadShader(vs, fs) };
        unsafe { ffi::IsShaderReady(shader) }.then_some(shader)
    }

    fn unload_shader(&self, shader: NativeShader) {
        unsafe { ffi::UnloadShader(shader) }
    }

    fn begin_shader_mode(&self, shader: &NativeShader) {
        unsafe { ffi::BeginShaderMode(*shader) }
    }

    fn end_shader_mode(&self) {
        unsafe { ffi::EndShaderMode() }
    }
}

impl WindowSystem for RaylibBackend {
    fn open_window(&self, width: i32, height: i32, title: &CStr) -> bool {
        if width <= 0 || height <= 0 {
            return false;
        }
        unsafe {
            ffi::InitWindow(width, height, title.as_ptr());
            ffi::IsWindowReady()
        }
    }

    fn close_window(&self) {
        unsafe { ffi::CloseWindow() }
    }

    fn set_window_title(&self, title: &CStr) {
        unsafe { ffi::SetWindowTitle(title.as_ptr()) }
    }

    fn set_cursor_visible(&self, visible: bool) {
        unsafe {
            if visible {
                ffi::ShowCursor();
            } else {
                ffi::HideCursor();
            }
        }
    }

    fn render_size(&self) -> (i32, i32) {
        unsafe { (ffi::GetRenderWidth(), ffi::GetRenderHeight()) }
    }

    fn set_target_fps(&self, fps: i32) {
        unsafe { ffi::SetTargetFPS(fps) }
    }

    fn begin_frame(&self) {
        unsafe { ffi::BeginDrawing() }
    }

    fn present_frame(&self) {
        unsafe { ffi::EndDrawing() }
    }

    fn should_close(&self) -> bool {
        unsafe { ffi::WindowShouldClose() }
    }

    fn set_mouse_position(&self, point: Point) {
        unsafe { ffi::SetMousePosition(point.x, point.y) }
    }
}

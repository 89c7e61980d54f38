//! raylib FFI Bindings
//!
//! Raw declarations for the subset of the raylib 4.5 C API this crate calls.
//! Struct layouts are the `#[repr(C)]` handles from [`super`].

#![allow(unsafe_code)]
#![allow(missing_docs)]

use std::ffi::c_char;

use super::{NativeFont, NativeImage, NativeShader, NativeTexture};

/// raylib `Vector2`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

#[link(name = "raylib")]
extern "C" {
    // Window
    pub fn InitWindow(width: i32, height: i32, title: *const c_char);
    pub fn CloseWindow();
    pub fn IsWindowReady() -> bool;
    pub fn WindowShouldClose() -> bool;
    pub fn SetWindowTitle(title: *const c_char);
    pub fn ShowCursor();
    pub fn HideCursor();
    pub fn GetRenderWidth() -> i32;
    pub fn GetRenderHeight() -> i32;
    pub fn SetTargetFPS(fps: i32);
    pub fn BeginDrawing();
    pub fn EndDrawing();

    // Keyboard
    pub fn IsKeyDown(key: i32) -> bool;
    pub fn IsKeyPressed(key: i32) -> bool;
    pub fn IsKeyReleased(key: i32) -> bool;
    pub fn GetCharPressed() -> i32;

    // Mouse
    pub fn IsMouseButtonDown(button: i32) -> bool;
    pub fn IsMouseButtonPressed(button: i32) -> bool;
    pub fn IsMouseButtonReleased(button: i32) -> bool;
    pub fn GetMousePosition() -> Vector2;
    pub fn SetMousePosition(x: i32, y: i32);

    // Textures and images
    pub fn LoadTexture(file_name: *const c_char) -> NativeTexture;
    pub fn LoadTextureFromImage(image: NativeImage) -> NativeTexture;
    pub fn UnloadTexture(texture: NativeTexture);
    pub fn LoadImageFromTexture(texture: NativeTexture) -> NativeImage;
    pub fn UnloadImage(image: NativeImage);

    // Fonts and text
    pub fn LoadFont(file_name: *const c_char) -> NativeFont;
    pub fn IsFontReady(font: NativeFont) -> bool;
    pub fn UnloadFont(font: NativeFont);
    pub fn GetFontDefault() -> NativeFont;
    pub fn MeasureTextEx(
        font: NativeFont,
        text: *const c_char,
        font_size: f32,
        spacing: f32,
    ) -> Vector2;

    // Shaders
    pub fn LoadShader(vs_file_name: *const c_char, fs_file_name: *const c_char) -> NativeShader;
    pub fn IsShaderReady(shader: NativeShader) -> bool;
    pub fn UnloadShader(shader: NativeShader);
    pub fn BeginShaderMode(shader: NativeShader);
    pub fn EndShaderMode();
}

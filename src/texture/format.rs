//! Pixel Encodings

use crate::native::pixel_formats::{
    UNCOMPRESSED_GRAY_ALPHA, UNCOMPRESSED_R8G8B8, UNCOMPRESSED_R8G8B8A8,
};

/// Byte layout of a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit gray then 8-bit alpha
    GrayAlpha,
    /// 8-bit red, green, blue
    Rgb,
    /// 8-bit red, green, blue, alpha
    Rgba,
}

impl PixelFormat {
    /// Bytes per pixel
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::GrayAlpha => 2,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }

    /// Map a native pixel format code. `None` for every other encoding.
    pub fn from_native(code: i32) -> Option<Self> {
        match code {
            UNCOMPRESSED_GRAY_ALPHA => Some(PixelFormat::GrayAlpha),
            UNCOMPRESSED_R8G8B8 => Some(PixelFormat::Rgb),
            UNCOMPRESSED_R8G8B8A8 => Some(PixelFormat::Rgba),
            _ => None,
        }
    }

    /// Native pixel format code
    pub const fn to_native(self) -> i32 {
        match self {
            PixelFormat::GrayAlpha => UNCOMPRESSED_GRAY_ALPHA,
            PixelFormat::Rgb => UNCOMPRESSED_R8G8B8,
            PixelFormat::Rgba => UNCOMPRESSED_R8G8B8A8,
        }
    }

    /// Expand one pixel of this format to RGBA
    #[inline]
    pub fn to_rgba(self, px: &[u8]) -> [u8; 4] {
        match self {
            PixelFormat::GrayAlpha => [px[0], px[0], px[0], px[1]],
            PixelFormat::Rgb => [px[0], px[1], px[2], 0xFF],
            PixelFormat::Rgba => [px[0], px[1], px[2], px[3]],
        }
    }
}

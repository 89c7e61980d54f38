//! Texture Pixel-Format Marshaling
//!
//! Conversion between CPU pixel buffers in several encodings and GPU
//! textures owned by the native library.
//!
//! | Encoding   | Bytes/px | Upload        | Read-back   |
//! |------------|----------|---------------|-------------|
//! | Gray+Alpha | 2        | slow path     | expanded    |
//! | RGB        | 3        | slow path     | expanded    |
//! | RGBA       | 4        | fast if packed| copied      |
//! | other      | -        | n/a           | error       |

pub mod buffer;
pub mod error;
pub mod format;
pub mod marshal;

pub use buffer::{PixelBuffer, PixelView};
pub use error::{Result, TextureError};
pub use format::PixelFormat;
pub use marshal::{expand_to_rgba, normalize_to_rgba, Texture};

//! Fonts, Shaders and Text
//!
//! Thin owners of native resources. Each handle releases its native resource
//! exactly once, on drop or on an explicit consuming `release`.

pub mod error;
pub mod font;
pub mod shader;
pub mod text;

pub use error::{ResourceError, Result};
pub use font::Font;
pub use shader::{Shader, ShaderMode};
pub use text::{Color, Text, TextConfig, DEFAULT_FONT_SIZE, DEFAULT_SPACING};

//! Texture Marshaling Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for texture operations
pub type Result<T> = std::result::Result<T, TextureError>;

/// Texture module error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// Read-back reported an encoding this crate cannot expand
    #[error("Unsupported pixel format: {0}")]
    UnsupportedPixelFormat(i32),

    /// Native image load failed
    #[error("Failed to load texture: {}", .0.display())]
    LoadFailed(PathBuf),

    /// Native texture creation from pixels failed
    #[error("Failed to upload {width}x{height} texture")]
    UploadFailed {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },

    /// Native read-back returned no image
    #[error("Failed to read back texture {0}")]
    ReadbackFailed(u32),

    /// Buffer geometry does not fit the data
    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),

    /// Window owning the GL context has been closed
    #[error("Native context closed")]
    ContextClosed,

    /// Path cannot be passed to the native library
    #[error("Invalid texture path: {}", .0.display())]
    InvalidPath(PathBuf),
}

//! Font and Shader Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for resource operations
pub type Result<T> = std::result::Result<T, ResourceError>;

/// Resource module error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// Native font load failed
    #[error("Failed to load font: {}", .0.display())]
    FontLoadFailed(PathBuf),

    /// Native shader compile or link failed
    #[error("Failed to load shader (vertex: {vertex:?}, fragment: {fragment:?})")]
    ShaderLoadFailed {
        /// Vertex stage source, `None` for the default stage
        vertex: Option<PathBuf>,
        /// Fragment stage source, `None` for the default stage
        fragment: Option<PathBuf>,
    },

    /// Window owning the GL context has been closed
    #[error("Native context closed")]
    ContextClosed,

    /// String cannot be passed to the native library
    #[error("Invalid string for native call: {0:?}")]
    InvalidString(String),
}

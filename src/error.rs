//! Crate Error Types
//!
//! Each module has its own error enum. [`Error`] wraps them for callers that
//! want a single type, and classifies every failure so hosts can decide
//! between skipping and propagating.

use thiserror::Error;

use crate::input::InputError;
use crate::resources::ResourceError;
use crate::texture::TextureError;
use crate::window::WindowError;

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Any error produced by this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input translation error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Texture marshaling error
    #[error(transparent)]
    Texture(#[from] TextureError),

    /// Font or shader error
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Window lifecycle error
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Native code with no translation (recoverable)
    UnmappedInput,
    /// Read-back encoding outside the supported set
    UnsupportedPixelFormat,
    /// Texture, font, shader or window failed to load
    ResourceLoadFailure,
    /// Invalid argument from the caller
    Usage,
}

/// What to do after an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryAction {
    /// Log and continue
    Skip,
    /// Return the error to the caller
    Propagate,
}

impl Error {
    /// Classify the error
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Input(e) => match e {
                InputError::UnmappedKey(_)
                | InputError::ModifierKey { .. }
                | InputError::UnmappedButton(_)
                | InputError::InvalidCodepoint(_) => ErrorClass::UnmappedInput,
                InputError::UnknownKey(_) | InputError::UnknownButton(_) => ErrorClass::Usage,
            },

            Error::Texture(e) => match e {
                TextureError::UnsupportedPixelFormat(_) => ErrorClass::UnsupportedPixelFormat,
                TextureError::LoadFailed(_)
                | TextureError::UploadFailed { .. }
                | TextureError::ReadbackFailed(_) => ErrorClass::ResourceLoadFailure,
                TextureError::InvalidBuffer(_)
                | TextureError::InvalidPath(_)
                | TextureError::ContextClosed => ErrorClass::Usage,
            },

            Error::Resource(e) => match e {
                ResourceError::FontLoadFailed(_) | ResourceError::ShaderLoadFailed { .. } => {
                    ErrorClass::ResourceLoadFailure
                }
                ResourceError::InvalidString(_) | ResourceError::ContextClosed => ErrorClass::Usage,
            },

            Error::Window(e) => match e {
                WindowError::OpenFailed { .. } => ErrorClass::ResourceLoadFailure,
                WindowError::InvalidString(_) => ErrorClass::Usage,
            },
        }
    }

    /// Determine recovery action for the error
    pub fn recovery_action(&self) -> RecoveryAction {
        match self.class() {
            ErrorClass::UnmappedInput => RecoveryAction::Skip,
            ErrorClass::UnsupportedPixelFormat
            | ErrorClass::ResourceLoadFailure
            | ErrorClass::Usage => RecoveryAction::Propagate,
        }
    }
}

//! Input Translation Error Types
//!
//! Every variant here is recoverable: the collector logs it and skips the
//! offending native code for that frame.

use thiserror::Error;

use crate::input::keyboard::Modifier;

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Input module error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Native key code with no semantic key
    #[error("Unmapped native key code: {0}")]
    UnmappedKey(i32),

    /// Native key code belonging to a modifier key
    #[error("Native key code {code} is a {modifier:?} modifier key")]
    ModifierKey {
        /// Native key code
        code: i32,
        /// Modifier the key contributes to
        modifier: Modifier,
    },

    /// Native mouse button code with no semantic button
    #[error("Unmapped native mouse button: {0}")]
    UnmappedButton(i32),

    /// Typed codepoint outside the Unicode scalar range
    #[error("Invalid typed codepoint: U+{0:04X}")]
    InvalidCodepoint(u32),

    /// Key name not recognized
    #[error("Unknown key name: {0}")]
    UnknownKey(String),

    /// Mouse button name not recognized
    #[error("Unknown mouse button name: {0}")]
    UnknownButton(String),
}

impl InputError {
    /// Whether the collector should log this at warn level
    ///
    /// Modifier keys are part of normal operation and only traced.
    pub fn is_warning(&self) -> bool {
        !matches!(self, InputError::ModifierKey { .. })
    }
}

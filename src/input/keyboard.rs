//! Keyboard Keys and Modifiers
//!
//! Semantic key identifiers independent of the native key codes, plus the
//! composite modifier bitmask carried by key and mouse button events.

use std::fmt;
use std::str::FromStr;

use enumflags2::{bitflags, BitFlags};

use crate::input::error::InputError;
use crate::input::mapper::KEY_TABLE;

/// Physical keyboard key
///
/// Modifier keys (left/right Shift, Control, Alt, Super) are deliberately
/// absent. Their state is reported through [`Modifiers`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    // Digits
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,

    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Punctuation
    GraveAccent,
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Apostrophe,
    Period,
    Comma,
    Slash,
    Space,
    Tab,

    // Function keys
    Escape,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    PrintScreen,
    ScrollLock,
    Pause,

    // Navigation and editing
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Backspace,
    CapsLock,
    Enter,
    Menu,
    Up,
    Down,
    Left,
    Right,

    // Numeric keypad
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpAdd,
    KpDecimal,
    KpDivide,
    KpEnter,
    KpEqual,
    KpMultiply,
    KpSubtract,
    NumLock,
}

impl Key {
    /// Every key with a native mapping, in table order
    pub fn all() -> impl Iterator<Item = Key> {
        KEY_TABLE.iter().map(|&(key, _)| key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Key {
    type Err = InputError;

    /// Parse a key by its variant name, ignoring ASCII case ("Escape", "kp5")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::all()
            .find(|key| key.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputError::UnknownKey(s.to_string()))
    }
}

/// Keyboard modifier
///
/// The discriminants are the bit positions in [`Modifiers`].
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Left or right Shift
    Shift = 0b0001,
    /// Left or right Control
    Control = 0b0010,
    /// Left or right Alt
    Alt = 0b0100,
    /// Left or right Super ("windows key")
    Super = 0b1000,
}

/// Composite modifier bitmask
pub type Modifiers = BitFlags<Modifier>;

//! Native Code Translation Tables
//!
//! Forward tables (semantic → native) are the single source of truth. The
//! reverse lookups are built from them by [`InputTables::build`], so the two
//! directions cannot drift apart.

use std::collections::HashMap;

use crate::input::error::{InputError, Result};
use crate::input::keyboard::{Key, Modifier, Modifiers};
use crate::input::mouse::MouseButton;
use crate::native::InputSource;

/// Native keyboard key codes (raylib `KeyboardKey`)
pub mod keycodes {
    // Alphanumeric keys
    pub const KEY_APOSTROPHE: i32 = 39;
    pub const KEY_COMMA: i32 = 44;
    pub const KEY_MINUS: i32 = 45;
    pub const KEY_PERIOD: i32 = 46;
    pub const KEY_SLASH: i32 = 47;
    pub const KEY_ZERO: i32 = 48;
    pub const KEY_ONE: i32 = 49;
    pub const KEY_TWO: i32 = 50;
    pub const KEY_THREE: i32 = 51;
    pub const KEY_FOUR: i32 = 52;
    pub const KEY_FIVE: i32 = 53;
    pub const KEY_SIX: i32 = 54;
    pub const KEY_SEVEN: i32 = 55;
    pub const KEY_EIGHT: i32 = 56;
    pub const KEY_NINE: i32 = 57;
    pub const KEY_SEMICOLON: i32 = 59;
    pub const KEY_EQUAL: i32 = 61;
    pub const KEY_A: i32 = 65;
    pub const KEY_B: i32 = 66;
    pub const KEY_C: i32 = 67;
    pub const KEY_D: i32 = 68;
    pub const KEY_E: i32 = 69;
    pub const KEY_F: i32 = 70;
    pub const KEY_G: i32 = 71;
    pub const KEY_H: i32 = 72;
    pub const KEY_I: i32 = 73;
    pub const KEY_J: i32 = 74;
    pub const KEY_K: i32 = 75;
    pub const KEY_L: i32 = 76;
    pub const KEY_M: i32 = 77;
    pub const KEY_N: i32 = 78;
    pub const KEY_O: i32 = 79;
    pub const KEY_P: i32 = 80;
    pub const KEY_Q: i32 = 81;
    pub const KEY_R: i32 = 82;
    pub const KEY_S: i32 = 83;
    pub const KEY_T: i32 = 84;
    pub const KEY_U: i32 = 85;
    pub const KEY_V: i32 = 86;
    pub const KEY_W: i32 = 87;
    pub const KEY_X: i32 = 88;
    pub const KEY_Y: i32 = 89;
    pub const KEY_Z: i32 = 90;
    pub const KEY_LEFT_BRACKET: i32 = 91;
    pub const KEY_BACKSLASH: i32 = 92;
    pub const KEY_RIGHT_BRACKET: i32 = 93;
    pub const KEY_GRAVE: i32 = 96;

    // Function keys
    pub const KEY_SPACE: i32 = 32;
    pub const KEY_ESCAPE: i32 = 256;
    pub const KEY_ENTER: i32 = 257;
    pub const KEY_TAB: i32 = 258;
    pub const KEY_BACKSPACE: i32 = 259;
    pub const KEY_INSERT: i32 = 260;
    pub const KEY_DELETE: i32 = 261;
    pub const KEY_RIGHT: i32 = 262;
    pub const KEY_LEFT: i32 = 263;
    pub const KEY_DOWN: i32 = 264;
    pub const KEY_UP: i32 = 265;
    pub const KEY_PAGE_UP: i32 = 266;
    pub const KEY_PAGE_DOWN: i32 = 267;
    pub const KEY_HOME: i32 = 268;
    pub const KEY_END: i32 = 269;
    pub const KEY_CAPS_LOCK: i32 = 280;
    pub const KEY_SCROLL_LOCK: i32 = 281;
    pub const KEY_NUM_LOCK: i32 = 282;
    pub const KEY_PRINT_SCREEN: i32 = 283;
    pub const KEY_PAUSE: i32 = 284;
    pub const KEY_F1: i32 = 290;
    pub const KEY_F2: i32 = 291;
    pub const KEY_F3: i32 = 292;
    pub const KEY_F4: i32 = 293;
    pub const KEY_F5: i32 = 294;
    pub const KEY_F6: i32 = 295;
    pub const KEY_F7: i32 = 296;
    pub const KEY_F8: i32 = 297;
    pub const KEY_F9: i32 = 298;
    pub const KEY_F10: i32 = 299;
    pub const KEY_F11: i32 = 300;
    pub const KEY_F12: i32 = 301;
    pub const KEY_LEFT_SHIFT: i32 = 340;
    pub const KEY_LEFT_CONTROL: i32 = 341;
    pub const KEY_LEFT_ALT: i32 = 342;
    pub const KEY_LEFT_SUPER: i32 = 343;
    pub const KEY_RIGHT_SHIFT: i32 = 344;
    pub const KEY_RIGHT_CONTROL: i32 = 345;
    pub const KEY_RIGHT_ALT: i32 = 346;
    pub const KEY_RIGHT_SUPER: i32 = 347;
    pub const KEY_KB_MENU: i32 = 348;

    // Keypad keys
    pub const KEY_KP_0: i32 = 320;
    pub const KEY_KP_1: i32 = 321;
    pub const KEY_KP_2: i32 = 322;
    pub const KEY_KP_3: i32 = 323;
    pub const KEY_KP_4: i32 = 324;
    pub const KEY_KP_5: i32 = 325;
    pub const KEY_KP_6: i32 = 326;
    pub const KEY_KP_7: i32 = 327;
    pub const KEY_KP_8: i32 = 328;
    pub const KEY_KP_9: i32 = 329;
    pub const KEY_KP_DECIMAL: i32 = 330;
    pub const KEY_KP_DIVIDE: i32 = 331;
    pub const KEY_KP_MULTIPLY: i32 = 332;
    pub const KEY_KP_SUBTRACT: i32 = 333;
    pub const KEY_KP_ADD: i32 = 334;
    pub const KEY_KP_ENTER: i32 = 335;
    pub const KEY_KP_EQUAL: i32 = 336;

    // Android keys (not mapped)
    pub const KEY_BACK: i32 = 4;
    pub const KEY_MENU: i32 = 82;
    pub const KEY_VOLUME_UP: i32 = 24;
    pub const KEY_VOLUME_DOWN: i32 = 25;

    /// Lowest code the native edge queries accept
    pub const MIN_KEY_CODE: i32 = 1;
    /// Size of the native key state arrays (`MAX_KEYBOARD_KEYS`)
    pub const MAX_KEY_CODE: i32 = 512;
}

/// Native mouse button codes (raylib `MouseButton`)
pub mod buttons {
    pub const MOUSE_BUTTON_LEFT: i32 = 0;
    pub const MOUSE_BUTTON_RIGHT: i32 = 1;
    pub const MOUSE_BUTTON_MIDDLE: i32 = 2;
    pub const MOUSE_BUTTON_SIDE: i32 = 3;
    pub const MOUSE_BUTTON_EXTRA: i32 = 4;
}

use buttons::{MOUSE_BUTTON_LEFT, MOUSE_BUTTON_MIDDLE, MOUSE_BUTTON_RIGHT};
#[allow(clippy::wildcard_imports)]
use keycodes::*;

/// Semantic key → native key code
pub const KEY_TABLE: &[(Key, i32)] = &[
    (Key::Key0, KEY_ZERO),
    (Key::Key1, KEY_ONE),
    (Key::Key2, KEY_TWO),
    (Key::Key3, KEY_THREE),
    (Key::Key4, KEY_FOUR),
    (Key::Key5, KEY_FIVE),
    (Key::Key6, KEY_SIX),
    (Key::Key7, KEY_SEVEN),
    (Key::Key8, KEY_EIGHT),
    (Key::Key9, KEY_NINE),
    (Key::A, KEY_A),
    (Key::B, KEY_B),
    (Key::C, KEY_C),
    (Key::D, KEY_D),
    (Key::E, KEY_E),
    (Key::F, KEY_F),
    (Key::G, KEY_G),
    (Key::H, KEY_H),
    (Key::I, KEY_I),
    (Key::J, KEY_J),
    (Key::K, KEY_K),
    (Key::L, KEY_L),
    (Key::M, KEY_M),
    (Key::N, KEY_N),
    (Key::O, KEY_O),
    (Key::P, KEY_P),
    (Key::Q, KEY_Q),
    (Key::R, KEY_R),
    (Key::S, KEY_S),
    (Key::T, KEY_T),
    (Key::U, KEY_U),
    (Key::V, KEY_V),
    (Key::W, KEY_W),
    (Key::X, KEY_X),
    (Key::Y, KEY_Y),
    (Key::Z, KEY_Z),
    (Key::GraveAccent, KEY_GRAVE),
    (Key::Minus, KEY_MINUS),
    (Key::Equal, KEY_EQUAL),
    (Key::LeftBracket, KEY_LEFT_BRACKET),
    (Key::RightBracket, KEY_RIGHT_BRACKET),
    (Key::Backslash, KEY_BACKSLASH),
    (Key::Semicolon, KEY_SEMICOLON),
    (Key::Apostrophe, KEY_APOSTROPHE),
    (Key::Period, KEY_PERIOD),
    (Key::Comma, KEY_COMMA),
    (Key::Slash, KEY_SLASH),
    (Key::Space, KEY_SPACE),
    (Key::Tab, KEY_TAB),
    (Key::Escape, KEY_ESCAPE),
    (Key::F1, KEY_F1),
    (Key::F2, KEY_F2),
    (Key::F3, KEY_F3),
    (Key::F4, KEY_F4),
    (Key::F5, KEY_F5),
    (Key::F6, KEY_F6),
    (Key::F7, KEY_F7),
    (Key::F8, KEY_F8),
    (Key::F9, KEY_F9),
    (Key::F10, KEY_F10),
    (Key::F11, KEY_F11),
    (Key::F12, KEY_F12),
    (Key::PrintScreen, KEY_PRINT_SCREEN),
    (Key::ScrollLock, KEY_SCROLL_LOCK),
    (Key::Pause, KEY_PAUSE),
    (Key::Insert, KEY_INSERT),
    (Key::Delete, KEY_DELETE),
    (Key::Home, KEY_HOME),
    (Key::End, KEY_END),
    (Key::PageUp, KEY_PAGE_UP),
    (Key::PageDown, KEY_PAGE_DOWN),
    (Key::Backspace, KEY_BACKSPACE),
    (Key::CapsLock, KEY_CAPS_LOCK),
    (Key::Enter, KEY_ENTER),
    (Key::Menu, KEY_KB_MENU),
    (Key::Up, KEY_UP),
    (Key::Down, KEY_DOWN),
    (Key::Left, KEY_LEFT),
    (Key::Right, KEY_RIGHT),
    (Key::Kp0, KEY_KP_0),
    (Key::Kp1, KEY_KP_1),
    (Key::Kp2, KEY_KP_2),
    (Key::Kp3, KEY_KP_3),
    (Key::Kp4, KEY_KP_4),
    (Key::Kp5, KEY_KP_5),
    (Key::Kp6, KEY_KP_6),
    (Key::Kp7, KEY_KP_7),
    (Key::Kp8, KEY_KP_8),
    (Key::Kp9, KEY_KP_9),
    (Key::KpAdd, KEY_KP_ADD),
    (Key::KpDecimal, KEY_KP_DECIMAL),
    (Key::KpDivide, KEY_KP_DIVIDE),
    (Key::KpEnter, KEY_KP_ENTER),
    (Key::KpEqual, KEY_KP_EQUAL),
    (Key::KpMultiply, KEY_KP_MULTIPLY),
    (Key::KpSubtract, KEY_KP_SUBTRACT),
    (Key::NumLock, KEY_NUM_LOCK),
];

/// Modifier → its left and right physical keys
pub const MODIFIER_TABLE: &[(Modifier, [i32; 2])] = &[
    (Modifier::Shift, [KEY_LEFT_SHIFT, KEY_RIGHT_SHIFT]),
    (Modifier::Control, [KEY_LEFT_CONTROL, KEY_RIGHT_CONTROL]),
    (Modifier::Alt, [KEY_LEFT_ALT, KEY_RIGHT_ALT]),
    (Modifier::Super, [KEY_LEFT_SUPER, KEY_RIGHT_SUPER]),
];

/// Mouse button → native button code
pub const BUTTON_TABLE: &[(MouseButton, i32)] = &[
    (MouseButton::Left, MOUSE_BUTTON_LEFT),
    (MouseButton::Right, MOUSE_BUTTON_RIGHT),
    (MouseButton::Middle, MOUSE_BUTTON_MIDDLE),
];

/// Compute the composite modifier state from continuous key-down queries
///
/// A modifier is set when either of its physical keys is held.
pub fn resolve_modifiers<I: InputSource + ?Sized>(input: &I) -> Modifiers {
    let mut mods = Modifiers::empty();
    for &(modifier, keys) in MODIFIER_TABLE {
        if keys.iter().any(|&key| input.is_key_down(key)) {
            mods.insert(modifier);
        }
    }
    mods
}

/// Bidirectional native code lookups
#[derive(Debug, Clone)]
pub struct InputTables {
    key_from_native: HashMap<i32, Key>,
    native_from_key: HashMap<Key, i32>,
    modifier_from_native: HashMap<i32, Modifier>,
    button_from_native: HashMap<i32, MouseButton>,
    native_from_button: HashMap<MouseButton, i32>,
}

impl InputTables {
    /// Build the lookups by inverting the forward tables
    pub fn build() -> Self {
        let native_from_key: HashMap<Key, i32> = KEY_TABLE.iter().copied().collect();
        let key_from_native = KEY_TABLE.iter().map(|&(key, code)| (code, key)).collect();

        let modifier_from_native = MODIFIER_TABLE
            .iter()
            .flat_map(|&(modifier, keys)| keys.into_iter().map(move |code| (code, modifier)))
            .collect();

        let native_from_button = BUTTON_TABLE.iter().copied().collect();
        let button_from_native = BUTTON_TABLE
            .iter()
            .map(|&(button, code)| (code, button))
            .collect();

        Self {
            key_from_native,
            native_from_key,
            modifier_from_native,
            button_from_native,
            native_from_button,
        }
    }

    /// Translate a native key code
    ///
    /// Modifier keys report [`InputError::ModifierKey`] so callers can skip
    /// them without a warning.
    pub fn translate_key(&self, code: i32) -> Result<Key> {
        if let Some(&key) = self.key_from_native.get(&code) {
            return Ok(key);
        }
        match self.modifier_from_native.get(&code) {
            Some(&modifier) => Err(InputError::ModifierKey { code, modifier }),
            None => Err(InputError::UnmappedKey(code)),
        }
    }

    /// Native code of a key
    pub fn native_key(&self, key: Key) -> Option<i32> {
        self.native_from_key.get(&key).copied()
    }

    /// Modifier a native key code contributes to, if any
    pub fn modifier_for(&self, code: i32) -> Option<Modifier> {
        self.modifier_from_native.get(&code).copied()
    }

    /// Native codes of the physical keys behind a modifier
    pub fn native_modifier_keys(&self, modifier: Modifier) -> [i32; 2] {
        MODIFIER_TABLE
            .iter()
            .find(|&&(m, _)| m == modifier)
            .map(|&(_, keys)| keys)
            .unwrap_or_default()
    }

    /// Translate a native mouse button code
    pub fn translate_button(&self, code: i32) -> Result<MouseButton> {
        self.button_from_native
            .get(&code)
            .copied()
            .ok_or(InputError::UnmappedButton(code))
    }

    /// Native code of a mouse button
    pub fn native_button(&self, button: MouseButton) -> Option<i32> {
        self.native_from_button.get(&button).copied()
    }

    /// Current modifier state, see [`resolve_modifiers`]
    pub fn current_modifiers<I: InputSource + ?Sized>(&self, input: &I) -> Modifiers {
        resolve_modifiers(input)
    }

    /// Number of keys with a mapping
    pub fn mapped_key_count(&self) -> usize {
        self.native_from_key.len()
    }
}

impl Default for InputTables {
    fn default() -> Self {
        Self::build()
    }
}

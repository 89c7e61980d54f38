//! Mouse Buttons and Pointer Coordinates

use std::fmt;
use std::str::FromStr;

use crate::input::error::InputError;

/// Mouse button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

impl MouseButton {
    /// All supported buttons in native code order
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for MouseButton {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(MouseButton::Left),
            "right" => Ok(MouseButton::Right),
            "middle" => Ok(MouseButton::Middle),
            _ => Err(InputError::UnknownButton(s.to_string())),
        }
    }
}

/// Integer coordinate in window pixel space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal offset from the left edge
    pub x: i32,
    /// Vertical offset from the top edge
    pub y: i32,
}

impl Point {
    /// The window origin (top-left corner)
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    /// Create a point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a native floating point position, truncating toward zero
    pub fn from_native(x: f32, y: f32) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_from_str() {
        assert_eq!("Left".parse::<MouseButton>().unwrap(), MouseButton::Left);
        assert_eq!("MIDDLE".parse::<MouseButton>().unwrap(), MouseButton::Middle);
        assert!(matches!(
            "side".parse::<MouseButton>(),
            Err(InputError::UnknownButton(_))
        ));
    }

    #[test]
    fn test_point_from_native_truncates() {
        assert_eq!(Point::from_native(10.9, 20.2), Point::new(10, 20));
        assert_eq!(Point::from_native(-0.5, 3.99), Point::new(0, 3));
        assert_eq!(Point::default(), Point::ORIGIN);
    }
}

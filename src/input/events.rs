//! Discrete Input Events and the Event Queue

use std::collections::VecDeque;

use crate::input::keyboard::{Key, Modifiers};
use crate::input::mouse::{MouseButton, Point};

/// Discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Key went down this frame
    KeyPress {
        /// Key pressed
        key: Key,
        /// Modifiers held during the frame
        modifiers: Modifiers,
    },

    /// Key went up this frame
    KeyRelease {
        /// Key released
        key: Key,
        /// Modifiers held during the frame
        modifiers: Modifiers,
    },

    /// Character produced by the keyboard layout
    TypedChar {
        /// Typed character
        codepoint: char,
    },

    /// Mouse button went down this frame
    MousePress {
        /// Pointer position at the press
        point: Point,
        /// Button pressed
        button: MouseButton,
        /// Modifiers held during the frame
        modifiers: Modifiers,
    },

    /// Mouse button went up this frame
    MouseRelease {
        /// Pointer position at the release
        point: Point,
        /// Button released
        button: MouseButton,
        /// Modifiers held during the frame
        modifiers: Modifiers,
    },

    /// Pointer moved since the previous frame
    MouseMove {
        /// Previous pointer position
        from: Point,
        /// Current pointer position
        to: Point,
    },

    /// Button released away from where it was pressed
    ///
    /// Only produced when drag events are enabled in
    /// [`crate::config::InputConfig`].
    MouseDrag {
        /// Pointer position at the press
        from: Point,
        /// Pointer position at the release
        to: Point,
        /// Button dragged
        button: MouseButton,
        /// Modifiers held during the release frame
        modifiers: Modifiers,
    },

    /// The native window asked to close. Always the last event.
    WindowClose,
}

impl Event {
    /// Modifiers carried by the event, if it has any
    pub fn modifiers(&self) -> Option<Modifiers> {
        match *self {
            Event::KeyPress { modifiers, .. }
            | Event::KeyRelease { modifiers, .. }
            | Event::MousePress { modifiers, .. }
            | Event::MouseRelease { modifiers, .. }
            | Event::MouseDrag { modifiers, .. } => Some(modifiers),
            Event::TypedChar { .. } | Event::MouseMove { .. } | Event::WindowClose => None,
        }
    }

    /// Whether this is the close event
    pub fn is_close(&self) -> bool {
        matches!(self, Event::WindowClose)
    }
}

/// FIFO buffer of events between the collector and the host loop
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Remove the oldest event
    pub fn poll(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are pending
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate pending events without removing them
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}

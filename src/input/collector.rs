//! Frame Event Collector
//!
//! Turns the native polling state of one frame into discrete events. Called
//! exactly once per presented frame, after the native library refreshed its
//! input state and before the host drains the queue.
//!
//! Events of a frame are appended in a fixed order:
//!
//! 1. key presses, ascending native code
//! 2. key releases, ascending native code
//! 3. mouse presses, native button order
//! 4. mouse releases, native button order (each optionally followed by a drag)
//! 5. pointer motion
//! 6. typed characters, in the order the native library reports them

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::config::InputConfig;
use crate::input::error::InputError;
use crate::input::events::{Event, EventQueue};
use crate::input::keyboard::Modifiers;
use crate::input::mapper::buttons::{MOUSE_BUTTON_LEFT, MOUSE_BUTTON_MIDDLE};
use crate::input::mapper::keycodes::{MAX_KEY_CODE, MIN_KEY_CODE};
use crate::input::mapper::InputTables;
use crate::input::mouse::{MouseButton, Point};
use crate::native::InputSource;

/// Collector statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorStats {
    /// Frames collected so far
    pub frames_collected: u64,
    /// Events appended to the queue
    pub events_emitted: u64,
    /// Native codes and codepoints skipped for lack of a translation
    pub unmapped_skipped: u64,
}

/// Polling-to-event translator
#[derive(Debug)]
pub struct FrameEventCollector {
    tables: InputTables,
    config: InputConfig,
    previous_pointer: Point,
    pressed_at: HashMap<MouseButton, Point>,
    stats: CollectorStats,
}

impl FrameEventCollector {
    /// Create a collector with the pointer assumed at the origin
    pub fn new(config: InputConfig) -> Self {
        if !config.scan_limit_valid() {
            warn!(
                "key_scan_limit {} outside {}..={}, clamping",
                config.key_scan_limit, MIN_KEY_CODE, MAX_KEY_CODE
            );
        }
        Self {
            tables: InputTables::build(),
            config,
            previous_pointer: Point::ORIGIN,
            pressed_at: HashMap::new(),
            stats: CollectorStats::default(),
        }
    }

    /// Translation tables in use
    pub fn tables(&self) -> &InputTables {
        &self.tables
    }

    /// Pointer position observed at the last collection
    pub fn previous_pointer(&self) -> Point {
        self.previous_pointer
    }

    /// Statistics since creation
    pub fn stats(&self) -> CollectorStats {
        self.stats
    }

    /// Modifier state right now
    pub fn current_modifiers<I: InputSource + ?Sized>(&self, input: &I) -> Modifiers {
        self.tables.current_modifiers(input)
    }

    /// Collect the events of the current frame into `queue`
    ///
    /// Returns the number of events appended.
    pub fn collect<I: InputSource + ?Sized>(&mut self, input: &I, queue: &mut EventQueue) -> usize {
        let before = queue.len();
        let modifiers = self.current_modifiers(input);

        self.collect_keys(input, queue, modifiers);
        let point = input.mouse_position();
        self.collect_buttons(input, queue, point, modifiers);

        if point != self.previous_pointer {
            queue.push(Event::MouseMove {
                from: self.previous_pointer,
                to: point,
            });
            self.previous_pointer = point;
        }

        self.collect_chars(input, queue);

        let emitted = queue.len() - before;
        self.stats.frames_collected += 1;
        self.stats.events_emitted += emitted as u64;

        if emitted > 0 {
            debug!(
                "Frame {}: {} events collected (modifiers: {:?})",
                self.stats.frames_collected, emitted, modifiers
            );
        }

        emitted
    }

    fn collect_keys<I: InputSource + ?Sized>(
        &mut self,
        input: &I,
        queue: &mut EventQueue,
        modifiers: Modifiers,
    ) {
        // Never query past the native key state arrays
        let limit = self.config.key_scan_limit.clamp(MIN_KEY_CODE, MAX_KEY_CODE);
        let codes = MIN_KEY_CODE..limit;

        for code in codes.clone().filter(|&code| input.is_key_pressed(code)) {
            match self.tables.translate_key(code) {
                Ok(key) => queue.push(Event::KeyPress { key, modifiers }),
                Err(e) => self.skip(&e),
            }
        }

        for code in codes.filter(|&code| input.is_key_released(code)) {
            match self.tables.translate_key(code) {
                Ok(key) => queue.push(Event::KeyRelease { key, modifiers }),
                Err(e) => self.skip(&e),
            }
        }
    }

    fn collect_buttons<I: InputSource + ?Sized>(
        &mut self,
        input: &I,
        queue: &mut EventQueue,
        point: Point,
        modifiers: Modifiers,
    ) {
        let codes = MOUSE_BUTTON_LEFT..=MOUSE_BUTTON_MIDDLE;

        for code in codes.clone().filter(|&code| input.is_mouse_button_pressed(code)) {
            match self.tables.translate_button(code) {
                Ok(button) => {
                    self.pressed_at.insert(button, point);
                    queue.push(Event::MousePress {
                        point,
                        button,
                        modifiers,
                    });
                }
                Err(e) => self.skip(&e),
            }
        }

        for code in codes.filter(|&code| input.is_mouse_button_released(code)) {
            let button = match self.tables.translate_button(code) {
                Ok(button) => button,
                Err(e) => {
                    self.skip(&e);
                    continue;
                }
            };

            queue.push(Event::MouseRelease {
                point,
                button,
                modifiers,
            });

            // Press seen before this collector existed has no origin
            if let Some(from) = self.pressed_at.remove(&button) {
                if self.config.emit_drag_events && from != point {
                    queue.push(Event::MouseDrag {
                        from,
                        to: point,
                        button,
                        modifiers,
                    });
                }
            }
        }
    }

    fn collect_chars<I: InputSource + ?Sized>(&mut self, input: &I, queue: &mut EventQueue) {
        while let Some(raw) = input.next_char() {
            match char::from_u32(raw) {
                Some(codepoint) => queue.push(Event::TypedChar { codepoint }),
                None => self.skip(&InputError::InvalidCodepoint(raw)),
            }
        }
    }

    fn skip(&mut self, error: &InputError) {
        if !error.is_warning() {
            trace!("{}, skipping", error);
            return;
        }

        self.stats.unmapped_skipped += 1;
        if self.config.warn_unmapped {
            warn!("{}, skipping", error);
        } else {
            debug!("{}, skipping", error);
        }
    }
}

impl Default for FrameEventCollector {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keyboard::{Key, Modifier};
    use crate::input::mapper::keycodes::{
        KEY_A, KEY_B, KEY_C, KEY_LEFT_SHIFT, KEY_RIGHT_SHIFT, KEY_VOLUME_UP, KEY_Z,
    };
    use crate::input::mapper::KEY_TABLE;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::collections::{HashSet, VecDeque};

    /// Fixed native state for a single frame
    #[derive(Default)]
    struct Snapshot {
        down: HashSet<i32>,
        pressed: HashSet<i32>,
        released: HashSet<i32>,
        buttons_pressed: HashSet<i32>,
        buttons_released: HashSet<i32>,
        mouse: Point,
        chars: RefCell<VecDeque<u32>>,
    }

    impl InputSource for Snapshot {
        fn is_key_down(&self, key: i32) -> bool {
            self.down.contains(&key)
        }
        fn is_key_pressed(&self, key: i32) -> bool {
            self.pressed.contains(&key)
        }
        fn is_key_released(&self, key: i32) -> bool {
            self.released.contains(&key)
        }
        fn is_mouse_button_down(&self, _button: i32) -> bool {
            false
        }
        fn is_mouse_button_pressed(&self, button: i32) -> bool {
            self.buttons_pressed.contains(&button)
        }
        fn is_mouse_button_released(&self, button: i32) -> bool {
            self.buttons_released.contains(&button)
        }
        fn mouse_position(&self) -> Point {
            self.mouse
        }
        fn next_char(&self) -> Option<u32> {
            self.chars.borrow_mut().pop_front()
        }
    }

    fn drain(queue: &mut EventQueue) -> Vec<Event> {
        std::iter::from_fn(|| queue.poll()).collect()
    }

    #[test]
    fn test_fixed_sub_order() {
        let snapshot = Snapshot {
            down: [KEY_A, KEY_B].into_iter().collect(),
            pressed: [KEY_B, KEY_A].into_iter().collect(),
            released: [KEY_C].into_iter().collect(),
            buttons_pressed: [MOUSE_BUTTON_LEFT].into_iter().collect(),
            mouse: Point::new(10, 20),
            chars: RefCell::new(['x' as u32].into_iter().collect()),
            ..Default::default()
        };

        let mut collector = FrameEventCollector::default();
        let mut queue = EventQueue::new();
        assert_eq!(collector.collect(&snapshot, &mut queue), 6);

        let none = Modifiers::empty();
        assert_eq!(
            drain(&mut queue),
            vec![
                Event::KeyPress {
                    key: Key::A,
                    modifiers: none
                },
                Event::KeyPress {
                    key: Key::B,
                    modifiers: none
                },
                Event::KeyRelease {
                    key: Key::C,
                    modifiers: none
                },
                Event::MousePress {
                    point: Point::new(10, 20),
                    button: MouseButton::Left,
                    modifiers: none
                },
                Event::MouseMove {
                    from: Point::ORIGIN,
                    to: Point::new(10, 20)
                },
                Event::TypedChar { codepoint: 'x' },
            ]
        );
    }

    #[test]
    fn test_modifier_keys_not_reported() {
        let snapshot = Snapshot {
            down: [KEY_LEFT_SHIFT, KEY_RIGHT_SHIFT, KEY_Z].into_iter().collect(),
            pressed: [KEY_LEFT_SHIFT, KEY_Z].into_iter().collect(),
            ..Default::default()
        };

        let mut collector = FrameEventCollector::default();
        let mut queue = EventQueue::new();
        collector.collect(&snapshot, &mut queue);

        assert_eq!(
            drain(&mut queue),
            vec![Event::KeyPress {
                key: Key::Z,
                modifiers: Modifiers::from_flag(Modifier::Shift)
            }]
        );
        // Modifier keys are not counted as unmapped
        assert_eq!(collector.stats().unmapped_skipped, 0);
    }

    #[test]
    fn test_unmapped_key_skipped() {
        let snapshot = Snapshot {
            pressed: [KEY_VOLUME_UP, KEY_A].into_iter().collect(),
            ..Default::default()
        };

        let mut collector = FrameEventCollector::default();
        let mut queue = EventQueue::new();
        collector.collect(&snapshot, &mut queue);

        assert_eq!(queue.len(), 1);
        assert_eq!(collector.stats().unmapped_skipped, 1);
    }

    #[test]
    fn test_invalid_codepoint_skipped() {
        let snapshot = Snapshot {
            chars: RefCell::new([0xD800, 'é' as u32].into_iter().collect()),
            ..Default::default()
        };

        let mut collector = FrameEventCollector::default();
        let mut queue = EventQueue::new();
        collector.collect(&snapshot, &mut queue);

        assert_eq!(drain(&mut queue), vec![Event::TypedChar { codepoint: 'é' }]);
        assert_eq!(collector.stats().unmapped_skipped, 1);
    }

    #[test]
    fn test_scan_limit_bounds_keys() {
        let config = InputConfig {
            key_scan_limit: 256,
            ..Default::default()
        };
        let snapshot = Snapshot {
            // Escape (256) lies outside 1..256
            pressed: [KEY_A, 256].into_iter().collect(),
            ..Default::default()
        };

        let mut collector = FrameEventCollector::new(config);
        let mut queue = EventQueue::new();
        collector.collect(&snapshot, &mut queue);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_scan_limit_capped_at_native_key_count() {
        let config = InputConfig {
            key_scan_limit: 10_000,
            ..Default::default()
        };
        let snapshot = Snapshot {
            pressed: [KEY_A, MAX_KEY_CODE, 600].into_iter().collect(),
            ..Default::default()
        };

        let mut collector = FrameEventCollector::new(config);
        let mut queue = EventQueue::new();
        collector.collect(&snapshot, &mut queue);

        assert_eq!(
            drain(&mut queue),
            vec![Event::KeyPress {
                key: Key::A,
                modifiers: Modifiers::empty()
            }]
        );
        // Codes at or past the cap are never queried, so not even skipped
        assert_eq!(collector.stats().unmapped_skipped, 0);
    }

    #[test]
    fn test_pointer_motion_updates_previous() {
        let mut collector = FrameEventCollector::default();
        let mut queue = EventQueue::new();
        let moved = Snapshot {
            mouse: Point::new(5, 5),
            ..Default::default()
        };

        collector.collect(&moved, &mut queue);
        assert_eq!(collector.previous_pointer(), Point::new(5, 5));
        assert_eq!(queue.len(), 1);

        // Same position next frame: no motion
        collector.collect(&moved, &mut queue);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_drag_after_release() {
        let config = InputConfig {
            emit_drag_events: true,
            ..Default::default()
        };
        let mut collector = FrameEventCollector::new(config);
        let mut queue = EventQueue::new();

        let press = Snapshot {
            buttons_pressed: [MOUSE_BUTTON_LEFT].into_iter().collect(),
            mouse: Point::new(1, 1),
            ..Default::default()
        };
        collector.collect(&press, &mut queue);
        drain(&mut queue);

        let release = Snapshot {
            buttons_released: [MOUSE_BUTTON_LEFT].into_iter().collect(),
            mouse: Point::new(8, 9),
            ..Default::default()
        };
        collector.collect(&release, &mut queue);

        let events = drain(&mut queue);
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::MouseRelease { .. }));
        assert_eq!(
            events[1],
            Event::MouseDrag {
                from: Point::new(1, 1),
                to: Point::new(8, 9),
                button: MouseButton::Left,
                modifiers: Modifiers::empty()
            }
        );
        assert!(matches!(events[2], Event::MouseMove { .. }));
    }

    #[test]
    fn test_no_drag_by_default() {
        let mut collector = FrameEventCollector::default();
        let mut queue = EventQueue::new();

        collector.collect(
            &Snapshot {
                buttons_pressed: [MOUSE_BUTTON_LEFT].into_iter().collect(),
                ..Default::default()
            },
            &mut queue,
        );
        collector.collect(
            &Snapshot {
                buttons_released: [MOUSE_BUTTON_LEFT].into_iter().collect(),
                mouse: Point::new(4, 4),
                ..Default::default()
            },
            &mut queue,
        );

        assert!(drain(&mut queue)
            .iter()
            .all(|event| !matches!(event, Event::MouseDrag { .. })));
    }

    #[test]
    fn test_idle_frame_leaves_queue_empty() {
        let mut collector = FrameEventCollector::default();
        let mut queue = EventQueue::new();
        assert_eq!(collector.collect(&Snapshot::default(), &mut queue), 0);
        assert!(queue.is_empty());
        assert_eq!(collector.stats().frames_collected, 1);
    }

    proptest! {
        #[test]
        fn prop_key_events_ascending(
            pressed in proptest::sample::subsequence(KEY_TABLE.to_vec(), 0..20),
            released in proptest::sample::subsequence(KEY_TABLE.to_vec(), 0..20),
        ) {
            let snapshot = Snapshot {
                pressed: pressed.iter().map(|&(_, code)| code).collect(),
                released: released.iter().map(|&(_, code)| code).collect(),
                ..Default::default()
            };

            let mut collector = FrameEventCollector::default();
            let mut queue = EventQueue::new();
            collector.collect(&snapshot, &mut queue);

            let tables = InputTables::build();
            let mut presses = Vec::new();
            let mut releases = Vec::new();
            for event in drain(&mut queue) {
                match event {
                    Event::KeyPress { key, .. } => {
                        prop_assert!(releases.is_empty(), "press after release");
                        presses.push(tables.native_key(key).unwrap());
                    }
                    Event::KeyRelease { key, .. } => {
                        releases.push(tables.native_key(key).unwrap());
                    }
                    other => prop_assert!(false, "unexpected event {:?}", other),
                }
            }

            prop_assert_eq!(presses.len(), pressed.len());
            prop_assert_eq!(releases.len(), released.len());
            prop_assert!(presses.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(releases.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

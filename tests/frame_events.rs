use std::rc::Rc;

use rayframe::config::{Config, InputConfig, TextureConfig, WindowConfig};
use rayframe::input::mapper::buttons::{MOUSE_BUTTON_LEFT, MOUSE_BUTTON_RIGHT};
#[allow(clippy::wildcard_imports)]
use rayframe::input::mapper::keycodes::*;
use rayframe::input::{Event, Key, Modifier, Modifiers, MouseButton, Point};
use rayframe::native::HeadlessBackend;
use rayframe::window::Window;

fn open() -> (Rc<HeadlessBackend>, Window<HeadlessBackend>) {
    let backend = Rc::new(HeadlessBackend::new());
    let window = Window::open(backend.clone(), &WindowConfig::default()).unwrap();
    (backend, window)
}

fn drain(window: &mut Window<HeadlessBackend>) -> Vec<Event> {
    std::iter::from_fn(|| window.poll_event()).collect()
}

#[test]
fn test_full_frame_sub_order() {
    let (backend, mut window) = open();

    backend.press_key(KEY_ENTER);
    backend.press_key(KEY_A);
    backend.press_button(MOUSE_BUTTON_RIGHT);
    backend.move_mouse(Point::new(10, 20));
    backend.type_char('x');
    window.display();

    let none = Modifiers::empty();
    assert_eq!(
        drain(&mut window),
        vec![
            Event::KeyPress {
                key: Key::A,
                modifiers: none
            },
            Event::KeyPress {
                key: Key::Enter,
                modifiers: none
            },
            Event::MousePress {
                point: Point::new(10, 20),
                button: MouseButton::Right,
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
fn test_releases_follow_presses() {
    let (backend, mut window) = open();

    backend.press_key(KEY_B);
    backend.press_button(MOUSE_BUTTON_LEFT);
    window.display();
    drain(&mut window);

    backend.release_key(KEY_B);
    backend.release_button(MOUSE_BUTTON_LEFT);
    backend.press_key(KEY_C);
    window.display();

    let events = drain(&mut window);
    assert!(matches!(events[0], Event::KeyPress { key: Key::C, .. }));
    assert!(matches!(events[1], Event::KeyRelease { key: Key::B, .. }));
    assert!(matches!(
        events[2],
        Event::MouseRelease {
            button: MouseButton::Left,
            ..
        }
    ));
    assert_eq!(events.len(), 3);
}

#[test]
fn test_modifiers_attached_not_emitted() {
    let (backend, mut window) = open();

    backend.press_key(KEY_LEFT_SHIFT);
    backend.press_key(KEY_RIGHT_CONTROL);
    window.display();
    assert!(drain(&mut window).is_empty());

    let expected = Modifier::Shift | Modifier::Control;
    assert_eq!(window.current_modifiers(), expected);

    backend.press_key(KEY_S);
    window.display();
    assert_eq!(
        drain(&mut window),
        vec![Event::KeyPress {
            key: Key::S,
            modifiers: expected
        }]
    );

    backend.release_key(KEY_LEFT_SHIFT);
    backend.release_key(KEY_RIGHT_CONTROL);
    window.display();
    assert!(drain(&mut window).is_empty());
    assert!(window.current_modifiers().is_empty());
}

#[test]
fn test_events_queue_across_frames() {
    let (backend, mut window) = open();

    backend.type_char('a');
    window.display();
    backend.type_char('b');
    window.display();

    assert_eq!(window.pending_events(), 2);
    assert_eq!(
        drain(&mut window),
        vec![
            Event::TypedChar { codepoint: 'a' },
            Event::TypedChar { codepoint: 'b' },
        ]
    );
}

#[test]
fn test_idle_frame_emits_nothing() {
    let (_backend, mut window) = open();
    window.display();
    window.display();
    assert_eq!(window.poll_event(), None);
    assert_eq!(window.collector_stats().frames_collected, 2);
}

#[test]
fn test_unmapped_codes_are_counted() {
    let (backend, mut window) = open();

    backend.press_key(KEY_VOLUME_UP);
    backend.press_key(KEY_Z);
    window.display();

    assert_eq!(
        drain(&mut window),
        vec![Event::KeyPress {
            key: Key::Z,
            modifiers: Modifiers::empty()
        }]
    );
    assert_eq!(window.collector_stats().unmapped_skipped, 1);
}

#[test]
fn test_window_close_is_last_and_final() {
    let (backend, mut window) = open();

    backend.press_key(KEY_Q);
    backend.request_close();
    window.display();

    let events = drain(&mut window);
    assert!(matches!(events[0], Event::KeyPress { key: Key::Q, .. }));
    assert_eq!(events.last(), Some(&Event::WindowClose));
    assert!(window.is_closing());

    // Still presented, no longer collected
    backend.press_key(KEY_W);
    window.display();
    assert_eq!(window.poll_event(), None);
    assert_eq!(backend.frames_presented(), 2);
    assert_eq!(window.collector_stats().frames_collected, 1);
}

#[test]
fn test_cursor_warp_reported_as_move() {
    let (_backend, mut window) = open();

    window.set_cursor_position(Point::new(5, 6));
    assert_eq!(window.cursor_position(), Point::new(5, 6));

    window.display();
    assert_eq!(
        drain(&mut window),
        vec![Event::MouseMove {
            from: Point::ORIGIN,
            to: Point::new(5, 6)
        }]
    );

    // No motion, no event
    window.display();
    assert!(drain(&mut window).is_empty());
}

#[test]
fn test_drag_events_when_enabled() {
    let backend = Rc::new(HeadlessBackend::new());
    let config = Config {
        input: InputConfig {
            emit_drag_events: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut window = Window::open_with_config(backend.clone(), &config).unwrap();

    backend.move_mouse(Point::new(1, 1));
    backend.press_button(MOUSE_BUTTON_LEFT);
    window.display();
    drain(&mut window);

    backend.move_mouse(Point::new(9, 4));
    backend.release_button(MOUSE_BUTTON_LEFT);
    window.display();

    let events = drain(&mut window);
    assert_eq!(
        events[..2],
        [
            Event::MouseRelease {
                point: Point::new(9, 4),
                button: MouseButton::Left,
                modifiers: Modifiers::empty()
            },
            Event::MouseDrag {
                from: Point::new(1, 1),
                to: Point::new(9, 4),
                button: MouseButton::Left,
                modifiers: Modifiers::empty()
            },
        ]
    );
    assert!(matches!(events[2], Event::MouseMove { .. }));
}

#[test]
fn test_no_drag_by_default() {
    let (backend, mut window) = open();

    backend.press_button(MOUSE_BUTTON_LEFT);
    window.display();
    backend.move_mouse(Point::new(30, 30));
    backend.release_button(MOUSE_BUTTON_LEFT);
    window.display();

    assert!(!drain(&mut window)
        .iter()
        .any(|event| matches!(event, Event::MouseDrag { .. })));
}

#[test]
fn test_open_with_explicit_sections() {
    let backend = Rc::new(HeadlessBackend::new());
    let input = InputConfig {
        key_scan_limit: KEY_A,
        ..Default::default()
    };
    let mut window = Window::open_with(
        backend.clone(),
        &WindowConfig::default(),
        input,
        TextureConfig::default(),
    )
    .unwrap();

    // KEY_A is beyond an exclusive limit of 65
    backend.press_key(KEY_A);
    backend.press_key(KEY_SPACE);
    window.display();
    assert_eq!(
        drain(&mut window),
        vec![Event::KeyPress {
            key: Key::Space,
            modifiers: Modifiers::empty()
        }]
    );
}

#[test]
fn test_presses_releases_buttons_move_then_chars() {
    let (backend, mut window) = open();

    backend.press_key(KEY_C);
    window.display();
    drain(&mut window);

    backend.press_key(KEY_B);
    backend.press_key(KEY_A);
    backend.release_key(KEY_C);
    backend.press_button(MOUSE_BUTTON_LEFT);
    backend.move_mouse(Point::new(3, 4));
    backend.type_char('é');
    window.display();

    let kinds: Vec<_> = drain(&mut window)
        .into_iter()
        .map(|event| match event {
            Event::KeyPress { key, .. } => format!("press {key}"),
            Event::KeyRelease { key, .. } => format!("release {key}"),
            Event::MousePress { button, .. } => format!("mouse press {button}"),
            Event::MouseMove { .. } => "move".to_string(),
            Event::TypedChar { codepoint } => format!("char {codepoint}"),
            other => format!("{other:?}"),
        })
        .collect();

    assert_eq!(
        kinds,
        [
            "press A",
            "press B",
            "release C",
            "mouse press Left",
            "move",
            "char é"
        ]
    );
}

#[test]
fn test_both_shift_keys_set_one_flag() {
    let (backend, mut window) = open();

    backend.press_key(KEY_LEFT_SHIFT);
    backend.press_key(KEY_RIGHT_SHIFT);
    backend.press_key(KEY_K);
    window.display();

    assert_eq!(
        drain(&mut window),
        vec![Event::KeyPress {
            key: Key::K,
            modifiers: Modifiers::from_flag(Modifier::Shift)
        }]
    );
}

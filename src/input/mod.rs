//! Frame-Synchronized Input Events
//!
//! The native library only answers polling queries ("was this key pressed
//! this frame"), refreshed once per presented frame. This module turns those
//! answers into a stream of discrete [`Event`]s that the host drains between
//! frames.
//!
//! # Architecture
//!
//! ```text
//! Native polling state (InputSource)
//!       ↓
//! ┌─────────────────────────┐
//! │  FrameEventCollector    │ ← once per frame
//! │  - fixed sub-order      │
//! │  - previous pointer     │
//! │  - press positions      │
//! └─────────────────────────┘
//!       ↓               ↓
//! ┌──────────────┐ ┌───────────────┐
//! │ InputTables  │ │  Modifier     │
//! │ key / button │ │  resolver     │
//! └──────────────┘ └───────────────┘
//!       ↓
//! EventQueue → host poll loop
//! ```
//!
//! # Example
//!
//! ```rust
//! use rayframe::input::{Event, EventQueue, FrameEventCollector};
//! use rayframe::native::{HeadlessBackend, WindowSystem};
//!
//! let backend = HeadlessBackend::new();
//! let mut collector = FrameEventCollector::default();
//! let mut queue = EventQueue::new();
//!
//! backend.type_char('q');
//! backend.present_frame();
//! collector.collect(&backend, &mut queue);
//!
//! assert_eq!(queue.poll(), Some(Event::TypedChar { codepoint: 'q' }));
//! assert_eq!(queue.poll(), None);
//! ```

pub mod collector;
pub mod error;
pub mod events;
pub mod keyboard;
pub mod mapper;
pub mod mouse;

pub use collector::{CollectorStats, FrameEventCollector};
pub use error::{InputError, Result};
pub use events::{Event, EventQueue};
pub use keyboard::{Key, Modifier, Modifiers};
pub use mapper::{resolve_modifiers, InputTables};
pub use mouse::{MouseButton, Point};

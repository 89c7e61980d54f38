//! Utility Functions
//!
//! Timing helpers and user-friendly error formatting.
//!
//! ## Metrics
//!
//! ```rust
//! use rayframe::utils::{FrameTimes, Timer};
//!
//! let mut frames = FrameTimes::new();
//! let mut timer = Timer::new();
//! frames.record(timer.lap_ms());
//!
//! let stats = frames.stats();
//! assert_eq!(stats.count, 1);
//! ```
//!
//! ## Error Formatting
//!
//! [`format_user_error`] renders an `anyhow` chain with hints for the
//! failure category (configuration, texture, font/shader, window).

pub mod errors;
pub mod metrics;

pub use errors::format_user_error;
pub use metrics::{FrameTimeStats, FrameTimes, Timer};

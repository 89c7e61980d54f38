//! Timing Helpers
//!
//! [`Timer`] measures single operations (the texture slow path logs with it).
//! [`FrameTimes`] keeps a distribution of per-frame durations for the demo's
//! exit summary.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Timer helper for measuring durations
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Get elapsed time in microseconds
    pub fn elapsed_us(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1_000_000.0
    }

    /// Restart and return the elapsed milliseconds
    pub fn lap_ms(&mut self) -> f64 {
        let elapsed = self.elapsed_ms();
        self.start = Instant::now();
        elapsed
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Distribution of frame durations in milliseconds
#[derive(Debug, Default)]
pub struct FrameTimes {
    values: Vec<f64>,
    sum: f64,
}

impl FrameTimes {
    /// Empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame
    pub fn record(&mut self, ms: f64) {
        self.values.push(ms);
        self.sum += ms;
    }

    /// Number of recorded frames
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// No frames recorded yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Summary statistics (all zero when empty)
    pub fn stats(&self) -> FrameTimeStats {
        if self.values.is_empty() {
            return FrameTimeStats::default();
        }

        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);

        FrameTimeStats {
            count: sorted.len() as u64,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean: self.sum / sorted.len() as f64,
            p50: percentile(&sorted, 0.50),
            p95: percentile(&sorted, 0.95),
            p99: percentile(&sorted, 0.99),
        }
    }
}

/// Inclusive percentile over sorted values with lower interpolation
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let index = ((sorted_values.len() - 1) as f64 * p) as usize;
    sorted_values[index.min(sorted_values.len() - 1)]
}

/// Frame duration summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTimeStats {
    /// Recorded frames
    pub count: u64,
    /// Fastest frame
    pub min: f64,
    /// Slowest frame
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub p50: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
}

impl FrameTimeStats {
    /// Frames per second implied by the mean frame time
    pub fn mean_fps(&self) -> f64 {
        if self.mean > 0.0 {
            1000.0 / self.mean
        } else {
            0.0
        }
    }
}

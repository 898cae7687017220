//! Clocks and frame timing.
//!
//! The field reads wall-clock time in milliseconds: the idle sweep is a
//! function of it, pointer engagement expires against it and the countdown
//! is measured with it. Everything that needs time goes through [`Clock`],
//! so tests can swap in a [`ManualClock`] and step frames deterministically.
//!
//! # Example
//!
//! ```ignore
//! use driftfield::time::{Clock, FrameTimer, ManualClock};
//!
//! let clock = ManualClock::new(0.0);
//! let mut timer = FrameTimer::new(clock.now_ms());
//!
//! clock.advance(16.0);
//! timer.update(clock.now_ms());
//! assert_eq!(timer.frame(), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the frame driver.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start_ms.to_bits())),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.bits.store(now_ms.to_bits(), Ordering::Relaxed);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.set(self.now_ms() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// Frame counting and FPS measurement.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    /// Clock reading when the timer was created.
    start_ms: f64,
    /// Clock reading at the last frame.
    last_frame_ms: f64,
    /// Time since last frame in milliseconds.
    delta_ms: f64,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Clock reading of last FPS calculation.
    fps_update_ms: f64,
    /// How often to update FPS calculation.
    fps_update_interval_ms: f64,
}

impl FrameTimer {
    pub fn new(now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            last_frame_ms: now_ms,
            delta_ms: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_ms: now_ms,
            fps_update_interval_ms: 500.0,
        }
    }

    /// Record a frame at `now_ms`. Call once per frame.
    pub fn update(&mut self, now_ms: f64) {
        // Wall clocks can step backwards; never report negative deltas
        self.delta_ms = (now_ms - self.last_frame_ms).max(0.0);
        self.last_frame_ms = now_ms;
        self.frame_count += 1;

        let fps_elapsed = now_ms - self.fps_update_ms;
        if fps_elapsed >= self.fps_update_interval_ms {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = (frames_since as f64 / (fps_elapsed / 1000.0)) as f32;
            self.fps_frame_count = self.frame_count;
            self.fps_update_ms = now_ms;
        }
    }

    /// Milliseconds since the timer was created, as of the last frame.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.last_frame_ms - self.start_ms
    }

    #[inline]
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

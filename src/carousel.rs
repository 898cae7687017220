//! Auto-advancing media carousel.
//!
//! A carousel shows one of `len` slides and steps to the next one every
//! `interval_ms`, wrapping back to the first. Selecting a slide restarts the
//! interval. A paused carousel keeps its slide until resumed, and hosts that
//! prefer reduced motion never auto-advance.
//!
//! # Example
//!
//! ```ignore
//! use driftfield::carousel::Carousel;
//!
//! let mut photos = Carousel::photo(16, 0.0, false);
//! photos.update(3000.0);
//! assert_eq!(photos.index(), 1);
//! ```

/// Interval of the video carousel.
pub const VIDEO_INTERVAL_MS: f64 = 7000.0;
/// Interval of the photo carousel.
pub const PHOTO_INTERVAL_MS: f64 = 3000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    len: usize,
    index: usize,
    interval_ms: f64,
    autoplay: bool,
    paused: bool,
    /// Clock reading of the next advance, while the timer runs.
    next_at_ms: Option<f64>,
}

impl Carousel {
    /// A carousel on slide 0 whose timer starts at `now_ms`.
    pub fn new(len: usize, interval_ms: f64, now_ms: f64, reduced_motion: bool) -> Self {
        let mut carousel = Self {
            len,
            index: 0,
            interval_ms,
            autoplay: !reduced_motion && len > 1 && interval_ms > 0.0,
            paused: false,
            next_at_ms: None,
        };
        carousel.restart(now_ms);
        carousel
    }

    pub fn video(len: usize, now_ms: f64, reduced_motion: bool) -> Self {
        Self::new(len, VIDEO_INTERVAL_MS, now_ms, reduced_motion)
    }

    pub fn photo(len: usize, now_ms: f64, reduced_motion: bool) -> Self {
        Self::new(len, PHOTO_INTERVAL_MS, now_ms, reduced_motion)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slide.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the timer is currently counting toward the next slide.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.next_at_ms.is_some()
    }

    /// Jump to `index` and restart the interval.
    ///
    /// Out-of-range indices are ignored and return `false`.
    pub fn select(&mut self, index: usize, now_ms: f64) -> bool {
        if index >= self.len {
            log::warn!("carousel has {} slides, ignoring select({})", self.len, index);
            return false;
        }
        self.index = index;
        self.restart(now_ms);
        true
    }

    /// Stop auto-advancing, e.g. while the pointer hovers the card.
    pub fn pause(&mut self) {
        self.paused = true;
        self.next_at_ms = None;
    }

    /// Resume auto-advancing with a full interval.
    pub fn resume(&mut self, now_ms: f64) {
        self.paused = false;
        self.restart(now_ms);
    }

    /// Flip between paused and playing. Returns the new paused state.
    pub fn toggle_pause(&mut self, now_ms: f64) -> bool {
        if self.paused {
            self.resume(now_ms);
        } else {
            self.pause();
        }
        self.paused
    }

    /// Advance for every interval elapsed by `now_ms`.
    ///
    /// Returns `true` if the slide changed.
    pub fn update(&mut self, now_ms: f64) -> bool {
        let Some(mut next_at) = self.next_at_ms else {
            return false;
        };
        if !now_ms.is_finite() {
            return false;
        }
        let before = self.index;
        while now_ms >= next_at {
            self.index = (self.index + 1) % self.len;
            next_at += self.interval_ms;
        }
        self.next_at_ms = Some(next_at);
        self.index != before
    }

    fn restart(&mut self, now_ms: f64) {
        self.next_at_ms = (self.autoplay && !self.paused).then(|| now_ms + self.interval_ms);
    }
}

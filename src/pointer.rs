//! Pointer tracking and the attraction target.
//!
//! The tracker resolves one attraction point per frame. Real pointer
//! movement drives it while the pointer is engaged; otherwise an idle sweep
//! traces a slow Lissajous-like ellipse across the viewport, unless the host
//! prefers reduced motion, in which case the target freezes.
//!
//! ```text
//!            move                       > 1200ms without move
//!  Idle ───────────► Engaged ─────────────────────────────────► Idle
//!   ▲                  │ leave                                 (or Inactive
//!   │ (motion allowed) ▼                                        if reduced)
//!   └────────────── Inactive ◄──── leave (from any mode)
//! ```

use glam::Vec2;

use crate::input::InputEvent;

/// How long a pointer move keeps the tracker engaged.
pub const ENGAGED_TIMEOUT_MS: f64 = 1200.0;
/// Wall-clock milliseconds to sweep phase.
pub const SWEEP_TIME_SCALE: f64 = 0.0002;
/// Sweep radius as a fraction of the viewport width.
pub const SWEEP_RADIUS_X: f32 = 0.24;
/// Sweep radius as a fraction of the viewport height.
pub const SWEEP_RADIUS_Y: f32 = 0.2;
/// Vertical frequency ratio of the sweep.
pub const SWEEP_FREQUENCY_Y: f64 = 1.3;

/// Who drives the attraction target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerMode {
    /// No recent pointer input; the idle sweep drives the target.
    Idle,
    /// The pointer moved within the last 1200ms.
    Engaged,
    /// No attraction at all; the target is frozen.
    #[default]
    Inactive,
}

impl PointerMode {
    /// Whether particles are pulled toward the target in this mode.
    #[inline]
    pub fn attracts(self) -> bool {
        !matches!(self, PointerMode::Inactive)
    }
}

/// The point particles are pulled toward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttractionTarget {
    /// Smoothed position the integrator reads.
    pub current: Vec2,
    /// Position `current` eases toward.
    pub target: Vec2,
    pub mode: PointerMode,
}

/// Position of the idle sweep at wall-clock time `now_ms`.
///
/// Pure: the same inputs always give the same point.
pub fn idle_sweep(now_ms: f64, width: f32, height: f32) -> Vec2 {
    let t = now_ms * SWEEP_TIME_SCALE;
    Vec2::new(
        width / 2.0 + t.cos() as f32 * (width * SWEEP_RADIUS_X),
        height / 2.0 + (t * SWEEP_FREQUENCY_Y).sin() as f32 * (height * SWEEP_RADIUS_Y),
    )
}

/// Three-mode state machine resolving the attraction target.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    state: AttractionTarget,
    last_move_ms: Option<f64>,
    reduced_motion: bool,
    pointer_ease: f32,
}

impl PointerTracker {
    pub fn new(pointer_ease: f32, reduced_motion: bool) -> Self {
        Self {
            state: AttractionTarget::default(),
            last_move_ms: None,
            reduced_motion,
            pointer_ease,
        }
    }

    #[inline]
    pub fn mode(&self) -> PointerMode {
        self.state.mode
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.state.target
    }

    #[inline]
    pub fn current(&self) -> Vec2 {
        self.state.current
    }

    #[inline]
    pub fn last_move(&self) -> Option<f64> {
        self.last_move_ms
    }

    /// Snapshot for the integrator and renderer.
    #[inline]
    pub fn attraction(&self) -> AttractionTarget {
        self.state
    }

    /// Apply one queued input event.
    ///
    /// Moves always win over the idle sweep; leaving the surface always
    /// disables attraction. Resize events are handled by the driver.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMoved { x, y, timestamp_ms } => {
                self.state.target = Vec2::new(x, y);
                self.last_move_ms = Some(timestamp_ms);
                self.set_mode(PointerMode::Engaged);
            }
            InputEvent::PointerLeft => self.set_mode(PointerMode::Inactive),
            InputEvent::PointerEntered | InputEvent::Resized { .. } => {}
        }
    }

    /// Advance the state machine and ease `current` toward `target`.
    pub fn update(&mut self, now_ms: f64, width: f32, height: f32) {
        if self.state.mode == PointerMode::Engaged && self.engagement_expired(now_ms) {
            // Re-evaluated just below
            self.state.mode = PointerMode::Inactive;
        }

        if self.state.mode != PointerMode::Engaged {
            if self.reduced_motion {
                self.set_mode(PointerMode::Inactive);
            } else {
                self.state.target = idle_sweep(now_ms, width, height);
                self.set_mode(PointerMode::Idle);
            }
        }

        let ease = self.pointer_ease;
        self.state.current += (self.state.target - self.state.current) * ease;
    }

    fn engagement_expired(&self, now_ms: f64) -> bool {
        match self.last_move_ms {
            Some(last) => now_ms - last >= ENGAGED_TIMEOUT_MS,
            None => true,
        }
    }

    fn set_mode(&mut self, mode: PointerMode) {
        if self.state.mode != mode {
            log::debug!("pointer mode {:?} -> {:?}", self.state.mode, mode);
            self.state.mode = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32, t: f64) -> InputEvent {
        InputEvent::PointerMoved { x, y, timestamp_ms: t }
    }

    #[test]
    fn test_idle_sweep_is_pure() {
        let a = idle_sweep(123_456.0, 1280.0, 720.0);
        let b = idle_sweep(123_456.0, 1280.0, 720.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_idle_sweep_at_zero() {
        // cos(0) = 1, sin(0) = 0
        let p = idle_sweep(0.0, 1000.0, 500.0);
        assert!((p.x - (500.0 + 240.0)).abs() < 1e-3);
        assert!((p.y - 250.0).abs() < 1e-3);
    }

    #[test]
    fn test_idle_sweep_stays_in_ellipse() {
        for i in 0..500 {
            let p = idle_sweep(i as f64 * 997.0, 1000.0, 500.0);
            assert!(p.x >= 260.0 - 1e-3 && p.x <= 740.0 + 1e-3);
            assert!(p.y >= 150.0 - 1e-3 && p.y <= 350.0 + 1e-3);
        }
    }

    #[test]
    fn test_starts_idle_without_input() {
        let mut tracker = PointerTracker::new(0.12, false);
        tracker.update(0.0, 800.0, 600.0);
        assert_eq!(tracker.mode(), PointerMode::Idle);
        assert_eq!(tracker.target(), idle_sweep(0.0, 800.0, 600.0));
    }

    #[test]
    fn test_move_engages_immediately() {
        let mut tracker = PointerTracker::new(0.12, false);
        tracker.update(0.0, 800.0, 600.0);
        tracker.apply(&moved(10.0, 20.0, 5.0));
        assert_eq!(tracker.mode(), PointerMode::Engaged);
        assert_eq!(tracker.target(), Vec2::new(10.0, 20.0));
        assert_eq!(tracker.last_move(), Some(5.0));
    }

    #[test]
    fn test_engaged_timeout_boundary() {
        let mut tracker = PointerTracker::new(0.12, false);
        tracker.apply(&moved(10.0, 20.0, 1000.0));

        tracker.update(2199.0, 800.0, 600.0);
        assert_eq!(tracker.mode(), PointerMode::Engaged);
        assert_eq!(tracker.target(), Vec2::new(10.0, 20.0));

        tracker.update(2200.0, 800.0, 600.0);
        assert_eq!(tracker.mode(), PointerMode::Idle);
    }

    #[test]
    fn test_leave_forces_inactive() {
        let mut tracker = PointerTracker::new(0.12, false);
        tracker.apply(&moved(10.0, 20.0, 0.0));
        tracker.apply(&InputEvent::PointerLeft);
        assert_eq!(tracker.mode(), PointerMode::Inactive);
        assert!(!tracker.mode().attracts());
    }

    #[test]
    fn test_enter_does_not_engage() {
        let mut tracker = PointerTracker::new(0.12, true);
        tracker.apply(&InputEvent::PointerEntered);
        assert_eq!(tracker.mode(), PointerMode::Inactive);
    }

    #[test]
    fn test_reduced_motion_freezes_target() {
        let mut tracker = PointerTracker::new(0.12, true);
        let before = tracker.target();
        for frame in 0..120 {
            tracker.update(frame as f64 * 16.0, 800.0, 600.0);
            assert_eq!(tracker.mode(), PointerMode::Inactive);
            assert_eq!(tracker.target(), before);
        }
    }

    #[test]
    fn test_reduced_motion_still_follows_pointer() {
        let mut tracker = PointerTracker::new(0.12, true);
        tracker.apply(&moved(50.0, 60.0, 0.0));
        tracker.update(100.0, 800.0, 600.0);
        assert_eq!(tracker.mode(), PointerMode::Engaged);

        tracker.update(1300.0, 800.0, 600.0);
        assert_eq!(tracker.mode(), PointerMode::Inactive);
        assert_eq!(tracker.target(), Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_current_eases_toward_target() {
        let mut tracker = PointerTracker::new(0.5, false);
        tracker.apply(&moved(100.0, 0.0, 0.0));
        tracker.update(1.0, 800.0, 600.0);
        assert_eq!(tracker.current(), Vec2::new(50.0, 0.0));
        tracker.update(2.0, 800.0, 600.0);
        assert_eq!(tracker.current(), Vec2::new(75.0, 0.0));
    }
}

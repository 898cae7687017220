//! Custom cursor trail.
//!
//! Two points chase the pointer at different rates: a snappy core and a
//! lazier glow. The trail shows on movement and hides itself 1400ms after
//! the last move. Coarse-pointer devices never show it.

use glam::Vec2;

use crate::input::InputEvent;

/// Easing factor of the core dot.
pub const CORE_EASE: f32 = 0.18;
/// Easing factor of the glow.
pub const GLOW_EASE: f32 = 0.08;
/// Time after the last move before the trail hides.
pub const HIDE_AFTER_MS: f64 = 1400.0;

#[derive(Debug, Clone)]
pub struct CursorTrail {
    enabled: bool,
    visible: bool,
    target: Vec2,
    core: Vec2,
    glow: Vec2,
    hide_at_ms: Option<f64>,
}

impl CursorTrail {
    /// A trail resting at `center`.
    ///
    /// An enabled trail starts visible, as if the pointer were already over
    /// the surface.
    pub fn new(center: Vec2, enabled: bool) -> Self {
        Self {
            enabled,
            visible: enabled,
            target: center,
            core: center,
            glow: center,
            hide_at_ms: None,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.enabled && self.visible
    }

    #[inline]
    pub fn core(&self) -> Vec2 {
        self.core
    }

    #[inline]
    pub fn glow(&self) -> Vec2 {
        self.glow
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn apply(&mut self, event: &InputEvent) {
        if !self.enabled {
            return;
        }
        match *event {
            InputEvent::PointerMoved { x, y, timestamp_ms } => {
                self.target = Vec2::new(x, y);
                self.visible = true;
                self.hide_at_ms = Some(timestamp_ms + HIDE_AFTER_MS);
            }
            InputEvent::PointerEntered => self.visible = true,
            InputEvent::PointerLeft => self.visible = false,
            InputEvent::Resized { .. } => {}
        }
    }

    /// Ease both points and apply the auto-hide deadline.
    pub fn update(&mut self, now_ms: f64) {
        self.core += (self.target - self.core) * CORE_EASE;
        self.glow += (self.target - self.glow) * GLOW_EASE;

        if let Some(deadline) = self.hide_at_ms {
            if now_ms >= deadline {
                self.visible = false;
                self.hide_at_ms = None;
            }
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
    fn test_core_leads_glow() {
        let mut trail = CursorTrail::new(Vec2::ZERO, true);
        trail.apply(&moved(100.0, 0.0, 0.0));
        trail.update(16.0);
        assert!((trail.core().x - 18.0).abs() < 1e-4);
        assert!((trail.glow().x - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_hides_after_idle() {
        let mut trail = CursorTrail::new(Vec2::ZERO, true);
        trail.apply(&moved(1.0, 1.0, 1000.0));
        trail.update(2399.0);
        assert!(trail.is_visible());
        trail.update(2400.0);
        assert!(!trail.is_visible());
    }

    #[test]
    fn test_new_move_extends_deadline() {
        let mut trail = CursorTrail::new(Vec2::ZERO, true);
        trail.apply(&moved(1.0, 1.0, 0.0));
        trail.apply(&moved(2.0, 2.0, 1000.0));
        trail.update(1500.0);
        assert!(trail.is_visible());
    }

    #[test]
    fn test_leave_and_enter() {
        let mut trail = CursorTrail::new(Vec2::ZERO, true);
        trail.apply(&InputEvent::PointerLeft);
        assert!(!trail.is_visible());
        trail.apply(&InputEvent::PointerEntered);
        assert!(trail.is_visible());
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut trail = CursorTrail::new(Vec2::ZERO, false);
        trail.apply(&moved(50.0, 50.0, 0.0));
        trail.update(1.0);
        assert!(!trail.is_visible());
        assert_eq!(trail.target(), Vec2::ZERO);
    }
}

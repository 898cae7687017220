//! Intro splash timing.
//!
//! The splash stays fully visible, then fades, then is removed for good.
//! Reduced motion shortens both steps.

/// Splash fade start after launch.
pub const FADE_AFTER_MS: f64 = 2000.0;
/// Splash removal after launch.
pub const REMOVE_AFTER_MS: f64 = 2400.0;
/// Fade start with reduced motion.
pub const REDUCED_FADE_AFTER_MS: f64 = 200.0;
/// Removal with reduced motion.
pub const REDUCED_REMOVE_AFTER_MS: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    Visible,
    Fading,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splash {
    fade_at_ms: f64,
    remove_at_ms: f64,
}

impl Splash {
    /// A splash shown at `start_ms`.
    pub fn new(start_ms: f64, reduced_motion: bool) -> Self {
        let (fade, remove) = if reduced_motion {
            (REDUCED_FADE_AFTER_MS, REDUCED_REMOVE_AFTER_MS)
        } else {
            (FADE_AFTER_MS, REMOVE_AFTER_MS)
        };
        Self {
            fade_at_ms: start_ms + fade,
            remove_at_ms: start_ms + remove,
        }
    }

    pub fn phase(&self, now_ms: f64) -> SplashPhase {
        if now_ms >= self.remove_at_ms {
            SplashPhase::Removed
        } else if now_ms >= self.fade_at_ms {
            SplashPhase::Fading
        } else {
            SplashPhase::Visible
        }
    }

    /// Splash opacity: 1 while visible, falling linearly to 0 over the fade.
    pub fn opacity(&self, now_ms: f64) -> f32 {
        match self.phase(now_ms) {
            SplashPhase::Visible => 1.0,
            SplashPhase::Removed => 0.0,
            SplashPhase::Fading => {
                let span = self.remove_at_ms - self.fade_at_ms;
                (1.0 - (now_ms - self.fade_at_ms) / span) as f32
            }
        }
    }
}

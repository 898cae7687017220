//! Spawn context for particle initialization.
//!
//! Wraps the field RNG with helpers for the two spawn distributions the
//! field needs: a uniform point inside the viewport and a small random
//! velocity.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG plus spawn helpers.
///
/// The same RNG keeps driving the integrator's jitter after spawning, so a
/// seeded context makes a whole run reproducible.
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context from an explicit seed, or from the system clock.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });

        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Uniform point in `[0, width) × [0, height)`.
    ///
    /// A zero extent collapses that axis to 0.
    pub fn random_in_rect(&mut self, width: f32, height: f32) -> Vec2 {
        Vec2::new(self.random_extent(width), self.random_extent(height))
    }

    // gen_range keeps the upper bound exclusive even after float rounding
    fn random_extent(&mut self, extent: f32) -> f32 {
        if extent > 0.0 {
            self.rng.gen_range(0.0..extent)
        } else {
            0.0
        }
    }

    /// Random vector in `[-speed/2, speed/2]` on each axis.
    pub fn random_velocity(&mut self, speed: f32) -> Vec2 {
        Vec2::new(
            (self.random() - 0.5) * speed,
            (self.random() - 0.5) * speed,
        )
    }

    /// Borrow the underlying RNG.
    #[inline]
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

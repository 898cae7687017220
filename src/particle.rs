//! Particle store.
//!
//! A [`SimulationSpace`] is the viewport-sized rectangle that owns every
//! particle. It is never resized in place: a viewport change builds a new
//! space and drops the old particles.

use glam::Vec2;

use crate::spawn::SpawnContext;

/// One simulated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current position in device-independent pixels.
    pub position: Vec2,
    /// Spawn position. Homing pulls the particle back here.
    pub origin: Vec2,
    /// Displacement applied on the next integration step.
    pub velocity: Vec2,
}

impl Particle {
    /// A particle resting at its origin.
    pub fn at(origin: Vec2, velocity: Vec2) -> Self {
        Self {
            position: origin,
            origin,
            velocity,
        }
    }
}

/// Viewport rectangle and the particles living in it.
#[derive(Debug, Clone, Default)]
pub struct SimulationSpace {
    width: f32,
    height: f32,
    particles: Vec<Particle>,
}

impl SimulationSpace {
    /// An empty space. Negative or non-finite sizes become zero.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            particles: Vec::new(),
        }
    }

    /// Fill the space with `count` freshly spawned particles.
    ///
    /// Each particle starts at a uniform random point inside the space with
    /// its origin on the same spot and a velocity in
    /// `[-base_speed/2, base_speed/2]` per axis. Existing particles are
    /// discarded.
    pub fn initialize(&mut self, count: usize, base_speed: f32, spawn: &mut SpawnContext) {
        let (width, height) = (self.width, self.height);
        self.particles = (0..count)
            .map(|_| {
                let origin = spawn.random_in_rect(width, height);
                Particle::at(origin, spawn.random_velocity(base_speed))
            })
            .collect();
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

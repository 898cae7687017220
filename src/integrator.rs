//! One simulation step for the whole field.
//!
//! Every particle goes through the same five stages, in this order:
//!
//! 1. **Jitter** - small random acceleration, livelier while idle
//! 2. **Attraction** - pull toward the target inside its radius
//! 3. **Homing** - spring back toward the spawn origin
//! 4. **Damping** - multiply velocity by [`DAMPING`]
//! 5. **Integration** - explicit Euler, one frame per step
//!
//! There is no boundary handling. Particles may drift off-screen; homing and
//! damping bring them back.

use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;
use crate::particle::{Particle, SimulationSpace};
use crate::pointer::{AttractionTarget, PointerMode};

/// Per-frame velocity multiplier. The only bound on kinetic energy.
pub const DAMPING: f32 = 0.92;
/// Scales `drift_strength` into a per-frame jitter.
pub const JITTER_SCALE: f32 = 0.03;
/// Jitter multiplier while the idle sweep drives the target.
pub const IDLE_JITTER_BOOST: f32 = 1.6;
/// Attraction multiplier while idle; the real pointer pulls harder.
pub const IDLE_ATTRACTION_FACTOR: f32 = 0.45;
/// Homing multiplier while idle, letting particles wander further.
pub const IDLE_RETURN_FACTOR: f32 = 0.6;

/// Random velocity kick for one particle.
///
/// `u` holds two uniform samples in `[0, 1)`.
#[inline]
pub fn jitter(u: Vec2, drift_strength: f32, mode: PointerMode) -> Vec2 {
    let boost = if mode == PointerMode::Idle { IDLE_JITTER_BOOST } else { 1.0 };
    (u - Vec2::splat(0.5)) * drift_strength * JITTER_SCALE * boost
}

/// Acceleration pulling `position` toward `target`.
///
/// Zero when the target is inactive or at least `radius` away. Inside the
/// radius the pull falls off linearly from the full `strength` at the
/// centre. Coincident points divide by 1 instead of 0, giving zero force.
pub fn attraction_force(
    position: Vec2,
    target: Vec2,
    mode: PointerMode,
    radius: f32,
    strength: f32,
) -> Vec2 {
    let strength = match mode {
        PointerMode::Engaged => strength,
        PointerMode::Idle => strength * IDLE_ATTRACTION_FACTOR,
        PointerMode::Inactive => return Vec2::ZERO,
    };

    let delta = target - position;
    let dist = delta.length();
    if !(dist < radius) {
        return Vec2::ZERO;
    }

    let force = (1.0 - dist / radius) * strength;
    let divisor = if dist == 0.0 { 1.0 } else { dist };
    delta / divisor * force
}

/// Restoring acceleration toward the particle's origin.
#[inline]
pub fn homing_force(particle: &Particle, return_ease: f32, mode: PointerMode) -> Vec2 {
    let ease = if mode == PointerMode::Idle {
        return_ease * IDLE_RETURN_FACTOR
    } else {
        return_ease
    };
    (particle.origin - particle.position) * ease
}

/// Velocity after one frame of damping.
#[inline]
pub fn damp(velocity: Vec2) -> Vec2 {
    velocity * DAMPING
}

/// Advance a single particle by one frame.
pub fn step_particle<R: Rng>(
    particle: &mut Particle,
    attraction: &AttractionTarget,
    config: &FieldConfig,
    rng: &mut R,
) {
    let mode = attraction.mode;

    let u = Vec2::new(rng.gen::<f32>(), rng.gen::<f32>());
    particle.velocity += jitter(u, config.drift_strength, mode);

    particle.velocity += attraction_force(
        particle.position,
        attraction.current,
        mode,
        config.attraction_radius,
        config.attraction_strength,
    );

    particle.velocity += homing_force(particle, config.return_ease, mode);
    particle.velocity = damp(particle.velocity);
    particle.position += particle.velocity;
}

/// Advance every particle in the space by one frame.
pub fn step<R: Rng>(
    space: &mut SimulationSpace,
    attraction: &AttractionTarget,
    config: &FieldConfig,
    rng: &mut R,
) {
    for particle in space.particles_mut() {
        step_particle(particle, attraction, config, rng);
    }
}

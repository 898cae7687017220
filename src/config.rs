//! Field configuration.
//!
//! [`FieldConfig`] holds every tunable constant of the particle field. It is
//! resolved once at startup from the host's input-device class and never
//! changes afterwards.
//!
//! # Example
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! let env = HostEnvironment::default().with_coarse_pointer(true);
//! let config = FieldConfig::for_device(env.device_class())
//!     .with_seed(7);
//! assert_eq!(config.particle_count, 25);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Input-device class of the host.
///
/// Coarse pointers (touch screens) get a lighter field to bound the O(n²)
/// link pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    /// Mouse or trackpad.
    #[default]
    FinePointer,
    /// Touch screen or other coarse pointer.
    CoarsePointer,
}

/// Capability flags read from the host once at startup.
///
/// `reduced_motion` is optional because some hosts cannot answer the query.
/// A missing answer counts as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostEnvironment {
    /// The primary pointer is coarse.
    pub coarse_pointer: bool,
    /// The host reports touch support.
    pub touch_capable: bool,
    /// The "reduced motion" accessibility preference, if known.
    pub reduced_motion: Option<bool>,
}

/// Environment variable carrying the reduced-motion preference.
pub const REDUCED_MOTION_VAR: &str = "DRIFTFIELD_REDUCED_MOTION";
/// Environment variable marking the primary pointer as coarse.
pub const COARSE_POINTER_VAR: &str = "DRIFTFIELD_COARSE_POINTER";
/// Environment variable marking the host as touch capable.
pub const TOUCH_VAR: &str = "DRIFTFIELD_TOUCH";

impl HostEnvironment {
    /// Read the capability flags from the process environment.
    ///
    /// Unset variables leave the default: fine pointer, no touch and an
    /// unknown reduced-motion preference.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the capability flags through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).and_then(|value| parse_flag(key, &value));
        Self {
            coarse_pointer: flag(COARSE_POINTER_VAR).unwrap_or(false),
            touch_capable: flag(TOUCH_VAR).unwrap_or(false),
            reduced_motion: flag(REDUCED_MOTION_VAR),
        }
    }

    pub fn with_coarse_pointer(mut self, coarse: bool) -> Self {
        self.coarse_pointer = coarse;
        self
    }

    pub fn with_touch(mut self, touch: bool) -> Self {
        self.touch_capable = touch;
        self
    }

    pub fn with_reduced_motion(mut self, reduced: Option<bool>) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Device class derived from the pointer and touch flags.
    pub fn device_class(&self) -> DeviceClass {
        if self.coarse_pointer || self.touch_capable {
            DeviceClass::CoarsePointer
        } else {
            DeviceClass::FinePointer
        }
    }

    /// Reduced-motion preference, defaulting to motion enabled.
    #[inline]
    pub fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.unwrap_or(false)
    }
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            log::warn!("ignoring {}={:?}: expected a boolean", key, other);
            None
        }
    }
}

/// Tunable constants of the particle field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles spawned per viewport.
    pub particle_count: usize,
    /// Distance below which two particles are linked.
    pub max_link_distance: f32,
    /// Spawn velocity range is `[-base_speed/2, base_speed/2]` per axis.
    pub base_speed: f32,
    /// Scale of the per-frame random jitter.
    pub drift_strength: f32,
    /// Radius of the attraction well around the target.
    pub attraction_radius: f32,
    /// Peak attraction acceleration at the target.
    pub attraction_strength: f32,
    /// Spring constant pulling particles back to their origin.
    pub return_ease: f32,
    /// Smoothing factor of the attraction point.
    pub pointer_ease: f32,
    /// Seed for the field RNG. `None` seeds from the system clock.
    pub seed: Option<u64>,
    /// Draw the cursor trail overlay (ignored on coarse pointers).
    pub cursor_trail: bool,
    /// Countdown target as milliseconds since the Unix epoch.
    pub event_start_unix_ms: i64,
}

/// 2026-02-26T10:00:00Z
pub const DEFAULT_EVENT_START_UNIX_MS: i64 = 1_772_100_000_000;

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 200,
            max_link_distance: 160.0,
            base_speed: 0.2,
            drift_strength: 0.15,
            attraction_radius: 140.0,
            attraction_strength: 0.6,
            return_ease: 0.02,
            pointer_ease: 0.12,
            seed: None,
            cursor_trail: true,
            event_start_unix_ms: DEFAULT_EVENT_START_UNIX_MS,
        }
    }
}

impl FieldConfig {
    /// Configuration for a device class.
    ///
    /// Coarse pointers get 25 particles and a 30px link distance instead of
    /// 200 and 160px.
    pub fn for_device(class: DeviceClass) -> Self {
        let config = Self::default();
        match class {
            DeviceClass::FinePointer => config,
            DeviceClass::CoarsePointer => config
                .with_particle_count(25)
                .with_max_link_distance(30.0),
        }
    }

    /// Cap the particle count and link distance at the device's limits.
    ///
    /// Applied to configurations loaded from a file, which may ask for more
    /// than the O(n²) link pass should handle on that device.
    pub fn fit_to_device(mut self, class: DeviceClass) -> Self {
        let limits = Self::for_device(class);
        if self.particle_count > limits.particle_count {
            log::warn!(
                "particle_count {} exceeds the {:?} limit, using {}",
                self.particle_count,
                class,
                limits.particle_count
            );
            self.particle_count = limits.particle_count;
        }
        if self.max_link_distance > limits.max_link_distance {
            log::warn!(
                "max_link_distance {} exceeds the {:?} limit, using {}",
                self.max_link_distance,
                class,
                limits.max_link_distance
            );
            self.max_link_distance = limits.max_link_distance;
        }
        self
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_max_link_distance(mut self, distance: f32) -> Self {
        self.max_link_distance = distance;
        self
    }

    pub fn with_base_speed(mut self, speed: f32) -> Self {
        self.base_speed = speed;
        self
    }

    pub fn with_drift_strength(mut self, strength: f32) -> Self {
        self.drift_strength = strength;
        self
    }

    pub fn with_attraction(mut self, radius: f32, strength: f32) -> Self {
        self.attraction_radius = radius;
        self.attraction_strength = strength;
        self
    }

    pub fn with_return_ease(mut self, ease: f32) -> Self {
        self.return_ease = ease;
        self
    }

    pub fn with_pointer_ease(mut self, ease: f32) -> Self {
        self.pointer_ease = ease;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_cursor_trail(mut self, enabled: bool) -> Self {
        self.cursor_trail = enabled;
        self
    }

    pub fn with_event_start(mut self, unix_ms: i64) -> Self {
        self.event_start_unix_ms = unix_ms;
        self
    }

    /// Parse a JSON document. Missing keys keep their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

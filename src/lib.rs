//! # Driftfield - interactive particle field
//!
//! An animated background of drifting particles. Particles wander around
//! their spawn points, are pulled toward the pointer and link up with
//! translucent lines when they come close to each other.
//!
//! The simulation is plain CPU code behind a small set of seams: time comes
//! from a [`Clock`], input arrives through an [`InputQueue`] and drawing goes
//! through the [`Canvas`] trait. The bundled `driftfield` binary presents a
//! [`RasterCanvas`] in a window; tests drive the same code with a
//! [`ManualClock`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! let env = HostEnvironment::default();
//! let config = FieldConfig::for_device(env.device_class()).with_seed(7);
//! let context = SimulationContext::new(config, env, 800.0, 600.0, 1.0);
//!
//! let clock = ManualClock::new(0.0);
//! let mut driver = FrameDriver::new(context, clock.clone());
//! let mut canvas = RasterCanvas::new(800.0, 600.0, 1.0);
//!
//! driver.sender().send(InputEvent::PointerMoved { x: 400.0, y: 300.0, timestamp_ms: 0.0 });
//! for _ in 0..60 {
//!     clock.advance(16.0);
//!     driver.tick(&mut canvas);
//! }
//! canvas.save_png("field.png")?;
//! ```
//!
//! ## Pointer modes
//!
//! | Mode | When | Effect |
//! |------|------|--------|
//! | [`PointerMode::Engaged`] | pointer moved in the last 1200ms | full attraction toward the pointer |
//! | [`PointerMode::Idle`] | no recent movement | weaker attraction toward a Lissajous sweep, stronger jitter |
//! | [`PointerMode::Inactive`] | pointer left, or reduced motion | no attraction |
//!
//! ## Configuration
//!
//! [`FieldConfig`] is built with `with_*` methods or loaded from JSON.
//! Missing keys take their defaults:
//!
//! ```json
//! { "particle_count": 120, "max_link_distance": 140.0, "seed": 3 }
//! ```

pub mod carousel;
pub mod config;
pub mod countdown;
pub mod cursor;
pub mod driver;
pub mod error;
pub mod input;
pub mod integrator;
pub mod particle;
pub mod pointer;
pub mod raster;
pub mod render;
pub mod spawn;
pub mod splash;
pub mod time;

pub use carousel::Carousel;
pub use config::{DeviceClass, FieldConfig, HostEnvironment};
pub use countdown::{Countdown, Remaining};
pub use cursor::CursorTrail;
pub use driver::{FrameDriver, SimulationContext, StopHandle};
pub use error::{ConfigError, GpuError, SnapshotError, ViewerError};
pub use glam::Vec2;
pub use input::{InputEvent, InputQueue, InputSender, WindowInput};
pub use particle::{Particle, SimulationSpace};
pub use pointer::{AttractionTarget, PointerMode, PointerTracker};
pub use raster::RasterCanvas;
pub use render::{Canvas, Link, RenderStyle, Renderer, Rgba};
pub use spawn::SpawnContext;
pub use splash::{Splash, SplashPhase};
pub use time::{Clock, FrameTimer, ManualClock, SystemClock};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use driftfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{DeviceClass, FieldConfig, HostEnvironment};
    pub use crate::driver::{FrameDriver, SimulationContext, StopHandle};
    pub use crate::input::{InputEvent, InputSender};
    pub use crate::pointer::PointerMode;
    pub use crate::raster::RasterCanvas;
    pub use crate::render::{Canvas, Renderer, Rgba};
    pub use crate::time::{Clock, ManualClock, SystemClock};
    pub use crate::Vec2;
}

//! Frame driver and simulation context.
//!
//! [`SimulationContext`] gathers all mutable field state in one place. The
//! [`FrameDriver`] owns it and runs the per-frame pipeline:
//!
//! ```text
//! drain input ─► pointer tracker ─► integrator ─► renderer
//! ```
//!
//! The driver never reschedules itself. A host calls [`FrameDriver::tick`]
//! once per display refresh and keeps doing so while
//! [`FrameDriver::is_running`] holds. A [`StopHandle`] ends the loop from
//! anywhere.
//!
//! # Example
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! let env = HostEnvironment::default();
//! let config = FieldConfig::for_device(env.device_class()).with_seed(1);
//! let context = SimulationContext::new(config, env, 1280.0, 720.0, 1.0);
//! let mut driver = FrameDriver::new(context, SystemClock);
//! let mut canvas = RasterCanvas::new(1280.0, 720.0, 1.0);
//!
//! while driver.tick(&mut canvas) {
//!     // present canvas.pixels() ...
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec2;

use crate::config::{DeviceClass, FieldConfig, HostEnvironment};
use crate::countdown::{Countdown, Remaining};
use crate::cursor::CursorTrail;
use crate::input::{InputEvent, InputQueue, InputSender};
use crate::integrator;
use crate::particle::SimulationSpace;
use crate::pointer::PointerTracker;
use crate::render::{Canvas, Renderer};
use crate::spawn::SpawnContext;
use crate::time::{Clock, FrameTimer};

/// All mutable state of the particle field.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    config: FieldConfig,
    env: HostEnvironment,
    space: SimulationSpace,
    tracker: PointerTracker,
    cursor: CursorTrail,
    spawn: SpawnContext,
    scale_factor: f32,
}

impl SimulationContext {
    /// Build the context and spawn the first particle set.
    pub fn new(
        config: FieldConfig,
        env: HostEnvironment,
        width: f32,
        height: f32,
        scale_factor: f32,
    ) -> Self {
        let tracker = PointerTracker::new(config.pointer_ease, env.prefers_reduced_motion());
        let cursor_enabled =
            config.cursor_trail && env.device_class() == DeviceClass::FinePointer;
        let mut ctx = Self {
            space: SimulationSpace::new(width, height),
            cursor: CursorTrail::new(Vec2::new(width, height) / 2.0, cursor_enabled),
            spawn: SpawnContext::new(config.seed),
            tracker,
            config,
            env,
            scale_factor,
        };
        ctx.respawn();

        log::info!(
            "particle field ready: {} particles in {}x{} (link distance {}, reduced motion {})",
            ctx.space.len(),
            ctx.space.width(),
            ctx.space.height(),
            ctx.config.max_link_distance,
            ctx.env.prefers_reduced_motion(),
        );
        ctx
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn environment(&self) -> &HostEnvironment {
        &self.env
    }

    #[inline]
    pub fn space(&self) -> &SimulationSpace {
        &self.space
    }

    #[inline]
    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    #[inline]
    pub fn cursor(&self) -> &CursorTrail {
        &self.cursor
    }

    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Replace the space with a freshly spawned one of the new size.
    pub fn resize(&mut self, width: f32, height: f32, scale_factor: f32) {
        self.space = SimulationSpace::new(width, height);
        self.scale_factor = scale_factor;
        self.respawn();
        log::debug!(
            "viewport resized to {}x{} @{}x, respawned {} particles",
            self.space.width(),
            self.space.height(),
            scale_factor,
            self.space.len()
        );
    }

    /// Route one input event to the tracker, cursor or space.
    pub fn apply(&mut self, event: &InputEvent) {
        if let InputEvent::Resized {
            width,
            height,
            scale_factor,
        } = *event
        {
            self.resize(width, height, scale_factor);
            return;
        }
        self.tracker.apply(event);
        self.cursor.apply(event);
    }

    /// Resolve the attraction target and advance every particle one step.
    pub fn advance(&mut self, now_ms: f64) {
        self.tracker
            .update(now_ms, self.space.width(), self.space.height());
        self.cursor.update(now_ms);

        let attraction = self.tracker.attraction();
        integrator::step(&mut self.space, &attraction, &self.config, self.spawn.rng());
    }

    fn respawn(&mut self) {
        self.space
            .initialize(self.config.particle_count, self.config.base_speed, &mut self.spawn);
    }
}

/// Stops a [`FrameDriver`] from outside the frame loop.
#[derive(Debug, Clone)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }
}

/// Runs input → tracker → integrator → renderer once per tick.
pub struct FrameDriver<C: Clock> {
    context: SimulationContext,
    queue: InputQueue,
    renderer: Renderer,
    clock: C,
    timer: FrameTimer,
    countdown: Countdown,
    running: Arc<AtomicBool>,
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(context: SimulationContext, clock: C) -> Self {
        let renderer = Renderer::new(context.config().max_link_distance);
        let countdown = Countdown::new(context.config().event_start_unix_ms);
        let timer = FrameTimer::new(clock.now_ms());
        Self {
            context,
            queue: InputQueue::new(),
            renderer,
            clock,
            timer,
            countdown,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Handle for host callbacks to queue input.
    pub fn sender(&self) -> InputSender {
        self.queue.sender()
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            running: self.running.clone(),
        }
    }

    pub fn stop(&self) {
        self.stop_handle().stop();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    #[inline]
    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    #[inline]
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Time left until the configured event.
    pub fn countdown(&self) -> Remaining {
        self.countdown.remaining(self.clock.now_ms() as i64)
    }

    /// Apply queued input and advance the simulation without drawing.
    ///
    /// Returns `false` without doing anything once stopped.
    pub fn advance(&mut self) -> bool {
        self.step().is_some()
    }

    /// Run one full frame and paint it onto `canvas`.
    ///
    /// The canvas follows every resize, including density-only changes.
    /// Returns `false` without doing anything once stopped.
    pub fn tick<V: Canvas + ?Sized>(&mut self, canvas: &mut V) -> bool {
        let Some(resized) = self.step() else {
            return false;
        };

        let space = self.context.space();
        if resized || canvas.size() != space.size() {
            canvas.resize(space.width(), space.height(), self.context.scale_factor());
        }

        self.renderer.draw(space, canvas);
        self.renderer.draw_cursor(self.context.cursor(), canvas);
        true
    }

    /// One simulation step. `None` once stopped, otherwise whether a resize
    /// was applied.
    fn step(&mut self) -> Option<bool> {
        if !self.is_running() {
            return None;
        }
        let now_ms = self.clock.now_ms();
        let mut resized = false;
        for event in self.queue.drain() {
            resized |= matches!(event, InputEvent::Resized { .. });
            self.context.apply(&event);
        }
        self.context.advance(now_ms);
        self.timer.update(now_ms);
        Some(resized)
    }

    /// Tick up to `frames` times, stopping early if the driver is stopped.
    ///
    /// Returns the number of frames actually run.
    pub fn run_frames<V: Canvas + ?Sized>(&mut self, frames: u64, canvas: &mut V) -> u64 {
        let mut ran = 0;
        while ran < frames && self.tick(canvas) {
            ran += 1;
        }
        ran
    }
}

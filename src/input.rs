//! Input events and the per-frame input queue.
//!
//! Hosts never touch simulation state directly. They push [`InputEvent`]s
//! through an [`InputSender`], and the frame driver drains the queue once at
//! the start of every frame, applying events in arrival order.
//!
//! # Usage
//!
//! ```ignore
//! let queue = InputQueue::new();
//! let sender = queue.sender();
//!
//! // From a host callback:
//! sender.send(InputEvent::PointerMoved { x: 120.0, y: 40.0, timestamp_ms: now });
//!
//! // At the next frame boundary:
//! for event in queue.drain() {
//!     tracker.apply(&event);
//! }
//! ```

use flume::{Receiver, Sender};
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;

/// A notification from the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to `(x, y)` in device-independent pixels.
    PointerMoved { x: f32, y: f32, timestamp_ms: f64 },
    /// Pointer entered the tracked surface.
    PointerEntered,
    /// Pointer left the tracked surface.
    PointerLeft,
    /// Viewport changed size or pixel density.
    Resized {
        width: f32,
        height: f32,
        scale_factor: f32,
    },
}

/// Cloneable handle for pushing events into an [`InputQueue`].
#[derive(Debug, Clone)]
pub struct InputSender {
    chan: Sender<InputEvent>,
}

impl InputSender {
    /// Queue an event for the next frame.
    ///
    /// Returns `false` if the queue has been dropped.
    pub fn send(&self, event: InputEvent) -> bool {
        match self.chan.send(event) {
            Ok(()) => true,
            Err(_) => {
                log::warn!("input queue closed, dropping {:?}", event);
                false
            }
        }
    }
}

/// Ordered queue of pending input, drained once per frame.
#[derive(Debug)]
pub struct InputQueue {
    read_chan: Receiver<InputEvent>,
    write_chan: Sender<InputEvent>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            read_chan: rx,
            write_chan: tx,
        }
    }

    /// A new handle for host callbacks.
    pub fn sender(&self) -> InputSender {
        InputSender {
            chan: self.write_chan.clone(),
        }
    }

    /// Take every event queued so far, oldest first.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.read_chan.try_iter().collect()
    }

    /// Number of events waiting.
    pub fn pending(&self) -> usize {
        self.read_chan.len()
    }
}

/// Translates winit window events into [`InputEvent`]s.
///
/// winit reports physical pixels; the field works in device-independent
/// pixels, so the translator tracks the current size and scale factor.
///
/// A scale-factor change is held back until the physical size catches up:
/// winit follows it with `Resized`, and [`WindowInput::flush`] covers the
/// case where the size does not change.
#[derive(Debug, Clone, Copy)]
pub struct WindowInput {
    size: PhysicalSize<u32>,
    scale_factor: f64,
    rescale_pending: bool,
}

impl WindowInput {
    pub fn new(size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        Self {
            size,
            scale_factor,
            rescale_pending: false,
        }
    }

    /// Resize event for the current window state.
    pub fn resized_event(&self) -> InputEvent {
        let scale = self.scale_factor.max(f64::EPSILON);
        InputEvent::Resized {
            width: (self.size.width as f64 / scale) as f32,
            height: (self.size.height as f64 / scale) as f32,
            scale_factor: self.scale_factor as f32,
        }
    }

    #[inline]
    pub fn physical_size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Record a new physical size and emit the matching resize.
    pub fn resize(&mut self, size: PhysicalSize<u32>) -> InputEvent {
        self.size = size;
        self.rescale_pending = false;
        self.resized_event()
    }

    /// Record a new scale factor. Nothing is emitted until the next
    /// [`resize`](Self::resize) or [`flush`](Self::flush).
    pub fn rescale(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
        self.rescale_pending = true;
    }

    /// Emit a held-back scale change that no resize followed.
    pub fn flush(&mut self) -> Option<InputEvent> {
        if !self.rescale_pending {
            return None;
        }
        self.rescale_pending = false;
        Some(self.resized_event())
    }

    /// Process a winit window event. `now_ms` stamps pointer moves.
    pub fn translate(&mut self, event: &WindowEvent, now_ms: f64) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(self.scale_factor);
                Some(InputEvent::PointerMoved {
                    x: logical.x as f32,
                    y: logical.y as f32,
                    timestamp_ms: now_ms,
                })
            }
            WindowEvent::CursorEntered { .. } => Some(InputEvent::PointerEntered),
            WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),
            WindowEvent::Resized(size) => Some(self.resize(*size)),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.rescale(*scale_factor);
                None
            }
            _ => None,
        }
    }
}

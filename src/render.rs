//! Frame rendering.
//!
//! The renderer reads the particle store and paints a full frame onto any
//! [`Canvas`]: a transparent clear, one dot per particle, and a line between
//! every pair of particles closer than the link distance. Nothing is kept
//! between frames.
//!
//! The link pass is O(n²) over all pairs. Particle counts are capped (200,
//! or 25 on coarse pointers) to keep that affordable.

use glam::Vec2;

use crate::cursor::CursorTrail;
use crate::particle::{Particle, SimulationSpace};

/// Straight RGBA colour, components in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Colour from 8-bit channels and a float alpha, like CSS `rgba()`.
    pub fn from_u8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// A 2D drawing surface addressed in device-independent pixels.
pub trait Canvas {
    /// Drawable size in device-independent pixels.
    fn size(&self) -> Vec2;
    /// Fill the whole surface with `color`, replacing what was there.
    fn clear(&mut self, color: Rgba);
    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
    /// Follow a viewport change. Surfaces with a fixed size ignore it.
    fn resize(&mut self, _width: f32, _height: f32, _scale_factor: f32) {}
}

/// Colours and sizes used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub particle_radius: f32,
    pub particle_color: Rgba,
    /// Link colour; its alpha is replaced per link.
    pub link_color: Rgba,
    pub link_width: f32,
    /// Opacity of a link between coincident particles.
    pub max_link_alpha: f32,
    pub cursor_glow_radius: f32,
    pub cursor_glow_color: Rgba,
    pub cursor_core_radius: f32,
    pub cursor_core_color: Rgba,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            particle_radius: 1.8,
            particle_color: Rgba::new(1.0, 1.0, 1.0, 0.85),
            link_color: Rgba::from_u8(148, 163, 184, 1.0),
            link_width: 1.6,
            max_link_alpha: 0.7,
            cursor_glow_radius: 18.0,
            cursor_glow_color: Rgba::from_u8(148, 163, 184, 0.18),
            cursor_core_radius: 4.0,
            cursor_core_color: Rgba::new(1.0, 1.0, 1.0, 0.9),
        }
    }
}

/// A proximity link between particles `a` and `b` (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
}

/// Link opacity for two particles `distance` apart.
///
/// Falls linearly from `max_alpha` at distance 0 to 0 at `max_distance`.
/// `None` at or beyond `max_distance`.
#[inline]
pub fn link_alpha(distance: f32, max_distance: f32, max_alpha: f32) -> Option<f32> {
    if distance < max_distance {
        Some((1.0 - distance / max_distance) * max_alpha)
    } else {
        None
    }
}

/// Every link between distinct particles, each unordered pair once.
pub fn links(particles: &[Particle], max_distance: f32, max_alpha: f32) -> Vec<Link> {
    let mut out = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            let d = a.position.distance(b.position);
            if let Some(alpha) = link_alpha(d, max_distance, max_alpha) {
                out.push(Link { a: i, b: j, alpha });
            }
        }
    }
    out
}

/// Paints the particle field.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    style: RenderStyle,
    max_link_distance: f32,
}

impl Renderer {
    pub fn new(max_link_distance: f32) -> Self {
        Self {
            style: RenderStyle::default(),
            max_link_distance,
        }
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    #[inline]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Draw one frame of the field from scratch.
    pub fn draw<C: Canvas + ?Sized>(&self, space: &SimulationSpace, canvas: &mut C) {
        canvas.clear(Rgba::TRANSPARENT);

        let style = &self.style;
        let particles = space.particles();
        for (i, a) in particles.iter().enumerate() {
            canvas.fill_circle(a.position, style.particle_radius, style.particle_color);

            for b in &particles[i + 1..] {
                let d = a.position.distance(b.position);
                if let Some(alpha) = link_alpha(d, self.max_link_distance, style.max_link_alpha) {
                    canvas.stroke_line(
                        a.position,
                        b.position,
                        style.link_width,
                        style.link_color.with_alpha(alpha),
                    );
                }
            }
        }
    }

    /// Paint the cursor trail on top of the field, if visible.
    pub fn draw_cursor<C: Canvas + ?Sized>(&self, cursor: &CursorTrail, canvas: &mut C) {
        if !cursor.is_visible() {
            return;
        }
        let style = &self.style;
        canvas.fill_circle(cursor.glow(), style.cursor_glow_radius, style.cursor_glow_color);
        canvas.fill_circle(cursor.core(), style.cursor_core_radius, style.cursor_core_color);
    }
}

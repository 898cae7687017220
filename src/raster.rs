//! CPU raster surface.
//!
//! [`RasterCanvas`] is an RGBA8 buffer sized to the viewport in device
//! pixels. Drawing calls take device-independent coordinates and are scaled
//! by the pixel ratio, so the field looks the same on any display density.
//! Shapes are anti-aliased by pixel coverage and composited source-over.

use std::path::Path;

use glam::Vec2;
use image::{ImageFormat, RgbaImage};

use crate::error::SnapshotError;
use crate::render::{Canvas, Rgba};

#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: RgbaImage,
    logical: Vec2,
    scale_factor: f32,
}

impl RasterCanvas {
    /// A transparent surface of `width × height` device-independent pixels.
    pub fn new(width: f32, height: f32, scale_factor: f32) -> Self {
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        let logical = Vec2::new(width.max(0.0), height.max(0.0));
        let (pw, ph) = physical_size(logical, scale_factor);
        Self {
            image: RgbaImage::new(pw, ph),
            logical,
            scale_factor,
        }
    }

    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Size in device pixels.
    #[inline]
    pub fn pixel_size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Raw RGBA8 bytes, row-major, no padding.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Colour of one device pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let (w, h) = self.image.dimensions();
        (x < w && y < h).then(|| self.image.get_pixel(x, y).0)
    }

    /// Write the surface as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return Err(SnapshotError::EmptySurface);
        }
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    /// Composite `color` over pixel (x, y) with extra `coverage`.
    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f32) {
        let sa = (color.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let px = self.image.get_pixel_mut(x, y);
        let [dr, dg, db, da] = px.0.map(|c| c as f32 / 255.0);

        let out_a = sa + da * (1.0 - sa);
        let mix = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
        px.0 = [
            to_u8(mix(color.r, dr)),
            to_u8(mix(color.g, dg)),
            to_u8(mix(color.b, db)),
            to_u8(out_a),
        ];
    }

    /// Device-pixel bounding box of `[min, max]`, clipped to the surface.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(w as f32 - 1.0);
        let y1 = max.y.ceil().min(h as f32 - 1.0);
        if !(x0 <= x1 && y0 <= y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> Vec2 {
        self.logical
    }

    fn clear(&mut self, color: Rgba) {
        let px = image::Rgba([
            to_u8(color.r),
            to_u8(color.g),
            to_u8(color.b),
            to_u8(color.a),
        ]);
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let c = center * self.scale_factor;
        let r = radius * self.scale_factor;
        let reach = Vec2::splat(r + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(c - reach, c + reach) else {
            return;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (r + 0.5 - p.distance(c)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let a = from * self.scale_factor;
        let b = to * self.scale_factor;
        let half = width * self.scale_factor * 0.5;
        let reach = Vec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(a.min(b) - reach, a.max(b) + reach) else {
            return;
        };

        let ab = b - a;
        let len2 = ab.length_squared();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len2 > 0.0 {
                    ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let dist = p.distance(a + ab * t);
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    /// Reallocate for a new viewport. Contents are discarded.
    fn resize(&mut self, width: f32, height: f32, scale_factor: f32) {
        *self = Self::new(width, height, scale_factor);
    }
}

fn physical_size(logical: Vec2, scale_factor: f32) -> (u32, u32) {
    let p = (logical * scale_factor).round();
    (p.x as u32, p.y as u32)
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

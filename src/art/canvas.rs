// src/art/canvas.rs

//! Software raster target for [`Primitive`]s.
//!
//! Colours are kept as `f32` RGB in `[0, 1]` and composited with
//! source-over, or screen for the final glow pass. Discs and strokes are
//! anti-aliased over one pixel; polygon interiors are sampled at pixel
//! centres with the even-odd rule.

use super::font;
use super::geometry::Point;
use super::palette::Rgba;
use super::primitives::{GradientStop, Paint, Primitive, Stroke};
use crate::core::{CanvasError, Result};

/// Square RGB raster.
#[derive(Clone, PartialEq)]
pub struct Canvas {
    size: u32,
    pixels: Vec<[f32; 3]>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas").field("size", &self.size).finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
enum Blend {
    SourceOver,
    Screen,
}

/// Pixel columns (or rows) `[lo, hi)` touched by the span `[min, max]`.
fn pixel_span(min: f64, max: f64, size: usize) -> Option<(usize, usize)> {
    if !(min.is_finite() && max.is_finite()) {
        return None;
    }
    let lo = min.floor().max(0.0) as usize;
    let hi = (max.ceil().max(0.0) as usize).min(size);
    (lo < hi).then_some((lo, hi))
}

fn channel(v: u8) -> f32 {
    v as f32 / 255.0
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn contains(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > p.y) != (pj.y > p.y) && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl Canvas {
    /// Allocates a black `size × size` canvas.
    ///
    /// # Errors
    /// * `Rendering` for a zero size.
    /// * `Resource` when the pixel buffer cannot be reserved.
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 {
            return Err(CanvasError::Rendering("canvas size must be positive".to_string()));
        }
        let len = (size as usize)
            .checked_mul(size as usize)
            .ok_or_else(|| CanvasError::resource("canvas pixels", usize::MAX))?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| CanvasError::resource("canvas pixels", len))?;
        pixels.resize(len, [0.0; 3]);
        Ok(Self { size, pixels })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Opaque colour at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let [r, g, b] = self.pixels[y as usize * self.size as usize + x as usize];
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Some(Rgba {
            r: q(r),
            g: q(g),
            b: q(b),
            a: 0xFF,
        })
    }

    /// Row-major RGBA8 bytes, fully opaque.
    pub fn to_rgba8(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(self.pixels.len() * 4)
            .map_err(|_| CanvasError::resource("rgba buffer", self.pixels.len() * 4))?;
        for y in 0..self.size {
            for x in 0..self.size {
                if let Some(c) = self.pixel(x, y) {
                    bytes.extend_from_slice(&[c.r, c.g, c.b, c.a]);
                }
            }
        }
        Ok(bytes)
    }

    fn dim(&self) -> usize {
        self.size as usize
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba, coverage: f64, mode: Blend) {
        let alpha = (channel(color.a) as f64 * coverage.clamp(0.0, 1.0)) as f32;
        if alpha <= 0.0 {
            return;
        }
        let idx = y * self.dim() + x;
        let dst = &mut self.pixels[idx];
        let src = [channel(color.r), channel(color.g), channel(color.b)];
        for (d, s) in dst.iter_mut().zip(src) {
            let target = match mode {
                Blend::SourceOver => s,
                Blend::Screen => 1.0 - (1.0 - *d) * (1.0 - s),
            };
            *d += (target - *d) * alpha;
        }
    }

    /// Overwrites the whole canvas with a radial gradient centred on the
    /// canvas, `inner` at the centre and `outer` at `radius`.
    pub fn fill_background(&mut self, inner: Rgba, outer: Rgba, radius: f64) {
        let n = self.dim();
        let c = n as f64 / 2.0;
        let center = Point::new(c, c);
        for y in 0..n {
            for x in 0..n {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let color = inner.lerp(outer, p.distance(center) / radius.max(f64::EPSILON));
                self.pixels[y * n + x] = [channel(color.r), channel(color.g), channel(color.b)];
            }
        }
    }

    /// Screen-composites a radial gradient over the canvas.
    pub fn screen_glow(&mut self, center: Point, radius: f64, stops: Vec<GradientStop>) {
        let paint = Paint::radial(center, 0.0, radius, stops);
        let n = self.dim();
        for y in 0..n {
            for x in 0..n {
                let color = paint.color_at(Point::new(x as f64 + 0.5, y as f64 + 0.5));
                self.blend(x, y, color, 1.0, Blend::Screen);
            }
        }
    }

    /// Rasterizes one primitive.
    pub fn draw(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Disc {
                center,
                radius,
                paint,
                stroke,
            } => {
                self.fill_disc(*center, *radius, paint);
                if let Some(stroke) = stroke {
                    self.stroke_circle(*center, *radius, stroke);
                }
            }
            Primitive::Polygon { points, fill, stroke } => {
                if points.len() < 2 {
                    return;
                }
                if let Some(paint) = fill {
                    self.fill_polygon(points, paint);
                }
                if let Some(stroke) = stroke {
                    self.stroke_polyline(points, true, stroke);
                }
            }
            Primitive::Path { points, stroke } => {
                if points.len() >= 2 {
                    self.stroke_polyline(points, false, stroke);
                }
            }
        }
    }

    fn fill_disc(&mut self, center: Point, radius: f64, paint: &Paint) {
        let n = self.dim();
        let reach = radius + 1.0;
        let (Some((x0, x1)), Some((y0, y1))) = (
            pixel_span(center.x - reach, center.x + reach, n),
            pixel_span(center.y - reach, center.y + reach, n),
        ) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = radius - p.distance(center) + 0.5;
                if coverage > 0.0 {
                    self.blend(x, y, paint.color_at(p), coverage, Blend::SourceOver);
                }
            }
        }
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) {
        let n = self.dim();
        let half = stroke.width / 2.0;
        let reach = radius + half + 1.0;
        let (Some((x0, x1)), Some((y0, y1))) = (
            pixel_span(center.x - reach, center.x + reach, n),
            pixel_span(center.y - reach, center.y + reach, n),
        ) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = half - (p.distance(center) - radius).abs() + 0.5;
                if coverage > 0.0 {
                    self.blend(x, y, stroke.color, coverage, Blend::SourceOver);
                }
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], paint: &Paint) {
        if points.len() < 3 {
            return;
        }
        let n = self.dim();
        let (min, max) = bounds(points);
        let (Some((x0, x1)), Some((y0, y1))) = (pixel_span(min.x, max.x, n), pixel_span(min.y, max.y, n)) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if contains(points, p) {
                    self.blend(x, y, paint.color_at(p), 1.0, Blend::SourceOver);
                }
            }
        }
    }

    /// Strokes through a coverage mask so overlapping segments of one stroke
    /// never double-blend.
    fn stroke_polyline(&mut self, points: &[Point], closed: bool, stroke: &Stroke) {
        let n = self.dim();
        let half = stroke.width.max(0.0) / 2.0;
        let pad = half + 1.0;
        let (min, max) = bounds(points);
        let (Some((x0, x1)), Some((y0, y1))) = (
            pixel_span(min.x - pad, max.x + pad, n),
            pixel_span(min.y - pad, max.y + pad, n),
        ) else {
            return;
        };
        let width = x1 - x0;
        let mut mask = vec![0.0f64; width * (y1 - y0)];

        let closing = if closed { points.last().zip(points.first()) } else { None };
        let segments = points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing.map(|(a, b)| (*a, *b)));
        for (a, b) in segments {
            let (Some((sx0, sx1)), Some((sy0, sy1))) = (
                pixel_span(a.x.min(b.x) - pad, a.x.max(b.x) + pad, n),
                pixel_span(a.y.min(b.y) - pad, a.y.max(b.y) + pad, n),
            ) else {
                continue;
            };
            for y in sy0.max(y0)..sy1.min(y1) {
                for x in sx0.max(x0)..sx1.min(x1) {
                    let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                    let coverage = (half - distance_to_segment(p, a, b) + 0.5).clamp(0.0, 1.0);
                    let cell = &mut mask[(y - y0) * width + (x - x0)];
                    if coverage > *cell {
                        *cell = coverage;
                    }
                }
            }
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = mask[(y - y0) * width + (x - x0)];
                if coverage > 0.0 {
                    self.blend(x, y, stroke.color, coverage, Blend::SourceOver);
                }
            }
        }
    }

    /// Draws `text` with the bitmap font; `origin` is the top-left corner and
    /// every font cell is `cell × cell` pixels.
    pub fn draw_text(&mut self, text: &str, origin: Point, cell: f64, color: Rgba) {
        let n = self.dim();
        for (col, row) in font::layout(text) {
            let left = origin.x + col as f64 * cell;
            let top = origin.y + row as f64 * cell;
            let (Some((x0, x1)), Some((y0, y1))) = (
                pixel_span(left, left + cell, n),
                pixel_span(top, top + cell, n),
            ) else {
                continue;
            };
            for y in y0..y1 {
                for x in x0..x1 {
                    let (cx, cy) = (x as f64 + 0.5, y as f64 + 0.5);
                    if cx >= left && cx < left + cell && cy >= top && cy < top + cell {
                        self.blend(x, y, color, 1.0, Blend::SourceOver);
                    }
                }
            }
        }
    }
}

fn bounds(points: &[Point]) -> (Point, Point) {
    points.iter().fold(
        (
            Point::new(f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        ),
        |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        },
    )
}

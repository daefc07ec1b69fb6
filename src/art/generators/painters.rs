// src/art/generators/painters.rs

//! Painter styles.
//!
//! All of them consume the same per-outcome [`Brush`], so a new painter only
//! has to decide what to do with a position, a size, a colour, a phase and an
//! amplitude.

use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI, TAU};

use super::Layout;
use crate::art::geometry::Point;
use crate::art::palette::Rgba;
use crate::art::primitives::{GradientStop, Motif, Paint, Primitive, Sketch, Stroke};

const INK: Rgba = Rgba::from_hex(0x111111);
const DUSK: Rgba = Rgba::from_hex(0x1A1A2E);
const PAPER: Rgba = Rgba::from_hex(0xF2EFE6);
const BLACK: Rgba = Rgba::from_hex(0x000000);
const IVORY: Rgba = Rgba::from_hex(0xFAF3E0);

/// Per-outcome input shared by every painter style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Brush {
    /// Anchor point on the canvas.
    pub position: Point,
    /// Characteristic radius in pixels.
    pub size: f64,
    pub color: Rgba,
    /// Angle in radians derived from the outcome value.
    pub phase: f64,
    /// Square root of the outcome weight.
    pub amplitude: f64,
}

impl Brush {
    /// Brushes for the first `layer_depth` ranked outcomes.
    ///
    /// Anchors sit on a golden-angle spiral; the radial position comes from
    /// the fractional part of `value·φ` shifted by the measurement hash.
    pub fn from_layout(layout: &Layout) -> Vec<Brush> {
        const GOLDEN: f64 = 0.618_033_988_749_895;
        let states = (1u64 << layout.num_qubits) as f64;
        layout
            .ranked
            .iter()
            .take(layout.params.layer_depth as usize)
            .enumerate()
            .map(|(idx, outcome)| {
                let value = outcome.value as f64;
                let spread = (value * GOLDEN + layout.hash as f64 / 10_000.0).fract();
                let angle = (value * 137.5).to_radians() + layout.rotation_offset;
                Brush {
                    position: Point::polar(layout.center, angle, layout.size * (0.06 + 0.32 * spread)),
                    size: layout.size * (0.04 + 0.16 * outcome.probability.sqrt()) * layout.scale_variation,
                    color: layout.color(outcome.value + idx as u64),
                    phase: value / states * TAU + layout.rotation_offset,
                    amplitude: outcome.probability.sqrt(),
                }
            })
            .collect()
    }
}

fn nearest(brushes: &[Brush], p: Point) -> usize {
    brushes
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.position.distance(p).total_cmp(&b.1.position.distance(p)))
        .map_or(0, |(i, _)| i)
}

/// Soft blobs whose outline wobbles with `harmonics`.
pub(super) fn abstract_blobs(layout: &Layout, brushes: &[Brush], sketch: &mut Sketch, rng: &mut StdRng) {
    let harmonics = layout.params.harmonics as f64;
    let vertices = 24 + 4 * layout.params.harmonics as usize;
    for (idx, brush) in brushes.iter().enumerate() {
        sketch.glow(
            idx,
            Motif::Halo,
            brush.position,
            brush.size * 1.6,
            vec![
                GradientStop::new(0.0, brush.color.with_alpha(0x55)),
                GradientStop::new(1.0, brush.color.with_alpha(0x00)),
            ],
        );
        let outline: Vec<Point> = (0..vertices)
            .map(|k| {
                let theta = k as f64 / vertices as f64 * TAU;
                let wobble = 0.3 * brush.amplitude * (harmonics * theta + brush.phase).sin();
                let noise = 0.15 * layout.params.entropy * (rng.random::<f64>() - 0.5);
                Point::polar(brush.position, theta, brush.size * (1.0 + wobble + noise))
            })
            .collect();
        sketch.polygon(
            idx,
            Motif::Blob,
            outline,
            Some(Paint::solid(brush.color.with_alpha(0xAA))),
            Some(Stroke::new(layout.color(idx as u64 + 1).with_alpha(0xCC), 2.0 * layout.unit)),
        );
    }
}

/// Melting clock faces: the lower half of each dial droops.
pub(super) fn dali(layout: &Layout, brushes: &[Brush], sketch: &mut Sketch, rng: &mut StdRng) {
    let u = layout.unit;
    for (idx, brush) in brushes.iter().enumerate() {
        let droop = 0.4 + brush.amplitude + rng.random::<f64>() * 0.3;
        let face: Vec<Point> = (0..32)
            .map(|k| {
                let theta = k as f64 / 32.0 * TAU;
                let sag = if theta.sin() > 0.0 { 1.0 + droop * theta.sin() } else { 1.0 };
                Point::new(
                    brush.position.x + theta.cos() * brush.size,
                    brush.position.y + theta.sin() * brush.size * sag,
                )
            })
            .collect();
        sketch.polygon(
            idx,
            Motif::Clock,
            face,
            Some(Paint::solid(brush.color.with_alpha(0xCC))),
            Some(Stroke::new(DUSK, 2.5 * u)),
        );
        for (angle, length) in [(brush.phase, 0.5), ((brush.phase * 12.0) % TAU, 0.8)] {
            let tip = Point::polar(brush.position, angle - FRAC_PI_2, brush.size * length);
            sketch.path(idx, Motif::Hand, vec![brush.position, tip], Stroke::new(DUSK, 3.0 * u));
        }
    }
}

/// Overlapping triangular facets with heavy outlines and one eye each.
pub(super) fn picasso(layout: &Layout, brushes: &[Brush], sketch: &mut Sketch, rng: &mut StdRng) {
    let u = layout.unit;
    let facets = 3 + layout.params.complexity as usize / 2;
    for (idx, brush) in brushes.iter().enumerate() {
        for j in 0..facets {
            let base = brush.phase + j as f64 * TAU / facets as f64;
            let corners: Vec<Point> = (0..3)
                .map(|k| {
                    let angle = base + k as f64 * TAU / 3.0 + (rng.random::<f64>() - 0.5) * 0.8;
                    Point::polar(brush.position, angle, brush.size * (0.5 + rng.random::<f64>() * 0.7))
                })
                .collect();
            sketch.polygon(
                idx,
                Motif::Facet,
                corners,
                Some(Paint::solid(layout.color((idx + j) as u64).with_alpha(0xBB))),
                Some(Stroke::new(INK, 3.0 * u)),
            );
        }
        let eye = Point::polar(brush.position, brush.phase + FRAC_PI_2, brush.size * 0.25);
        sketch.draw(
            idx,
            Motif::Eye,
            Primitive::Disc {
                center: eye,
                radius: brush.size * 0.12,
                paint: Paint::solid(IVORY.with_alpha(0xEE)),
                stroke: Some(Stroke::new(INK, 2.0 * u)),
            },
        );
        sketch.disc(idx, Motif::Eye, eye, brush.size * 0.05, INK);
    }
}

/// Concentric rings with a straight accent line per outcome.
pub(super) fn kandinsky(layout: &Layout, brushes: &[Brush], sketch: &mut Sketch) {
    let rings = 2 + layout.params.harmonics.min(4) as usize;
    for (idx, brush) in brushes.iter().enumerate() {
        for k in 0..rings {
            let radius = brush.size * (1.0 - k as f64 / rings as f64 * 0.8);
            let color = layout.color((idx + k) as u64).with_alpha(0xE0);
            sketch.disc(idx, Motif::Ring, brush.position, radius, color);
        }
        let end = Point::polar(brush.position, brush.phase, brush.size * (1.5 + 2.0 * brush.amplitude));
        sketch.path(
            idx,
            Motif::Line,
            vec![brush.position, end],
            Stroke::new(INK.with_alpha(0xDD), (2.0 + 6.0 * brush.amplitude) * layout.unit),
        );
    }
}

/// Random-walk drips plus splatter along each walk.
pub(super) fn pollock(layout: &Layout, brushes: &[Brush], sketch: &mut Sketch, rng: &mut StdRng) {
    let u = layout.unit;
    let steps = 20 + layout.params.complexity as usize * 8;
    let wander = 0.6 + layout.params.entropy * 1.2;
    for (idx, brush) in brushes.iter().enumerate() {
        let mut heading = brush.phase;
        let mut at = brush.position;
        let mut trail = Vec::with_capacity(steps + 1);
        trail.push(at);
        for _ in 0..steps {
            heading += (rng.random::<f64>() - 0.5) * wander;
            at = Point::polar(at, heading, brush.size * 0.12 * (0.5 + rng.random::<f64>()));
            trail.push(at);
        }

        let splatter = 3 + (brush.amplitude * 12.0) as usize;
        let drops: Vec<(Point, f64)> = (0..splatter)
            .map(|_| {
                let anchor = trail[rng.random_range(0..trail.len())];
                let drop = Point::polar(anchor, rng.random::<f64>() * TAU, rng.random::<f64>() * brush.size * 0.3);
                (drop, (2.0 + rng.random::<f64>() * 6.0) * u)
            })
            .collect();

        sketch.path(
            idx,
            Motif::Drip,
            trail,
            Stroke::new(brush.color.with_alpha(0xDD), (1.5 + 5.0 * brush.amplitude) * u),
        );
        for (k, (drop, radius)) in drops.into_iter().enumerate() {
            let color = layout.color((idx + k) as u64).with_alpha(0xCC);
            sketch.disc(idx, Motif::Splatter, drop, radius, color);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Cell {
    fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x < self.x1 && p.y >= self.y0 && p.y < self.y1
    }

    fn area(&self) -> f64 {
        (self.x1 - self.x0) * (self.y1 - self.y0)
    }

    fn corners(&self) -> Vec<Point> {
        vec![
            Point::new(self.x0, self.y0),
            Point::new(self.x1, self.y0),
            Point::new(self.x1, self.y1),
            Point::new(self.x0, self.y1),
        ]
    }
}

/// Recursive grid: each brush splits the cell under it, alternating
/// vertical and horizontal cuts.
pub(super) fn mondrian(layout: &Layout, brushes: &[Brush], sketch: &mut Sketch) {
    if brushes.is_empty() {
        return;
    }
    let s = layout.size;
    let margin = s * 0.04;
    let min_side = s * 0.08;
    let mut cells = vec![Cell {
        x0: margin,
        y0: margin,
        x1: s - margin,
        y1: s - margin,
    }];

    for (i, brush) in brushes.iter().enumerate() {
        let target = cells
            .iter()
            .position(|c| c.contains(brush.position))
            .or_else(|| {
                cells
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.area().total_cmp(&b.1.area()))
                    .map(|(k, _)| k)
            });
        let Some(k) = target else { continue };
        let cell = cells[k];
        let vertical = (i as u64 + layout.hash) % 2 == 0;
        let (w, h) = (cell.x1 - cell.x0, cell.y1 - cell.y0);
        if vertical && w >= min_side * 2.0 {
            let cut = brush.position.x.clamp(cell.x0 + 0.2 * w, cell.x1 - 0.2 * w);
            cells[k] = Cell { x1: cut, ..cell };
            cells.push(Cell { x0: cut, ..cell });
        } else if !vertical && h >= min_side * 2.0 {
            let cut = brush.position.y.clamp(cell.y0 + 0.2 * h, cell.y1 - 0.2 * h);
            cells[k] = Cell { y1: cut, ..cell };
            cells.push(Cell { y0: cut, ..cell });
        }
    }

    let line = Stroke::new(INK, 8.0 * layout.unit);
    for (k, cell) in cells.iter().enumerate() {
        let owner = k % brushes.len();
        let fill = if (k as u64 + layout.hash) % 3 == 0 {
            brushes[owner].color
        } else {
            PAPER.with_alpha(0xF0)
        };
        sketch.polygon(owner, Motif::Cell, cell.corners(), Some(Paint::solid(fill)), Some(line));
    }
}

/// Direction of the flow field at `p`: a harmonic base field bent into
/// swirls around every brush.
fn flow_angle(layout: &Layout, brushes: &[Brush], p: Point) -> f64 {
    let h = layout.params.harmonics as f64;
    let (xr, yr) = (p.x / layout.unit, p.y / layout.unit);
    let mut angle = (xr * 0.004 * h + layout.rotation_offset).sin() * PI + (yr * 0.004 * h).cos() * FRAC_PI_2;
    for brush in brushes {
        let d = p.distance(brush.position);
        let weight = (-d / (brush.size * 2.0)).exp() * brush.amplitude;
        let tangent = (p.y - brush.position.y).atan2(p.x - brush.position.x) + FRAC_PI_2;
        angle += weight * tangent;
    }
    angle
}

/// Short strokes following a flow field, coloured by the nearest brush,
/// then a spiral swirl on every brush.
pub(super) fn van_gogh(layout: &Layout, brushes: &[Brush], sketch: &mut Sketch, rng: &mut StdRng) {
    if brushes.is_empty() {
        return;
    }
    let (s, u) = (layout.size, layout.unit);
    let strokes = 80 + layout.params.complexity as usize * 20;
    for _ in 0..strokes {
        let mut at = Point::new(rng.random::<f64>() * s, rng.random::<f64>() * s);
        let owner = nearest(brushes, at);
        let width = (3.0 + 2.0 * rng.random::<f64>()) * u;
        let mut trail = vec![at];
        for _ in 0..6 {
            at = Point::polar(at, flow_angle(layout, brushes, at), 9.0 * u);
            trail.push(at);
        }
        sketch.path(
            owner,
            Motif::FlowStroke,
            trail,
            Stroke::new(brushes[owner].color.with_alpha(0xCC), width),
        );
    }

    for (idx, brush) in brushes.iter().enumerate() {
        let spiral: Vec<Point> = (0..=48)
            .map(|t| {
                let f = t as f64 / 48.0;
                Point::polar(brush.position, brush.phase + f * 2.0 * TAU, brush.size * f)
            })
            .collect();
        sketch.path(
            idx,
            Motif::Swirl,
            spiral,
            Stroke::new(brush.color, (2.0 + 4.0 * brush.amplitude) * u),
        );
    }
}

/// Tumbling-block tessellation: every hexagon is split into three shaded
/// rhombi tinted by the nearest brush.
pub(super) fn escher(layout: &Layout, brushes: &[Brush], sketch: &mut Sketch) {
    if brushes.is_empty() {
        return;
    }
    let s = layout.size;
    let radius = s / (6.0 + layout.params.complexity as f64);
    let dx = radius * 3f64.sqrt();
    let dy = radius * 1.5;
    let rows = (s / dy).ceil() as i64 + 1;
    let cols = (s / dx).ceil() as i64 + 1;
    let edge = Stroke::new(INK.with_alpha(0x88), 1.5 * layout.unit);

    for row in -1..=rows {
        for col in -1..=cols {
            let shift = if row.rem_euclid(2) == 1 { dx / 2.0 } else { 0.0 };
            let center = Point::new(col as f64 * dx + shift, row as f64 * dy);
            let owner = nearest(brushes, center);
            let base = brushes[owner].color;
            // Pointy-top hexagon, vertex 0 straight up
            let v: Vec<Point> = (0..6)
                .map(|k| Point::polar(center, -FRAC_PI_2 + k as f64 * FRAC_PI_3, radius))
                .collect();
            let faces = [
                (vec![center, v[5], v[0], v[1]], base),
                (vec![center, v[1], v[2], v[3]], base.lerp(BLACK, 0.35)),
                (vec![center, v[3], v[4], v[5]], base.lerp(BLACK, 0.6)),
            ];
            for (points, color) in faces {
                sketch.polygon(owner, Motif::Tile, points, Some(Paint::solid(color)), Some(edge));
            }
        }
    }
}

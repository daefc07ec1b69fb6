// src/art/generators/classic.rs

use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::TAU;

use super::Layout;
use crate::art::geometry::Point;
use crate::art::primitives::{GradientStop, Motif, Paint, Primitive, ShapeKind, Sketch, Stroke};
use crate::core::constants::canvas::REFERENCE_SIZE;

const WAVE_LIMIT: usize = 20;
const MINIMAL_SHAPES: usize = 5;

/// Golden-angle spiral of glowing particles, `ceil(p·100)` per outcome.
pub(super) fn chaotic(layout: &Layout, sketch: &mut Sketch, rng: &mut StdRng) {
    let (s, u) = (layout.size, layout.unit);
    let rotation_deg = layout.rotation_offset.to_degrees();
    for (idx, outcome) in layout.ranked.iter().enumerate() {
        let p = outcome.probability;
        let particles = (p * 100.0).ceil() as u64;
        for i in 0..particles {
            let angle = (outcome.value as f64 + i as f64 * 137.5 + rotation_deg).to_radians();
            let distance = (p * 0.3 + rng.random::<f64>() * 0.4) * s * layout.scale_variation;
            let at = Point::polar(layout.center, angle, distance);
            let ci = outcome.value + i;
            let radius = (p * 30.0 + 8.0) * u * (0.5 + rng.random::<f64>() * 0.5);

            sketch.glow(
                idx,
                Motif::Glow,
                at,
                radius * 3.0,
                vec![
                    GradientStop::new(0.0, layout.color(ci).with_alpha(0xEE)),
                    GradientStop::new(0.5, layout.color(ci + 1).with_alpha(0x88)),
                    GradientStop::new(1.0, layout.color(ci + 2).with_alpha(0x00)),
                ],
            );
            sketch.disc(idx, Motif::Particle, at, radius * 0.4, layout.color(ci));
        }
    }
}

/// Nested regular polygons, one per ranked outcome up to `layer_depth`.
pub(super) fn structured(layout: &Layout, sketch: &mut Sketch) {
    let (s, u) = (layout.size, layout.unit);
    let layers = layout.ranked.len().min(layout.params.layer_depth as usize);
    for (layer, outcome) in layout.ranked.iter().take(layers).enumerate() {
        let p = outcome.probability;
        let li = layer as u64;
        let radius = (s * 0.08 + layer as f64 * s * 0.05) * layout.scale_variation;
        let sides = 3 + (outcome.value % 8) as usize;
        let rotation = (outcome.value as f64 * 17.0).to_radians() + layout.rotation_offset;
        let vertices: Vec<Point> = (0..sides)
            .map(|i| Point::polar(layout.center, rotation + i as f64 / sides as f64 * TAU, radius))
            .collect();

        sketch.polygon(
            layer,
            Motif::Layer,
            vertices.clone(),
            Some(Paint::radial(
                layout.center,
                radius * 0.5,
                radius,
                vec![
                    GradientStop::new(0.0, layout.color(li).with_alpha(0x33)),
                    GradientStop::new(1.0, layout.color(li + 1).with_alpha(0x00)),
                ],
            )),
            Some(Stroke::new(layout.color(li).with_alpha(0xAA), (p * 8.0 + 2.0) * u)),
        );

        for (i, vertex) in vertices.into_iter().enumerate() {
            let color = layout.color(li + i as u64);
            sketch.disc(layer, Motif::Vertex, vertex, (p * 15.0 + 5.0) * u, color);
            sketch.glow(
                layer,
                Motif::Glow,
                vertex,
                20.0 * u,
                vec![
                    GradientStop::new(0.0, color.with_alpha(0xAA)),
                    GradientStop::new(1.0, color.with_alpha(0x00)),
                ],
            );
        }
    }
}

/// Vertical offset of a wave at reference-space abscissa `x`.
///
/// Harmonic `h` (1-based) has frequency `h·f`, phase `φ·(1 + (h-1)/2)` and
/// half the amplitude of the previous one.
fn wave_offset(x: f64, frequency: f64, phase: f64, amplitude: f64, harmonics: u32) -> f64 {
    (1..=harmonics.max(1))
        .map(|h| {
            let h = h as f64;
            (x * frequency * h + phase * (1.0 + (h - 1.0) * 0.5)).sin() * amplitude / 2f64.powf(h - 1.0)
        })
        .sum()
}

/// Sine waves across the canvas with particles riding the first harmonic.
pub(super) fn flowing(layout: &Layout, sketch: &mut Sketch) {
    let (s, u) = (layout.size, layout.unit);
    let harmonics = layout.params.harmonics;
    let waves = layout.ranked.len().min(WAVE_LIMIT);

    for (idx, outcome) in layout.ranked.iter().take(waves).enumerate() {
        let p = outcome.probability;
        let ci = idx as u64;
        let phase = outcome.value as f64 / 255.0 * TAU;
        let amplitude = p * s * 0.3;
        let frequency = 0.01 + p * 0.02;
        let points: Vec<Point> = (0..)
            .map(|step| step as f64 * 3.0)
            .take_while(|x| *x < REFERENCE_SIZE)
            .map(|x| Point::new(x * u, s / 2.0 + wave_offset(x, frequency, phase, amplitude, harmonics)))
            .collect();

        sketch.path(
            idx,
            Motif::Wave,
            points.clone(),
            Stroke::new(layout.color(ci).with_alpha(0x88), (p * 12.0 + 3.0) * u),
        );
        sketch.path(
            idx,
            Motif::Echo,
            points,
            Stroke::new(layout.color(ci + 1).with_alpha(0x44), (p * 20.0 + 5.0) * u),
        );
    }

    for (idx, outcome) in layout.ranked.iter().enumerate() {
        let p = outcome.probability;
        let phase = outcome.value as f64 / 255.0 * TAU;
        let frequency = 0.01 + p * 0.02;
        let amplitude = p * s * 0.3;
        let particles = (p * 30.0).ceil() as u64;
        for i in 0..particles {
            let x = (outcome.value as f64 * 17.0 + i as f64 * 137.5) % REFERENCE_SIZE;
            let at = Point::new(x * u, s / 2.0 + (x * frequency + phase).sin() * amplitude);
            let color = layout.color(idx as u64 + i);
            sketch.glow(
                idx,
                Motif::Particle,
                at,
                15.0 * u,
                vec![
                    GradientStop::new(0.0, color.with_alpha(0xFF)),
                    GradientStop::new(1.0, color.with_alpha(0x00)),
                ],
            );
        }
    }
}

/// Top outcomes on a ring; the shape is picked by `value mod 3`.
pub(super) fn minimal(layout: &Layout, sketch: &mut Sketch) {
    let (s, u) = (layout.size, layout.unit);
    let top = &layout.ranked[..layout.ranked.len().min(MINIMAL_SHAPES)];
    for (idx, outcome) in top.iter().enumerate() {
        let shape_size = s * 0.15 * (1.0 + outcome.probability * 2.0);
        let angle = idx as f64 / top.len() as f64 * TAU;
        let at = Point::polar(layout.center, angle, s * 0.25);
        let ci = idx as u64;
        let fill = layout.color(ci).with_alpha(0xDD);
        let outline = Stroke::new(layout.color(ci + 1).with_alpha(0xFF), 4.0 * u);

        sketch.glow(
            idx,
            Motif::Halo,
            at,
            shape_size * 2.0,
            vec![
                GradientStop::new(0.0, layout.color(ci).with_alpha(0x44)),
                GradientStop::new(1.0, layout.color(ci).with_alpha(0x00)),
            ],
        );

        let kind = ShapeKind::for_value(outcome.value);
        match kind {
            ShapeKind::Circle => sketch.draw(
                idx,
                Motif::Shape(kind),
                Primitive::Disc {
                    center: at,
                    radius: shape_size,
                    paint: Paint::solid(fill),
                    stroke: Some(outline),
                },
            ),
            ShapeKind::Square => sketch.polygon(
                idx,
                Motif::Shape(kind),
                vec![
                    Point::new(at.x - shape_size, at.y - shape_size),
                    Point::new(at.x + shape_size, at.y - shape_size),
                    Point::new(at.x + shape_size, at.y + shape_size),
                    Point::new(at.x - shape_size, at.y + shape_size),
                ],
                Some(Paint::solid(fill)),
                Some(outline),
            ),
            ShapeKind::Triangle => sketch.polygon(
                idx,
                Motif::Shape(kind),
                vec![
                    Point::new(at.x, at.y - shape_size),
                    Point::new(at.x + shape_size, at.y + shape_size),
                    Point::new(at.x - shape_size, at.y + shape_size),
                ],
                Some(Paint::solid(fill)),
                Some(outline),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_harmonics_match_reference_wave() {
        let (f, phi, amp): (f64, f64, f64) = (0.013, 1.2, 90.0);
        for x in [0.0_f64, 57.0, 311.0, 1197.0] {
            let expected = (x * f + phi).sin() * amp + (x * f * 2.0 + phi * 1.5).sin() * amp * 0.5;
            assert!((wave_offset(x, f, phi, amp, 2) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_harmonic_is_plain_sine() {
        assert!((wave_offset(10.0, 0.1, 0.0, 2.0, 1) - 2.0 * 1.0f64.sin()).abs() < 1e-12);
    }
}

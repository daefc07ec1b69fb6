// src/art/mod.rs

//! Maps a measurement to a deterministic picture.
//!
//! Rendering is split in two. [`ArtMapper::compose`] is pure: it ranks the
//! outcomes, derives the quantum seed and replays the style generator under
//! every symmetry frame, producing a [`Scene`] of draw commands.
//! [`ArtMapper::render`] rasterizes a scene onto a [`Canvas`].

pub mod canvas;
pub mod font;
pub mod generators;
pub mod geometry;
pub mod palette;
pub mod primitives;
pub mod style;
pub mod symmetry;

pub use canvas::Canvas;
pub use generators::{Brush, Layout};
pub use geometry::{Point, Transform};
pub use palette::{Palette, Rgba};
pub use primitives::{DrawCommand, GradientStop, Motif, Paint, Primitive, ShapeKind, Sketch, Stroke};
pub use style::Style;
pub use symmetry::SymmetryMode;

use serde::Serialize;
use tracing::debug;

use crate::config::StyleParameters;
use crate::core::{CanvasError, Result};
use crate::measurement::MeasurementResult;

const BACKGROUND_CENTER: Rgba = Rgba::from_hex(0x1A1A2E);
const BACKGROUND_EDGE: Rgba = Rgba::from_hex(0x0A0A0F);
/// Share of the palette's first colour mixed into the background centre.
///
/// The plain #1a1a2e to #0a0a0f gradient is kept at the edge only; the centre
/// always carries this tint.
const BACKGROUND_TINT: f64 = 0.15;

/// Radial background centred on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Background {
    pub center: Rgba,
    pub edge: Rgba,
    /// Distance from the centre at which `edge` is reached.
    pub radius: f64,
}

/// Final screen-blended glow over the whole canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlowPass {
    pub radius: f64,
    pub stops: Vec<GradientStop>,
}

/// Signature text in the bottom-right corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signature {
    pub text: String,
    pub origin: Point,
    /// Side of one font cell in pixels.
    pub cell: f64,
    pub color: Rgba,
}

/// A fully composed picture, independent of any raster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub size: u32,
    pub style: Style,
    pub symmetry: SymmetryMode,
    pub quantum_seed: u64,
    pub background: Background,
    pub commands: Vec<DrawCommand>,
    pub glow: GlowPass,
    pub signature: Option<Signature>,
}

impl Scene {
    /// Commands recorded under symmetry frame `frame`.
    pub fn frame(&self, frame: usize) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.frame == frame)
    }
}

/// Entry point of the rendering pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtMapper;

impl ArtMapper {
    /// Composes the scene for `measurement`.
    ///
    /// The result depends only on the arguments: the same measurement,
    /// parameters, size and seed always yield the same command list.
    /// `params` is clamped to its supported ranges first, so oversized
    /// complexity or a zero layer depth draw the nearest valid picture.
    ///
    /// # Errors
    /// * `Configuration` for a zero canvas size or an empty measurement.
    pub fn compose(
        measurement: &MeasurementResult,
        params: &StyleParameters,
        canvas_size: u32,
        seed: u64,
        signature: Option<&str>,
    ) -> Result<Scene> {
        if canvas_size == 0 {
            return Err(CanvasError::configuration("canvas_size", "canvas size must be positive"));
        }
        if measurement.is_empty() {
            return Err(CanvasError::configuration("measurement", "no outcomes to draw"));
        }

        let params = &params.normalized();
        let layout = Layout::new(measurement, params, canvas_size, seed);
        let palette = params.palette;
        let mut sketch = Sketch::new();
        params
            .symmetry
            .replay(layout.center, &mut sketch, |frame| generators::generate(&layout, frame));

        let colors = palette.colors();
        let glow = GlowPass {
            radius: layout.size / 2.0,
            stops: vec![
                GradientStop::new(0.0, palette.color(0).with_alpha(0x11)),
                GradientStop::new(1.0, palette.color(colors.len() - 1).with_alpha(0x00)),
            ],
        };

        let signature = signature.filter(|t| !t.trim().is_empty()).map(|text| {
            let cell = (4.0 * layout.unit).max(1.0);
            let width = font::text_width(text) as f64 * cell;
            let height = font::GLYPH_HEIGHT as f64 * cell;
            let inset = 24.0 * layout.unit;
            Signature {
                text: text.to_string(),
                origin: Point::new(layout.size - inset - width, layout.size - inset - height),
                cell,
                color: Rgba::from_hex(0xFFFFFF).with_alpha(0xAA),
            }
        });

        let commands = sketch.into_commands();
        debug!(
            style = %params.style,
            symmetry = %params.symmetry,
            quantum_seed = layout.quantum_seed,
            commands = commands.len(),
            "composed scene"
        );

        Ok(Scene {
            size: canvas_size,
            style: params.style,
            symmetry: params.symmetry,
            quantum_seed: layout.quantum_seed,
            background: Background {
                center: BACKGROUND_CENTER.lerp(palette.color(0), BACKGROUND_TINT),
                edge: BACKGROUND_EDGE,
                radius: layout.size,
            },
            commands,
            glow,
            signature,
        })
    }

    /// Rasterizes `scene`. Either the whole picture is produced or an error.
    pub fn render(scene: &Scene) -> Result<Canvas> {
        let mut canvas = Canvas::new(scene.size)?;
        canvas.fill_background(scene.background.center, scene.background.edge, scene.background.radius);
        for command in &scene.commands {
            canvas.draw(&command.primitive);
        }
        let c = scene.size as f64 / 2.0;
        canvas.screen_glow(Point::new(c, c), scene.glow.radius, scene.glow.stops.clone());
        if let Some(sig) = &scene.signature {
            canvas.draw_text(&sig.text, sig.origin, sig.cell, sig.color);
        }
        debug!(size = scene.size, commands = scene.commands.len(), "rendered scene");
        Ok(canvas)
    }

    /// [`compose`](Self::compose) followed by [`render`](Self::render).
    pub fn paint(
        measurement: &MeasurementResult,
        params: &StyleParameters,
        canvas_size: u32,
        seed: u64,
        signature: Option<&str>,
    ) -> Result<Canvas> {
        let scene = Self::compose(measurement, params, canvas_size, seed, signature)?;
        Self::render(&scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample() -> MeasurementResult {
        MeasurementResult::from_counts(3, BTreeMap::from([(0, 500), (3, 300), (6, 224)])).expect("valid counts")
    }

    #[test]
    fn test_every_style_composes() -> Result<()> {
        for style in Style::ALL {
            let params = StyleParameters::default().with_style(style);
            let scene = ArtMapper::compose(&sample(), &params, 240, 9, None)?;
            assert!(!scene.commands.is_empty(), "{} drew nothing", style);
        }
        Ok(())
    }

    #[test]
    fn test_quantum_seed_is_sum_of_values() -> Result<()> {
        let scene = ArtMapper::compose(&sample(), &StyleParameters::default(), 120, 0, None)?;
        assert_eq!(scene.quantum_seed, 9);
        Ok(())
    }

    #[test]
    fn test_zero_canvas_rejected() {
        let err = ArtMapper::compose(&sample(), &StyleParameters::default(), 0, 0, None);
        assert!(matches!(err, Err(CanvasError::Configuration { .. })));
    }

    #[test]
    fn test_signature_sits_inside_canvas() -> Result<()> {
        let scene = ArtMapper::compose(&sample(), &StyleParameters::default(), 600, 1, Some("qc-123"))?;
        let sig = scene.signature.expect("signature requested");
        assert!(sig.origin.x > 0.0 && sig.origin.y > 0.0);
        assert!(sig.origin.x + font::text_width("qc-123") as f64 * sig.cell < 600.0);
        Ok(())
    }

    #[test]
    fn test_out_of_range_parameters_are_clamped() -> Result<()> {
        let huge = StyleParameters::default().with_style(Style::Escher).with_complexity(1000);
        let capped = StyleParameters::default().with_style(Style::Escher).with_complexity(10);
        let a = ArtMapper::compose(&sample(), &huge, 200, 4, None)?;
        let b = ArtMapper::compose(&sample(), &capped, 200, 4, None)?;
        assert_eq!(a.commands, b.commands);

        let flat = StyleParameters::default().with_style(Style::Structured).with_layer_depth(0);
        let single = StyleParameters::default().with_style(Style::Structured).with_layer_depth(1);
        let a = ArtMapper::compose(&sample(), &flat, 200, 4, None)?;
        let b = ArtMapper::compose(&sample(), &single, 200, 4, None)?;
        assert!(!a.commands.is_empty());
        assert_eq!(a.commands, b.commands);
        Ok(())
    }

    #[test]
    fn test_background_centre_is_tinted_by_palette() -> Result<()> {
        let params = StyleParameters::default().with_palette(Palette::Vibrant);
        let scene = ArtMapper::compose(&sample(), &params, 120, 0, None)?;
        assert_eq!(scene.background.edge, BACKGROUND_EDGE);
        assert_eq!(
            scene.background.center,
            BACKGROUND_CENTER.lerp(Palette::Vibrant.color(0), BACKGROUND_TINT)
        );
        assert_ne!(scene.background.center, BACKGROUND_CENTER);
        Ok(())
    }

    #[test]
    fn test_render_produces_full_raster() -> Result<()> {
        let params = StyleParameters::default().with_style(Style::Minimal);
        let canvas = ArtMapper::paint(&sample(), &params, 96, 2, Some("hi"))?;
        assert_eq!(canvas.to_rgba8()?.len(), 96 * 96 * 4);
        Ok(())
    }
}

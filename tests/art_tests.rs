// tests/art_tests.rs

use qcanvas::art::{Motif, Point, Primitive, ShapeKind};
use qcanvas::{ArtMapper, CanvasError, MeasurementResult, Palette, Style, StyleParameters, SymmetryMode};
use std::collections::BTreeMap;

const COORD_TOLERANCE: f64 = 1e-6;

fn measurement() -> Result<MeasurementResult, CanvasError> {
    MeasurementResult::from_counts(3, BTreeMap::from([(0, 410), (2, 250), (5, 200), (7, 164)]))
}

#[test]
fn test_radial_symmetry_is_four_rotated_copies() -> Result<(), CanvasError> {
    let params = StyleParameters::default()
        .with_style(Style::Structured)
        .with_symmetry(SymmetryMode::Radial);
    let scene = ArtMapper::compose(&measurement()?, &params, 600, 17, None)?;

    let center = Point::new(300.0, 300.0);
    let frames = SymmetryMode::Radial.frames(center);
    assert_eq!(frames.len(), 4);

    let base: Vec<_> = scene.frame(0).collect();
    assert!(!base.is_empty());
    for (k, transform) in frames.iter().enumerate().skip(1) {
        let copy: Vec<_> = scene.frame(k).collect();
        assert_eq!(copy.len(), base.len(), "frame {} has a different command count", k);
        for (original, rotated) in base.iter().zip(&copy) {
            assert_eq!(original.motif, rotated.motif);
            assert_eq!(original.outcome, rotated.outcome);
            assert!(
                rotated.primitive.approx_eq(&original.primitive.transformed(transform), COORD_TOLERANCE),
                "frame {} diverges from a rotation of frame 0",
                k
            );
        }
    }
    assert_eq!(scene.commands.len(), base.len() * 4);
    Ok(())
}

#[test]
fn test_kaleidoscope_has_eight_frames() -> Result<(), CanvasError> {
    let params = StyleParameters::default()
        .with_style(Style::Flowing)
        .with_symmetry(SymmetryMode::Kaleidoscope);
    let scene = ArtMapper::compose(&measurement()?, &params, 300, 4, None)?;
    let base = scene.frame(0).count();
    for k in 0..8 {
        assert_eq!(scene.frame(k).count(), base);
    }
    assert_eq!(scene.frame(8).count(), 0);
    Ok(())
}

#[test]
fn test_compose_is_deterministic() -> Result<(), CanvasError> {
    let m = measurement()?;
    for style in Style::ALL {
        let params = StyleParameters::default()
            .with_style(style)
            .with_palette(Palette::Aurora)
            .with_symmetry(SymmetryMode::Bilateral);
        let a = ArtMapper::compose(&m, &params, 256, 99, Some("qc"))?;
        let b = ArtMapper::compose(&m, &params, 256, 99, Some("qc"))?;
        assert_eq!(a, b, "{} is not deterministic", style);
    }
    Ok(())
}

#[test]
fn test_render_is_deterministic() -> Result<(), CanvasError> {
    let params = StyleParameters::default().with_style(Style::Pollock);
    let a = ArtMapper::paint(&measurement()?, &params, 128, 3, None)?.to_rgba8()?;
    let b = ArtMapper::paint(&measurement()?, &params, 128, 3, None)?.to_rgba8()?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn test_minimal_shape_follows_value_mod_three() -> Result<(), CanvasError> {
    let m = measurement()?;
    let ranked = m.ranked();
    let params = StyleParameters::default()
        .with_style(Style::Minimal)
        .with_palette(Palette::Vibrant);
    let scene = ArtMapper::compose(&m, &params, 400, 0, None)?;

    let shapes: Vec<_> = scene
        .commands
        .iter()
        .filter(|c| matches!(c.motif, Motif::Shape(_)))
        .collect();
    assert_eq!(shapes.len(), ranked.len().min(5));

    for command in shapes {
        let expected = ShapeKind::for_value(ranked[command.outcome].value);
        assert_eq!(command.motif, Motif::Shape(expected));
        match (expected, &command.primitive) {
            (ShapeKind::Circle, Primitive::Disc { .. }) => {}
            (ShapeKind::Square, Primitive::Polygon { points, .. }) => assert_eq!(points.len(), 4),
            (ShapeKind::Triangle, Primitive::Polygon { points, .. }) => assert_eq!(points.len(), 3),
            (kind, primitive) => panic!("{:?} drawn as {:?}", kind, primitive),
        }
    }
    Ok(())
}

#[test]
fn test_composition_scales_with_canvas() -> Result<(), CanvasError> {
    let params = StyleParameters::default().with_style(Style::Minimal);
    let small = ArtMapper::compose(&measurement()?, &params, 300, 1, None)?;
    let large = ArtMapper::compose(&measurement()?, &params, 1200, 1, None)?;
    assert_eq!(small.commands.len(), large.commands.len());
    for (a, b) in small.commands.iter().zip(&large.commands) {
        if let (Primitive::Disc { center: c1, .. }, Primitive::Disc { center: c2, .. }) = (&a.primitive, &b.primitive) {
            assert!((c1.x * 4.0 - c2.x).abs() < COORD_TOLERANCE);
            assert!((c1.y * 4.0 - c2.y).abs() < COORD_TOLERANCE);
        }
    }
    Ok(())
}

#[test]
fn test_measurement_without_weight_is_rejected() {
    let empty = MeasurementResult::from_probabilities(2, BTreeMap::from([(1, 0.0)]));
    assert!(matches!(empty, Err(CanvasError::Simulation(_))));
}

// src/art/symmetry.rs

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt;
use std::str::FromStr;

use super::geometry::{Point, Transform};
use super::primitives::Sketch;
use crate::core::{CanvasError, Result};

/// Symmetry operator applied by replaying a generator under several
/// coordinate frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymmetryMode {
    #[default]
    None,
    /// Original plus its mirror image across the vertical centre line.
    Bilateral,
    /// Four copies rotated by 0°, 90°, 180° and 270°.
    Radial,
    /// Eight copies 45° apart; odd copies are mirrored.
    Kaleidoscope,
}

impl SymmetryMode {
    pub const ALL: [SymmetryMode; 4] = [
        SymmetryMode::None,
        SymmetryMode::Bilateral,
        SymmetryMode::Radial,
        SymmetryMode::Kaleidoscope,
    ];

    /// Number of replays.
    pub fn copies(&self) -> usize {
        match self {
            SymmetryMode::None => 1,
            SymmetryMode::Bilateral => 2,
            SymmetryMode::Radial => 4,
            SymmetryMode::Kaleidoscope => 8,
        }
    }

    /// Frame transforms about `center`, frame 0 always being the identity.
    pub fn frames(&self, center: Point) -> Vec<Transform> {
        match self {
            SymmetryMode::None => vec![Transform::identity()],
            SymmetryMode::Bilateral => vec![Transform::identity(), Transform::mirror_about(center)],
            SymmetryMode::Radial => (0..4)
                .map(|k| Transform::rotation_about(center, k as f64 * FRAC_PI_2))
                .collect(),
            SymmetryMode::Kaleidoscope => {
                let mirror = Transform::mirror_about(center);
                (0..8)
                    .map(|k| {
                        let rotation = Transform::rotation_about(center, k as f64 * FRAC_PI_4);
                        if k % 2 == 1 { rotation.then(&mirror) } else { rotation }
                    })
                    .collect()
            }
        }
    }

    /// Runs `layer` once per frame with `sketch` switched to that frame.
    pub fn replay<F>(&self, center: Point, sketch: &mut Sketch, mut layer: F)
    where
        F: FnMut(&mut Sketch),
    {
        for (frame, transform) in self.frames(center).into_iter().enumerate() {
            sketch.begin_frame(frame, transform);
            layer(sketch);
        }
        sketch.begin_frame(0, Transform::identity());
    }

    pub fn name(&self) -> &'static str {
        match self {
            SymmetryMode::None => "none",
            SymmetryMode::Bilateral => "bilateral",
            SymmetryMode::Radial => "radial",
            SymmetryMode::Kaleidoscope => "kaleidoscope",
        }
    }
}

impl fmt::Display for SymmetryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymmetryMode {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        SymmetryMode::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| CanvasError::configuration("symmetry", format!("unknown symmetry '{}'", s)))
    }
}

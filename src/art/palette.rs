// src/art/palette.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{CanvasError, Result};

/// An sRGB colour with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque colour from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 0xFF,
        }
    }

    /// Same colour with a different alpha byte.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Channel-wise linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// Named colour schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    #[default]
    Vibrant,
    Cosmic,
    Nature,
    Fire,
    Aurora,
    Sunset,
    Spectrum,
}

const VIBRANT: [Rgba; 5] = [
    Rgba::from_hex(0xFF006E),
    Rgba::from_hex(0xFB5607),
    Rgba::from_hex(0xFFBE0B),
    Rgba::from_hex(0x8338EC),
    Rgba::from_hex(0x3A86FF),
];
const COSMIC: [Rgba; 5] = [
    Rgba::from_hex(0x0D1B2A),
    Rgba::from_hex(0x1B263B),
    Rgba::from_hex(0x415A77),
    Rgba::from_hex(0x778DA9),
    Rgba::from_hex(0xE0E1DD),
];
const NATURE: [Rgba; 5] = [
    Rgba::from_hex(0x2D6A4F),
    Rgba::from_hex(0x40916C),
    Rgba::from_hex(0x52B788),
    Rgba::from_hex(0x74C69D),
    Rgba::from_hex(0xB7E4C7),
];
const FIRE: [Rgba; 5] = [
    Rgba::from_hex(0x370617),
    Rgba::from_hex(0x6A040F),
    Rgba::from_hex(0x9D0208),
    Rgba::from_hex(0xD00000),
    Rgba::from_hex(0xDC2F02),
];
const AURORA: [Rgba; 6] = [
    Rgba::from_hex(0x00F5D4),
    Rgba::from_hex(0x00BBF9),
    Rgba::from_hex(0x9B5DE5),
    Rgba::from_hex(0xF15BB5),
    Rgba::from_hex(0xFEE440),
    Rgba::from_hex(0x06D6A0),
];
const SUNSET: [Rgba; 6] = [
    Rgba::from_hex(0x001219),
    Rgba::from_hex(0x005F73),
    Rgba::from_hex(0xEE9B00),
    Rgba::from_hex(0xCA6702),
    Rgba::from_hex(0xBB3E03),
    Rgba::from_hex(0xAE2012),
];
const SPECTRUM: [Rgba; 7] = [
    Rgba::from_hex(0xE63946),
    Rgba::from_hex(0xF4A261),
    Rgba::from_hex(0xE9C46A),
    Rgba::from_hex(0x2A9D8F),
    Rgba::from_hex(0x457B9D),
    Rgba::from_hex(0x6A4C93),
    Rgba::from_hex(0xF1FAEE),
];

impl Palette {
    /// Every shipped palette.
    pub const ALL: [Palette; 7] = [
        Palette::Vibrant,
        Palette::Cosmic,
        Palette::Nature,
        Palette::Fire,
        Palette::Aurora,
        Palette::Sunset,
        Palette::Spectrum,
    ];

    /// The ordered colour list.
    pub fn colors(&self) -> &'static [Rgba] {
        match self {
            Palette::Vibrant => &VIBRANT,
            Palette::Cosmic => &COSMIC,
            Palette::Nature => &NATURE,
            Palette::Fire => &FIRE,
            Palette::Aurora => &AURORA,
            Palette::Sunset => &SUNSET,
            Palette::Spectrum => &SPECTRUM,
        }
    }

    /// Colour at `index`, wrapping around the list.
    pub fn color(&self, index: usize) -> Rgba {
        let colors = self.colors();
        colors[index % colors.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Palette::Vibrant => "vibrant",
            Palette::Cosmic => "cosmic",
            Palette::Nature => "nature",
            Palette::Fire => "fire",
            Palette::Aurora => "aurora",
            Palette::Sunset => "sunset",
            Palette::Spectrum => "spectrum",
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Palette::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| CanvasError::configuration("palette", format!("unknown palette '{}'", s)))
    }
}

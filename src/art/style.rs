// src/art/style.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{CanvasError, Result};
use crate::gates::GateKind;

/// Visual style; selects both the circuit gate pool and the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Abstract,
    #[default]
    Chaotic,
    Structured,
    Flowing,
    Minimal,
    Dali,
    Picasso,
    Kandinsky,
    Pollock,
    Mondrian,
    #[serde(alias = "vangogh", alias = "vanGogh")]
    VanGogh,
    Escher,
}

impl Style {
    pub const ALL: [Style; 12] = [
        Style::Abstract,
        Style::Chaotic,
        Style::Structured,
        Style::Flowing,
        Style::Minimal,
        Style::Dali,
        Style::Picasso,
        Style::Kandinsky,
        Style::Pollock,
        Style::Mondrian,
        Style::VanGogh,
        Style::Escher,
    ];

    /// Gates random circuits for this style are drawn from.
    pub fn gate_pool(&self) -> &'static [GateKind] {
        match self {
            Style::Chaotic => &[GateKind::H, GateKind::RX, GateKind::RY],
            Style::Structured => &[GateKind::CX, GateKind::CZ, GateKind::SWAP],
            Style::Flowing => &[GateKind::RX, GateKind::RY, GateKind::RZ, GateKind::P],
            Style::Minimal => &[GateKind::X, GateKind::H, GateKind::CX],
            Style::Abstract => &[GateKind::H, GateKind::RY, GateKind::CX, GateKind::RZ],
            Style::Dali => &[GateKind::RY, GateKind::RZ, GateKind::H],
            Style::Picasso => &[GateKind::CX, GateKind::X, GateKind::SWAP],
            Style::Kandinsky => &[GateKind::H, GateKind::RX, GateKind::CZ],
            Style::Pollock => &[GateKind::H, GateKind::RX, GateKind::RY, GateKind::CX],
            Style::Mondrian => &[GateKind::X, GateKind::CX, GateKind::SWAP],
            Style::VanGogh => &[GateKind::RY, GateKind::RZ, GateKind::P, GateKind::CX],
            Style::Escher => &[GateKind::H, GateKind::CZ, GateKind::SWAP],
        }
    }

    /// Styles built on the shared [`Brush`](super::generators::Brush) contract.
    pub fn is_painter(&self) -> bool {
        !matches!(
            self,
            Style::Chaotic | Style::Structured | Style::Flowing | Style::Minimal
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Style::Abstract => "abstract",
            Style::Chaotic => "chaotic",
            Style::Structured => "structured",
            Style::Flowing => "flowing",
            Style::Minimal => "minimal",
            Style::Dali => "dali",
            Style::Picasso => "picasso",
            Style::Kandinsky => "kandinsky",
            Style::Pollock => "pollock",
            Style::Mondrian => "mondrian",
            Style::VanGogh => "van_gogh",
            Style::Escher => "escher",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Style::ALL
            .into_iter()
            .find(|style| style.name().replace('_', "") == wanted)
            .ok_or_else(|| CanvasError::configuration("style", format!("unknown style '{}'", s)))
    }
}

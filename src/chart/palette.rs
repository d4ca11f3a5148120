//! Category -> colour lookup.
//!
//! The table is plain data; callers look a kind up instead of branching on it.

use crate::domain::CaseKind;

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#RRGGBB`, upper-case.
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    pub fn rgba(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

/// Presentation colours for one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Line colour.
    pub border: Rgb,
    /// Area/highlight colour, used with `fill_alpha`.
    pub fill: Rgb,
    pub fill_alpha: f64,
}

impl Palette {
    pub fn border_color(&self) -> String {
        self.border.hex()
    }

    pub fn background_color(&self) -> String {
        self.fill.rgba(self.fill_alpha)
    }
}

const FILL_ALPHA: f64 = 0.5;

pub const PALETTES: [(CaseKind, Palette); 3] = [
    (
        CaseKind::Cases,
        Palette {
            border: Rgb(0xCC, 0x10, 0x34),
            fill: Rgb(204, 16, 52),
            fill_alpha: FILL_ALPHA,
        },
    ),
    (
        CaseKind::Recovered,
        Palette {
            border: Rgb(0x7D, 0xD7, 0x1D),
            fill: Rgb(125, 215, 29),
            fill_alpha: FILL_ALPHA,
        },
    ),
    (
        CaseKind::Deaths,
        Palette {
            border: Rgb(0xFB, 0x44, 0x43),
            fill: Rgb(251, 68, 67),
            fill_alpha: FILL_ALPHA,
        },
    ),
];

/// Colours for a kind. Falls back to the `cases` entry.
pub fn palette_for(kind: CaseKind) -> Palette {
    PALETTES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, p)| *p)
        .unwrap_or(PALETTES[0].1)
}

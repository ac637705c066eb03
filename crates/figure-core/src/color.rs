// File: crates/figure-core/src/color.rs
// Summary: Renderer-agnostic RGBA colour with hex parsing and fixed palettes.

use serde::{Deserialize, Serialize};
use skia_safe as skia;
use std::fmt;
use std::str::FromStr;

use crate::error::FigureError;

/// Serialized as a hex string (`"#3498DB"`), parsed with [`FromStr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build from a packed `0xRRGGBB` literal.
    pub const fn hex(v: u32) -> Self {
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Same colour with `alpha` in `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Linear interpolation between two colours, `t` in `0.0..=1.0`.
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

    pub fn to_skia(self) -> skia::Color {
        skia::Color::from_argb(self.a, self.r, self.g, self.b)
    }
}

impl From<Rgba> for skia::Color {
    fn from(c: Rgba) -> Self { c.to_skia() }
}

/// Basic colour names accepted alongside hex.
const NAMED: [(&str, u32); 16] = [
    ("black", 0x000000),
    ("white", 0xFFFFFF),
    ("red", 0xFF0000),
    ("green", 0x008000),
    ("blue", 0x0000FF),
    ("yellow", 0xFFFF00),
    ("orange", 0xFFA500),
    ("purple", 0x800080),
    ("pink", 0xFFC0CB),
    ("brown", 0xA52A2A),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("cyan", 0x00FFFF),
    ("magenta", 0xFF00FF),
    ("navy", 0x000080),
    ("teal", 0x008080),
];

impl FromStr for Rgba {
    type Err = FigureError;

    /// Accepts `#RRGGBB`, `#RRGGBBAA`, `#RGB` (the leading `#` is optional)
    /// and the basic names in `NAMED`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Some((_, v)) = NAMED.iter().find(|(name, _)| name.eq_ignore_ascii_case(raw)) {
            return Ok(Rgba::hex(*v));
        }
        let hex = raw.strip_prefix('#').unwrap_or(raw);
        let bad = || FigureError::InvalidColor(s.to_string());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            3 => {
                let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17).map_err(|_| bad());
                Ok(Rgba::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Rgba { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: byte(6)? }),
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = FigureError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Series/category colours for chart templates, cycled by index.
pub const CHART_PALETTE: [Rgba; 10] = [
    Rgba::hex(0xE74C3C),
    Rgba::hex(0x3498DB),
    Rgba::hex(0x2ECC71),
    Rgba::hex(0xF39C12),
    Rgba::hex(0x9B59B6),
    Rgba::hex(0x1ABC9C),
    Rgba::hex(0xE67E22),
    Rgba::hex(0x16A085),
    Rgba::hex(0x8E44AD),
    Rgba::hex(0x2980B9),
];

/// Mind map branch colours, cycled by branch index.
pub const BRANCH_PALETTE: [Rgba; 5] = [
    Rgba::hex(0x3498DB),
    Rgba::hex(0x2ECC71),
    Rgba::hex(0xF39C12),
    Rgba::hex(0x9B59B6),
    Rgba::hex(0x1ABC9C),
];

/// Palette entry for `index`, wrapping around.
pub fn cycle(palette: &[Rgba], index: usize) -> Rgba {
    palette[index % palette.len()]
}

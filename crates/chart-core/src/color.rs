// File: crates/chart-core/src/color.rs
// Summary: Normalized RGBA colors and hex/name parsing for chart and series options.

use std::str::FromStr;

use crate::error::ChartError;

/// Four-component color, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse `#RRGGBB` / `RRGGBB` (case-insensitive) or a known color name.
    pub fn parse(s: &str) -> Result<Self, ChartError> {
        let trimmed = s.trim();
        if let Some(c) = named(trimmed) {
            return Ok(c);
        }
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ChartError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::from_rgb8(r, g, b)),
            _ => Err(ChartError::InvalidColor(s.to_string())),
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Rgba {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl FromStr for Rgba {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn named(name: &str) -> Option<Rgba> {
    let c = match name.to_ascii_lowercase().as_str() {
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "red" => Rgba::from_rgb8(0xff, 0x00, 0x00),
        "green" => Rgba::from_rgb8(0x00, 0x80, 0x00),
        "blue" => Rgba::from_rgb8(0x00, 0x00, 0xff),
        "gray" | "grey" => Rgba::from_rgb8(0x80, 0x80, 0x80),
        _ => return None,
    };
    Some(c)
}

//! Colors and ordered palettes.

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::common::ConfigError;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }
}

impl fmt::Display for Color {
    /// Format as CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    /// Parse `#rrggbb` or `#rgb` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) { return Err(invalid()) }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Color::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Baltimore City Connect color scheme.
pub mod baltimore {
    use super::Color;

    pub const RED: Color = Color::new(0xf2, 0x3b, 0x33);
    pub const ORANGE: Color = Color::new(0xf7, 0x69, 0x3d);
    pub const YELLOW: Color = Color::new(0xfc, 0xea, 0x65);
    pub const PINK: Color = Color::new(0xf3, 0x71, 0x96);
    pub const PURPLE: Color = Color::new(0x8d, 0x64, 0x9e);
    pub const BLUE: Color = Color::new(0xa0, 0xcc, 0xe8);
}

/// A finite, ordered list of distinct colors. Order drives greedy assignment and wraparound.
///
/// Strategies pick colors by palette index, so a repeated color would let two
/// neighbors share a fill. Repeats are dropped on construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette(Vec<Color>);

impl Palette {
    /// Build a palette from `colors`, keeping the first occurrence of each color.
    pub fn new(colors: Vec<Color>) -> Self {
        let given = colors.len();
        let mut seen = HashSet::with_capacity(given);
        let colors = colors.into_iter().filter(|color| seen.insert(*color)).collect::<Vec<_>>();
        if colors.len() < given {
            warn!("[color] dropped {} repeated palette color(s)", given - colors.len());
        }
        Self(colors)
    }

    #[inline] pub fn len(&self) -> usize { self.0.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

    #[inline] pub fn colors(&self) -> &[Color] { &self.0 }

    /// Get the color at `index`, wrapping around the palette size.
    /// Panics on an empty palette.
    #[inline] pub fn wrapped(&self, index: usize) -> Color { self.0[index % self.0.len()] }
}

impl Default for Palette {
    /// Red, orange, pink, purple, yellow, blue.
    fn default() -> Self {
        use baltimore::*;
        Self(vec![RED, ORANGE, PINK, PURPLE, YELLOW, BLUE])
    }
}

impl FromIterator<Color> for Palette {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self { Self::new(iter.into_iter().collect()) }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self { Self::new(colors) }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self { palette.0 }
}

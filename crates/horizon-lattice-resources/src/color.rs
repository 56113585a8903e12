//! RGBA color values and literal parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An RGBA color with straight (non-premultiplied) alpha.
///
/// Channels are stored as `f32` and are nominally in the `0.0..=1.0` range;
/// values parsed from CSV literals are kept exactly as written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from 8-bit RGBA components (0-255 range).
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse a hex color literal.
    ///
    /// Accepts an optional leading `#` followed by 3 (`RGB`), 4 (`RGBA`),
    /// 6 (`RRGGBB`) or 8 (`RRGGBBAA`) hex digits. Short forms repeat each
    /// digit, so `#F80` equals `#FF8800`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::from_rgba8(digit(0)?, digit(1)?, digit(2)?, 255)),
            4 => Some(Self::from_rgba8(digit(0)?, digit(1)?, digit(2)?, digit(3)?)),
            6 => Some(Self::from_rgba8(pair(0)?, pair(2)?, pair(4)?, 255)),
            8 => Some(Self::from_rgba8(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// Parse a comma-separated `r,g,b[,a]` literal.
    ///
    /// At least three numeric fields are required; alpha defaults to `1.0`.
    /// Fields past the fourth are ignored. Non-finite values are rejected.
    pub fn from_csv(csv: &str) -> Option<Self> {
        let parts: Vec<&str> = csv.split(',').collect();
        if parts.len() < 3 {
            return None;
        }

        let field = |s: &str| {
            s.trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
        };

        let r = field(parts[0])?;
        let g = field(parts[1])?;
        let b = field(parts[2])?;
        let a = match parts.get(3) {
            Some(a) => field(a)?,
            None => 1.0,
        };

        Some(Self::new(r, g, b, a))
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (byte(self.r), byte(self.g), byte(self.b), byte(self.a));

        if a == 255 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }

    // Common colors
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::from_rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::from_rgb(0.0, 1.0, 0.0);
}

impl Default for Color {
    /// Opaque white, the value every failed color lookup degrades to.
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses hex literals only; CSV is an expression-level form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim()).ok_or_else(|| Error::invalid_color(s))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

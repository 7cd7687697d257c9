//! Styling value types: colour, font size, and text effects.

use std::fmt;

use crate::cue::Cue;
use crate::error::{Error, Result};

/// An RGB colour with channels in `[0, 1]`.
///
/// Equality is exact on all three channels, with no tolerance: colours
/// are copied verbatim between formats, never computed, so two colours
/// that differ at all came from different source values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Colour {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Colour {
    /// Create a colour from channel values in `[0, 1]`.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Colour { r, g, b }
    }

    /// White, the conventional default subtitle colour.
    pub const fn white() -> Self {
        Colour::new(1.0, 1.0, 1.0)
    }

    /// Black.
    pub const fn black() -> Self {
        Colour::new(0.0, 0.0, 0.0)
    }

    /// Parse a six-digit `RRGGBB` hex string.
    pub fn from_rgb_hex(hex: &str) -> Result<Self> {
        // Colour strings arrive from untrusted subtitle files, so slicing
        // has to happen on validated ASCII, not raw char boundaries.
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::invalid_colour(format!(
                "expected 6 hex digits, got {:?}",
                hex
            )));
        }
        Ok(Colour::new(
            hex_channel(&hex[0..2])?,
            hex_channel(&hex[2..4])?,
            hex_channel(&hex[4..6])?,
        ))
    }

    /// Parse an eight-digit `AARRGGBB` hex string. The alpha digits are
    /// validated and discarded; the model carries no opacity.
    pub fn from_argb_hex(hex: &str) -> Result<Self> {
        if hex.len() != 8 || !hex.is_ascii() {
            return Err(Error::invalid_colour(format!(
                "expected 8 hex digits, got {:?}",
                hex
            )));
        }
        hex_channel(&hex[0..2])?;
        Self::from_rgb_hex(&hex[2..8])
    }
}

fn hex_channel(digits: &str) -> Result<f32> {
    let value = u8::from_str_radix(digits, 16)
        .map_err(|_| Error::invalid_colour(format!("bad hex digits {:?}", digits)))?;
    Ok(value as f32 / 255.0)
}

impl Default for Colour {
    fn default() -> Self {
        Colour::white()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}{:02X}{:02X}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }
}

/// Text effect attached to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// Outline border around the glyphs.
    Border,
    /// Drop shadow behind the glyphs.
    Shadow,
}

/// A font size, expressed the way the source format expressed it.
///
/// Equality is derived: a proportional size and a point size are never
/// equal, since resolving one into the other needs a screen height the
/// comparison does not have.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontSize {
    /// Fraction of the screen height.
    Proportional(f64),
    /// Absolute size in points.
    Points(f64),
}

impl FontSize {
    /// The size in points on a screen `screen_height` points tall.
    ///
    /// A size already in points is returned unchanged, so same-form
    /// round-trips are exact.
    pub fn points(&self, screen_height: f64) -> f64 {
        match *self {
            FontSize::Proportional(p) => p * screen_height,
            FontSize::Points(pt) => pt,
        }
    }

    /// The size as a fraction of a screen `screen_height` points tall.
    ///
    /// A size already proportional is returned unchanged.
    pub fn proportional(&self, screen_height: f64) -> f64 {
        match *self {
            FontSize::Proportional(p) => p,
            FontSize::Points(pt) => pt / screen_height,
        }
    }
}

/// Rewrite every specified font size in `cues` to its [`FontSize::Points`]
/// form at the given screen height.
///
/// Applied once, after assembly, by a caller that knows the target
/// screen geometry. Converting to points and back to proportional
/// recovers the original up to `f64` rounding (roughly one part in
/// 2^52), not bit-exactly.
pub fn convert_font_sizes(cues: &mut [Cue], screen_height: f64) {
    for_each_font_size(cues, |size| FontSize::Points(size.points(screen_height)));
}

/// Rewrite every specified font size in `cues` to its
/// [`FontSize::Proportional`] form at the given screen height.
pub fn convert_font_sizes_to_proportional(cues: &mut [Cue], screen_height: f64) {
    for_each_font_size(cues, |size| {
        FontSize::Proportional(size.proportional(screen_height))
    });
}

fn for_each_font_size(cues: &mut [Cue], convert: impl Fn(FontSize) -> FontSize) {
    for cue in cues {
        for line in &mut cue.lines {
            for run in &mut line.runs {
                if let Some(size) = run.font_size {
                    run.font_size = Some(convert(size));
                }
            }
        }
    }
}

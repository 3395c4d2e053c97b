//! Parsing of the opaque color strings carried by stroke samples.

use crate::error::{RenderError, RenderResult};

/// A straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba {
    /// Opaque white, the canvas background.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Create an opaque color.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

const NAMED: &[(&str, Rgba)] = &[
    ("black", Rgba::BLACK),
    ("white", Rgba::WHITE),
    ("red", Rgba::opaque(255, 0, 0)),
    ("green", Rgba::opaque(0, 128, 0)),
    ("lime", Rgba::opaque(0, 255, 0)),
    ("blue", Rgba::opaque(0, 0, 255)),
    ("yellow", Rgba::opaque(255, 255, 0)),
    ("orange", Rgba::opaque(255, 165, 0)),
    ("purple", Rgba::opaque(128, 0, 128)),
    ("gray", Rgba::opaque(128, 128, 128)),
    ("grey", Rgba::opaque(128, 128, 128)),
];

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or a basic CSS color name.
///
/// # Errors
///
/// Returns [`RenderError::InvalidColor`] for anything else.
pub fn parse_color(input: &str) -> RenderResult<Rgba> {
    let trimmed = input.trim();
    let invalid = || RenderError::InvalidColor(input.to_string());

    let Some(hex) = trimmed.strip_prefix('#') else {
        return NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, rgba)| *rgba)
            .ok_or_else(invalid);
    };

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let digit = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Ok(Rgba::opaque(digit(0)?, digit(1)?, digit(2)?))
        }
        6 | 8 => {
            let a = if hex.len() == 8 {
                channel(&hex[6..8])?
            } else {
                255
            };
            Ok(Rgba {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
                a,
            })
        }
        _ => Err(invalid()),
    }
}

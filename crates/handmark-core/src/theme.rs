//! Color resolution for shapes and connections.

use crate::model::{Connection, Shape, ShapeKind};
use crate::{Error, Result};
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
struct Rgb01 {
    r: f64,
    g: f64,
    b: f64,
}

fn parse_rgb01(color: &str) -> Result<Rgb01> {
    let c = svgtypes::Color::from_str(color.trim()).map_err(|e| Error::InvalidColor {
        color: color.to_string(),
        message: e.to_string(),
    })?;
    Ok(Rgb01 {
        r: (c.red as f64) / 255.0,
        g: (c.green as f64) / 255.0,
        b: (c.blue as f64) / 255.0,
    })
}

/// Theme palette codes: neutrals `N1`-`N7`, base `B1`-`B6`, accents `AA2`/`AA4`/`AA5`/`AB4`/`AB5`.
pub fn is_theme_color(color: &str) -> bool {
    let digit = |s: &str, range: std::ops::RangeInclusive<u8>| {
        let b = s.as_bytes();
        b.len() == 1 && range.contains(&b[0])
    };
    if let Some(rest) = color.strip_prefix("AA") {
        return digit(rest, b'2'..=b'2') || digit(rest, b'4'..=b'5');
    }
    if let Some(rest) = color.strip_prefix("AB") {
        return digit(rest, b'4'..=b'5');
    }
    if let Some(rest) = color.strip_prefix('N') {
        return digit(rest, b'1'..=b'7');
    }
    if let Some(rest) = color.strip_prefix('B') {
        return digit(rest, b'1'..=b'6');
    }
    false
}

/// Colors that paint nothing; overlays are skipped for them.
pub fn is_unpainted(color: &str) -> bool {
    let c = color.trim();
    c.is_empty() || c.eq_ignore_ascii_case("none") || c.eq_ignore_ascii_case("transparent")
}

/// Perceived brightness in `0.0..=1.0`.
pub fn luminance(color: &str) -> Result<f64> {
    let rgb = parse_rgb01(color)?;
    Ok(0.299 * rgb.r + 0.587 * rgb.g + 0.114 * rgb.b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LuminanceCategory {
    Bright,
    Normal,
    Dark,
    Darker,
}

impl LuminanceCategory {
    pub const ALL: [LuminanceCategory; 4] = [
        LuminanceCategory::Bright,
        LuminanceCategory::Normal,
        LuminanceCategory::Dark,
        LuminanceCategory::Darker,
    ];

    pub fn of(color: &str) -> Result<Self> {
        let l = luminance(color)?;
        Ok(if l >= 0.88 {
            LuminanceCategory::Bright
        } else if l >= 0.55 {
            LuminanceCategory::Normal
        } else if l >= 0.30 {
            LuminanceCategory::Dark
        } else {
            LuminanceCategory::Darker
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LuminanceCategory::Bright => "bright",
            LuminanceCategory::Normal => "normal",
            LuminanceCategory::Dark => "dark",
            LuminanceCategory::Darker => "darker",
        }
    }
}

impl std::fmt::Display for LuminanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved `(fill, stroke)` for a shape's outline layer.
///
/// Tables and classes paint their header with `shape.fill`, so the body takes `shape.stroke` as
/// fill and the border takes the header color.
pub fn shape_theme(shape: &Shape) -> (String, String) {
    match shape.kind {
        ShapeKind::SqlTable | ShapeKind::Class => (shape.stroke.clone(), shape.fill.clone()),
        _ => (shape.fill.clone(), shape.stroke.clone()),
    }
}

pub fn connection_theme(connection: &Connection) -> String {
    connection.stroke.clone()
}

//! Color values for SVG presentation attributes and stylesheets.

use std::fmt;
use std::str::FromStr;

/// A color value
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// No color (transparent)
    None,
    /// RGB color
    Rgb { r: u8, g: u8, b: u8 },
    /// RGB color with an alpha channel in `0.0..=1.0`
    Rgba { r: u8, g: u8, b: u8, a: f64 },
    /// Named color
    Named(String),
}

/// Error parsing a color
#[derive(Debug, Clone, PartialEq)]
pub enum ColorParseError {
    Empty,
    InvalidChannel(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::Empty => write!(f, "empty color"),
            ColorParseError::InvalidChannel(s) => write!(f, "invalid color channel: {}", s),
        }
    }
}

impl std::error::Error for ColorParseError {}

fn parse_channels(inner: &str) -> Result<Vec<&str>, ColorParseError> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(ColorParseError::InvalidChannel(inner.to_string()));
    }
    Ok(parts)
}

fn parse_u8(s: &str) -> Result<u8, ColorParseError> {
    s.parse::<u8>()
        .map_err(|_| ColorParseError::InvalidChannel(s.to_string()))
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if s.eq_ignore_ascii_case("none") {
            return Ok(Color::None);
        }

        if let Some(inner) = s.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
            let parts = parse_channels(inner)?;
            if parts.len() != 4 {
                return Err(ColorParseError::InvalidChannel(inner.to_string()));
            }
            let a: f64 = parts[3]
                .parse()
                .map_err(|_| ColorParseError::InvalidChannel(parts[3].to_string()))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(ColorParseError::InvalidChannel(parts[3].to_string()));
            }
            return Ok(Color::Rgba {
                r: parse_u8(parts[0])?,
                g: parse_u8(parts[1])?,
                b: parse_u8(parts[2])?,
                a,
            });
        }

        if let Some(inner) = s.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
            let parts = parse_channels(inner)?;
            if parts.len() != 3 {
                return Err(ColorParseError::InvalidChannel(inner.to_string()));
            }
            return Ok(Color::Rgb {
                r: parse_u8(parts[0])?,
                g: parse_u8(parts[1])?,
                b: parse_u8(parts[2])?,
            });
        }

        if let Some(hex) = s.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(ColorParseError::InvalidChannel(hex.to_string()));
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16)
                    .map_err(|_| ColorParseError::InvalidChannel(hex.to_string()))
            };
            return match hex.len() {
                6 => Ok(Color::Rgb {
                    r: channel(0..2)?,
                    g: channel(2..4)?,
                    b: channel(4..6)?,
                }),
                // Expand 3-digit hex: #abc -> #aabbcc
                3 => Ok(Color::Rgb {
                    r: channel(0..1)? * 17,
                    g: channel(1..2)? * 17,
                    b: channel(2..3)? * 17,
                }),
                _ => Err(ColorParseError::InvalidChannel(hex.to_string())),
            };
        }

        Ok(match s.to_lowercase().as_str() {
            "black" => Color::Rgb { r: 0, g: 0, b: 0 },
            "white" => Color::Rgb {
                r: 255,
                g: 255,
                b: 255,
            },
            "red" => Color::Rgb { r: 255, g: 0, b: 0 },
            "green" => Color::Rgb { r: 0, g: 128, b: 0 },
            "blue" => Color::Rgb { r: 0, g: 0, b: 255 },
            "orange" => Color::Rgb {
                r: 255,
                g: 165,
                b: 0,
            },
            "gray" | "grey" => Color::Rgb {
                r: 128,
                g: 128,
                b: 128,
            },
            _ => Color::Named(s.to_string()),
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => write!(f, "none"),
            Color::Rgb { r, g, b } => write!(f, "rgb({},{},{})", r, g, b),
            Color::Rgba { r, g, b, a } => write!(f, "rgba({},{},{},{})", r, g, b, a),
            Color::Named(n) => write!(f, "{}", n),
        }
    }
}

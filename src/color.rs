//! Color values for text and background
//!
//! Colors are fixed-arity RGBA tuples so they can be compared and hashed.
//! They parse from hex notation (`#rgb`, `#rrggbb`, `#rrggbbaa`), a small
//! table of named colors, or channel arrays in TOML.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "ColorSpec")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("lime", Color::rgb(0, 255, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("steelblue", Color::rgb(70, 130, 180)),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with an explicit alpha channel
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Look up a named color (case-insensitive)
    pub fn named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }

    /// Build a color from 3 or 4 channels
    pub fn from_channels(channels: &[u8]) -> Option<Self> {
        match *channels {
            [r, g, b] => Some(Self::rgb(r, g, b)),
            [r, g, b, a] => Some(Self::rgba(r, g, b, a)),
            _ => None,
        }
    }

    /// The channels as a tuple
    pub fn to_tuple(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    /// `#rrggbb` notation, ignoring alpha
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `[0, 1]`
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex)
                .ok_or_else(|| Error::invalid_config("color", s, "malformed hex color"));
        }
        Self::named(trimmed)
            .ok_or_else(|| Error::invalid_config("color", s, "unknown color name"))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            // #rgb expands each digit: #f80 -> #ff8800
            let digits: Vec<u8> = hex
                .chars()
                .filter_map(|c| c.to_digit(16))
                .map(|d| (d * 17) as u8)
                .collect();
            Color::from_channels(&digits)
        }
        6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}

/// Background fill behind rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "ColorSpec")]
pub enum Background {
    /// Transparent
    #[default]
    None,
    Color(Color),
}

impl Background {
    pub fn color(self) -> Option<Color> {
        match self {
            Background::None => None,
            Background::Color(c) => Some(c),
        }
    }

    pub fn is_transparent(self) -> bool {
        matches!(self, Background::None)
    }
}

impl From<Color> for Background {
    fn from(color: Color) -> Self {
        Background::Color(color)
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::None => write!(f, "none"),
            Background::Color(c) => write!(f, "{}", c),
        }
    }
}

impl FromStr for Background {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("none") {
            Ok(Background::None)
        } else {
            s.parse().map(Background::Color)
        }
    }
}

/// Serialized form of a color: a string or a channel array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Text(String),
    Channels(Vec<u8>),
}

impl TryFrom<ColorSpec> for Color {
    type Error = String;

    fn try_from(spec: ColorSpec) -> Result<Self, Self::Error> {
        match spec {
            ColorSpec::Text(s) => s.parse().map_err(|e: Error| e.to_string()),
            ColorSpec::Channels(c) => Color::from_channels(&c)
                .ok_or_else(|| format!("expected 3 or 4 color channels, got {}", c.len())),
        }
    }
}

impl TryFrom<ColorSpec> for Background {
    type Error = String;

    fn try_from(spec: ColorSpec) -> Result<Self, Self::Error> {
        match spec {
            ColorSpec::Text(s) => s.parse().map_err(|e: Error| e.to_string()),
            channels => Color::try_from(channels).map(Background::Color),
        }
    }
}

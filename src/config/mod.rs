//! Rendering configuration and the override merge rule
//!
//! A [`RenderConfig`] is always fully populated. New configurations are
//! produced by [`merge`], which lays an [`Overrides`] over a base
//! configuration: fixed fields are overwritten, everything else lands in
//! `extra_settings`.

mod file;
mod overrides;
mod value;

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::color::{Background, Color};
use crate::error::{Error, Result};

pub use file::ConfigFileError;
pub use overrides::Overrides;
pub use value::Value;

/// Names of the fixed configuration fields
pub const FIXED_FIELDS: &[&str] = &["font", "font_size", "font_color", "background", "anti_alias"];

/// Override key that replaces the source text rather than the configuration
pub const TEXT_KEY: &str = "text";

/// Whether `key` names a fixed field (or the text pseudo-field)
pub fn is_reserved_key(key: &str) -> bool {
    key == TEXT_KEY || FIXED_FIELDS.contains(&key)
}

/// The full configuration handed to a rendering backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Font family name
    pub font: String,

    /// Font size in pixels
    pub font_size: u32,

    /// Text color
    #[serde(default = "default_font_color")]
    pub font_color: Color,

    /// Background fill, transparent by default
    #[serde(default)]
    pub background: Background,

    /// Whether glyph edges are anti-aliased
    #[serde(default = "default_anti_alias")]
    pub anti_alias: bool,

    /// Backend-specific settings
    #[serde(default, rename = "settings")]
    pub extra_settings: BTreeMap<String, Value>,
}

fn default_font_color() -> Color {
    Color::BLACK
}

fn default_anti_alias() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font: "sans-serif".to_string(),
            font_size: 16,
            font_color: default_font_color(),
            background: Background::None,
            anti_alias: default_anti_alias(),
            extra_settings: BTreeMap::new(),
        }
    }
}

impl RenderConfig {
    /// Create a configuration with the given font and size, other fields defaulted
    pub fn new(font: impl Into<String>, font_size: u32) -> Self {
        Self {
            font: font.into(),
            font_size,
            ..Self::default()
        }
    }

    /// Set the font family
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set the font size
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the text color
    pub fn with_font_color(mut self, color: impl Into<Color>) -> Self {
        self.font_color = color.into();
        self
    }

    /// Set the background fill
    pub fn with_background(mut self, background: impl Into<Background>) -> Self {
        self.background = background.into();
        self
    }

    /// Enable or disable anti-aliasing
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Add a backend-specific setting
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_settings.insert(key.into(), value.into());
        self
    }

    /// Look up a backend-specific setting
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.extra_settings.get(key)
    }

    /// Check that every required field is populated and no extra setting
    /// shadows a fixed field
    pub fn validate(&self) -> Result<()> {
        if self.font.trim().is_empty() {
            return Err(Error::invalid_config("font", "\"\"", "font name must not be empty"));
        }
        if self.font_size == 0 {
            return Err(Error::invalid_config(
                "font_size",
                self.font_size,
                "font size must be positive",
            ));
        }
        if let Some((key, value)) = self
            .extra_settings
            .iter()
            .find(|(key, _)| is_reserved_key(key))
        {
            return Err(Error::invalid_config(
                key.as_str(),
                value,
                "extra setting shadows a fixed field",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "font: {:?}", self.font)?;
        writeln!(f, "font_size: {}", self.font_size)?;
        writeln!(f, "font_color: {}", self.font_color)?;
        writeln!(f, "background: {}", self.background)?;
        write!(f, "anti_alias: {}", self.anti_alias)?;
        for (key, value) in &self.extra_settings {
            write!(f, "\n{}: {}", key, value)?;
        }
        Ok(())
    }
}

/// Lay `overrides` over a copy of `base`
///
/// The base is never aliased: the returned configuration owns its own
/// `extra_settings`. The `text` override is left to the caller; it belongs to
/// the artifact, not its configuration.
pub fn merge(base: &RenderConfig, overrides: &Overrides) -> Result<RenderConfig> {
    let mut merged = base.clone();

    if let Some(font) = &overrides.font {
        merged.font = font.clone();
    }
    if let Some(size) = overrides.font_size {
        merged.font_size = size;
    }
    if let Some(color) = overrides.font_color {
        merged.font_color = color;
    }
    if let Some(background) = overrides.background {
        merged.background = background;
    }
    if let Some(anti_alias) = overrides.anti_alias {
        merged.anti_alias = anti_alias;
    }
    for (key, value) in &overrides.extra {
        merged.extra_settings.insert(key.clone(), value.clone());
    }

    merged.validate()?;
    Ok(merged)
}

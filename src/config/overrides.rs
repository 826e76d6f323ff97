//! Per-call configuration overrides

use std::collections::BTreeMap;

use crate::color::{Background, Color};
use crate::error::{Error, Result};

use super::{Value, TEXT_KEY};

/// A partial configuration applied on top of a base configuration
///
/// Fixed fields are named options; backend-specific knobs go into `extra`.
/// [`Overrides::set`] offers a flat keyword surface that routes each key to
/// the right place, so callers do not need to know which bucket a setting
/// belongs to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Replacement source text (only meaningful for re-renders)
    pub text: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<u32>,
    pub font_color: Option<Color>,
    pub background: Option<Background>,
    pub anti_alias: Option<bool>,
    /// Backend-specific settings
    pub extra: BTreeMap<String, Value>,
}

impl Overrides {
    /// Create an empty set of overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Build overrides from flat `(key, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut overrides = Self::new();
        for (key, value) in pairs {
            overrides.set(key.as_ref(), value)?;
        }
        Ok(overrides)
    }

    /// Set a value by key, routing fixed fields to their slot
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match key {
            TEXT_KEY => self.text = Some(expect_text(key, value)?),
            "font" => {
                let font = expect_text(key, value)?;
                if font.trim().is_empty() {
                    return Err(Error::invalid_config(key, "\"\"", "font name must not be empty"));
                }
                self.font = Some(font);
            }
            "font_size" => {
                let size = value
                    .as_int()
                    .and_then(|n| u32::try_from(n).ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| Error::invalid_config(key, &value, "expected a positive integer"))?;
                self.font_size = Some(size);
            }
            "font_color" => {
                self.font_color = Some(match value {
                    Value::Color(c) => c,
                    Value::Text(s) => s.parse().map_err(|_| {
                        Error::invalid_config(key, format!("{:?}", s), "unrecognized color")
                    })?,
                    other => {
                        return Err(Error::invalid_config(key, &other, "expected a color"));
                    }
                });
            }
            "background" => {
                self.background = Some(match value {
                    Value::Color(c) => Background::Color(c),
                    Value::Bool(false) => Background::None,
                    Value::Text(s) => s.parse().map_err(|_| {
                        Error::invalid_config(key, format!("{:?}", s), "unrecognized background")
                    })?,
                    other => {
                        return Err(Error::invalid_config(
                            key,
                            &other,
                            "expected a color or \"none\"",
                        ));
                    }
                });
            }
            "anti_alias" => {
                let flag = value
                    .as_bool()
                    .ok_or_else(|| Error::invalid_config(key, &value, "expected a bool"))?;
                self.anti_alias = Some(flag);
            }
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    /// Builder form of [`Overrides::set`]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Replace the source text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_color(mut self, color: impl Into<Color>) -> Self {
        self.font_color = Some(color.into());
        self
    }

    pub fn with_background(mut self, background: impl Into<Background>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = Some(anti_alias);
        self
    }

    /// Add a backend-specific setting without routing
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// True when nothing would change
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.font.is_none()
            && self.font_size.is_none()
            && self.font_color.is_none()
            && self.background.is_none()
            && self.anti_alias.is_none()
            && self.extra.is_empty()
    }
}

fn expect_text(key: &str, value: Value) -> Result<String> {
    match value {
        Value::Text(s) => Ok(s),
        other => Err(Error::invalid_config(key, &other, "expected a string")),
    }
}

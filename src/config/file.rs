//! Loading base configurations from TOML
//!
//! ```toml
//! font = "serif"
//! font_size = 24
//! font_color = "#333333"
//! background = "none"
//! anti_alias = true
//!
//! [settings]
//! bold = true
//! ```

use std::path::Path;

use ariadne::{Color as ReportColor, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::error::Error;

use super::RenderConfig;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Error),
}

impl ConfigFileError {
    /// Format the error with source context using ariadne
    ///
    /// Only TOML parse errors carry a span; other errors format as their message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (span, message) = match self {
            ConfigFileError::ParseError(err) => match err.span() {
                Some(span) => (span, err.message().to_string()),
                None => return self.to_string(),
            },
            _ => return self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid configuration file")
            .with_label(
                Label::new((filename, span))
                    .with_message(&message)
                    .with_color(ReportColor::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => message,
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigFileError> {
        let config: RenderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

//! Error types for configuration, rendering, and catalog operations

use thiserror::Error;

/// Errors raised by the merge layer, the backend, and the catalog
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A configuration field or backend setting is structurally invalid or unrecognized
    #[error("invalid config '{key}' = {value}: {reason}")]
    InvalidConfig {
        key: String,
        value: String,
        reason: String,
    },

    /// A selector matched no catalog entry
    #[error("name not found in catalog: '{name}'")]
    NameNotFound { name: String },

    /// An update was requested without anything to select
    #[error("invalid selector: {reason}")]
    InvalidSelector { reason: String },

    /// A read access named something neither the artifact nor its surface exposes
    #[error("'{name}' is not a capability of this artifact (available: {available})")]
    InvalidCapability { name: String, available: String },
}

impl Error {
    /// Create an invalid config error
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a name-not-found error
    pub fn name_not_found(name: impl Into<String>) -> Self {
        Self::NameNotFound { name: name.into() }
    }

    /// Create an invalid selector error
    pub fn invalid_selector(reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            reason: reason.into(),
        }
    }

    /// Create an invalid capability error listing what is available
    pub fn invalid_capability(name: impl Into<String>, available: &[&str]) -> Self {
        Self::InvalidCapability {
            name: name.into(),
            available: available.join(", "),
        }
    }

    /// The offending configuration key, if this is a config error
    pub fn config_key(&self) -> Option<&str> {
        match self {
            Self::InvalidConfig { key, .. } => Some(key),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

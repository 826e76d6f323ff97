//! Rendering backends
//!
//! A backend turns `(text, RenderConfig)` into an opaque [`Surface`]. It
//! declares the extra settings it recognizes so a manager can reject unknown
//! settings up front, and it rejects unsupported values at render time.
//!
//! [`SvgBackend`] is the bundled backend; it renders text into standalone
//! SVG documents.

pub mod options;
pub mod svg;

use crate::config::{RenderConfig, Value};
use crate::error::Result;

pub use options::SvgOptions;
pub use svg::{SvgBackend, SvgSurface};

/// A text rendering backend
pub trait Backend {
    /// The rendered output type
    type Surface: Surface;

    /// Backend name for identification
    fn name(&self) -> &str;

    /// Names of the extra settings this backend understands
    fn settings(&self) -> &[&'static str];

    /// Whether `key` is a recognized extra setting
    fn recognizes(&self, key: &str) -> bool {
        self.settings().contains(&key)
    }

    /// Render `text` under `config`
    ///
    /// Fails with [`crate::Error::InvalidConfig`] on unsupported
    /// font/size/color/setting combinations.
    fn render(&self, text: &str, config: &RenderConfig) -> Result<Self::Surface>;
}

/// Read-only introspection of a rendered surface
pub trait Surface {
    /// Names of the queries this surface answers
    fn capabilities(&self) -> &[&'static str];

    /// Answer a named query, or `None` if it is not a capability
    fn capability(&self, name: &str) -> Option<Value>;
}

//! Textbox Catalog - stamp out, track, and batch-update rendered text
//!
//! A [`Manager`] holds a base [`RenderConfig`] and a rendering [`Backend`].
//! Each [`Manager::create`] call merges per-call [`Overrides`] over the base,
//! renders an [`Artifact`], and catalogs it under a disambiguated key such as
//! `"score-(0)"`. [`Manager::update`] re-renders one artifact, a family of
//! same-text artifacts, or the whole catalog.
//!
//! # Example
//!
//! ```rust
//! use textbox_catalog::{svg_manager, Color, Overrides, RenderConfig};
//!
//! let mut manager = svg_manager(RenderConfig::new("serif", 20)).unwrap();
//! manager.create("score", &Overrides::new()).unwrap();
//! manager.create("score", &Overrides::new().with_font_size(10)).unwrap();
//!
//! let keys: Vec<&str> = manager.keys().collect();
//! assert_eq!(keys, ["score-(0)", "score-(1)"]);
//!
//! manager
//!     .update_family("score", &Overrides::new().with_font_color(Color::rgb(255, 0, 0)))
//!     .unwrap();
//! assert_eq!(manager.family("score").len(), 2);
//! ```

pub mod artifact;
pub mod backend;
pub mod catalog;
pub mod color;
pub mod config;
pub mod error;
pub mod manager;

pub use artifact::{Artifact, ArtifactId};
pub use backend::{Backend, Surface, SvgBackend, SvgOptions, SvgSurface};
pub use catalog::{Catalog, Family};
pub use color::{Background, Color};
pub use config::{merge, ConfigFileError, Overrides, RenderConfig, Value};
pub use error::{Error, Result};
pub use manager::Manager;

/// Create a manager backed by the default [`SvgBackend`]
///
/// # Example
///
/// ```rust
/// use textbox_catalog::{svg_manager, RenderConfig};
///
/// let result = svg_manager(RenderConfig::default().with_setting("shadow", true));
/// assert!(result.is_err());
/// ```
pub fn svg_manager(base: RenderConfig) -> Result<Manager<SvgBackend>> {
    Manager::new(SvgBackend::new(), base)
}

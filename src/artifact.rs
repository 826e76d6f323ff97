//! Rendered text artifacts
//!
//! An [`Artifact`] bundles a backend surface with the text and configuration
//! that produced it. The three are only ever replaced together: a re-render
//! is staged first and committed only once the backend has succeeded.

use std::fmt;

use crate::backend::{Backend, Surface};
use crate::config::{merge, Overrides, RenderConfig, Value};
use crate::error::{Error, Result};

/// Fields an artifact answers itself before deferring to its surface
pub const ARTIFACT_FIELDS: &[&str] = &[
    "text",
    "font",
    "font_size",
    "font_color",
    "background",
    "anti_alias",
];

/// Stable identity of an artifact, independent of its catalog key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactId(pub(crate) u64);

impl ArtifactId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One rendered piece of text
#[derive(Debug, Clone)]
pub struct Artifact<S> {
    id: ArtifactId,
    surface: S,
    text: String,
    config: RenderConfig,
}

/// A finished re-render waiting to be committed
#[derive(Debug)]
pub(crate) struct Rendition<S> {
    surface: S,
    text: String,
    config: RenderConfig,
}

impl<S> Artifact<S> {
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    /// The backend output for the current text and configuration
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The source text last rendered
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The configuration last used to render
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Consume the artifact, keeping only its surface
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub(crate) fn commit(&mut self, rendition: Rendition<S>) {
        self.surface = rendition.surface;
        self.text = rendition.text;
        self.config = rendition.config;
    }
}

impl<S: Surface> Artifact<S> {
    /// Render `text` under `config` into a new artifact
    pub(crate) fn render<B>(
        id: ArtifactId,
        backend: &B,
        text: &str,
        config: RenderConfig,
    ) -> Result<Self>
    where
        B: Backend<Surface = S>,
    {
        let surface = backend.render(text, &config)?;
        Ok(Self {
            id,
            surface,
            text: text.to_string(),
            config,
        })
    }

    /// Re-render in place with `overrides` merged over the current configuration
    ///
    /// On failure the artifact keeps its previous surface, text, and config.
    pub fn modify<B>(&mut self, backend: &B, overrides: &Overrides) -> Result<()>
    where
        B: Backend<Surface = S>,
    {
        let rendition = self.prepare(backend, overrides)?;
        self.commit(rendition);
        Ok(())
    }

    /// Render the modified artifact without touching it
    pub(crate) fn prepare<B>(&self, backend: &B, overrides: &Overrides) -> Result<Rendition<S>>
    where
        B: Backend<Surface = S>,
    {
        let text = overrides.text.as_deref().unwrap_or(self.text.as_str());
        let config = merge(&self.config, overrides)?;
        let surface = backend.render(text, &config)?;
        Ok(Rendition {
            surface,
            text: text.to_string(),
            config,
        })
    }

    /// Read a named attribute of the artifact or, failing that, of its surface
    pub fn attribute(&self, name: &str) -> Result<Value> {
        let own = match name {
            "text" => Some(Value::Text(self.text.clone())),
            "font" => Some(Value::Text(self.config.font.clone())),
            "font_size" => Some(Value::from(self.config.font_size)),
            "font_color" => Some(Value::Color(self.config.font_color)),
            "background" => Some(match self.config.background.color() {
                Some(color) => Value::Color(color),
                None => Value::Text("none".to_string()),
            }),
            "anti_alias" => Some(Value::Bool(self.config.anti_alias)),
            _ => None,
        };

        own.or_else(|| self.surface.capability(name))
            .ok_or_else(|| Error::invalid_capability(name, &self.attribute_names()))
    }

    /// Every name [`Artifact::attribute`] answers
    pub fn attribute_names(&self) -> Vec<&str> {
        ARTIFACT_FIELDS
            .iter()
            .chain(self.surface.capabilities())
            .copied()
            .collect()
    }
}

impl<S> fmt::Display for Artifact<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} ({} {}px, color {}, background {})",
            self.text,
            self.config.font,
            self.config.font_size,
            self.config.font_color,
            self.config.background
        )
    }
}

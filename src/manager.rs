//! The text manager: base configuration, backend, and catalog
//!
//! A [`Manager`] stamps out artifacts from one base configuration and keeps
//! track of every artifact it produced. Mutation goes through the manager so
//! catalog keys follow text changes.

use std::collections::BTreeMap;
use std::fmt;

use crate::artifact::{Artifact, ArtifactId};
use crate::backend::Backend;
use crate::catalog::{Catalog, Family};
use crate::config::{merge, Overrides, RenderConfig, TEXT_KEY};
use crate::error::{Error, Result};

/// Creates, catalogs, and updates text artifacts
pub struct Manager<B: Backend> {
    backend: B,
    base: RenderConfig,
    catalog: Catalog<B::Surface>,
}

impl<B: Backend> Manager<B> {
    /// Create a manager with `base` as the default configuration
    ///
    /// Fails if `base` is incomplete or names an extra setting the backend
    /// does not recognize.
    pub fn new(backend: B, base: RenderConfig) -> Result<Self> {
        validate_base(&backend, &base)?;
        log::debug!(
            "text manager ready: backend={} font={:?} size={}",
            backend.name(),
            base.font,
            base.font_size
        );
        Ok(Self {
            backend,
            base,
            catalog: Catalog::new(),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The default configuration for new artifacts
    pub fn base_config(&self) -> &RenderConfig {
        &self.base
    }

    /// Replace the base configuration
    ///
    /// Existing artifacts keep the configuration they were rendered with.
    pub fn set_base_config(&mut self, base: RenderConfig) -> Result<()> {
        validate_base(&self.backend, &base)?;
        self.base = base;
        Ok(())
    }

    /// Merge `overrides` into the base configuration
    pub fn configure(&mut self, overrides: &Overrides) -> Result<()> {
        reject_text(overrides, "text is not part of the base configuration")?;
        let base = merge(&self.base, overrides)?;
        self.set_base_config(base)
    }

    pub fn catalog(&self) -> &Catalog<B::Surface> {
        &self.catalog
    }

    /// Render `text` with `overrides` over the base configuration and catalog it
    ///
    /// Fails if `overrides` carries a `text` of its own.
    pub fn create(&mut self, text: &str, overrides: &Overrides) -> Result<&Artifact<B::Surface>> {
        reject_text(overrides, "create takes the text as its own argument")?;
        let config = merge(&self.base, overrides)?;
        let id = self.catalog.allocate_id();
        let artifact = Artifact::render(id, &self.backend, text, config)?;

        let (key, artifact) = self.catalog.insert(artifact);
        log::debug!("created {} as {:?}", id, key);
        Ok(artifact)
    }

    /// Re-render every artifact `selector` resolves to and re-catalog it
    ///
    /// See [`Catalog::resolve`] for the selection rules. All matched
    /// artifacts are rendered before any is changed, so a failure leaves the
    /// catalog exactly as it was. Returns the new keys in processing order.
    pub fn update(
        &mut self,
        selector: Option<&str>,
        match_all: bool,
        overrides: &Overrides,
    ) -> Result<Vec<String>> {
        let mut staged = BTreeMap::new();
        for artifact in self.catalog.select(selector, match_all)? {
            staged.insert(artifact.id(), artifact.prepare(&self.backend, overrides)?);
        }

        let keys = self.catalog.recatalog(staged);
        log::debug!("updated {} artifact(s): {:?}", keys.len(), keys);
        Ok(keys)
    }

    /// Update exactly the artifact cataloged under `key`
    pub fn update_key(&mut self, key: &str, overrides: &Overrides) -> Result<Vec<String>> {
        self.update(Some(key), false, overrides)
    }

    /// Update every artifact in the family `name` (a bare name or any member's key)
    pub fn update_family(&mut self, name: &str, overrides: &Overrides) -> Result<Vec<String>> {
        self.update(Some(name), true, overrides)
    }

    /// Update every cataloged artifact
    pub fn update_all(&mut self, overrides: &Overrides) -> Result<Vec<String>> {
        self.update(None, true, overrides)
    }

    pub fn get(&self, key: &str) -> Option<&Artifact<B::Surface>> {
        self.catalog.get(key)
    }

    /// Current catalog key of an artifact
    pub fn key_of(&self, id: ArtifactId) -> Option<&str> {
        self.catalog.key_of(id)
    }

    /// Every artifact whose key prefix is `name`
    pub fn family<'a>(&'a self, name: &'a str) -> Family<'a, B::Surface> {
        self.catalog.family(name)
    }

    /// Evict an artifact from the catalog, handing it back to the caller
    pub fn remove(&mut self, key: &str) -> Option<Artifact<B::Surface>> {
        let removed = self.catalog.remove(key);
        if removed.is_some() {
            log::debug!("removed {:?}", key);
        }
        removed
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.catalog.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Artifact<B::Surface>)> {
        self.catalog.iter()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

fn reject_text(overrides: &Overrides, reason: &str) -> Result<()> {
    match &overrides.text {
        Some(text) => Err(Error::invalid_config(TEXT_KEY, format!("{:?}", text), reason)),
        None => Ok(()),
    }
}

fn validate_base<B: Backend>(backend: &B, base: &RenderConfig) -> Result<()> {
    base.validate()?;
    for (key, value) in &base.extra_settings {
        if !backend.recognizes(key) {
            return Err(Error::invalid_config(
                key.as_str(),
                value,
                format!("not recognized by the {} backend", backend.name()),
            ));
        }
    }
    Ok(())
}

impl<B: Backend> fmt::Display for Manager<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "backend: {}", self.backend.name())?;
        for line in self.base.to_string().lines() {
            writeln!(f, "{}", line)?;
        }
        write!(f, "catalog: {} artifact(s)", self.catalog.len())?;
        for (key, artifact) in self.catalog.iter() {
            write!(f, "\n    {:?}: {}", key, artifact)?;
        }
        Ok(())
    }
}

impl<B: Backend + fmt::Debug> fmt::Debug for Manager<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("backend", &self.backend)
            .field("base", &self.base)
            .field("keys", &self.catalog.keys().collect::<Vec<_>>())
            .finish()
    }
}

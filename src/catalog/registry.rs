//! Catalog storage and identity assignment

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::artifact::{Artifact, ArtifactId, Rendition};

use super::key::{bare_name, format_key};

#[derive(Debug)]
struct Slot<S> {
    key: String,
    artifact: Artifact<S>,
}

/// Registry of artifacts keyed by disambiguated name
///
/// Artifacts are stored under stable [`ArtifactId`] handles; a key index maps
/// each catalog key to exactly one handle. Re-keying an artifact never
/// changes its handle.
#[derive(Debug)]
pub struct Catalog<S> {
    slots: HashMap<ArtifactId, Slot<S>>,
    index: BTreeMap<String, ArtifactId>,
    next_id: u64,
}

impl<S> Default for Catalog<S> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            index: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<S> Catalog<S> {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh handle for an artifact about to be created
    pub(crate) fn allocate_id(&mut self) -> ArtifactId {
        let id = ArtifactId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The first free key for `text`, probing `-(0)`, `-(1)`, ... upward
    pub fn next_key(&self, text: &str) -> String {
        let mut n = 0;
        loop {
            let key = format_key(text, n);
            if !self.index.contains_key(&key) {
                return key;
            }
            log::trace!("catalog key {:?} occupied", key);
            n += 1;
        }
    }

    /// Catalog an artifact under the first free key for its text
    ///
    /// Returns the new key and the cataloged artifact.
    pub(crate) fn insert(&mut self, artifact: Artifact<S>) -> (&str, &Artifact<S>) {
        let key = self.next_key(artifact.text());
        let id = artifact.id();
        self.index.insert(key.clone(), id);

        let slot = Slot { key, artifact };
        let slot = match self.slots.entry(id) {
            Entry::Occupied(mut entry) => {
                self.index.remove(&entry.get().key);
                entry.insert(slot);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(slot),
        };
        (&slot.key, &slot.artifact)
    }

    /// Commit staged re-renders, re-cataloging each artifact under a fresh key
    ///
    /// Artifacts are processed in creation order. Each one gives up its old
    /// key only when its turn comes, so later entries still hold theirs while
    /// earlier ones probe. Returns the new keys in processing order.
    pub(crate) fn recatalog(
        &mut self,
        mut staged: BTreeMap<ArtifactId, Rendition<S>>,
    ) -> Vec<String> {
        let mut moved = BTreeMap::new();
        for (id, slot) in std::mem::take(&mut self.slots) {
            match staged.remove(&id) {
                Some(rendition) => {
                    moved.insert(id, (slot, rendition));
                }
                None => {
                    self.slots.insert(id, slot);
                }
            }
        }

        moved
            .into_values()
            .map(|(slot, rendition)| {
                self.index.remove(&slot.key);
                let mut artifact = slot.artifact;
                artifact.commit(rendition);
                self.insert(artifact).0.to_string()
            })
            .collect()
    }

    /// Take an artifact out of the catalog by handle
    pub(crate) fn take(&mut self, id: ArtifactId) -> Option<Artifact<S>> {
        let slot = self.slots.remove(&id)?;
        self.index.remove(&slot.key);
        Some(slot.artifact)
    }

    /// Evict the artifact stored under `key`
    pub fn remove(&mut self, key: &str) -> Option<Artifact<S>> {
        let id = self.index.get(key).copied()?;
        self.take(id)
    }

    pub fn get(&self, key: &str) -> Option<&Artifact<S>> {
        self.index.get(key).and_then(|id| self.by_id(*id))
    }

    pub fn by_id(&self, id: ArtifactId) -> Option<&Artifact<S>> {
        self.slots.get(&id).map(|slot| &slot.artifact)
    }

    /// The current key of an artifact
    pub fn key_of(&self, id: ArtifactId) -> Option<&str> {
        self.slots.get(&id).map(|slot| slot.key.as_str())
    }

    pub fn id_of(&self, key: &str) -> Option<ArtifactId> {
        self.index.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Whether any cataloged artifact has exactly this text
    pub fn contains_text(&self, text: &str) -> bool {
        self.slots.values().any(|slot| slot.artifact.text() == text)
    }

    /// All keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(|k| k.as_str())
    }

    /// All `(key, artifact)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Artifact<S>)> {
        self.index
            .iter()
            .filter_map(|(key, id)| self.by_id(*id).map(|a| (key.as_str(), a)))
    }

    /// Handles of every artifact, in creation order
    pub fn ids(&self) -> Vec<ArtifactId> {
        self.artifacts().into_iter().map(Artifact::id).collect()
    }

    /// Every artifact, in creation order
    pub(crate) fn artifacts(&self) -> Vec<&Artifact<S>> {
        let mut artifacts: Vec<&Artifact<S>> =
            self.slots.values().map(|slot| &slot.artifact).collect();
        artifacts.sort_by_key(|artifact| artifact.id());
        artifacts
    }

    /// Every artifact with exactly this text, in creation order
    pub(crate) fn with_text(&self, text: &str) -> Vec<&Artifact<S>> {
        let mut artifacts = self.artifacts();
        artifacts.retain(|artifact| artifact.text() == text);
        artifacts
    }

    /// Entries whose key prefix equals `name`
    pub fn family_entries<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Artifact<S>)> + 'a {
        self.iter().filter(move |(key, _)| bare_name(key) == name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

//! Selector resolution and read-only family views

use std::collections::BTreeMap;
use std::fmt;

use crate::artifact::{Artifact, ArtifactId};
use crate::error::{Error, Result};

use super::key::bare_name;
use super::Catalog;

impl<S> Catalog<S> {
    /// Resolve a selector to the handles it targets, in creation order
    ///
    /// - no selector and no `match_all`: [`Error::InvalidSelector`]
    /// - `match_all` alone: every artifact
    /// - a selector that is neither a key nor any artifact's text:
    ///   [`Error::NameNotFound`]
    /// - a key without `match_all`: exactly that artifact
    /// - a bare name without `match_all`: every artifact with that text
    /// - `match_all` with a selector: the selector's `-(n)` suffix, if any,
    ///   is stripped and every artifact with the remaining text matches
    ///
    /// The result is a snapshot; callers may mutate the catalog while
    /// walking it.
    pub fn resolve(&self, selector: Option<&str>, match_all: bool) -> Result<Vec<ArtifactId>> {
        Ok(self
            .select(selector, match_all)?
            .into_iter()
            .map(Artifact::id)
            .collect())
    }

    /// Like [`Catalog::resolve`], borrowing the matched artifacts
    pub(crate) fn select(
        &self,
        selector: Option<&str>,
        match_all: bool,
    ) -> Result<Vec<&Artifact<S>>> {
        let selector = match selector {
            Some(selector) => selector,
            None if match_all => return Ok(self.artifacts()),
            None => {
                return Err(Error::invalid_selector(
                    "expected a catalog key, a name, or match_all",
                ))
            }
        };

        let exact = self.get(selector);
        if exact.is_none() && !self.contains_text(selector) {
            return Err(Error::name_not_found(selector));
        }

        Ok(match (exact, match_all) {
            (Some(artifact), false) => vec![artifact],
            (None, false) => self.with_text(selector),
            (_, true) => self.with_text(bare_name(selector)),
        })
    }

    /// Read-only view of every entry whose key prefix is `name`
    pub fn family<'a>(&'a self, name: &'a str) -> Family<'a, S> {
        Family {
            name,
            entries: self.family_entries(name).collect(),
        }
    }
}

/// Entries sharing a name, keyed by catalog key
#[derive(Debug)]
pub struct Family<'a, S> {
    name: &'a str,
    entries: BTreeMap<&'a str, &'a Artifact<S>>,
}

impl<'a, S> Family<'a, S> {
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn get(&self, key: &str) -> Option<&'a Artifact<S>> {
        self.entries.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Artifact<S>)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> fmt::Display for Family<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "{{}}");
        }
        writeln!(f, "{{")?;
        for (key, artifact) in &self.entries {
            writeln!(f, "    {:?}: {},", key, artifact)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{SvgBackend, SvgSurface};
    use crate::config::RenderConfig;
    use pretty_assertions::assert_eq;

    fn catalog(texts: &[&str]) -> Catalog<SvgSurface> {
        let mut catalog = Catalog::new();
        for text in texts {
            let id = catalog.allocate_id();
            let artifact =
                Artifact::render(id, &SvgBackend::new(), text, RenderConfig::new("serif", 10))
                    .unwrap();
            catalog.insert(artifact);
        }
        catalog
    }

    fn keys(catalog: &Catalog<SvgSurface>, ids: &[ArtifactId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| catalog.key_of(*id))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_resolve_requires_selector_or_match_all() {
        let catalog = catalog(&["a"]);
        assert!(matches!(
            catalog.resolve(None, false),
            Err(Error::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_resolve_match_all_without_selector() {
        let catalog = catalog(&["a", "b", "a"]);
        let ids = catalog.resolve(None, true).unwrap();
        assert_eq!(keys(&catalog, &ids), vec!["a-(0)", "b-(0)", "a-(1)"]);
    }

    #[test]
    fn test_resolve_exact_key() {
        let catalog = catalog(&["a", "a"]);
        let ids = catalog.resolve(Some("a-(1)"), false).unwrap();
        assert_eq!(keys(&catalog, &ids), vec!["a-(1)"]);
    }

    #[test]
    fn test_resolve_family_from_key() {
        let catalog = catalog(&["a", "a", "b"]);
        let ids = catalog.resolve(Some("a-(0)"), true).unwrap();
        assert_eq!(keys(&catalog, &ids), vec!["a-(0)", "a-(1)"]);
    }

    #[test]
    fn test_resolve_family_from_bare_name() {
        let catalog = catalog(&["a", "b", "a"]);
        let ids = catalog.resolve(Some("a"), true).unwrap();
        assert_eq!(keys(&catalog, &ids), vec!["a-(0)", "a-(1)"]);
    }

    #[test]
    fn test_resolve_bare_name_without_match_all() {
        let catalog = catalog(&["a", "b", "a"]);
        let ids = catalog.resolve(Some("a"), false).unwrap();
        assert_eq!(keys(&catalog, &ids), vec!["a-(0)", "a-(1)"]);
    }

    #[test]
    fn test_resolve_match_all_strips_suffix_of_text() {
        // "x-(5)" is a text here, not a key
        let catalog = catalog(&["x", "x-(5)"]);
        let ids = catalog.resolve(Some("x-(5)"), true).unwrap();
        assert_eq!(keys(&catalog, &ids), vec!["x-(0)"]);

        let ids = catalog.resolve(Some("x-(5)"), false).unwrap();
        assert_eq!(keys(&catalog, &ids), vec!["x-(5)-(0)"]);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let catalog = catalog(&["a"]);
        for match_all in [false, true] {
            assert_eq!(
                catalog.resolve(Some("nonexistent"), match_all).unwrap_err(),
                Error::name_not_found("nonexistent")
            );
        }
        assert!(matches!(
            catalog.resolve(Some("a-(7)"), true),
            Err(Error::NameNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_hyphenated_text() {
        let catalog = catalog(&["well-known", "well"]);
        let ids = catalog.resolve(Some("well-known-(0)"), true).unwrap();
        assert_eq!(keys(&catalog, &ids), vec!["well-known-(0)"]);
    }

    #[test]
    fn test_family_display() {
        let catalog = catalog(&["hi", "hi", "other"]);
        let family = catalog.family("hi");
        assert_eq!(family.len(), 2);
        insta::assert_snapshot!(family.to_string(), @r###"
        {
            "hi-(0)": "hi" (serif 10px, color (0, 0, 0, 255), background none),
            "hi-(1)": "hi" (serif 10px, color (0, 0, 0, 255), background none),
        }
        "###);
    }

    #[test]
    fn test_empty_family_display() {
        let catalog = catalog(&["hi"]);
        assert_eq!(catalog.family("nope").to_string(), "{}");
    }
}

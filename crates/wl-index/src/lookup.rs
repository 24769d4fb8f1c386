//! Query → displayable entries.
//!
//! Ties the pieces together the way a search box or OCR overlay needs them:
//! match the query, follow redirects, drop entries that resolve to the same
//! article, and attach the secondary-language version when one exists.

use std::collections::HashSet;

use wl_storage::{Storage, StorageError};

use crate::index::{Entry, EntryIndex};
use crate::key::normalize_key;
use crate::matcher::match_query;
use crate::redirect::{DEFAULT_MAX_HOPS, RedirectOutcome, Resolver};

/// A corpus: its index and the storage the index points into.
pub struct Corpus {
    index: EntryIndex,
    storage: Box<dyn Storage>,
}

impl Corpus {
    /// Scan `storage` and index it.
    pub fn load(storage: Box<dyn Storage>) -> Result<Self, StorageError> {
        let index = EntryIndex::from_storage(storage.as_ref())?;
        Ok(Self { index, storage })
    }

    /// Corpus index.
    #[must_use]
    pub fn index(&self) -> &EntryIndex {
        &self.index
    }

    /// Corpus storage.
    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.index, self.storage.as_ref())
    }
}

impl std::fmt::Debug for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corpus")
            .field("entries", &self.index.len())
            .finish_non_exhaustive()
    }
}

/// A resolved article ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupEntry {
    /// Display name after redirects.
    pub name: String,
    /// Primary-language markup.
    pub content: String,
    /// Secondary-language markup, when that corpus has the article.
    pub secondary: Option<String>,
    /// How redirect resolution ended.
    pub outcome: RedirectOutcome,
}

/// Resolves queries and link clicks against a primary corpus, with an optional
/// secondary-language corpus keyed by the same titles.
#[derive(Debug)]
pub struct Lookup {
    primary: Corpus,
    secondary: Option<Corpus>,
    max_hops: usize,
}

impl Lookup {
    /// Create a lookup over a primary corpus.
    #[must_use]
    pub fn new(primary: Corpus) -> Self {
        Self {
            primary,
            secondary: None,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    /// Attach a secondary-language corpus.
    #[must_use]
    pub fn with_secondary(mut self, secondary: Corpus) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Set the redirect hop bound.
    #[must_use]
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Primary corpus.
    #[must_use]
    pub fn primary(&self) -> &Corpus {
        &self.primary
    }

    /// Articles matching free-form `text`, one per resolved title.
    ///
    /// Articles that cannot be read are skipped with a warning.
    #[must_use]
    pub fn entries(&self, text: &str) -> Vec<LookupEntry> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for entry in match_query(text, &self.primary.index) {
            let Some(resolved) = self.resolve(entry) else {
                continue;
            };
            if seen.insert(normalize_key(&resolved.name)) {
                entries.push(resolved);
            }
        }

        tracing::info!(entries = entries.len(), "Looked up query");
        entries
    }

    /// Article behind an internal link to `title`, if the primary corpus has it.
    pub fn open(&self, title: &str) -> Result<Option<LookupEntry>, StorageError> {
        let Some(entry) = self.primary.index.lookup(title) else {
            tracing::debug!(title, "Link target not indexed");
            return Ok(None);
        };
        self.try_resolve(entry).map(Some)
    }

    fn resolve(&self, entry: &Entry) -> Option<LookupEntry> {
        self.try_resolve(entry)
            .inspect_err(|e| {
                tracing::warn!(name = %entry.name, error = %e, "Skipping unreadable entry");
            })
            .ok()
    }

    fn try_resolve(&self, entry: &Entry) -> Result<LookupEntry, StorageError> {
        let resolution = self
            .primary
            .resolver()
            .resolve(&entry.location, self.max_hops)?;
        let name = resolution.display_name(&entry.name).to_owned();
        let secondary = self.secondary_content(&name);
        Ok(LookupEntry {
            name,
            content: resolution.content,
            secondary,
            outcome: resolution.outcome,
        })
    }

    /// Secondary markup for a title, read without following redirects.
    fn secondary_content(&self, name: &str) -> Option<String> {
        let corpus = self.secondary.as_ref()?;
        let entry = corpus.index.lookup(name)?;
        corpus
            .storage
            .read(&entry.location)
            .inspect_err(|e| {
                tracing::warn!(name, error = %e, "Secondary article unreadable");
            })
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wl_storage::MockStorage;

    use super::*;

    static_assertions::assert_impl_all!(Lookup: Send, Sync);

    fn primary() -> Corpus {
        let storage = MockStorage::new()
            .with_file("Dwarf.txt", "Dwarf", "Short and sturdy.")
            .with_file("Dwarves.txt", "Dwarves", "#REDIRECT [[Dwarf]]")
            .with_file("Pick.txt", "Pick", "A mining tool.")
            .with_document("Broken.txt", "Broken");
        Corpus::load(Box::new(storage)).unwrap()
    }

    fn secondary() -> Corpus {
        let storage = MockStorage::new().with_file("Dwarf-CN.txt", "Dwarf", "矮人。");
        Corpus::load(Box::new(storage)).unwrap()
    }

    #[test]
    fn test_entries_follow_redirects_and_dedup() {
        let lookup = Lookup::new(primary());

        let entries = lookup.entries("Dwarves\nDwarf");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Dwarf");
        assert_eq!(entries[0].content, "Short and sturdy.");
        assert_eq!(entries[0].outcome, RedirectOutcome::Followed { hops: 1 });
        assert_eq!(entries[0].secondary, None);
    }

    #[test]
    fn test_entries_attach_secondary() {
        let lookup = Lookup::new(primary()).with_secondary(secondary());

        let entries = lookup.entries("dwarf pick");

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Dwarf", "Pick"]);
        assert_eq!(entries[0].secondary.as_deref(), Some("矮人。"));
        assert_eq!(entries[1].secondary, None);
    }

    #[test]
    fn test_entries_skip_unreadable() {
        let lookup = Lookup::new(primary());

        let entries = lookup.entries("Broken Pick");

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Pick"]);
    }

    #[test]
    fn test_entries_no_match() {
        let lookup = Lookup::new(primary());

        assert!(lookup.entries("zz").is_empty());
    }

    #[test]
    fn test_open_link() {
        let lookup = Lookup::new(primary()).with_secondary(secondary());

        let entry = lookup.open("dwarves").unwrap().unwrap();

        assert_eq!(entry.name, "Dwarf");
        assert_eq!(entry.secondary.as_deref(), Some("矮人。"));
    }

    #[test]
    fn test_open_unknown_title() {
        let lookup = Lookup::new(primary());

        assert_eq!(lookup.open("Elf").unwrap(), None);
    }

    #[test]
    fn test_open_unreadable_is_error() {
        let lookup = Lookup::new(primary());

        assert!(lookup.open("Broken").is_err());
    }

    #[test]
    fn test_max_hops_respected() {
        let lookup = Lookup::new(primary()).with_max_hops(0);

        let entry = lookup.open("Dwarves").unwrap().unwrap();

        assert_eq!(entry.outcome, RedirectOutcome::HopLimit);
        assert_eq!(entry.name, "Dwarves");
    }
}

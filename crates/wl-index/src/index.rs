//! Normalized-title index over a corpus.

use std::collections::HashMap;

use wl_storage::{Document, Storage, StorageError};

use crate::key::normalize_key;

/// An indexed article: display name and storage location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Display name, as scanned.
    pub name: String,
    /// Storage location of the markup.
    pub location: String,
}

impl From<Document> for Entry {
    fn from(doc: Document) -> Self {
        Self {
            name: doc.name,
            location: doc.location,
        }
    }
}

/// Normalized key → [`Entry`], in registration order.
///
/// Built once and read-only afterwards. When several titles normalize to the
/// same key, the first one registered wins and the rest are shadowed. Titles
/// that normalize to an empty key are not indexed.
///
/// # Example
///
/// ```
/// use wl_index::EntryIndex;
/// use wl_storage::Document;
///
/// let index = EntryIndex::build([
///     Document::new("Dwarf", "Dwarf.txt"),
///     Document::new("DWARF", "DWARF.txt"),
/// ]);
///
/// assert_eq!(index.len(), 1);
/// assert_eq!(index.lookup("dwarf").map(|e| e.location.as_str()), Some("Dwarf.txt"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct EntryIndex {
    entries: Vec<(String, Entry)>,
    positions: HashMap<String, usize>,
}

impl EntryIndex {
    /// Build an index from documents in registration order.
    pub fn build(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut index = Self::default();
        for doc in documents {
            let key = normalize_key(&doc.name);
            if key.is_empty() {
                tracing::debug!(name = %doc.name, "Skipping title with empty index key");
                continue;
            }
            if let Some(&winner) = index.positions.get(&key) {
                tracing::debug!(
                    name = %doc.name,
                    winner = %index.entries[winner].1.name,
                    %key,
                    "Shadowed duplicate title"
                );
                continue;
            }
            index.positions.insert(key.clone(), index.entries.len());
            index.entries.push((key, Entry::from(doc)));
        }
        index
    }

    /// Scan `storage` and index every document it lists.
    pub fn from_storage(storage: &dyn Storage) -> Result<Self, StorageError> {
        let index = Self::build(storage.scan()?);
        tracing::info!(entries = index.len(), "Built entry index");
        Ok(index)
    }

    /// Entry registered under an already-normalized key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    /// Like [`get`](Self::get), also returning the index's own copy of the key.
    #[must_use]
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &Entry)> {
        self.positions.get(key).map(|&i| {
            let (key, entry) = &self.entries[i];
            (key.as_str(), entry)
        })
    }

    /// Entry whose title normalizes like `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.get(&normalize_key(name))
    }

    /// Check if a normalized key is indexed.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Number of indexed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, entry)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wl_storage::MockStorage;

    use super::*;

    static_assertions::assert_impl_all!(EntryIndex: Send, Sync);

    fn doc(name: &str) -> Document {
        Document::new(name, format!("{name}.txt"))
    }

    #[test]
    fn test_build_and_get() {
        let index = EntryIndex::build([doc("Dwarf"), doc("Your first fortress")]);

        assert_eq!(index.len(), 2);
        let entry = index.get("yourfirstfortress").unwrap();
        assert_eq!(entry.name, "Your first fortress");
        assert_eq!(entry.location, "Your first fortress.txt");
    }

    #[test]
    fn test_first_registration_wins() {
        let index = EntryIndex::build([doc("Pick"), doc("pick"), doc("P.I.C.K")]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("PICK").unwrap().name, "Pick");
    }

    #[test]
    fn test_empty_keys_skipped() {
        let index = EntryIndex::build([doc("矮人"), doc("!!"), doc("Axe")]);

        assert_eq!(index.len(), 1);
        assert!(!index.contains_key(""));
    }

    #[test]
    fn test_iter_preserves_registration_order() {
        let index = EntryIndex::build([doc("Zebra"), doc("Apple"), doc("Mango")]);
        let keys: Vec<_> = index.iter().map(|(key, _)| key).collect();

        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_empty_index() {
        let index = EntryIndex::build(Vec::new());

        assert!(index.is_empty());
        assert!(index.lookup("anything").is_none());
    }

    #[test]
    fn test_from_storage() {
        let storage = MockStorage::new()
            .with_file("Dwarf.txt", "Dwarf", "")
            .with_document("Elf.txt", "Elf");

        let index = EntryIndex::from_storage(&storage).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("elf").unwrap().location, "Elf.txt");
    }
}

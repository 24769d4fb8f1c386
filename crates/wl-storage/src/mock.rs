//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;

use crate::storage::{Document, Storage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Stores documents and content in memory. Use the builder methods to
/// configure the mock with test data. Documents are listed in the order they
/// were added.
///
/// # Example
///
/// ```
/// use wl_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("Dwarf.txt", "Dwarf", "Short and sturdy.")
///     .with_file("Dwarves.txt", "Dwarves", "#REDIRECT [[Dwarf]]");
///
/// assert_eq!(storage.scan().unwrap().len(), 2);
/// assert_eq!(storage.read("Dwarf.txt").unwrap(), "Short and sturdy.");
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    documents: Vec<Document>,
    contents: HashMap<String, String>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// List a document without content; reading it fails with `NotFound`.
    #[must_use]
    pub fn with_document(mut self, location: impl Into<String>, name: impl Into<String>) -> Self {
        self.documents.push(Document::new(name, location));
        self
    }

    /// Add content for a location without listing it.
    #[must_use]
    pub fn with_content(mut self, location: impl Into<String>, content: impl Into<String>) -> Self {
        self.contents.insert(location.into(), content.into());
        self
    }

    /// List a document and add its content.
    #[must_use]
    pub fn with_file(
        mut self,
        location: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let location = location.into();
        self.contents.insert(location.clone(), content.into());
        self.documents.push(Document::new(name, location));
        self
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        Ok(self.documents.clone())
    }

    fn read(&self, location: &str) -> Result<String, StorageError> {
        self.contents.get(location).cloned().ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound)
                .with_path(location)
                .with_backend("Mock")
        })
    }

    fn exists(&self, location: &str) -> bool {
        self.contents.contains_key(location)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(MockStorage: Send, Sync);

    #[test]
    fn test_new_empty() {
        let storage = MockStorage::new();

        assert!(storage.scan().unwrap().is_empty());
        assert!(!storage.exists("Dwarf.txt"));
    }

    #[test]
    fn test_scan_preserves_insertion_order() {
        let storage = MockStorage::new()
            .with_file("b.txt", "B", "")
            .with_file("a.txt", "A", "");

        let names: Vec<_> = storage.scan().unwrap().into_iter().map(|d| d.name).collect();

        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_document_without_content() {
        let storage = MockStorage::new().with_document("Ghost.txt", "Ghost");

        assert_eq!(storage.scan().unwrap().len(), 1);
        let err = storage.read("Ghost.txt").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_content_without_document() {
        let storage = MockStorage::new().with_content("Hidden.txt", "text");

        assert!(storage.scan().unwrap().is_empty());
        assert!(storage.exists("Hidden.txt"));
        assert_eq!(storage.read("Hidden.txt").unwrap(), "text");
    }
}

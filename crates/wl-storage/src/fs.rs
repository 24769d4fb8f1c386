//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for a flat directory of article files, one file per
//! article, named after the article title.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Document, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Flat directory of article files.
///
/// An article `Your first fortress` in a secondary-language corpus lives in
/// `Your first fortress-CN.txt`; with extension `txt` and suffix `-CN` its
/// display name is recovered by stripping both. Files that do not carry the
/// extension and suffix are ignored, as are hidden files and subdirectories.
///
/// # Example
///
/// ```no_run
/// use wl_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new("wiki_cn").with_suffix("-CN");
/// let docs = storage.scan()?;
/// # Ok::<(), wl_storage::StorageError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FsStorage {
    /// Corpus directory.
    source_dir: PathBuf,
    /// File extension without the dot.
    extension: String,
    /// Suffix between the article name and the extension.
    suffix: String,
}

impl FsStorage {
    /// Create a storage for `.txt` articles in `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            extension: "txt".to_owned(),
            suffix: String::new(),
        }
    }

    /// Set the article file extension (without the dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_owned();
        self
    }

    /// Require and strip a name suffix such as `-CN`.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Corpus directory.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Display name for a file name, if the file belongs to this corpus.
    fn document_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        if file_name.starts_with('.') {
            return None;
        }
        let stem = file_name
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        let name = stem.strip_suffix(self.suffix.as_str())?;
        (!name.trim().is_empty()).then_some(name)
    }

    /// Validate that a location names a file directly inside the corpus.
    ///
    /// Rejects parent directory components (`..`) and absolute paths.
    fn resolve(&self, location: &str) -> Result<PathBuf, StorageError> {
        let path = Path::new(location);
        let valid = !location.is_empty()
            && path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if !valid {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(self.source_dir.join(path))
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        let entries = match fs::read_dir(&self.source_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %self.source_dir.display(), "Corpus directory missing");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StorageError::io(e, &self.source_dir).with_backend(BACKEND));
            }
        };

        let mut documents: Vec<Document> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|e| {
                let file_name = e.file_name().into_string().ok()?;
                let name = self.document_name(&file_name)?.to_owned();
                Some(Document {
                    name,
                    location: file_name,
                })
            })
            .collect();

        // Directory order is arbitrary; sort so duplicate keys resolve the same way every run.
        documents.sort_by(|a, b| a.location.cmp(&b.location));

        tracing::debug!(
            dir = %self.source_dir.display(),
            documents = documents.len(),
            "Scanned corpus"
        );
        Ok(documents)
    }

    fn read(&self, location: &str) -> Result<String, StorageError> {
        let path = self.resolve(location)?;
        fs::read_to_string(&path).map_err(|e| StorageError::io(e, &path).with_backend(BACKEND))
    }

    fn exists(&self, location: &str) -> bool {
        self.resolve(location).is_ok_and(|path| path.is_file())
    }
}

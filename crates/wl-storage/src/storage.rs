//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for listing and reading articles, along
//! with [`StorageError`] for unified error handling across backends.
//!
//! # Locations
//!
//! A document's `location` is an opaque backend key, not a display name:
//! - `FsStorage`: file name relative to the corpus directory (`"Dwarf.txt"`)
//! - `MockStorage`: whatever the test registered
//!
//! Callers get locations from [`Storage::scan`] and hand them back to
//! [`Storage::read`] unchanged.

use std::path::PathBuf;

/// An article of the corpus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Display name (file name without extension or language suffix).
    pub name: String,
    /// Backend key used to read the markup.
    pub location: String,
}

impl Document {
    /// Create a document.
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// What went wrong, independent of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// No document at the location.
    NotFound,
    /// The backend refused access.
    PermissionDenied,
    /// Location escapes the corpus or is otherwise malformed.
    InvalidPath,
    /// Content is not valid UTF-8.
    InvalidData,
    /// Anything else.
    Other,
}

impl StorageErrorKind {
    fn from_io(kind: std::io::ErrorKind) -> Self {
        match kind {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            std::io::ErrorKind::InvalidData => Self::InvalidData,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NotFound => "Not found",
            Self::PermissionDenied => "Permission denied",
            Self::InvalidPath => "Invalid path",
            Self::InvalidData => "Invalid data",
            Self::Other => "Error",
        })
    }
}

/// Storage failure: a [`StorageErrorKind`] plus whatever context the backend had.
///
/// Displays as `[Backend] Kind: source (path: p)`, omitting missing parts.
#[derive(Debug)]
pub struct StorageError {
    /// Error category.
    pub kind: StorageErrorKind,
    /// Path or location involved, if any.
    pub path: Option<PathBuf>,
    /// Backend name (`"Fs"`, `"Mock"`).
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Error of `kind` with no context.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Categorize an I/O error on `path`.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::from_io(err.kind()))
            .with_path(path)
            .with_source(err)
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Check if the document simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

/// Read access to a corpus of articles.
///
/// Implementations must be cheap to share across threads; the index and
/// resolver hold one behind `&dyn Storage`.
pub trait Storage: Send + Sync {
    /// List every document in a stable order.
    ///
    /// The order matters: when two documents normalize to the same index key,
    /// the first one listed wins.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the corpus cannot be listed.
    fn scan(&self) -> Result<Vec<Document>, StorageError>;

    /// Read the raw markup of a document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or can't be read.
    fn read(&self, location: &str) -> Result<String, StorageError>;

    /// Check if a document exists at the given location.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, location: &str) -> bool;
}

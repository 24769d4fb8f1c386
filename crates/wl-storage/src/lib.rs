//! Storage abstraction for wiki article corpora.
//!
//! This crate provides a [`Storage`] trait for listing the articles of a corpus and
//! reading their raw markup, so the index and redirect resolver never touch the
//! filesystem directly.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, and `exists()` methods
//! - [`FsStorage`] for a flat directory of article files (`Dwarf.txt`, `Dwarf-CN.txt`)
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! use wl_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new("wiki").with_extension("txt");
//! for doc in storage.scan()? {
//!     let markup = storage.read(&doc.location)?;
//!     println!("{}: {} bytes", doc.name, markup.len());
//! }
//! # Ok::<(), wl_storage::StorageError>(())
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Document, Storage, StorageError, StorageErrorKind};

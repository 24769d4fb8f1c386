//! Title index, redirect resolution and fuzzy query matching for wiki corpora.
//!
//! # Architecture
//!
//! - [`normalize_key`] reduces titles to ASCII-alphanumeric lowercase keys
//! - [`EntryIndex`] maps keys to [`Entry`] values, first registration wins
//! - [`Resolver`] follows `#REDIRECT [[Target]]` chains with a hop bound
//! - [`match_query`] turns OCR or typed text into candidate entries
//! - [`Lookup`] combines all of the above over a primary and an optional
//!   secondary-language [`Corpus`]
//!
//! Documents are read through [`wl_storage::Storage`], so everything here is
//! testable against `MockStorage`.
//!
//! # Example
//!
//! ```
//! use wl_index::{Corpus, Lookup};
//! use wl_storage::MockStorage;
//!
//! let storage = MockStorage::new()
//!     .with_file("Dwarf.txt", "Dwarf", "Short and sturdy.")
//!     .with_file("Dwarves.txt", "Dwarves", "#REDIRECT [[Dwarf]]");
//! let lookup = Lookup::new(Corpus::load(Box::new(storage))?);
//!
//! let entries = lookup.entries("dwarves");
//! assert_eq!(entries[0].name, "Dwarf");
//! assert_eq!(entries[0].content, "Short and sturdy.");
//! # Ok::<(), wl_storage::StorageError>(())
//! ```

mod index;
mod key;
mod lookup;
mod matcher;
mod redirect;

pub use index::{Entry, EntryIndex};
pub use key::normalize_key;
pub use lookup::{Corpus, Lookup, LookupEntry};
pub use matcher::match_query;
pub use redirect::{DEFAULT_MAX_HOPS, RedirectOutcome, Resolution, Resolver, parse_redirect};

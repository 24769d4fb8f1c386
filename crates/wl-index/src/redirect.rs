//! Redirect following.
//!
//! An article whose markup starts with `#REDIRECT [[Target]]` stands in for
//! another article. [`Resolver`] follows such chains through the index with a
//! hop bound, stopping at cycles and at targets the corpus does not contain.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use wl_storage::{Storage, StorageError};

use crate::index::EntryIndex;
use crate::key::normalize_key;

/// Hop bound used when the caller has no preference.
pub const DEFAULT_MAX_HOPS: usize = 10;

static REDIRECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#redirect\s*\[\[(.+?)\]\]").unwrap());

/// Target title of a redirect article, if `content` is one.
///
/// # Example
///
/// ```
/// use wl_index::parse_redirect;
///
/// assert_eq!(parse_redirect("#REDIRECT [[Dwarf]]"), Some("Dwarf"));
/// assert_eq!(parse_redirect("#redirect[[Pick|x]]\nextra"), Some("Pick|x"));
/// assert_eq!(parse_redirect("Dwarves dig. #REDIRECT [[Dwarf]]"), None);
/// ```
#[must_use]
pub fn parse_redirect(content: &str) -> Option<&str> {
    REDIRECT_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// How a resolution ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// The starting document is not a redirect.
    Direct,
    /// Redirects were followed to a non-redirect document.
    Followed {
        /// Number of redirects followed.
        hops: usize,
    },
    /// A redirect pointed at a title the index does not contain.
    MissingTarget {
        /// Raw target title.
        target: String,
    },
    /// A redirect pointed back at a title already followed.
    Cycle {
        /// Raw target title.
        target: String,
    },
    /// The hop bound was reached while the chain continued.
    HopLimit,
}

impl std::fmt::Display for RedirectOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Followed { hops: 1 } => write!(f, "followed 1 redirect"),
            Self::Followed { hops } => write!(f, "followed {hops} redirects"),
            Self::MissingTarget { target } => write!(f, "missing redirect target {target:?}"),
            Self::Cycle { target } => write!(f, "redirect cycle at {target:?}"),
            Self::HopLimit => write!(f, "redirect hop limit reached"),
        }
    }
}

/// Result of following redirects from a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Title to display instead of the starting document's own name.
    ///
    /// `None` for [`RedirectOutcome::Direct`]. The final document's name for
    /// `Followed` and `HopLimit`, the unresolved raw target for
    /// `MissingTarget` and `Cycle`.
    pub name: Option<String>,
    /// Markup of the last document read.
    pub content: String,
    /// How the chain ended.
    pub outcome: RedirectOutcome,
}

impl Resolution {
    /// Resolved display name, or `fallback` when the start was not a redirect.
    #[must_use]
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}

/// Follows redirect chains through an index, reading markup from storage.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a EntryIndex,
    storage: &'a dyn Storage,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over `index`, whose locations `storage` can read.
    #[must_use]
    pub fn new(index: &'a EntryIndex, storage: &'a dyn Storage) -> Self {
        Self { index, storage }
    }

    /// Read the document at `location`, following at most `max_hops` redirects.
    ///
    /// Never loops: every target is checked against the keys already
    /// followed, and the hop bound caps the chain length. Only storage
    /// failures are errors.
    pub fn resolve(&self, location: &str, max_hops: usize) -> Result<Resolution, StorageError> {
        let mut content = self.storage.read(location)?;
        let mut current_name: Option<String> = None;
        let mut visited: HashSet<String> = HashSet::new();
        let mut hops = 0;

        let outcome = loop {
            let Some(target) = parse_redirect(&content) else {
                break if hops == 0 {
                    RedirectOutcome::Direct
                } else {
                    RedirectOutcome::Followed { hops }
                };
            };

            let key = normalize_key(target);
            if visited.contains(&key) {
                let target = target.to_owned();
                current_name = Some(target.clone());
                break RedirectOutcome::Cycle { target };
            }
            let Some(entry) = self.index.get(&key) else {
                let target = target.to_owned();
                current_name = Some(target.clone());
                break RedirectOutcome::MissingTarget { target };
            };
            if hops == max_hops {
                break RedirectOutcome::HopLimit;
            }

            tracing::debug!(from = location, to = %entry.name, hop = hops + 1, "Following redirect");
            visited.insert(key);
            content = self.storage.read(&entry.location)?;
            current_name = Some(entry.name.clone());
            hops += 1;
        };

        match &outcome {
            RedirectOutcome::MissingTarget { target } => {
                tracing::debug!(from = location, %target, "Redirect target not indexed");
            }
            RedirectOutcome::Cycle { target } => {
                tracing::warn!(from = location, %target, "Redirect cycle");
            }
            RedirectOutcome::HopLimit => {
                tracing::warn!(from = location, max_hops, "Redirect hop limit reached");
            }
            RedirectOutcome::Direct | RedirectOutcome::Followed { .. } => {}
        }

        Ok(Resolution {
            name: current_name,
            content,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wl_storage::{MockStorage, StorageErrorKind};

    use super::*;

    fn setup(files: &[(&str, &str)]) -> (EntryIndex, MockStorage) {
        let storage = files.iter().fold(MockStorage::new(), |storage, (name, content)| {
            storage.with_file(format!("{name}.txt"), *name, *content)
        });
        let index = EntryIndex::from_storage(&storage).unwrap();
        (index, storage)
    }

    #[test]
    fn test_parse_redirect_case_and_spacing() {
        assert_eq!(parse_redirect("#Redirect   [[Axe]]"), Some("Axe"));
        assert_eq!(parse_redirect("#redirect\n[[Axe]]"), Some("Axe"));
        assert_eq!(parse_redirect(" #REDIRECT [[Axe]]"), None);
        assert_eq!(parse_redirect("#REDIRECT [[]]"), None);
    }

    #[test]
    fn test_direct_document() {
        let (index, storage) = setup(&[("Dwarf", "Short and sturdy.")]);
        let resolution = Resolver::new(&index, &storage).resolve("Dwarf.txt", 10).unwrap();

        assert_eq!(resolution.outcome, RedirectOutcome::Direct);
        assert_eq!(resolution.name, None);
        assert_eq!(resolution.content, "Short and sturdy.");
        assert_eq!(resolution.display_name("Dwarf"), "Dwarf");
    }

    #[test]
    fn test_follows_chain() {
        let (index, storage) = setup(&[
            ("Dwarves", "#REDIRECT [[Dwarven]]"),
            ("Dwarven", "#redirect [[dwarf]]"),
            ("Dwarf", "Short and sturdy."),
        ]);
        let resolution = Resolver::new(&index, &storage).resolve("Dwarves.txt", 10).unwrap();

        assert_eq!(resolution.outcome, RedirectOutcome::Followed { hops: 2 });
        assert_eq!(resolution.name.as_deref(), Some("Dwarf"));
        assert_eq!(resolution.content, "Short and sturdy.");
    }

    #[test]
    fn test_missing_target() {
        let (index, storage) = setup(&[("Elves", "#REDIRECT [[Elf (race)]]")]);
        let resolution = Resolver::new(&index, &storage).resolve("Elves.txt", 10).unwrap();

        assert_eq!(
            resolution.outcome,
            RedirectOutcome::MissingTarget {
                target: "Elf (race)".to_owned()
            }
        );
        assert_eq!(resolution.name.as_deref(), Some("Elf (race)"));
        assert_eq!(resolution.content, "#REDIRECT [[Elf (race)]]");
    }

    #[test]
    fn test_cycle_terminates() {
        let (index, storage) = setup(&[("A", "#REDIRECT [[B]]"), ("B", "#REDIRECT [[A]]")]);
        let resolution = Resolver::new(&index, &storage).resolve("A.txt", 10).unwrap();

        // A -> B -> A (hop 2), then B is already visited.
        assert_eq!(
            resolution.outcome,
            RedirectOutcome::Cycle {
                target: "B".to_owned()
            }
        );
        assert_eq!(resolution.content, "#REDIRECT [[B]]");
    }

    #[test]
    fn test_self_redirect_terminates() {
        let (index, storage) = setup(&[("Loop", "#REDIRECT [[Loop]]")]);
        let resolution = Resolver::new(&index, &storage).resolve("Loop.txt", 10).unwrap();

        assert!(matches!(resolution.outcome, RedirectOutcome::Cycle { .. }));
    }

    #[test]
    fn test_hop_limit() {
        let (index, storage) = setup(&[
            ("A", "#REDIRECT [[B]]"),
            ("B", "#REDIRECT [[C]]"),
            ("C", "#REDIRECT [[D]]"),
            ("D", "end"),
        ]);
        let resolution = Resolver::new(&index, &storage).resolve("A.txt", 2).unwrap();

        assert_eq!(resolution.outcome, RedirectOutcome::HopLimit);
        assert_eq!(resolution.name.as_deref(), Some("C"));
        assert_eq!(resolution.content, "#REDIRECT [[D]]");
    }

    #[test]
    fn test_zero_hops_reads_start_only() {
        let (index, storage) = setup(&[("A", "#REDIRECT [[B]]"), ("B", "end")]);
        let resolution = Resolver::new(&index, &storage).resolve("A.txt", 0).unwrap();

        assert_eq!(resolution.outcome, RedirectOutcome::HopLimit);
        assert_eq!(resolution.name, None);
        assert_eq!(resolution.content, "#REDIRECT [[B]]");
    }

    #[test]
    fn test_storage_error_propagates() {
        let storage = MockStorage::new()
            .with_file("A.txt", "A", "#REDIRECT [[B]]")
            .with_document("B.txt", "B");
        let index = EntryIndex::from_storage(&storage).unwrap();

        let err = Resolver::new(&index, &storage).resolve("A.txt", 10).unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(RedirectOutcome::Followed { hops: 1 }.to_string(), "followed 1 redirect");
        assert_eq!(RedirectOutcome::Followed { hops: 3 }.to_string(), "followed 3 redirects");
        assert_eq!(
            RedirectOutcome::Cycle { target: "Dwarf".to_owned() }.to_string(),
            "redirect cycle at \"Dwarf\""
        );
    }
}

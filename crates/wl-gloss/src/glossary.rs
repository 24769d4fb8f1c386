//! Term glossaries and the translation map file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Glossary loading error.
#[derive(Debug, thiserror::Error)]
pub enum GlossError {
    /// I/O error reading the translation map.
    #[error("Failed to read translation map {}: {source}", path.display())]
    Io {
        /// Translation map path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed translation map.
    #[error("Invalid translation map: {0}")]
    Parse(#[from] serde_json::Error),
    /// A term could not be compiled into a pattern.
    #[error("Invalid glossary term {term:?}: {source}")]
    Pattern {
        /// Offending source term.
        term: String,
        /// Underlying error.
        #[source]
        source: regex::Error,
    },
}

/// One glossary entry with its precompiled whole-word pattern.
#[derive(Clone, Debug)]
pub(crate) struct Term {
    pub(crate) source: String,
    pub(crate) replacement: String,
    pub(crate) pattern: Regex,
}

/// Source term → replacement, matched case-insensitively on word boundaries.
///
/// Terms are kept longest first (by character count, ties broken by the term
/// itself), which is the order translation applies them in. Empty terms are
/// dropped.
///
/// # Example
///
/// ```
/// use wl_gloss::Glossary;
///
/// let glossary = Glossary::new([("dwarf", "矮人"), ("dwarven fortress", "矮人要塞")])?;
/// let order: Vec<_> = glossary.iter().map(|(source, _)| source).collect();
///
/// assert_eq!(order, vec!["dwarven fortress", "dwarf"]);
/// # Ok::<(), wl_gloss::GlossError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Glossary {
    terms: Vec<Term>,
}

impl Glossary {
    /// Compile a glossary from `(source, replacement)` pairs.
    pub fn new<S, R>(pairs: impl IntoIterator<Item = (S, R)>) -> Result<Self, GlossError>
    where
        S: Into<String>,
        R: Into<String>,
    {
        let mut terms = Vec::new();
        for (source, replacement) in pairs {
            let source: String = source.into();
            if source.trim().is_empty() {
                tracing::debug!("Skipping empty glossary term");
                continue;
            }
            let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&source)))
                .map_err(|e| GlossError::Pattern {
                    term: source.clone(),
                    source: e,
                })?;
            terms.push(Term {
                source,
                replacement: replacement.into(),
                pattern,
            });
        }

        terms.sort_by(|a, b| {
            b.source
                .chars()
                .count()
                .cmp(&a.source.chars().count())
                .then_with(|| a.source.cmp(&b.source))
        });

        Ok(Self { terms })
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the glossary has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over `(source, replacement)` pairs, longest source first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms
            .iter()
            .map(|t| (t.source.as_str(), t.replacement.as_str()))
    }

    pub(crate) fn terms(&self) -> &[Term] {
        &self.terms
    }
}

/// Contents of `translation_map.json`.
///
/// ```json
/// {
///   "title_map": { "Dwarf": "矮人" },
///   "vocabulary_map": { "pick": "镐" }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationMap {
    /// Article title → translated title.
    #[serde(default)]
    pub title_map: BTreeMap<String, String>,
    /// Term → translation, used to build the [`Glossary`].
    #[serde(default)]
    pub vocabulary_map: BTreeMap<String, String>,
}

impl TranslationMap {
    /// Load a translation map. A missing file yields an empty map.
    pub fn load(path: &Path) -> Result<Self, GlossError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No translation map");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(GlossError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let map = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            titles = map.title_map.len(),
            terms = map.vocabulary_map.len(),
            "Loaded translation map"
        );
        Ok(map)
    }

    /// Parse a translation map from JSON.
    pub fn from_json(json: &str) -> Result<Self, GlossError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Translated title, or `name` itself when the map has none.
    #[must_use]
    pub fn translate_title<'a>(&'a self, name: &'a str) -> &'a str {
        self.title_map.get(name).map_or(name, String::as_str)
    }

    /// Compile the vocabulary into a [`Glossary`].
    pub fn glossary(&self) -> Result<Glossary, GlossError> {
        Glossary::new(
            self.vocabulary_map
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(Glossary: Send, Sync);

    #[test]
    fn test_order_longest_first_then_alphabetical() {
        let glossary = Glossary::new([("ab", "1"), ("abc", "2"), ("aa", "3")]).unwrap();
        let order: Vec<_> = glossary.iter().map(|(s, _)| s).collect();

        assert_eq!(order, vec!["abc", "aa", "ab"]);
    }

    #[test]
    fn test_order_counts_characters_not_bytes() {
        let glossary = Glossary::new([("éé", "1"), ("abc", "2")]).unwrap();
        let order: Vec<_> = glossary.iter().map(|(s, _)| s).collect();

        assert_eq!(order, vec!["abc", "éé"]);
    }

    #[test]
    fn test_empty_terms_dropped() {
        let glossary = Glossary::new([("", "x"), ("  ", "y"), ("axe", "斧")]).unwrap();

        assert_eq!(glossary.len(), 1);
    }

    #[test]
    fn test_regex_metacharacters_escaped() {
        let glossary = Glossary::new([("c++", "x")]).unwrap();

        assert_eq!(glossary.len(), 1);
    }

    #[test]
    fn test_translation_map_from_json() {
        let map = TranslationMap::from_json(
            r#"{"title_map": {"Dwarf": "矮人"}, "vocabulary_map": {"pick": "镐"}}"#,
        )
        .unwrap();

        assert_eq!(map.translate_title("Dwarf"), "矮人");
        assert_eq!(map.translate_title("Elf"), "Elf");
        assert_eq!(map.glossary().unwrap().len(), 1);
    }

    #[test]
    fn test_translation_map_missing_sections() {
        let map = TranslationMap::from_json("{}").unwrap();

        assert_eq!(map, TranslationMap::default());
    }

    #[test]
    fn test_translation_map_malformed() {
        let err = TranslationMap::from_json("{not json").unwrap_err();

        assert!(matches!(err, GlossError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();

        let map = TranslationMap::load(&temp_dir.path().join("translation_map.json")).unwrap();

        assert!(map.vocabulary_map.is_empty());
    }

    #[test]
    fn test_load_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("translation_map.json");
        std::fs::write(&path, r#"{"vocabulary_map": {"axe": "斧"}}"#).unwrap();

        let map = TranslationMap::load(&path).unwrap();

        assert_eq!(map.vocabulary_map.get("axe").map(String::as_str), Some("斧"));
    }
}

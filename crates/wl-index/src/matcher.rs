//! Free-text query matching against the index.
//!
//! Query text is usually OCR output: several lines, stray punctuation, words
//! glued together or cut short. Every line and every word is tried as a
//! candidate title, first exactly and then as a fragment of longer titles.

use std::collections::HashSet;

use crate::index::{Entry, EntryIndex};
use crate::key::normalize_key;

/// Candidates shorter than this (after normalization) are ignored.
const MIN_CANDIDATE_LEN: usize = 2;

/// Candidates at least this long also match titles that contain them.
const MIN_FRAGMENT_LEN: usize = 3;

/// Entries matching `text`, deduplicated, in discovery order.
///
/// Candidates are each trimmed non-empty line, then each whitespace-separated
/// word, each cut at its first `.` (`Yourfirstfortress.txt` becomes
/// `Yourfirstfortress`). A candidate matches the entry with the same key, and,
/// if long enough, every entry whose key starts with or contains it.
///
/// Fragment matching scans the whole index for each long candidate.
///
/// # Example
///
/// ```
/// use wl_index::{EntryIndex, match_query};
/// use wl_storage::Document;
///
/// let index = EntryIndex::build([Document::new("Your first fortress", "Your first fortress.txt")]);
/// let matches = match_query("Yourfirstfortress.txt", &index);
///
/// assert_eq!(matches[0].name, "Your first fortress");
/// ```
#[must_use]
pub fn match_query<'a>(text: &str, index: &'a EntryIndex) -> Vec<&'a Entry> {
    let lines = text.trim().lines().map(str::trim).filter(|line| !line.is_empty());
    let words = text.split_whitespace();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut matches = Vec::new();

    for candidate in lines.chain(words) {
        let candidate = candidate.split_once('.').map_or(candidate, |(head, _)| head);
        let normalized = normalize_key(candidate);
        if normalized.len() < MIN_CANDIDATE_LEN {
            continue;
        }

        if let Some((key, entry)) = index.get_key_value(&normalized)
            && seen.insert(key)
        {
            matches.push(entry);
        }

        if normalized.len() >= MIN_FRAGMENT_LEN {
            // A key that starts with the candidate also contains it.
            for (key, entry) in index.iter() {
                if key.contains(normalized.as_str()) && seen.insert(key) {
                    matches.push(entry);
                }
            }
        }
    }

    tracing::debug!(matches = matches.len(), "Matched query");
    matches
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wl_storage::Document;

    use super::*;

    fn index(names: &[&str]) -> EntryIndex {
        EntryIndex::build(names.iter().map(|name| Document::new(*name, format!("{name}.txt"))))
    }

    fn names<'a>(matches: &[&'a Entry]) -> Vec<&'a str> {
        matches.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_dot_truncation() {
        let index = index(&["Your first fortress", "Dwarf"]);

        let matches = match_query("Yourfirstfortress.txt", &index);

        assert_eq!(names(&matches), vec!["Your first fortress"]);
    }

    #[test]
    fn test_exact_match_from_line() {
        let index = index(&["Dwarf", "Dwarven ale"]);

        let matches = match_query("  Dwarven Ale  \n", &index);

        assert_eq!(names(&matches), vec!["Dwarven ale"]);
    }

    #[test]
    fn test_words_match_individually() {
        let index = index(&["Pick", "Axe", "Anvil"]);

        let matches = match_query("A pick and an axe", &index);

        assert_eq!(names(&matches), vec!["Pick", "Axe"]);
    }

    #[test]
    fn test_prefix_and_contained_fragments() {
        let index = index(&["Dwarf", "Dwarven ale", "Hidden fun stuff", "Dwarf fortress"]);

        let matches = match_query("dwar", &index);

        assert_eq!(names(&matches), vec!["Dwarf", "Dwarven ale", "Dwarf fortress"]);
    }

    #[test]
    fn test_short_candidates_ignored() {
        let index = index(&["Ax", "Axe"]);

        assert!(match_query("a", &index).is_empty());
        // Two characters: exact match only, no fragment scan.
        assert_eq!(names(&match_query("ax", &index)), vec!["Ax"]);
    }

    #[test]
    fn test_results_deduplicated() {
        let index = index(&["Pick"]);

        let matches = match_query("Pick\npick PICK pick.", &index);

        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_discovery_order_lines_before_words() {
        let index = index(&["Stone", "Mason", "Stonemason"]);

        // The line "stone mason" normalizes to "stonemason": exact hit first.
        let matches = match_query("stone mason", &index);

        assert_eq!(names(&matches), vec!["Stonemason", "Stone", "Mason"]);
    }

    #[test]
    fn test_empty_inputs() {
        let empty = EntryIndex::default();
        assert!(match_query("Dwarf", &empty).is_empty());

        let index = index(&["Dwarf"]);
        assert!(match_query("", &index).is_empty());
        assert!(match_query("   \n\t", &index).is_empty());
    }
}

//! Plain-text helpers for whole-sentence translation.
//!
//! The translation service itself lives outside this crate. These are the
//! steps around it: decide whether a query is a sentence at all, pin game
//! terms before sending it, and tidy what comes back.

use std::sync::LazyLock;

use regex::Regex;

use crate::glossary::Glossary;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-zA-Z]+\b").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static UNIT_NOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*单位[^)]*\)").unwrap());

/// Check if `text` has more than one latin word.
#[must_use]
pub fn should_translate(text: &str) -> bool {
    WORD_RE.find_iter(text).nth(1).is_some()
}

/// Substitute glossary terms in plain text.
///
/// Longer terms claim their spans first; a shorter term matching inside or
/// across a claimed span is skipped.
///
/// ```
/// use wl_gloss::{Glossary, replace_terms};
///
/// let glossary = Glossary::new([("dwarf", "矮人"), ("miner", "矿工")])?;
///
/// assert_eq!(replace_terms("The dwarf miner", &glossary), "The 矮人 矿工");
/// # Ok::<(), wl_gloss::GlossError>(())
/// ```
#[must_use]
pub fn replace_terms(text: &str, glossary: &Glossary) -> String {
    let mut claimed: Vec<(usize, usize, &str)> = Vec::new();
    for term in glossary.terms() {
        for m in term.pattern.find_iter(text) {
            let overlaps = claimed
                .iter()
                .any(|&(start, end, _)| m.start() < end && start < m.end());
            if !overlaps {
                claimed.push((m.start(), m.end(), term.replacement.as_str()));
            }
        }
    }
    claimed.sort_unstable_by_key(|&(start, _, _)| start);

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, end, replacement) in claimed {
        out.push_str(&text[last..start]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

/// Collapse whitespace and drop `(...单位...)` unit notes from translated text.
#[must_use]
pub fn clean_translation(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text, " ");
    UNIT_NOTE_RE.replace_all(&collapsed, "").trim().to_owned()
}

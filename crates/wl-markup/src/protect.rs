//! Reversible placeholder substitution.
//!
//! Rendering is a chain of text passes that know nothing about each other. A pass
//! that must not see some region (an HTML tag, a code span, an already rendered
//! link) gets that region swapped for an opaque marker first, and the marker is
//! swapped back once the dangerous passes have run.
//!
//! # Marker format
//!
//! ```text
//! U+E000  scope  digits...  U+E001
//! ```
//!
//! Every marker character comes from the private-use range `U+E000..=U+E1FF`:
//! markers contain no ASCII, no word characters and no whitespace, so no
//! markup pass, emphasis rule or `\b` boundary can fire inside one. Input is run
//! through [`sanitize`] before protection so that range is reserved for markers.
//!
//! The scope character lets several tables coexist in one call without their
//! counters colliding.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';
const DIGIT_BASE: u32 = 0xE010;
const SCOPE_BASE: u32 = 0xE100;
const RESERVED_START: char = '\u{E000}';
const RESERVED_END: char = '\u{E1FF}';

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x{E000}[\x{E100}-\x{E1FF}][\x{E010}-\x{E019}]+\x{E001}").unwrap()
});

/// Check whether a character belongs to the reserved marker range.
fn is_reserved(c: char) -> bool {
    (RESERVED_START..=RESERVED_END).contains(&c)
}

/// Private-use code point at `offset`. The range is always valid.
fn pua(offset: u32) -> char {
    char::from_u32(offset).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Strip reserved marker characters from untrusted input.
///
/// Returns the input unchanged (borrowed) in the common case where it contains
/// none.
///
/// # Example
///
/// ```
/// use wl_markup::sanitize;
///
/// assert_eq!(sanitize("plain"), "plain");
/// assert_eq!(sanitize("a\u{E000}b"), "ab");
/// ```
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_reserved) {
        Cow::Owned(text.chars().filter(|c| !is_reserved(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Check whether text still contains any placeholder marker.
pub fn has_markers(text: &str) -> bool {
    MARKER_RE.is_match(text)
}

/// Marker → original substring map for a single render or translate call.
///
/// Markers are never reused within a table: the counter only grows, even
/// across [`restore`](Self::restore) calls.
///
/// # Example
///
/// ```
/// use regex::Regex;
/// use wl_markup::PlaceholderTable;
///
/// let tag = Regex::new(r"<[^>]+>").unwrap();
/// let mut table = PlaceholderTable::new();
///
/// let shielded = table.protect("<b>x</b> & y", &tag);
/// assert!(!shielded.contains('<'));
///
/// let escaped = shielded.replace('&', "&amp;");
/// assert_eq!(table.restore(&escaped), "<b>x</b> &amp; y");
/// ```
#[derive(Debug, Default)]
pub struct PlaceholderTable {
    scope: u8,
    next_id: usize,
    entries: HashMap<String, String>,
}

impl PlaceholderTable {
    /// Create an empty table in the default scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table whose markers cannot collide with other scopes.
    #[must_use]
    pub fn with_scope(scope: u8) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    /// Number of markers awaiting restoration.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no markers are awaiting restoration.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register `original` and return the fresh marker standing in for it.
    pub fn insert(&mut self, original: impl Into<String>) -> String {
        let marker = self.marker(self.next_id);
        self.next_id += 1;
        self.entries.insert(marker.clone(), original.into());
        marker
    }

    /// Replace every match of `pattern` with a marker for the matched text.
    pub fn protect(&mut self, text: &str, pattern: &Regex) -> String {
        self.protect_with(text, pattern, |caps| caps[0].to_owned())
    }

    /// Replace every match of `pattern` with a marker for `build(caps)`.
    ///
    /// Used when the protected region is generated from the match, e.g. an
    /// `<img>` tag built from a file directive.
    pub fn protect_with<F>(&mut self, text: &str, pattern: &Regex, mut build: F) -> String
    where
        F: FnMut(&Captures<'_>) -> String,
    {
        pattern
            .replace_all(text, |caps: &Captures<'_>| {
                let original = build(caps);
                self.insert(original)
            })
            .into_owned()
    }

    /// Swap every marker of this table back to its original text.
    ///
    /// Each entry is restored exactly once and then forgotten. Originals that
    /// themselves contain markers (nested protection) are expanded in further
    /// rounds. Markers belonging to other scopes are left alone.
    pub fn restore(&mut self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_owned();
        }

        let mut current = text.to_owned();
        loop {
            let mut nested = false;
            let entries = &mut self.entries;
            let replaced = MARKER_RE
                .replace_all(&current, |caps: &Captures<'_>| {
                    match entries.remove(&caps[0]) {
                        Some(original) => {
                            nested |= original.contains(OPEN);
                            original
                        }
                        None => caps[0].to_owned(),
                    }
                })
                .into_owned();
            current = replaced;

            if !nested || self.entries.is_empty() {
                break;
            }
        }

        if !self.entries.is_empty() {
            tracing::debug!(
                dropped = self.entries.len(),
                "Placeholders vanished before restoration"
            );
            self.entries.clear();
        }

        let own_scope = self.scope_char();
        if MARKER_RE
            .find_iter(&current)
            .any(|m| m.as_str().chars().nth(1) == Some(own_scope))
        {
            tracing::warn!(scope = self.scope, "Unresolved placeholder left in output");
        }

        current
    }

    fn scope_char(&self) -> char {
        pua(SCOPE_BASE + u32::from(self.scope))
    }

    fn marker(&self, id: usize) -> String {
        let digits = id.to_string();
        let mut out = String::with_capacity((digits.len() + 3) * 3);
        out.push(OPEN);
        out.push(self.scope_char());
        for d in digits.bytes() {
            out.push(pua(DIGIT_BASE + u32::from(d - b'0')));
        }
        out.push(CLOSE);
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tag_re() -> Regex {
        Regex::new(r"<[^>]+>").unwrap()
    }

    #[test]
    fn test_protect_then_restore_is_identity() {
        let mut table = PlaceholderTable::new();
        let input = r#"<span style="color:green">ok</span> and <b>bold</b>"#;
        let protected = table.protect(input, &tag_re());

        assert!(!protected.contains('<'));
        assert_eq!(table.len(), 4);
        assert_eq!(table.restore(&protected), input);
        assert!(table.is_empty());
    }

    #[test]
    fn test_markers_are_unique_across_calls() {
        let mut table = PlaceholderTable::new();
        let first = table.insert("a");
        table.restore(&first);
        let second = table.insert("a");
        assert_ne!(first, second);
    }

    #[test]
    fn test_markers_contain_no_ascii() {
        let mut table = PlaceholderTable::new();
        let marker = table.insert("<hr>");
        assert!(marker.chars().all(|c| !c.is_ascii()));
        assert!(marker.chars().all(|c| !c.is_alphanumeric()));
        assert!(has_markers(&marker));
    }

    #[test]
    fn test_restore_nested_markers() {
        let mut table = PlaceholderTable::new();
        let inner = table.insert("<i>x</i>");
        let outer = table.insert(format!("<b>{inner}</b>"));
        assert_eq!(table.restore(&format!("[{outer}]")), "[<b><i>x</i></b>]");
    }

    #[test]
    fn test_scopes_do_not_interfere() {
        let mut tags = PlaceholderTable::new();
        let mut code = PlaceholderTable::with_scope(1);
        let a = tags.insert("A");
        let b = code.insert("B");
        assert_ne!(a, b);

        let text = format!("{a}{b}");
        let after_tags = tags.restore(&text);
        assert!(after_tags.starts_with('A'));
        assert!(has_markers(&after_tags));
        assert_eq!(code.restore(&after_tags), "AB");
    }

    #[test]
    fn test_protect_with_builds_replacement() {
        let mut table = PlaceholderTable::new();
        let re = Regex::new(r"\{(\w+)\}").unwrap();
        let out = table.protect_with("x {y} z", &re, |caps| format!("<{}>", &caps[1]));
        assert_eq!(table.restore(&out), "x <y> z");
    }

    #[test]
    fn test_restore_empty_table_is_noop() {
        let mut table = PlaceholderTable::new();
        assert_eq!(table.restore("unchanged"), "unchanged");
    }

    #[test]
    fn test_restore_forgets_missing_markers() {
        let mut table = PlaceholderTable::new();
        let _lost = table.insert("gone");
        assert_eq!(table.restore("nothing here"), "nothing here");
        assert!(table.is_empty());
    }

    #[test]
    fn test_sanitize_strips_reserved_range() {
        assert_eq!(sanitize("a\u{E000}b\u{E1FF}c\u{E200}"), "abc\u{E200}");
        assert!(matches!(sanitize("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_large_counter_round_trips() {
        let mut table = PlaceholderTable::new();
        let mut text = String::new();
        for i in 0..120 {
            text.push_str(&table.insert(i.to_string()));
        }
        let expected: String = (0..120).map(|i| i.to_string()).collect();
        assert_eq!(table.restore(&text), expected);
    }
}

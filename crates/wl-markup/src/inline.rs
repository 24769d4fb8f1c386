//! Code spans, headings and emphasis.
//!
//! These passes run on escaped text. Headings run while generated markup is still
//! visible, so the `=heading=` form needs an explicit boundary rule. Emphasis runs
//! only after every tag has been shielded.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::protect::PlaceholderTable;
use crate::style;

static FENCED_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());

static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"==(.+?)==").unwrap());

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());

/// `*italic*` whose content neither starts nor ends with whitespace.
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").unwrap());

/// Convert fenced blocks, then inline spans, into code elements.
///
/// The generated elements go into `table` whole, content included, so no later
/// pass (emphasis, lists, line breaks) can reach inside them.
pub(crate) fn code(text: &str, table: &mut PlaceholderTable) -> String {
    let fenced = table.protect_with(text, &FENCED_CODE_RE, |caps| {
        let body = caps[1].replace("<br>", "\n");
        format!(
            "<pre style='{}'><code>{body}</code></pre>",
            style::PRE
        )
    });
    table.protect_with(&fenced, &INLINE_CODE_RE, |caps| {
        format!("<code style='{}'>{}</code>", style::CODE, &caps[1])
    })
}

/// Convert `==title==` to `<h2>` and bounded `=title=` to `<h3>`.
pub(crate) fn headings(text: &str) -> String {
    let h2 = H2_RE.replace_all(text, |caps: &Captures<'_>| {
        format!(r#"<h2 style="{}">{}</h2>"#, style::HEADING, &caps[1])
    });
    bounded_h3(&h2)
}

/// `=title=` preceded by whitespace (or the start) and followed by whitespace
/// (or the end).
///
/// The boundary keeps `key=value=` fragments and generated attributes such as
/// `style="..."` from being read as headings. The title is the shortest run of
/// at least one non-newline character that satisfies the closing boundary.
fn bounded_h3(text: &str) -> String {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < chars.len() {
        let (start, c) = chars[i];
        let opens = c == '=' && (i == 0 || chars[i - 1].1.is_whitespace());
        if let Some(close) = opens.then(|| find_h3_close(&chars, i)).flatten() {
            let title = &text[chars[i + 1].0..chars[close].0];
            out.push_str(&text[copied..start]);
            let _ = write!(out, r#"<h3 style="{}">{title}</h3>"#, style::HEADING);
            copied = chars[close].0 + 1;
            i = close + 1;
        } else {
            i += 1;
        }
    }

    out.push_str(&text[copied..]);
    out
}

fn find_h3_close(chars: &[(usize, char)], open: usize) -> Option<usize> {
    for j in open + 2..chars.len() {
        if chars[j - 1].1 == '\n' {
            return None;
        }
        let closes = chars[j].1 == '='
            && chars.get(j + 1).is_none_or(|(_, next)| next.is_whitespace());
        if closes {
            return Some(j);
        }
    }
    None
}

/// Markdown emphasis: `**bold**`, then `*italic*`, then `_italic_`.
///
/// Longest delimiter first, so `**a**` never becomes nested italics.
pub(crate) fn emphasis(text: &str) -> String {
    let bold = BOLD_RE.replace_all(text, "<b>$1</b>");
    let italic = ITALIC_RE.replace_all(&bold, "<i>$1</i>");
    underscore_italic(&italic)
}

/// `_italic_` only when neither underscore touches an ASCII letter or digit,
/// which leaves identifiers like `LAND_HOLDER` or `snake_case_name` alone.
fn underscore_italic(text: &str) -> String {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < chars.len() {
        if chars[i].1 != '_' || (i > 0 && chars[i - 1].1.is_ascii_alphanumeric()) {
            i += 1;
            continue;
        }
        // Content cannot contain '_', so the next underscore is the only candidate.
        let Some(close) = (i + 1..chars.len()).find(|&j| chars[j].1 == '_') else {
            break;
        };
        let content = &chars[i + 1..close];
        let valid = content
            .first()
            .zip(content.last())
            .is_some_and(|((_, first), (_, last))| !first.is_whitespace() && !last.is_whitespace())
            && chars
                .get(close + 1)
                .is_none_or(|(_, next)| !next.is_ascii_alphanumeric());

        if valid {
            out.push_str(&text[copied..chars[i].0]);
            out.push_str("<i>");
            out.push_str(&text[chars[i + 1].0..chars[close].0]);
            out.push_str("</i>");
            copied = chars[close].0 + 1;
            i = close + 1;
        } else {
            i = close;
        }
    }

    out.push_str(&text[copied..]);
    out
}

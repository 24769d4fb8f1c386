//! Line-oriented block passes: rules, quotes, lists and line breaks.
//!
//! These run last, on text whose newlines are still real newlines.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::style;

static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:-{3,}|\*{3,})[ \t]*$|<hr>").unwrap());

/// `> quote`, after escaping turned `>` into `&gt;`.
static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^&gt;[ \t]+(.+)$").unwrap());

static UNORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\t ]*[-*][\t ]+(.+)$").unwrap());

static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\t ]*(?:\d+\.|#)[\t ]+(.+)$").unwrap());

/// `---` / `***` lines and literal `<hr>` become styled rules.
pub(crate) fn rules(text: &str) -> String {
    let hr = format!("<hr style='{}'>", style::RULE);
    RULE_RE.replace_all(text, hr.as_str()).into_owned()
}

pub(crate) fn blockquotes(text: &str) -> String {
    BLOCKQUOTE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            format!(
                r#"<blockquote style="{}">{}</blockquote>"#,
                style::BLOCKQUOTE,
                &caps[1]
            )
        })
        .into_owned()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// A plain line, or a run of list items sharing one marker kind.
enum Segment<'a> {
    Text(&'a str),
    List(ListKind, Vec<&'a str>),
}

fn classify(line: &str) -> Option<(ListKind, &str)> {
    if let Some(caps) = UNORDERED_ITEM_RE.captures(line) {
        return caps.get(1).map(|m| (ListKind::Unordered, m.as_str().trim()));
    }
    ORDERED_ITEM_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| (ListKind::Ordered, m.as_str().trim()))
}

/// Runs of `- item` / `* item` lines become one `<ul>`, runs of `1. item` /
/// `# item` lines one `<ol>`.
///
/// A list absorbs the newlines on both sides of it, so it is not followed by
/// a stray `<br>`. A change of marker kind starts a new list.
pub(crate) fn lists(text: &str) -> String {
    let mut segments: Vec<Segment<'_>> = Vec::new();
    for line in text.split('\n') {
        match (classify(line), segments.last_mut()) {
            (Some((kind, item)), Some(Segment::List(open, items))) if *open == kind => {
                items.push(item);
            }
            (Some((kind, item)), _) => segments.push(Segment::List(kind, vec![item])),
            (None, _) => segments.push(Segment::Text(line)),
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut previous_text = false;
    for segment in &segments {
        match segment {
            Segment::Text(line) => {
                if previous_text {
                    out.push('\n');
                }
                out.push_str(line);
                previous_text = true;
            }
            Segment::List(kind, items) => {
                push_list(&mut out, kind.tag(), items);
                previous_text = false;
            }
        }
    }
    out
}

fn push_list(out: &mut String, tag: &str, items: &[&str]) {
    let _ = write!(out, "<{tag} style='{}'>", style::LIST);
    for item in items {
        let _ = write!(out, "<li style='{}'>{item}</li>", style::LIST_ITEM);
    }
    let _ = write!(out, "</{tag}>");
}

pub(crate) fn line_breaks(text: &str) -> String {
    text.replace('\n', "<br>")
}

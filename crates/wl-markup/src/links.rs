//! Link passes and link classification.
//!
//! Three link syntaxes are understood:
//! - `[https://url text]` external links (MediaWiki brackets)
//! - `[[Target|display]]` and `[[Target]]` internal links
//! - `[text](https://url)` Markdown links
//!
//! Internal links are emitted with a custom URL scheme (`wiki:Target` by
//! default) so the display layer can tell navigation apart from browsing.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::protect::PlaceholderTable;
use crate::style;

static EXTERNAL_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(https?://[^\s\]]+)(?:\s+([^\]]+))?\]").unwrap());

static PIPED_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)\|([^\]]+)\]\]").unwrap());

static PLAIN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

/// `'''bold'''` after escaping turned the quotes into entities.
static LEGACY_BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#x27;&#x27;&#x27;(.+?)&#x27;&#x27;&#x27;").unwrap()
});

static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").unwrap());

fn external_anchor(url: &str, text: &str) -> String {
    format!(
        r#"<a href="{url}" target="_blank" style="{}">{text}</a>"#,
        style::LINK
    )
}

/// Replace bracketed external links with anchors and shield them behind markers.
pub(crate) fn protect_external_links(text: &str, table: &mut PlaceholderTable) -> String {
    table.protect_with(text, &EXTERNAL_LINK_RE, |caps| {
        let url = &caps[1];
        let label = caps.get(2).map_or(url, |m| m.as_str());
        external_anchor(url, label)
    })
}

/// Convert `[[Target|display]]` and `[[Target]]` into internal anchors.
pub(crate) fn internal_links(text: &str, scheme: &str) -> String {
    let anchor = |target: &str, display: &str| {
        format!(
            r#"<a href="{scheme}:{target}" style="{}">{display}</a>"#,
            style::LINK
        )
    };
    let piped = PIPED_LINK_RE.replace_all(text, |caps: &Captures<'_>| anchor(&caps[1], &caps[2]));
    PLAIN_LINK_RE
        .replace_all(&piped, |caps: &Captures<'_>| anchor(&caps[1], &caps[1]))
        .into_owned()
}

/// Convert `'''bold'''` into `<b>`.
pub(crate) fn legacy_bold(text: &str) -> String {
    LEGACY_BOLD_RE.replace_all(text, "<b>$1</b>").into_owned()
}

/// Convert `[text](https://url)` into external anchors.
pub(crate) fn markdown_links(text: &str) -> String {
    MARKDOWN_LINK_RE
        .replace_all(text, |caps: &Captures<'_>| external_anchor(&caps[2], &caps[1]))
        .into_owned()
}

/// Where a clicked anchor should take the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// Another entry of the corpus, by title.
    Internal(&'a str),
    /// An `http`/`https` page to open in a browser.
    External(&'a str),
    /// Anything else; callers usually ignore these.
    Other(&'a str),
}

impl<'a> LinkTarget<'a> {
    /// Classify an anchor's `href` given the internal link scheme.
    ///
    /// # Example
    ///
    /// ```
    /// use wl_markup::LinkTarget;
    ///
    /// assert_eq!(LinkTarget::parse("wiki:Dwarf", "wiki"), LinkTarget::Internal("Dwarf"));
    /// assert_eq!(
    ///     LinkTarget::parse("https://example.com", "wiki"),
    ///     LinkTarget::External("https://example.com")
    /// );
    /// ```
    #[must_use]
    pub fn parse(href: &'a str, scheme: &str) -> Self {
        if href.starts_with("http://") || href.starts_with("https://") {
            return Self::External(href);
        }
        match href
            .strip_prefix(scheme)
            .and_then(|rest| rest.strip_prefix(':'))
        {
            Some(target) => Self::Internal(target.trim_start_matches('/')),
            None => Self::Other(href),
        }
    }
}

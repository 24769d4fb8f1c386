//! File and image directives.
//!
//! `[[File:name|opts]]` and `[[Image:name|opts]]` become `<img>` tags pointing at
//! the wiki's upload store. MediaWiki stores uploads under
//! `/images/<h1>/<h2>/<name>`, where `<h1>` and `<h2>` are the first one and two
//! hex digits of the MD5 of the canonical filename, so the URL can be derived
//! without asking the server.

use std::fmt::Write;
use std::sync::LazyLock;

use md5::{Digest, Md5};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

/// Characters left unencoded in the filename part of an upload URL.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

pub(crate) static FILE_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[\[(?:File|Image):([^\]]+)\]\]").unwrap());

/// A rendered image and the filename it was derived from.
///
/// When the deterministic URL 404s, the display layer uses `filename` to ask
/// the wiki where the file actually lives.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageRef {
    /// URL placed in the `src` attribute.
    pub url: String,
    /// Canonical MediaWiki filename.
    pub filename: String,
}

/// Parsed contents of a file directive (the part after `File:`).
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FileDirective<'a> {
    pub(crate) name: &'a str,
    pub(crate) width: Option<u32>,
}

impl<'a> FileDirective<'a> {
    /// Split `name|opt|opt` into the filename and an optional `NNNpx` width.
    ///
    /// Unknown options (`thumb`, `left`, captions) are ignored. The last width
    /// option wins.
    pub(crate) fn parse(inner: &'a str) -> Self {
        let mut parts = inner.split('|');
        let name = parts.next().unwrap_or_default();
        let width = parts.rev().find_map(|opt| parse_px(opt.trim()));
        Self { name, width }
    }
}

fn parse_px(opt: &str) -> Option<u32> {
    let digits = opt.strip_suffix("px")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Canonical MediaWiki form of a filename: spaces become underscores and the
/// first character is uppercased.
///
/// # Example
///
/// ```
/// use wl_markup::canonical_filename;
///
/// assert_eq!(canonical_filename("rough gem.png"), "Rough_gem.png");
/// ```
pub fn canonical_filename(name: &str) -> String {
    let trimmed = name.trim().replace(' ', "_");
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(trimmed.len());
    out.extend(first.to_uppercase());
    out.push_str(chars.as_str());
    out
}

/// Upload URL for a canonical filename under `base`.
///
/// # Example
///
/// ```
/// use wl_markup::image_url;
///
/// assert_eq!(
///     image_url("https://wiki.example/images", "Pick.png"),
///     "https://wiki.example/images/c/c9/Pick.png"
/// );
/// ```
pub fn image_url(base: &str, filename: &str) -> String {
    let hash = hex::encode(Md5::digest(filename.as_bytes()));
    let encoded = utf8_percent_encode(filename, FILENAME_ENCODE_SET);
    format!(
        "{}/{}/{}/{encoded}",
        base.trim_end_matches('/'),
        &hash[..1],
        &hash[..2]
    )
}

/// Build the `<img>` element for a directive, wrapped in line breaks so the
/// image sits on its own line.
pub(crate) fn image_tag(url: &str, width: Option<u32>) -> String {
    let mut tag = format!(r#"<br><img src="{url}""#);
    if let Some(width) = width {
        let _ = write!(tag, r#" width="{width}""#);
    }
    tag.push_str("><br>");
    tag
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_directive_name_only() {
        let d = FileDirective::parse("Pick.png");
        assert_eq!(d.name, "Pick.png");
        assert_eq!(d.width, None);
    }

    #[test]
    fn test_parse_directive_width() {
        let d = FileDirective::parse("Pick.png|thumb|32px|A pick");
        assert_eq!(d.name, "Pick.png");
        assert_eq!(d.width, Some(32));
    }

    #[test]
    fn test_parse_directive_rejects_non_numeric_width() {
        assert_eq!(FileDirective::parse("a.png|bigpx").width, None);
        assert_eq!(FileDirective::parse("a.png|px").width, None);
        assert_eq!(FileDirective::parse("a.png|-3px").width, None);
    }

    #[test]
    fn test_parse_directive_last_width_wins() {
        assert_eq!(FileDirective::parse("a.png|10px|20px").width, Some(20));
    }

    #[test]
    fn test_canonical_filename() {
        assert_eq!(canonical_filename("example.png"), "Example.png");
        assert_eq!(canonical_filename(" dwarf fortress.png "), "Dwarf_fortress.png");
        assert_eq!(canonical_filename("émigré.png"), "Émigré.png");
        assert_eq!(canonical_filename(""), "");
    }

    #[test]
    fn test_image_url_hash_buckets() {
        assert_eq!(
            image_url("https://dwarffortresswiki.org/images/", "Example.png"),
            "https://dwarffortresswiki.org/images/7/70/Example.png"
        );
        assert_eq!(
            image_url("https://dwarffortresswiki.org/images", "Dwarf_fortress.png"),
            "https://dwarffortresswiki.org/images/2/24/Dwarf_fortress.png"
        );
    }

    #[test]
    fn test_image_url_encodes_special_characters() {
        let url = image_url("https://w.example/images", "Pick(1).png");
        assert!(url.ends_with("/Pick%281%29.png"));
    }

    #[test]
    fn test_image_tag() {
        assert_eq!(image_tag("u.png", None), r#"<br><img src="u.png"><br>"#);
        assert_eq!(
            image_tag("u.png", Some(32)),
            r#"<br><img src="u.png" width="32"><br>"#
        );
    }
}

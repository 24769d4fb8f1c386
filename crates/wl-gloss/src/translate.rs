//! Glossary substitution over wiki markup.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use wl_markup::{PlaceholderTable, sanitize};

use crate::glossary::Glossary;

/// Prefix marking gloss-translated articles.
pub const PROVISIONAL_NOTICE: &str = "⚠️ [临时翻译]";

/// Placeholder scope, distinct from the renderer's.
const GLOSS_SCOPE: u8 = 2;

/// Regions glossary terms must never touch, protected in this order.
static PROTECTED_RES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)\[\[(?:File|Image):[^\]]+\]\]").unwrap(),
        Regex::new(r"\[\[[^\]]+\]\]").unwrap(),
        Regex::new(r"\{\{[^}]+\}\}").unwrap(),
        Regex::new(r"https?://[^\s\]]+").unwrap(),
    ]
});

/// Replace glossary terms in `content`, leaving markup intact.
///
/// File directives, internal links, templates and bare URLs are shielded
/// first. Terms are then applied longest first, case-insensitively and on
/// word boundaries. Every substituted replacement is itself shielded, so a
/// shorter term never rewrites text an earlier term produced.
///
/// An empty glossary returns the content unchanged.
///
/// # Example
///
/// ```
/// use wl_gloss::{Glossary, translate};
///
/// let glossary = Glossary::new([("dwarf", "矮人"), ("pick", "镐")])?;
///
/// assert_eq!(
///     translate("A Dwarf with a pick. See [[Dwarf]].", &glossary),
///     "A 矮人 with a 镐. See [[Dwarf]]."
/// );
/// # Ok::<(), wl_gloss::GlossError>(())
/// ```
#[must_use]
pub fn translate(content: &str, glossary: &Glossary) -> String {
    if glossary.is_empty() {
        return content.to_owned();
    }

    let mut table = PlaceholderTable::with_scope(GLOSS_SCOPE);
    let mut text = sanitize(content).into_owned();
    for pattern in PROTECTED_RES.iter() {
        text = table.protect(&text, pattern);
    }

    for term in glossary.terms() {
        let replaced = term
            .pattern
            .replace_all(&text, |_: &Captures<'_>| table.insert(term.replacement.as_str()));
        if let std::borrow::Cow::Owned(replaced) = replaced {
            tracing::debug!(term = %term.source, "Substituted glossary term");
            text = replaced;
        }
    }

    table.restore(&text)
}

/// Secondary-language markup chosen for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Translation {
    /// A real translation from the secondary corpus.
    Existing(String),
    /// Gloss-translated primary markup.
    Provisional(String),
}

impl Translation {
    /// Markup to render. Provisional translations carry [`PROVISIONAL_NOTICE`].
    #[must_use]
    pub fn into_markup(self) -> String {
        match self {
            Self::Existing(markup) => markup,
            Self::Provisional(markup) => format!("{PROVISIONAL_NOTICE}\n\n{markup}"),
        }
    }

    /// Check if this is a glossary fallback.
    #[must_use]
    pub fn is_provisional(&self) -> bool {
        matches!(self, Self::Provisional(_))
    }
}

/// Pick the secondary-language version of an article.
///
/// Secondary content wins when present and different from the primary.
/// Otherwise the primary is gloss-translated, unless the glossary is empty,
/// in which case there is nothing to offer.
#[must_use]
pub fn preferred_translation(
    primary: &str,
    secondary: Option<&str>,
    glossary: &Glossary,
) -> Option<Translation> {
    if let Some(secondary) = secondary
        && secondary != primary
    {
        return Some(Translation::Existing(secondary.to_owned()));
    }
    if glossary.is_empty() {
        return None;
    }
    Some(Translation::Provisional(translate(primary, glossary)))
}

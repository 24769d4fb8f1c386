//! Ordered render pipeline.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::block;
use crate::escape::escape_html;
use crate::image::{FILE_DIRECTIVE_RE, FileDirective, ImageRef, canonical_filename, image_tag, image_url};
use crate::inline;
use crate::links;
use crate::protect::{PlaceholderTable, sanitize};
use crate::table;

/// Default upload store for image directives.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://dwarffortresswiki.org/images";

/// Default URL scheme for internal links.
pub const DEFAULT_LINK_SCHEME: &str = "wiki";

/// Scope of the table that shields code regions until the very end.
const CODE_SCOPE: u8 = 1;

/// Tags the author wrote, protected before escaping.
static LITERAL_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").unwrap());

/// Any tag, including ones generated by earlier passes.
static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Settings that change the generated HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Base URL of the wiki's upload store.
    pub image_base_url: String,
    /// Scheme used for internal link targets (`{scheme}:{title}`).
    pub link_scheme: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_owned(),
            link_scheme: DEFAULT_LINK_SCHEME.to_owned(),
        }
    }
}

/// Result of rendering markup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Generated image URL → canonical filename.
    pub images: BTreeMap<String, String>,
}

impl RenderResult {
    /// Canonical filename behind a generated image URL.
    ///
    /// The display layer calls this after the deterministic URL fails to load.
    #[must_use]
    pub fn filename_for(&self, url: &str) -> Option<&str> {
        self.images.get(url).map(String::as_str)
    }

    /// Iterate over rendered images in URL order.
    pub fn image_refs(&self) -> impl Iterator<Item = ImageRef> + '_ {
        self.images.iter().map(|(url, filename)| ImageRef {
            url: url.clone(),
            filename: filename.clone(),
        })
    }
}

/// Wiki markup renderer.
///
/// Rendering is a fixed chain of text passes. Passes that must not touch some
/// region (tags, links, code) run with that region swapped for a placeholder:
///
/// 1. File/image directives → `<img>` (protected)
/// 2. Author-written tags protected, the rest HTML-escaped, tags restored
/// 3. External links (protected), internal links, `'''bold'''`
/// 4. Fenced and inline code (protected until the end)
/// 5. `==h2==` and `=h3=` headings
/// 6. Tags protected, tables rendered, table markup protected
/// 7. `**bold**`, `*italic*`, `_italic_`, then tags restored
/// 8. Markdown links, rules, quotes, lists, line breaks, code restored
///
/// Rendering never fails: malformed markup passes through as escaped text.
///
/// # Example
///
/// ```
/// use wl_markup::Renderer;
///
/// let result = Renderer::new()
///     .with_link_scheme("entry")
///     .render("See [[Dwarf|dwarves]]");
///
/// assert!(result.html.contains(r#"href="entry:Dwarf""#));
/// assert!(result.images.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer from explicit options.
    #[must_use]
    pub fn from_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Set the base URL of the upload store used for image directives.
    #[must_use]
    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.options.image_base_url = url.into();
        self
    }

    /// Set the scheme used for internal link targets.
    #[must_use]
    pub fn with_link_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.options.link_scheme = scheme.into();
        self
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render markup to HTML.
    #[must_use]
    pub fn render(&self, markup: &str) -> RenderResult {
        let input = sanitize(markup);
        let mut tags = PlaceholderTable::new();
        let mut code = PlaceholderTable::with_scope(CODE_SCOPE);
        let mut images = BTreeMap::new();

        let text = tags.protect_with(&input, &FILE_DIRECTIVE_RE, |caps| {
            let directive = FileDirective::parse(&caps[1]);
            let filename = canonical_filename(directive.name);
            let url = image_url(&self.options.image_base_url, &filename);
            tracing::debug!(%filename, %url, "Rendered image");
            let tag = image_tag(&url, directive.width);
            images.insert(url, filename);
            tag
        });

        let text = tags.protect(&text, &LITERAL_TAG_RE);
        let text = escape_html(&text);
        let text = tags.restore(&text);

        let text = links::protect_external_links(&text, &mut tags);
        let text = links::internal_links(&text, &self.options.link_scheme);
        let text = links::legacy_bold(&text);
        let text = tags.restore(&text);

        let text = inline::code(&text, &mut code);
        let text = inline::headings(&text);

        let text = tags.protect(&text, &ANY_TAG_RE);
        let text = table::tables(&text);
        let text = tags.protect(&text, &ANY_TAG_RE);
        let text = inline::emphasis(&text);
        let text = tags.restore(&text);

        let text = links::markdown_links(&text);
        let text = block::rules(&text);
        let text = block::blockquotes(&text);
        let text = block::lists(&text);
        let text = block::line_breaks(&text);
        let html = code.restore(&text);

        RenderResult { html, images }
    }
}

/// Render markup with default options.
#[must_use]
pub fn render(markup: &str) -> RenderResult {
    Renderer::new().render(markup)
}

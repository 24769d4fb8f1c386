//! Wiki markup to HTML renderer.
//!
//! Converts the mixed MediaWiki and Markdown dialect found in wiki article dumps
//! into HTML for a lightweight rich-text widget, and reports every generated
//! image URL together with its canonical filename.
//!
//! # Architecture
//!
//! Rendering is an ordered chain of regex and scanner passes over a string. A
//! [`PlaceholderTable`] shields regions (tags, links, code) from passes that
//! would corrupt them and restores them afterwards. The same table is used by
//! the glossary translator to keep wiki syntax out of term substitution.
//!
//! Supported syntax:
//! - `[[File:name|32px]]` / `[[Image:name]]` images
//! - `[[Target|display]]`, `[[Target]]`, `[https://url text]`, `[text](https://url)` links
//! - `'''bold'''`, `**bold**`, `*italic*`, `_italic_`
//! - `==h2==`, `=h3=`, `` `code` ``, fenced code
//! - `{| ... |}` tables, `---` rules, `> ` quotes, `- ` / `1. ` / `# ` lists
//!
//! # Example
//!
//! ```
//! let result = wl_markup::render("'''Hello''' [[Dwarf|dwarves]] see [[File:Pick.png|32px]]");
//!
//! assert!(result.html.contains("<b>Hello</b>"));
//! assert!(result.html.contains(r#"href="wiki:Dwarf""#));
//! assert_eq!(
//!     result.images.get("https://dwarffortresswiki.org/images/c/c9/Pick.png").map(String::as_str),
//!     Some("Pick.png")
//! );
//! ```

mod block;
mod escape;
mod image;
mod inline;
mod links;
mod protect;
mod renderer;
mod style;
mod table;

pub use escape::escape_html;
pub use image::{ImageRef, canonical_filename, image_url};
pub use links::LinkTarget;
pub use protect::{PlaceholderTable, has_markers, sanitize};
pub use renderer::{
    DEFAULT_IMAGE_BASE_URL, DEFAULT_LINK_SCHEME, RenderOptions, RenderResult, Renderer, render,
};

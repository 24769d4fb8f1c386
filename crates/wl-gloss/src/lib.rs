//! Glossary-based, best-effort translation of wiki markup.
//!
//! When the secondary-language corpus has no version of an article, the
//! primary markup is shown with game terms swapped for their translations.
//! [`translate`] does that without breaking links, file directives, templates
//! or URLs, so the result still renders.
//!
//! Terms come from a [`TranslationMap`] (`translation_map.json`), compiled
//! once into a [`Glossary`].

mod glossary;
mod sentence;
mod translate;

pub use glossary::{GlossError, Glossary, TranslationMap};
pub use sentence::{clean_translation, replace_terms, should_translate};
pub use translate::{PROVISIONAL_NOTICE, Translation, preferred_translation, translate};

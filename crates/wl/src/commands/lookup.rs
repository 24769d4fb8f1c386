//! `wl lookup` command implementation.

use clap::Args;
use serde::Serialize;
use wl_gloss::TranslationMap;
use wl_index::{LookupEntry, RedirectOutcome};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the lookup command.
#[derive(Args)]
pub(crate) struct LookupArgs {
    /// Query text; each argument is treated as one line (e.g. OCR output).
    #[arg(required = true)]
    text: Vec<String>,

    /// Print matches as JSON.
    #[arg(long)]
    json: bool,
}

/// One match as printed.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct Match<'a> {
    name: &'a str,
    translated_title: &'a str,
    redirect: Option<String>,
    has_secondary: bool,
}

impl<'a> Match<'a> {
    fn new(entry: &'a LookupEntry, map: &'a TranslationMap) -> Self {
        Self {
            name: &entry.name,
            translated_title: map.translate_title(&entry.name),
            redirect: (entry.outcome != RedirectOutcome::Direct)
                .then(|| entry.outcome.to_string()),
            has_secondary: entry.secondary.is_some(),
        }
    }
}

impl LookupArgs {
    pub(crate) fn execute(self, global: &super::GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config()?;

        let lookup = super::load_lookup(&config)?;
        let map = super::load_translation_map(&config)?;

        let entries = lookup.entries(&self.text.join("\n"));
        let matches: Vec<Match<'_>> = entries.iter().map(|e| Match::new(e, &map)).collect();

        if self.json {
            output.document(&serde_json::to_string_pretty(&matches)?)?;
            return Ok(());
        }

        if matches.is_empty() {
            output.warning("No matching articles");
            return Ok(());
        }
        for m in &matches {
            if m.translated_title == m.name {
                output.document(m.name)?;
            } else {
                output.document(&format!("{} ({})", m.name, m.translated_title))?;
            }
            if let Some(redirect) = &m.redirect {
                output.detail(&format!("  {redirect}"));
            }
        }
        output.info(&format!("{} match(es)", matches.len()));
        Ok(())
    }
}

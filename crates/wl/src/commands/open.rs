//! `wl open` command implementation.

use clap::Args;
use wl_gloss::preferred_translation;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the open command.
#[derive(Args)]
pub(crate) struct OpenArgs {
    /// Article title, as written in an internal link.
    title: String,

    /// Show the secondary-language version, gloss-translating when there is none.
    #[arg(long)]
    translate: bool,
}

impl OpenArgs {
    pub(crate) fn execute(self, global: &super::GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config()?;

        let lookup = super::load_lookup(&config)?;
        let entry = lookup
            .open(&self.title)?
            .ok_or_else(|| CliError::UnknownTitle(self.title.clone()))?;

        let mut title = entry.name.clone();
        let mut markup = entry.content;

        if self.translate {
            let map = super::load_translation_map(&config)?;
            let glossary = map.glossary()?;
            match preferred_translation(&markup, entry.secondary.as_deref(), &glossary) {
                Some(translation) => {
                    if translation.is_provisional() {
                        output.warning("No translated article, using glossary substitution");
                    }
                    title = map.translate_title(&entry.name).to_owned();
                    markup = translation.into_markup();
                }
                None => output.warning("No translation available"),
            }
        }

        output.highlight(&title.replace('_', " "));
        output.detail(&entry.outcome.to_string());

        let result = super::renderer(&config).render(&markup);
        output.document(&result.html)?;
        Ok(())
    }
}

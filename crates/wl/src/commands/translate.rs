//! `wl translate` command implementation.

use std::path::PathBuf;

use clap::Args;
use wl_gloss::translate;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the translate command.
#[derive(Args)]
pub(crate) struct TranslateArgs {
    /// Markup file to translate.
    file: PathBuf,
}

impl TranslateArgs {
    pub(crate) fn execute(self, global: &super::GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config()?;

        let glossary = super::load_translation_map(&config)?.glossary()?;
        if glossary.is_empty() {
            output.warning(&format!(
                "Glossary is empty ({}), output is unchanged",
                config.glossary_resolved.path.display()
            ));
        }

        let markup = super::read_markup(&self.file)?;
        output.document(&translate(&markup, &glossary))?;
        Ok(())
    }
}

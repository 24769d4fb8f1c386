//! `wl render` command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markup file to render.
    file: PathBuf,

    /// Print `{"html": ..., "images": {url: filename}}` instead of bare HTML.
    #[arg(long)]
    json: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self, global: &super::GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config()?;

        let markup = super::read_markup(&self.file)?;
        let result = super::renderer(&config).render(&markup);

        if self.json {
            output.document(&serde_json::to_string_pretty(&result)?)?;
        } else {
            output.document(&result.html)?;
            if !result.images.is_empty() {
                output.detail(&format!("{} image(s) referenced", result.images.len()));
            }
        }
        Ok(())
    }
}

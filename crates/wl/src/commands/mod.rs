//! CLI command implementations.

pub(crate) mod lookup;
pub(crate) mod open;
pub(crate) mod render;
pub(crate) mod translate;

use std::path::{Path, PathBuf};

use clap::Args;
use wl_config::{CliSettings, Config};
use wl_gloss::TranslationMap;
use wl_index::{Corpus, Lookup};
use wl_markup::{RenderOptions, Renderer};
use wl_storage::FsStorage;

use crate::error::CliError;

pub(crate) use lookup::LookupArgs;
pub(crate) use open::OpenArgs;
pub(crate) use render::RenderArgs;
pub(crate) use translate::TranslateArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover wikilens.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Primary corpus directory (overrides config).
    #[arg(long, global = true, env = "WIKILENS_CORPUS")]
    corpus: Option<PathBuf>,

    /// Secondary-language corpus directory (overrides config).
    #[arg(long, global = true)]
    secondary_corpus: Option<PathBuf>,

    /// Maximum redirects followed per article (overrides config).
    #[arg(long, global = true)]
    max_hops: Option<usize>,

    /// Enable verbose output (corpus and lookup logs).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load the config with command-line overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            primary_dir: self.corpus.clone(),
            secondary_dir: self.secondary_corpus.clone(),
            max_hops: self.max_hops,
            ..CliSettings::default()
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Renderer configured from `[render]`.
pub(crate) fn renderer(config: &Config) -> Renderer {
    Renderer::from_options(RenderOptions {
        image_base_url: config.render.image_base_url.clone(),
        link_scheme: config.render.link_scheme.clone(),
    })
}

/// Index the configured corpora.
pub(crate) fn load_lookup(config: &Config) -> Result<Lookup, CliError> {
    let corpus = &config.corpus_resolved;
    let primary = FsStorage::new(&corpus.primary_dir).with_extension(&corpus.extension);
    let mut lookup = Lookup::new(Corpus::load(Box::new(primary))?)
        .with_max_hops(config.redirects.max_hops);

    if let Some(secondary_dir) = &corpus.secondary_dir {
        let secondary = FsStorage::new(secondary_dir)
            .with_extension(&corpus.extension)
            .with_suffix(&corpus.secondary_suffix);
        lookup = lookup.with_secondary(Corpus::load(Box::new(secondary))?);
    }

    tracing::info!(
        primary = %corpus.primary_dir.display(),
        entries = lookup.primary().index().len(),
        "Loaded corpus"
    );
    Ok(lookup)
}

/// Load the configured translation map; a missing file yields an empty map.
pub(crate) fn load_translation_map(config: &Config) -> Result<TranslationMap, CliError> {
    Ok(TranslationMap::load(&config.glossary_resolved.path)?)
}

/// Read a markup file.
pub(crate) fn read_markup(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        ))
    })
}

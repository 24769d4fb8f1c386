//! CLI error types.

use wl_config::ConfigError;
use wl_gloss::GlossError;
use wl_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Gloss(#[from] GlossError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("No article titled {0:?}")]
    UnknownTitle(String),
}

//! Configuration management for wikilens.
//!
//! Parses `wikilens.toml` with serde and discovers it in the current
//! directory or any parent. Relative paths resolve against the directory
//! holding the config file. CLI settings are applied on top via
//! [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` expands to the value of VAR, errors if unset
//! - `${VAR:-default}` expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `render.image_base_url`
//! - `glossary.path`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wikilens.toml";

const DEFAULT_PRIMARY_DIR: &str = "wiki";
const DEFAULT_EXTENSION: &str = "txt";
const DEFAULT_SECONDARY_SUFFIX: &str = "-CN";
const DEFAULT_GLOSSARY_PATH: &str = "translation_map.json";
const DEFAULT_MAX_HOPS: usize = 10;
const MAX_HOPS_LIMIT: usize = 100;

/// CLI settings that override configuration file values.
///
/// Only `Some` fields override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override primary corpus directory.
    pub primary_dir: Option<PathBuf>,
    /// Override secondary corpus directory.
    pub secondary_dir: Option<PathBuf>,
    /// Override image base URL.
    pub image_base_url: Option<String>,
    /// Override redirect hop bound.
    pub max_hops: Option<usize>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Corpus locations as written in TOML.
    corpus: CorpusConfigRaw,
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Redirect resolution configuration.
    pub redirects: RedirectsConfig,
    /// Glossary location as written in TOML.
    glossary: GlossaryConfigRaw,

    /// Resolved corpus configuration (set after loading).
    #[serde(skip)]
    pub corpus_resolved: CorpusConfig,
    /// Resolved glossary configuration (set after loading).
    #[serde(skip)]
    pub glossary_resolved: GlossaryConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CorpusConfigRaw {
    primary_dir: Option<String>,
    secondary_dir: Option<String>,
    extension: Option<String>,
    secondary_suffix: Option<String>,
}

/// Resolved corpus configuration with absolute paths.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CorpusConfig {
    /// Primary-language article directory.
    pub primary_dir: PathBuf,
    /// Secondary-language article directory, if any.
    pub secondary_dir: Option<PathBuf>,
    /// Article file extension, without the dot.
    pub extension: String,
    /// Stem suffix of secondary-language files (`Dwarf-CN.txt`).
    pub secondary_suffix: String,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Base URL hashed image paths are appended to.
    pub image_base_url: String,
    /// URL scheme of internal link hrefs.
    pub link_scheme: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_base_url: "https://dwarffortresswiki.org/images".to_owned(),
            link_scheme: "wiki".to_owned(),
        }
    }
}

/// Redirect resolution configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RedirectsConfig {
    /// Maximum number of redirects followed per lookup.
    pub max_hops: usize,
}

impl Default for RedirectsConfig {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GlossaryConfigRaw {
    path: Option<String>,
}

/// Resolved glossary configuration.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GlossaryConfig {
    /// Translation map file. It may not exist.
    pub path: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`glossary.path`").
        field: String,
        /// Error message (e.g., "${`WIKI_DATA`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// With `config_path`, loads that file. Otherwise searches for
    /// `wikilens.toml` in the current directory and its parents, falling back
    /// to defaults relative to the current directory.
    ///
    /// CLI settings are applied after path resolution and validated with the
    /// rest of the config.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(primary_dir) = &settings.primary_dir {
            self.corpus_resolved.primary_dir.clone_from(primary_dir);
        }
        if let Some(secondary_dir) = &settings.secondary_dir {
            self.corpus_resolved.secondary_dir = Some(secondary_dir.clone());
        }
        if let Some(image_base_url) = &settings.image_base_url {
            self.render.image_base_url.clone_from(image_base_url);
        }
        if let Some(max_hops) = settings.max_hops {
            self.redirects.max_hops = max_hops;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            corpus: CorpusConfigRaw::default(),
            render: RenderConfig::default(),
            redirects: RedirectsConfig::default(),
            glossary: GlossaryConfigRaw::default(),
            corpus_resolved: CorpusConfig {
                primary_dir: base.join(DEFAULT_PRIMARY_DIR),
                secondary_dir: None,
                extension: DEFAULT_EXTENSION.to_owned(),
                secondary_suffix: DEFAULT_SECONDARY_SUFFIX.to_owned(),
            },
            glossary_resolved: GlossaryConfig {
                path: base.join(DEFAULT_GLOSSARY_PATH),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand before resolving: glossary.path may come from the environment.
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        self.validate_redirects()?;
        self.validate_corpus()?;
        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.image_base_url, "render.image_base_url")?;
        require_http_url(&self.render.image_base_url, "render.image_base_url")?;
        require_non_empty(&self.render.link_scheme, "render.link_scheme")?;
        Ok(())
    }

    fn validate_redirects(&self) -> Result<(), ConfigError> {
        let max_hops = self.redirects.max_hops;
        if max_hops == 0 {
            return Err(ConfigError::Validation(
                "redirects.max_hops must be greater than 0".to_owned(),
            ));
        }
        if max_hops > MAX_HOPS_LIMIT {
            return Err(ConfigError::Validation(format!(
                "redirects.max_hops cannot exceed {MAX_HOPS_LIMIT}"
            )));
        }
        Ok(())
    }

    fn validate_corpus(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.corpus_resolved.extension, "corpus.extension")?;
        if self.corpus_resolved.secondary_dir.is_some() {
            require_non_empty(
                &self.corpus_resolved.secondary_suffix,
                "corpus.secondary_suffix",
            )?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.render.image_base_url =
            expand::expand_env(&self.render.image_base_url, "render.image_base_url")?;

        if let Some(ref path) = self.glossary.path {
            self.glossary.path = Some(expand::expand_env(path, "glossary.path")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.corpus_resolved = CorpusConfig {
            primary_dir: resolve(self.corpus.primary_dir.as_deref(), DEFAULT_PRIMARY_DIR),
            secondary_dir: self.corpus.secondary_dir.as_deref().map(|d| config_dir.join(d)),
            extension: self
                .corpus
                .extension
                .as_deref()
                .unwrap_or(DEFAULT_EXTENSION)
                .trim_start_matches('.')
                .to_owned(),
            secondary_suffix: self
                .corpus
                .secondary_suffix
                .clone()
                .unwrap_or_else(|| DEFAULT_SECONDARY_SUFFIX.to_owned()),
        };

        self.glossary_resolved = GlossaryConfig {
            path: resolve(self.glossary.path.as_deref(), DEFAULT_GLOSSARY_PATH),
        };
    }
}

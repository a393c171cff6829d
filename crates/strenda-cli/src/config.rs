//! # CLI Configuration
//!
//! JSON-LD defaults used when the CLI mints envelopes.
//!
//! Sources, lowest to highest priority: built-in defaults, the YAML file given
//! with `--config`, then the environment:
//!
//! - `STRENDA_LD_PREFIX` (default: `stbc`)
//! - `STRENDA_LD_IRI` (default: `https://www.github.com/my/repo/`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strenda_core::jsonld::{DEFAULT_IRI, DEFAULT_PREFIX};
use strenda_core::{JsonLdError, Namespace};

pub const ENV_LD_PREFIX: &str = "STRENDA_LD_PREFIX";
pub const ENV_LD_IRI: &str = "STRENDA_LD_IRI";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Namespace prefix for minted `@id` / `@type` values.
    pub ld_prefix: String,
    /// IRI bound to `ld_prefix` in minted `@context` maps.
    pub ld_iri: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ld_prefix: DEFAULT_PREFIX.to_string(),
            ld_iri: DEFAULT_IRI.to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from an optional file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if the
    /// resulting namespace is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.namespace()?;
        tracing::debug!(prefix = %config.ld_prefix, iri = %config.ld_iri, "loaded CLI configuration");
        Ok(config)
    }

    /// Read a YAML configuration file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Apply overrides from a variable lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefix) = lookup(ENV_LD_PREFIX) {
            self.ld_prefix = prefix;
        }
        if let Some(iri) = lookup(ENV_LD_IRI) {
            self.ld_iri = iri;
        }
    }

    /// The configured namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Namespace`] if the prefix is empty.
    pub fn namespace(&self) -> Result<Namespace, ConfigError> {
        Ok(Namespace::new(self.ld_prefix.clone(), self.ld_iri.clone())?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("invalid JSON-LD namespace: {0}")]
    Namespace(#[from] JsonLdError),
}

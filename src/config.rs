//! Settings for persistence with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. An optional TOML file passed by the caller

use std::path::Path;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::errors::{TreeError, TreeResult};

/// How trees are written to disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PersistenceSettings {
    /// Indent the JSON output
    pub pretty: bool,
    /// Create missing parent directories before saving
    pub create_dirs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub persistence: PersistenceSettings,
}

fn config_err(e: ConfigError) -> TreeError {
    TreeError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings, layering `path` (if given and present) over the defaults.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> TreeResult<Self> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&Self::default()).map_err(config_err)?);

        if let Some(path) = path {
            builder = builder.add_source(
                File::new(&path.to_string_lossy(), FileFormat::Toml).required(false),
            );
        }

        builder
            .build()
            .and_then(|config| config.try_deserialize::<Self>())
            .map_err(config_err)
    }

    /// Parse settings from TOML text, filling unspecified fields with defaults.
    pub fn from_toml_str(content: &str) -> TreeResult<Self> {
        Config::builder()
            .add_source(Config::try_from(&Self::default()).map_err(config_err)?)
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .and_then(|config| config.try_deserialize::<Self>())
            .map_err(config_err)
    }
}

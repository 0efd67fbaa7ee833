//! Compiler configuration
//!
//! Settings come from an optional `parlc.toml`:
//!
//! ```toml
//! [codegen]
//! zero_initialise = true
//! annotate = false
//!
//! [output]
//! extension = "parir"
//! ```
//!
//! Every key is optional and a missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "parlc.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Code generation settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// Store the type's default value for `let x : T;`
    pub zero_initialise: bool,
    /// Append notes to rendered listings
    pub annotate: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            zero_initialise: true,
            annotate: false,
        }
    }
}

/// Output file settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Extension given to the output file when none is named
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: "parir".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    pub codegen: CodegenConfig,
    pub output: OutputConfig,
}

impl CompilerConfig {
    /// Parse configuration text; `origin` only names the source in errors
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text, path)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Look for `parlc.toml` in each directory in turn; the first one found
    /// wins. No file anywhere yields the defaults, a malformed one is an error.
    pub fn load_or_default<P: AsRef<Path>>(dirs: &[P]) -> Result<Self, ConfigError> {
        for dir in dirs {
            let candidate = dir.as_ref().join(CONFIG_FILE);
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        log::debug!("no {} found, using defaults", CONFIG_FILE);
        Ok(Self::default())
    }
}

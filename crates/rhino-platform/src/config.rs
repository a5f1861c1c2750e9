//! Layout configuration.
//!
//! Names the files the path builder points at. Every field has a default
//! matching the shipped package, so a config file only needs the keys it
//! overrides:
//!
//! ```toml
//! library-stem = "libpv_rhino"
//! model-file = "rhino_params.pv"
//! lib-dir = "lib"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, Result};

/// File naming used when building library and model paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Shared library file name without extension.
    pub library_stem: String,
    /// Model parameter file name.
    pub model_file: String,
    /// Top-level directory holding every prebuilt artifact.
    pub lib_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            library_stem: "libpv_rhino".into(),
            model_file: "rhino_params.pv".into(),
            lib_dir: "lib".into(),
        }
    }
}

impl LayoutConfig {
    /// Load a layout config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PlatformError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a layout config from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

//! Path builder.
//!
//! Joins the package root, a caller-chosen relative base, and the
//! platform-specific suffix into absolute artifact paths. Building a path
//! never touches the filesystem; whether the file exists is the caller's
//! concern.

use std::path::{Path, PathBuf};

use crate::config::LayoutConfig;
use crate::error::{PlatformError, Result};
use crate::platform::Platform;

/// Subdirectory of the library root holding platform-independent files.
pub const COMMON_DIR: &str = "common";

/// Resolves library and model paths for one platform under one package root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    platform: Platform,
    root: PathBuf,
    config: LayoutConfig,
}

impl Layout {
    /// Create a layout rooted at `root`, made absolute against the current directory.
    pub fn new(platform: Platform, root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            platform,
            root: std::path::absolute(root.as_ref())?,
            config: LayoutConfig::default(),
        })
    }

    /// Replace the file naming configuration.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Absolute path of the native library for this platform.
    pub fn library_path(&self, base: impl AsRef<Path>) -> Result<PathBuf> {
        let variant = self
            .platform
            .library_variant()
            .ok_or_else(|| PlatformError::UnsupportedPlatform {
                system: self.platform.system.to_string(),
                machine: self.platform.machine.to_string(),
            })?;
        Ok(self
            .root
            .join(base.as_ref())
            .join(variant.relative_path(&self.config)))
    }

    /// Absolute path of the model parameter file. The same for every platform.
    pub fn model_path(&self, base: impl AsRef<Path>) -> PathBuf {
        self.root
            .join(base.as_ref())
            .join(&self.config.lib_dir)
            .join(COMMON_DIR)
            .join(&self.config.model_file)
    }
}

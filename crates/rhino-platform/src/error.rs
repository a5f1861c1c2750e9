//! Error types for platform resolution and path building.

use std::path::PathBuf;

/// Errors that can occur while resolving the host platform or its library paths.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The host operating system is not one the native library ships for.
    #[error("unsupported system '{raw}'")]
    UnsupportedSystem {
        /// The raw OS name as reported by the host.
        raw: String,
    },

    /// No prebuilt library variant exists for the resolved system and machine.
    #[error("unsupported platform: no library variant for {system} / {machine}")]
    UnsupportedPlatform {
        /// Canonical system name.
        system: String,
        /// Resolved machine tag.
        machine: String,
    },

    /// A host probe source could not be queried.
    #[error("failed to query {source_name}: {message}")]
    Probe {
        /// The command or pseudo-file that was queried.
        source_name: String,
        /// What went wrong.
        message: String,
    },

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading layout configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Layout configuration file not found.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },
}

impl PlatformError {
    pub(crate) fn probe(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Probe {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

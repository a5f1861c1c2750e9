//! Host operating system identification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Operating systems the native library is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum System {
    #[serde(rename = "Darwin")]
    MacOS,
    Linux,
    Windows,
}

impl System {
    /// Every supported system, in table order.
    pub const ALL: [System; 3] = [System::MacOS, System::Linux, System::Windows];

    /// Canonical raw name, as the host kernel reports it.
    pub fn as_str(&self) -> &'static str {
        match self {
            System::MacOS => "Darwin",
            System::Linux => "Linux",
            System::Windows => "Windows",
        }
    }

    /// File extension of a shared library on this system (without the dot).
    pub fn library_extension(&self) -> &'static str {
        match self {
            System::MacOS => "dylib",
            System::Linux => "so",
            System::Windows => "dll",
        }
    }

    /// Map the compile-time target OS to a raw system name.
    ///
    /// Unsupported targets yield their Rust target name unchanged, so that
    /// parsing reports it as an unsupported system.
    pub fn host_raw_name() -> &'static str {
        match std::env::consts::OS {
            "macos" => "Darwin",
            "linux" => "Linux",
            "windows" => "Windows",
            other => other,
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for System {
    type Err = PlatformError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "darwin" | "macos" => Ok(System::MacOS),
            "linux" => Ok(System::Linux),
            "windows" => Ok(System::Windows),
            _ => Err(PlatformError::UnsupportedSystem {
                raw: raw.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_raw_names() {
        assert_eq!("Darwin".parse::<System>().unwrap(), System::MacOS);
        assert_eq!("macos".parse::<System>().unwrap(), System::MacOS);
        assert_eq!("Linux".parse::<System>().unwrap(), System::Linux);
        assert_eq!("WINDOWS".parse::<System>().unwrap(), System::Windows);
    }

    #[test]
    fn rejects_unknown_system() {
        let err = "PlanetOS".parse::<System>().unwrap_err();
        match err {
            PlatformError::UnsupportedSystem { raw } => assert_eq!(raw, "PlanetOS"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn display_round_trips() {
        for system in System::ALL {
            assert_eq!(system.to_string().parse::<System>().unwrap(), system);
        }
    }

    #[test]
    fn library_extensions() {
        assert_eq!(System::MacOS.library_extension(), "dylib");
        assert_eq!(System::Linux.library_extension(), "so");
        assert_eq!(System::Windows.library_extension(), "dll");
    }
}

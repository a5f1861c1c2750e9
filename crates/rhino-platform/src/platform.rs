//! Resolved host platform.
//!
//! A [`Platform`] is the `(system, machine)` pair computed once at startup
//! and handed to whatever needs it. It is never mutated after construction.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::machine::{self, Classification, CpuSignature, MachineTag};
use crate::probe::{cpu_part_token, model_name_token, HostProbe, SystemProbe};
use crate::system::System;
use crate::variant::LibraryVariant;

/// The host operating system and machine tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Platform {
    pub system: System,
    pub machine: MachineTag,
    /// Set when the Linux CPU was unrecognized and the fallback tag was used.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cpu_fallback: bool,
}

impl Platform {
    /// Compose a platform from an already known system and machine tag.
    pub fn compose(system: System, machine: impl Into<MachineTag>) -> Self {
        Self {
            system,
            machine: machine.into(),
            cpu_fallback: false,
        }
    }

    /// Resolve the running host.
    pub fn detect() -> Result<Self> {
        Self::resolve(&SystemProbe)
    }

    /// Resolve the platform from the facts reported by `probe`.
    pub fn resolve(probe: &dyn HostProbe) -> Result<Self> {
        let raw_os = probe.os_name()?;
        let system: System = raw_os.parse()?;
        let raw_machine = probe.machine()?;
        debug!("host reports system '{raw_os}', machine '{raw_machine}'");

        let platform = match system {
            System::MacOS | System::Windows => Self::compose(system, raw_machine.as_str()),
            System::Linux => {
                let classification = classify_linux(probe, &raw_machine)?;
                Self {
                    system,
                    machine: classification.tag,
                    cpu_fallback: !classification.recognized,
                }
            }
        };
        debug!("resolved platform {platform}");
        Ok(platform)
    }

    /// The prebuilt library variant for this platform, if one exists.
    pub fn library_variant(&self) -> Option<LibraryVariant> {
        LibraryVariant::for_platform(self)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.system, self.machine)
    }
}

/// Classify a Linux host's machine tag.
///
/// `x86_64` hosts are tagged directly without reading any CPU source.
pub fn classify_linux(probe: &dyn HostProbe, raw_machine: &str) -> Result<Classification> {
    if raw_machine == "x86_64" {
        return Ok(Classification {
            tag: MachineTag::new(raw_machine),
            recognized: true,
        });
    }

    let model_name = model_name_token(&probe.cpu_description()?);
    let cpu_part = cpu_part_token(&probe.cpu_info()?);
    debug!("cpu model name '{model_name}', cpu part '{cpu_part}'");

    let signature = CpuSignature::new(model_name, cpu_part.as_str());
    let classification = machine::classify(raw_machine, &signature);
    if !classification.recognized {
        warn!(
            "this device (CPU part = {cpu_part}) is not officially supported; using '{}'",
            classification.tag
        );
    }
    Ok(classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlatformError;
    use crate::probe::FixedProbe;

    #[test]
    fn linux_x86_64_skips_cpu_sources() {
        let probe = FixedProbe::new("Linux", "x86_64");
        let platform = Platform::resolve(&probe).unwrap();
        assert_eq!(platform, Platform::compose(System::Linux, "x86_64"));
        assert_eq!(probe.cpu_description_calls(), 0);
        assert_eq!(probe.cpu_info_calls(), 0);
    }

    #[test]
    fn aarch64_cortex_a53() {
        let probe = FixedProbe::new("Linux", "aarch64").with_cpu("", "0xd03");
        let platform = Platform::resolve(&probe).unwrap();
        assert_eq!(platform.machine, "cortex-a53-aarch64");
        assert!(!platform.cpu_fallback);
    }

    #[test]
    fn unknown_cpu_uses_fallback() {
        let probe = FixedProbe::new("Linux", "armv7l").with_cpu("cortex-x9", "0xabc");
        let platform = Platform::resolve(&probe).unwrap();
        assert_eq!(platform.machine, "arm11");
        assert!(platform.cpu_fallback);
    }

    #[test]
    fn macos_and_windows_use_raw_machine() {
        let mac = Platform::resolve(&FixedProbe::new("Darwin", "arm64")).unwrap();
        assert_eq!(mac, Platform::compose(System::MacOS, "arm64"));

        let probe = FixedProbe::new("Windows", "AMD64");
        let win = Platform::resolve(&probe).unwrap();
        assert_eq!(win.machine, "AMD64");
        assert_eq!(probe.cpu_info_calls(), 0);
    }

    #[test]
    fn unsupported_system_fails_first() {
        let probe = FixedProbe::new("PlanetOS", "x86_64");
        let err = Platform::resolve(&probe).unwrap_err();
        assert!(matches!(err, PlatformError::UnsupportedSystem { ref raw } if raw == "PlanetOS"));
    }

    #[test]
    fn missing_cpu_source_is_probe_error() {
        let probe = FixedProbe::new("Linux", "armv7l");
        assert!(matches!(
            Platform::resolve(&probe),
            Err(PlatformError::Probe { .. })
        ));
    }

    #[test]
    fn serializes_to_toml_and_json() {
        let platform = Platform::compose(System::MacOS, "x86_64");
        let toml_str = platform.to_toml().unwrap();
        assert!(toml_str.contains("system = \"Darwin\""));
        assert!(!toml_str.contains("cpu-fallback"));

        let parsed: Platform = serde_json::from_str(&platform.to_json().unwrap()).unwrap();
        assert_eq!(parsed, platform);
    }

    #[test]
    fn display_joins_system_and_machine() {
        let platform = Platform::compose(System::Linux, "beaglebone");
        assert_eq!(platform.to_string(), "Linux/beaglebone");
    }
}

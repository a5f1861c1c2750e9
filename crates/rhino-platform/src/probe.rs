//! Host probing.
//!
//! [`HostProbe`] is the seam between platform resolution and the machine it
//! runs on. [`SystemProbe`] queries the real host; [`FixedProbe`] serves
//! fixture data so resolution can be exercised for any board.
//!
//! No function in this module panics. Failures to spawn `lscpu` or read
//! `/proc/cpuinfo` surface as [`PlatformError::Probe`].

use std::cell::Cell;
use std::fs;
use std::process::Command;

use crate::error::{PlatformError, Result};
use crate::system::System;

/// Command used to describe the CPU on Linux.
pub const CPU_DESCRIPTION_COMMAND: &str = "lscpu";

/// Pseudo-file exposing CPU identification on Linux.
pub const CPU_INFO_PATH: &str = "/proc/cpuinfo";

/// Raw host facts needed to resolve the platform.
pub trait HostProbe {
    /// Raw operating system name (e.g. "Linux", "Darwin").
    fn os_name(&self) -> Result<String>;

    /// Raw machine architecture (e.g. "x86_64", "aarch64", "armv7l").
    fn machine(&self) -> Result<String>;

    /// Output of the CPU-description command.
    fn cpu_description(&self) -> Result<String>;

    /// Contents of the CPU identification pseudo-file.
    fn cpu_info(&self) -> Result<String>;
}

/// Last whitespace-separated token of the first line containing `key`, lower-cased.
///
/// Returns an empty string when no line contains `key`.
pub fn field_token(text: &str, key: &str) -> String {
    text.lines()
        .find(|line| line.contains(key))
        .and_then(|line| line.split_whitespace().last())
        .map(|token| token.to_lowercase())
        .unwrap_or_default()
}

/// Model name token from `lscpu` output (e.g. "cortex-a72").
pub fn model_name_token(cpu_description: &str) -> String {
    field_token(cpu_description, "Model name")
}

/// CPU part code from `/proc/cpuinfo` (e.g. "0xd08").
pub fn cpu_part_token(cpu_info: &str) -> String {
    field_token(cpu_info, "CPU part")
}

/// Probe backed by the running host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl HostProbe for SystemProbe {
    fn os_name(&self) -> Result<String> {
        Ok(System::host_raw_name().to_string())
    }

    fn machine(&self) -> Result<String> {
        Ok(host_machine())
    }

    fn cpu_description(&self) -> Result<String> {
        let output = cpu_description_command()
            .output()
            .map_err(|e| PlatformError::probe(CPU_DESCRIPTION_COMMAND, e))?;
        if !output.status.success() {
            return Err(PlatformError::probe(
                CPU_DESCRIPTION_COMMAND,
                format!("exited with {}", output.status),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn cpu_info(&self) -> Result<String> {
        fs::read_to_string(CPU_INFO_PATH).map_err(|e| PlatformError::probe(CPU_INFO_PATH, e))
    }
}

/// `lscpu` invocation with field names pinned to the C locale.
fn cpu_description_command() -> Command {
    let mut command = Command::new(CPU_DESCRIPTION_COMMAND);
    command.env("LC_ALL", "C");
    command
}

#[cfg(unix)]
fn host_machine() -> String {
    // Kernel view: a 32-bit userland on a 64-bit kernel reports the kernel arch.
    nix::sys::utsname::uname()
        .ok()
        .map(|uts| uts.machine().to_string_lossy().trim().to_string())
        .filter(|machine| !machine.is_empty())
        .unwrap_or_else(|| std::env::consts::ARCH.to_string())
}

#[cfg(windows)]
fn host_machine() -> String {
    std::env::var("PROCESSOR_ARCHITECTURE")
        .ok()
        .filter(|machine| !machine.is_empty())
        .unwrap_or_else(|| match std::env::consts::ARCH {
            "x86_64" => "AMD64".to_string(),
            other => other.to_string(),
        })
}

#[cfg(not(any(unix, windows)))]
fn host_machine() -> String {
    std::env::consts::ARCH.to_string()
}

/// Probe serving fixed host facts, recording how often the CPU sources are read.
#[derive(Debug, Clone, Default)]
pub struct FixedProbe {
    os_name: String,
    machine: String,
    cpu_description: Option<String>,
    cpu_info: Option<String>,
    cpu_description_calls: Cell<usize>,
    cpu_info_calls: Cell<usize>,
}

impl FixedProbe {
    pub fn new(os_name: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            os_name: os_name.into(),
            machine: machine.into(),
            ..Self::default()
        }
    }

    /// Set the CPU-description command output.
    pub fn with_cpu_description(mut self, text: impl Into<String>) -> Self {
        self.cpu_description = Some(text.into());
        self
    }

    /// Set the CPU identification pseudo-file contents.
    pub fn with_cpu_info(mut self, text: impl Into<String>) -> Self {
        self.cpu_info = Some(text.into());
        self
    }

    /// Shorthand for fixture data carrying only a model name and a CPU part.
    pub fn with_cpu(self, model_name: &str, cpu_part: &str) -> Self {
        let mut description = format!("Architecture:        {}\n", self.machine);
        if !model_name.is_empty() {
            description.push_str(&format!("Model name:          {model_name}\n"));
        }
        let mut info = String::from("processor\t: 0\n");
        if !cpu_part.is_empty() {
            info.push_str(&format!("CPU part\t: {cpu_part}\n"));
        }
        self.with_cpu_description(description).with_cpu_info(info)
    }

    pub fn cpu_description_calls(&self) -> usize {
        self.cpu_description_calls.get()
    }

    pub fn cpu_info_calls(&self) -> usize {
        self.cpu_info_calls.get()
    }
}

impl HostProbe for FixedProbe {
    fn os_name(&self) -> Result<String> {
        Ok(self.os_name.clone())
    }

    fn machine(&self) -> Result<String> {
        Ok(self.machine.clone())
    }

    fn cpu_description(&self) -> Result<String> {
        self.cpu_description_calls.set(self.cpu_description_calls.get() + 1);
        self.cpu_description
            .clone()
            .ok_or_else(|| PlatformError::probe(CPU_DESCRIPTION_COMMAND, "no fixture data"))
    }

    fn cpu_info(&self) -> Result<String> {
        self.cpu_info_calls.set(self.cpu_info_calls.get() + 1);
        self.cpu_info
            .clone()
            .ok_or_else(|| PlatformError::probe(CPU_INFO_PATH, "no fixture data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LSCPU_PI4: &str = "\
Architecture:                    aarch64
CPU op-mode(s):                  32-bit, 64-bit
Byte Order:                      Little Endian
CPU(s):                          4
Vendor ID:                       ARM
Model:                           3
Model name:                      Cortex-A72
Stepping:                        r0p3
";

    const CPUINFO_PI3: &str = "\
processor\t: 0
BogoMIPS\t: 38.40
Features\t: fp asimd evtstrm crc32 cpuid
CPU implementer\t: 0x41
CPU architecture: 8
CPU variant\t: 0x0
CPU part\t: 0xD03
CPU revision\t: 4
";

    #[test]
    fn model_name_from_lscpu() {
        assert_eq!(model_name_token(LSCPU_PI4), "cortex-a72");
    }

    #[test]
    fn cpu_part_from_cpuinfo() {
        assert_eq!(cpu_part_token(CPUINFO_PI3), "0xd03");
    }

    #[test]
    fn missing_field_is_empty() {
        assert_eq!(cpu_part_token(LSCPU_PI4), "");
        assert_eq!(model_name_token(""), "");
    }

    #[test]
    fn fixed_probe_counts_cpu_reads() {
        let probe = FixedProbe::new("Linux", "armv7l").with_cpu("cortex-a7", "0xc07");
        assert_eq!(probe.cpu_description_calls(), 0);
        let text = probe.cpu_description().unwrap();
        assert_eq!(model_name_token(&text), "cortex-a7");
        assert_eq!(cpu_part_token(&probe.cpu_info().unwrap()), "0xc07");
        assert_eq!(probe.cpu_description_calls(), 1);
        assert_eq!(probe.cpu_info_calls(), 1);
    }

    #[test]
    fn fixed_probe_without_cpu_data_errors() {
        let probe = FixedProbe::new("Linux", "armv7l");
        assert!(matches!(probe.cpu_info(), Err(PlatformError::Probe { .. })));
    }

    #[test]
    fn system_probe_reports_os() {
        assert!(!SystemProbe.os_name().unwrap().is_empty());
        assert!(!SystemProbe.machine().unwrap().is_empty());
    }

    #[test]
    fn lscpu_runs_in_c_locale() {
        let command = cpu_description_command();
        assert_eq!(command.get_program(), CPU_DESCRIPTION_COMMAND);
        let lc_all = command
            .get_envs()
            .find(|(key, _)| key.to_str() == Some("LC_ALL"))
            .and_then(|(_, value)| value);
        assert_eq!(lc_all, Some(std::ffi::OsStr::new("C")));
    }

    #[cfg(unix)]
    #[test]
    fn machine_ignores_uname_on_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("uname");
        std::fs::write(&fake, "#!/bin/sh\necho spawned-uname\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let saved = std::env::var_os("PATH");
        std::env::set_var("PATH", dir.path());
        let machine = SystemProbe.machine();
        match saved {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }

        let machine = machine.unwrap();
        assert_ne!(machine, "spawned-uname");
        let expected = nix::sys::utsname::uname().unwrap();
        assert_eq!(machine, expected.machine().to_string_lossy().trim());
    }
}

//! Host options shared by every command: where the package lives, how its
//! files are named, and which host facts to override.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use rhino_platform::{HostProbe, Layout, LayoutConfig, Platform, SystemProbe};

/// Global command-line options.
#[derive(Debug, Clone, Default)]
pub struct HostOptions {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub os: Option<String>,
    pub arch: Option<String>,
    pub cpu_description_file: Option<PathBuf>,
    pub cpuinfo_file: Option<PathBuf>,
}

impl HostOptions {
    /// Resolve the platform, honoring any host fact overrides.
    pub fn platform(&self) -> Result<Platform> {
        let probe = OverrideProbe::from_options(self)?;
        Platform::resolve(&probe).context("resolving host platform")
    }

    /// Load the layout config, or the default when none was given.
    pub fn layout_config(&self) -> Result<LayoutConfig> {
        match &self.config {
            Some(path) => LayoutConfig::load(path)
                .with_context(|| format!("loading {}", path.display())),
            None => Ok(LayoutConfig::default()),
        }
    }

    /// Build the path layout for the resolved platform.
    pub fn layout(&self) -> Result<Layout> {
        let platform = self.platform()?;
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        let layout = Layout::new(platform, &root)
            .with_context(|| format!("using package root {}", root.display()))?;
        debug!("package root {}", layout.root().display());
        Ok(layout.with_config(self.layout_config()?))
    }
}

/// Probe that answers from overrides where given and from the real host otherwise.
struct OverrideProbe {
    os: Option<String>,
    arch: Option<String>,
    cpu_description: Option<String>,
    cpu_info: Option<String>,
}

impl OverrideProbe {
    fn from_options(options: &HostOptions) -> Result<Self> {
        Ok(Self {
            os: options.os.clone(),
            arch: options.arch.clone(),
            cpu_description: read_optional(options.cpu_description_file.as_deref())?,
            cpu_info: read_optional(options.cpuinfo_file.as_deref())?,
        })
    }
}

fn read_optional(path: Option<&Path>) -> Result<Option<String>> {
    path.map(|p| {
        std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
    })
    .transpose()
}

impl HostProbe for OverrideProbe {
    fn os_name(&self) -> rhino_platform::Result<String> {
        match &self.os {
            Some(os) => Ok(os.clone()),
            None => SystemProbe.os_name(),
        }
    }

    fn machine(&self) -> rhino_platform::Result<String> {
        match &self.arch {
            Some(arch) => Ok(arch.clone()),
            None => SystemProbe.machine(),
        }
    }

    fn cpu_description(&self) -> rhino_platform::Result<String> {
        match &self.cpu_description {
            Some(text) => Ok(text.clone()),
            None => SystemProbe.cpu_description(),
        }
    }

    fn cpu_info(&self) -> rhino_platform::Result<String> {
        match &self.cpu_info {
            Some(text) => Ok(text.clone()),
            None => SystemProbe.cpu_info(),
        }
    }
}

/// Options resolving as a Raspberry Pi 4 running a 32-bit OS, rooted at `dir`.
#[cfg(test)]
pub(crate) fn linux_pi_fixture(dir: &Path) -> HostOptions {
    let info = dir.join("cpuinfo");
    let description = dir.join("lscpu.txt");
    std::fs::write(&info, "processor\t: 0\nCPU part\t: 0xd08\n").unwrap();
    std::fs::write(&description, "Architecture: armv7l\n").unwrap();
    HostOptions {
        root: Some(dir.to_path_buf()),
        os: Some("Linux".into()),
        arch: Some("armv7l".into()),
        cpu_description_file: Some(description),
        cpuinfo_file: Some(info),
        ..HostOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_drive_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let platform = linux_pi_fixture(dir.path()).platform().unwrap();
        assert_eq!(platform.machine, "cortex-a72");
    }

    #[test]
    fn unsupported_os_override_fails() {
        let options = HostOptions {
            os: Some("PlanetOS".into()),
            ..HostOptions::default()
        };
        let err = options.platform().unwrap_err();
        assert!(format!("{err:#}").contains("PlanetOS"));
    }

    #[test]
    fn missing_cpuinfo_file_is_reported() {
        let options = HostOptions {
            cpuinfo_file: Some(PathBuf::from("/nonexistent/cpuinfo")),
            ..HostOptions::default()
        };
        assert!(options.platform().is_err());
    }

    #[test]
    fn layout_uses_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("layout.toml");
        std::fs::write(&config, "library-stem = \"libpv_rhino_custom\"\n").unwrap();
        let options = HostOptions {
            config: Some(config),
            ..linux_pi_fixture(dir.path())
        };
        let layout = options.layout().unwrap();
        assert!(layout
            .library_path("")
            .unwrap()
            .ends_with("lib/raspberry-pi/cortex-a72/libpv_rhino_custom.so"));
    }
}

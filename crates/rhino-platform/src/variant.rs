//! Prebuilt library variants and their on-disk layout.

use std::fmt;
use std::path::PathBuf;

use crate::config::LayoutConfig;
use crate::machine::MachineTag;
use crate::platform::Platform;
use crate::system::System;

/// Machine tags served by the Jetson builds.
pub const JETSON_MACHINES: [&str; 1] = ["cortex-a57-aarch64"];

/// Machine tags served by the Raspberry Pi builds.
pub const RASPBERRY_PI_MACHINES: [&str; 6] = [
    "arm11",
    "cortex-a7",
    "cortex-a53",
    "cortex-a72",
    "cortex-a53-aarch64",
    "cortex-a72-aarch64",
];

/// A prebuilt native library artifact for one (system, CPU family) combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LibraryVariant {
    MacX86_64,
    LinuxX86_64,
    /// NVIDIA Jetson boards, one build per machine tag.
    Jetson(MachineTag),
    /// Raspberry Pi boards, one build per machine tag.
    RaspberryPi(MachineTag),
    Beaglebone,
    WindowsAmd64,
}

impl LibraryVariant {
    /// Look up the variant for a resolved platform.
    ///
    /// macOS and Windows ship a single build each, whatever the machine.
    pub fn for_platform(platform: &Platform) -> Option<Self> {
        let machine = platform.machine.as_str();
        match platform.system {
            System::MacOS => Some(Self::MacX86_64),
            System::Windows => Some(Self::WindowsAmd64),
            System::Linux if machine == "x86_64" => Some(Self::LinuxX86_64),
            System::Linux if JETSON_MACHINES.contains(&machine) => {
                Some(Self::Jetson(platform.machine.clone()))
            }
            System::Linux if RASPBERRY_PI_MACHINES.contains(&machine) => {
                Some(Self::RaspberryPi(platform.machine.clone()))
            }
            System::Linux if machine == "beaglebone" => Some(Self::Beaglebone),
            System::Linux => None,
        }
    }

    /// Operating system the variant runs on.
    pub fn system(&self) -> System {
        match self {
            Self::MacX86_64 => System::MacOS,
            Self::WindowsAmd64 => System::Windows,
            Self::LinuxX86_64 | Self::Jetson(_) | Self::RaspberryPi(_) | Self::Beaglebone => {
                System::Linux
            }
        }
    }

    /// Directory name of the platform family under the library root.
    pub fn family(&self) -> &'static str {
        match self {
            Self::MacX86_64 => "mac",
            Self::LinuxX86_64 => "linux",
            Self::Jetson(_) => "jetson",
            Self::RaspberryPi(_) => "raspberry-pi",
            Self::Beaglebone => "beaglebone",
            Self::WindowsAmd64 => "windows",
        }
    }

    /// Library file path relative to the package base, e.g.
    /// `lib/raspberry-pi/cortex-a72/libpv_rhino.so`.
    pub fn relative_path(&self, config: &LayoutConfig) -> PathBuf {
        let mut path = PathBuf::from(&config.lib_dir);
        path.push(self.family());
        match self {
            Self::MacX86_64 | Self::LinuxX86_64 => path.push("x86_64"),
            Self::WindowsAmd64 => path.push("amd64"),
            Self::Jetson(machine) | Self::RaspberryPi(machine) => path.push(machine.as_str()),
            Self::Beaglebone => {}
        }
        path.push(format!(
            "{}.{}",
            config.library_stem,
            self.system().library_extension()
        ));
        path
    }
}

impl fmt::Display for LibraryVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jetson(machine) | Self::RaspberryPi(machine) => {
                write!(f, "{}/{}", self.family(), machine)
            }
            _ => f.write_str(self.family()),
        }
    }
}

/// Every variant the lookup table can produce.
pub fn supported_variants() -> Vec<LibraryVariant> {
    let mut variants = vec![LibraryVariant::MacX86_64, LibraryVariant::LinuxX86_64];
    variants.extend(JETSON_MACHINES.iter().map(|m| LibraryVariant::Jetson((*m).into())));
    variants.extend(
        RASPBERRY_PI_MACHINES
            .iter()
            .map(|m| LibraryVariant::RaspberryPi((*m).into())),
    );
    variants.push(LibraryVariant::Beaglebone);
    variants.push(LibraryVariant::WindowsAmd64);
    variants
}

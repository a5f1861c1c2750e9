//! Host platform detection and native library path resolution for the Rhino
//! speech-to-intent binding.
//!
//! Resolution happens in two steps:
//! - **Platform:** the operating system and a machine tag naming the CPU
//!   family, resolved once from a [`HostProbe`].
//! - **Layout:** the absolute paths of the matching prebuilt shared library
//!   and of the platform-independent model file.
//!
//! ```no_run
//! use rhino_platform::{Layout, Platform};
//!
//! let platform = Platform::detect()?;
//! let layout = Layout::new(platform, "/opt/rhino")?;
//! println!("{}", layout.library_path("..")?.display());
//! println!("{}", layout.model_path("..").display());
//! # Ok::<(), rhino_platform::PlatformError>(())
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod machine;
pub mod platform;
pub mod probe;
pub mod system;
pub mod variant;

pub use config::LayoutConfig;
pub use error::{PlatformError, Result};
pub use layout::Layout;
pub use machine::MachineTag;
pub use platform::Platform;
pub use probe::{FixedProbe, HostProbe, SystemProbe};
pub use system::System;
pub use variant::{supported_variants, LibraryVariant};

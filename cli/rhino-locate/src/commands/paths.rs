//! `rhino-locate library-path` / `model-path`.

use std::path::Path;

use anyhow::Result;

use crate::host::HostOptions;

/// Print the native library path for the resolved platform.
pub fn library(host: &HostOptions, base: &Path) -> Result<()> {
    let layout = host.layout()?;
    println!("{}", layout.library_path(base)?.display());
    Ok(())
}

/// Print the model parameter file path.
pub fn model(host: &HostOptions, base: &Path) -> Result<()> {
    let layout = host.layout()?;
    println!("{}", layout.model_path(base).display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::linux_pi_fixture;

    #[test]
    fn library_path_for_fixture() {
        let dir = tempfile::tempdir().unwrap();
        library(&linux_pi_fixture(dir.path()), Path::new("..")).unwrap();
    }

    #[test]
    fn unsupported_platform_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let info = dir.path().join("cpuinfo-a57");
        std::fs::write(&info, "CPU part\t: 0xd07\n").unwrap();
        let host = HostOptions {
            cpuinfo_file: Some(info),
            ..linux_pi_fixture(dir.path())
        };
        let err = library(&host, Path::new("")).unwrap_err();
        assert!(err.to_string().contains("unsupported platform"));
    }

    #[test]
    fn model_path_for_fixture() {
        let dir = tempfile::tempdir().unwrap();
        model(&linux_pi_fixture(dir.path()), Path::new("")).unwrap();
    }
}

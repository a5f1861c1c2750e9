//! `rhino-locate doctor` — resolution and artifact diagnostics.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use rhino_platform::probe::CPU_DESCRIPTION_COMMAND;
use rhino_platform::Layout;

use crate::host::HostOptions;

/// Outcome of resolving and checking the artifacts for one base directory.
#[derive(Debug)]
pub struct DoctorReport {
    /// Library path, or the reason none could be built.
    pub library: std::result::Result<PathBuf, String>,
    pub model: PathBuf,
}

impl DoctorReport {
    /// Whether both artifacts resolved and exist on disk.
    pub fn healthy(&self) -> bool {
        matches!(&self.library, Ok(path) if path.is_file()) && self.model.is_file()
    }
}

/// Resolve both artifact paths for `base`.
pub fn check(layout: &Layout, base: &Path) -> DoctorReport {
    DoctorReport {
        library: layout.library_path(base).map_err(|e| e.to_string()),
        model: layout.model_path(base),
    }
}

/// Print diagnostic information about platform resolution.
pub fn run(host: &HostOptions, base: &Path) -> Result<()> {
    let layout = host.layout()?;
    report(&layout, base);
    Ok(())
}

/// Print the diagnostics for an already resolved layout.
pub fn report(layout: &Layout, base: &Path) {
    println!("=== Rhino Locate Doctor ===");
    println!();

    println!("rhino-locate version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- System Tools ---");
    print_tool_status(CPU_DESCRIPTION_COMMAND, &["--version"]);
    println!();

    println!("--- Platform ---");
    let platform = layout.platform();
    println!("  System:  {}", platform.system);
    println!("  Machine: {}", platform.machine);
    if platform.cpu_fallback {
        println!("  warning: CPU not recognized; the selected library may not run on this device");
    }
    println!();

    println!("--- Artifacts ---");
    let report = check(layout, base);
    match &report.library {
        Ok(path) => println!("  Library: {} [{}]", path.display(), presence(path)),
        Err(reason) => println!("  Library: {reason}"),
    }
    println!("  Model:   {} [{}]", report.model.display(), presence(&report.model));
    println!();
    println!(
        "Status: {}",
        if report.healthy() { "ok" } else { "incomplete" }
    );
}

fn presence(path: &Path) -> &'static str {
    if path.is_file() {
        "found"
    } else {
        "missing"
    }
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}

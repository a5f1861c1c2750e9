//! `rhino-locate platform` — show the resolved host platform.

use anyhow::{bail, Result};

use crate::host::HostOptions;

/// Print the resolved platform in the requested format.
pub fn run(host: &HostOptions, format: Option<&str>) -> Result<()> {
    let platform = host.platform()?;
    match format.unwrap_or("text") {
        "text" => {
            println!("System:  {}", platform.system);
            println!("Machine: {}", platform.machine);
            match platform.library_variant() {
                Some(variant) => println!("Variant: {variant}"),
                None => println!("Variant: (none)"),
            }
            if platform.cpu_fallback {
                println!("Note:    CPU not recognized; fallback machine tag in use");
            }
        }
        "toml" => print!("{}", platform.to_toml()?),
        "json" => println!("{}", platform.to_json()?),
        other => bail!("unknown format '{other}' (expected text, toml, or json)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::linux_pi_fixture;

    #[test]
    fn every_format_renders() {
        let dir = tempfile::tempdir().unwrap();
        let host = linux_pi_fixture(dir.path());
        for format in [None, Some("text"), Some("toml"), Some("json")] {
            run(&host, format).unwrap();
        }
    }

    #[test]
    fn unknown_format_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&linux_pi_fixture(dir.path()), Some("yaml")).is_err());
    }
}

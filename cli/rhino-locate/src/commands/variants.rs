//! `rhino-locate variants` — list every prebuilt library variant.

use anyhow::Result;
use rhino_platform::supported_variants;

use crate::host::HostOptions;

/// List all variants with their paths relative to the package base.
pub fn list(host: &HostOptions) -> Result<()> {
    let config = host.layout_config()?;
    println!("Library variants:");
    println!();
    for variant in supported_variants() {
        let variant_name = variant.to_string();
        println!(
            "  {:<8} {variant_name:<32} {}",
            variant.system(),
            variant.relative_path(&config).display()
        );
    }
    println!();
    println!("Model file: {}/common/{}", config.lib_dir, config.model_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_with_default_config() {
        assert!(list(&HostOptions::default()).is_ok());
    }

    #[test]
    fn missing_config_fails() {
        let host = HostOptions {
            config: Some("/nonexistent/layout.toml".into()),
            ..HostOptions::default()
        };
        assert!(list(&host).is_err());
    }
}

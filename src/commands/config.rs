//! Config subcommands handler

use std::path::Path;

use anyhow::{bail, Result};

use lipcue::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration to `path` or the default location.
///
/// An existing file is left alone unless `force` is set.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };
    if path.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let config = Config::default();
    config.save_to(&path)?;
    print_preview(&config.to_toml()?);
    println!();
    println!("Wrote {}", path.display());
    Ok(())
}

/// Print written content as diff-style additions.
fn print_preview(content: &str) {
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        println!("+ {}", line);
    }
}

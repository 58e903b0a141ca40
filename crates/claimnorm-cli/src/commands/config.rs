//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigAction::Init { force } => {
            if init_config(path, force)? {
                println!(
                    "{}",
                    formatter.success(&format!("Wrote default configuration to {}", path.display()))
                );
            } else {
                println!(
                    "{}",
                    formatter.warning(&format!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    ))
                );
            }
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Write the default configuration; returns false if a file was left in place.
fn init_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    Config::default().save_to(path)?;
    Ok(true)
}

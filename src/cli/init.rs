//! Init command implementation.
//!
//! Writes a `wiggle.yaml` holding the default canvas settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{CanvasConfig, CONFIG_FILENAME};
use crate::error::{Result, WiggleError};
use crate::output::{display_path, Printer};

/// Write a default wiggle.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing wiggle.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<PathBuf> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(WiggleError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let mut yaml = String::from("# wiggle canvas settings\n");
    yaml.push_str(&CanvasConfig::default().to_yaml()?);

    fs::write(&config_path, yaml).map_err(|e| WiggleError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.status("Created", &display_path(&config_path));
    Ok(config_path)
}

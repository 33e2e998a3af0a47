//! Canvas configuration (wiggle.yaml).
//!
//! Every field has a default, so an empty file or no file at all yields the
//! classic 400x400 white canvas with a black pencil.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WiggleError};
use crate::types::Colour;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "wiggle.yaml";

/// Canvas settings loaded from wiggle.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Surface width in pixels.
    pub width: u32,

    /// Surface height in pixels.
    pub height: u32,

    /// Initial pencil colour.
    pub pencil: Colour,

    /// Initial background colour.
    pub background: Colour,

    /// Pencil colours offered by the host (keys 1-9 in the window).
    pub palette: Vec<Colour>,

    /// Milliseconds between animation repaints.
    pub frame_interval_ms: u64,

    /// Maximum distance between pixels placed along a drag.
    pub spacing: f64,

    pub export: ExportSettings,
}

/// GIF export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Number of frames captured.
    pub frames: usize,

    /// Delay of each frame in milliseconds.
    pub delay_ms: u64,

    /// Encoder worker threads; 0 encodes on the calling thread.
    pub workers: usize,

    /// Encoder quality, 1 (best, slowest) to 30.
    pub quality: u8,

    /// Directory exported files are written to.
    pub output: PathBuf,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            pencil: Colour::BLACK,
            background: Colour::WHITE,
            palette: vec![
                Colour::BLACK,
                Colour::rgb(0xE6, 0x39, 0x46),
                Colour::rgb(0xF4, 0xA2, 0x61),
                Colour::rgb(0xE9, 0xC4, 0x6A),
                Colour::rgb(0x2A, 0x9D, 0x8F),
                Colour::rgb(0x45, 0x7B, 0x9D),
                Colour::rgb(0x7B, 0x2C, 0xBF),
                Colour::WHITE,
            ],
            frame_interval_ms: 60,
            spacing: 2.0,
            export: ExportSettings::default(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            frames: crate::export::DEFAULT_EXPORT_FRAMES,
            delay_ms: 60,
            workers: 2,
            quality: 10,
            output: PathBuf::from("."),
        }
    }
}

impl ExportSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl CanvasConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| WiggleError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `path` when given; otherwise `wiggle.yaml` if present, else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(CONFIG_FILENAME);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| WiggleError::Config {
                message: format!("Invalid config: {}", e),
                help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
            })?
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WiggleError::Config {
                message: format!("Canvas size {}x{} is empty", self.width, self.height),
                help: Some("width and height must be at least 1".to_string()),
            });
        }
        if !(self.spacing > 0.0) {
            return Err(WiggleError::Config {
                message: format!("Invalid spacing: {}", self.spacing),
                help: Some("spacing must be a positive number".to_string()),
            });
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Render the config back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| WiggleError::Config {
            message: format!("Failed to serialise config: {}", e),
            help: None,
        })
    }
}

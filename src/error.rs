use miette::Diagnostic;
use thiserror::Error;

/// Main error type for wiggle operations
#[derive(Error, Diagnostic, Debug)]
pub enum WiggleError {
    #[error("IO error: {0}")]
    #[diagnostic(code(wiggle::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(wiggle::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Setup error: {message}")]
    #[diagnostic(code(wiggle::setup))]
    Setup {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(wiggle::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(wiggle::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error(transparent)]
    #[diagnostic(code(wiggle::export))]
    Export(#[from] ExportError),
}

/// Failure reported by an animated-image encoder.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("encoding aborted: {reason}")]
    #[diagnostic(code(wiggle::export::aborted), help("The canvas is still usable; try exporting again"))]
    Aborted { reason: String },
}

impl ExportError {
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self::Aborted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WiggleError>;

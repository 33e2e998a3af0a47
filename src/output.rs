//! Terminal status output for the wiggle CLI.
//!
//! Cargo-style lines with a right-aligned coloured verb. Status goes to
//! stderr; stdout is kept for state dumps and listings.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const VERB_WIDTH: usize = 12;

/// Status printer; colour is on when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "    Exported wigglecanvas-2024-05-06T07-08-09.123Z.gif (3 frames)"
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(CYAN, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(RED, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn emit(&self, color: &str, verb: &str, message: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", self.line(color, verb, message));
    }

    fn line(&self, color: &str, verb: &str, message: &str) -> String {
        let verb = format!("{verb:>VERB_WIDTH$}");
        format!("{} {message}", self.paint(&format!("{BOLD}{color}"), &verb))
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// `plural(3, "frame", "frames")` → "3 frames".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { pluralized })
}

/// Relative to the working directory when possible.
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(|p| p.display().to_string()))
        .map(|s| if s.is_empty() { ".".to_string() } else { s })
        .unwrap_or_else(|| path.display().to_string())
}

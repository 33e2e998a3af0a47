pub mod completions;
pub mod draw;
pub mod init;
pub mod replay;
pub mod shapes;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// wiggle - a pixel canvas where every mark wiggles
#[derive(Parser, Debug)]
#[command(name = "wiggle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Canvas config file (default: ./wiggle.yaml if present)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the drawing window
    Draw(draw::DrawArgs),

    /// Replay an event script and export the animation as a GIF
    Replay(replay::ReplayArgs),

    /// List the built-in wiggle shapes
    Shapes(shapes::ShapesArgs),

    /// Write a default wiggle.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

//! Replay command implementation.
//!
//! Runs an event script through a headless canvas and writes the GIF.

use std::path::PathBuf;

use clap::Args;

use crate::config::CanvasConfig;
use crate::controller::Controller;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::script::{Replayer, Script};

/// Replay an event script and export the animation as a GIF
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Script of pointer events (YAML or JSON)
    pub script: PathBuf,

    /// Output file (default: timestamped name in the export directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Seed for shape selection, for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of exported frames
    #[arg(long)]
    pub frames: Option<usize>,

    /// Delay between exported frames in milliseconds
    #[arg(long)]
    pub delay: Option<u64>,

    /// Print the final pixel state as JSON to stdout
    #[arg(long)]
    pub dump: bool,
}

pub fn run(args: ReplayArgs, mut config: CanvasConfig, printer: &Printer) -> Result<PathBuf> {
    let script = Script::load(&args.script)?;

    if let Some(frames) = args.frames {
        config.export.frames = frames;
    }
    if let Some(delay) = args.delay {
        config.export.delay_ms = delay;
    }

    let mut controller = match args.seed {
        Some(seed) => Controller::with_seed(&config, seed),
        None => Controller::new(&config),
    };

    let mut replayer = Replayer::new();
    replayer.run(&script, &mut controller);
    printer.status(
        "Replayed",
        &format!(
            "{} ({})",
            display_path(&args.script),
            plural(controller.pixels().len(), "pixel", "pixels")
        ),
    );

    if controller.pixels().is_empty() {
        printer.warning("Empty", "script placed no pixels; the export will be blank");
    }

    if args.dump {
        println!("{}", controller.dump_state()?);
    }

    let image = controller.export_gif(&config.export)?;
    let path = match &args.output {
        Some(path) => {
            image.save_to(path)?;
            path.clone()
        }
        None => image.save_in(&config.export.output)?,
    };

    printer.status(
        "Exported",
        &format!(
            "{} ({})",
            display_path(&path),
            plural(config.export.frames, "frame", "frames")
        ),
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::AnimationDecoder;

    #[test]
    fn test_replay_writes_gif() {
        let dir = tempfile::tempdir().unwrap();
        let script_path = dir.path().join("stroke.yaml");
        std::fs::write(
            &script_path,
            "events:\n  - down: { x: 4, y: 4 }\n  - move: { x: 12, y: 4 }\n  - up\n",
        )
        .unwrap();
        let output = dir.path().join("out.gif");

        let config = CanvasConfig {
            width: 16,
            height: 16,
            ..CanvasConfig::default()
        };
        let args = ReplayArgs {
            script: script_path,
            output: Some(output.clone()),
            seed: Some(1),
            frames: Some(4),
            delay: None,
            dump: false,
        };

        let written = run(args, config, &Printer::plain()).unwrap();
        assert_eq!(written, output);

        let file = std::fs::File::open(&output).unwrap();
        let decoder = image::codecs::gif::GifDecoder::new(std::io::BufReader::new(file)).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 4);
    }

    #[test]
    fn test_replay_empty_script_still_exports() {
        let dir = tempfile::tempdir().unwrap();
        let script_path = dir.path().join("empty.yaml");
        std::fs::write(&script_path, "events: []\n").unwrap();
        let output = dir.path().join("blank.gif");

        let args = ReplayArgs {
            script: script_path,
            output: Some(output.clone()),
            seed: Some(1),
            frames: Some(2),
            delay: None,
            dump: false,
        };
        let config = CanvasConfig {
            width: 8,
            height: 8,
            ..CanvasConfig::default()
        };

        run(args, config, &Printer::plain()).unwrap();
        assert!(std::fs::read(&output).unwrap().starts_with(b"GIF89a"));
    }

    #[test]
    fn test_replay_missing_script() {
        let args = ReplayArgs {
            script: PathBuf::from("/nonexistent/script.yaml"),
            output: None,
            seed: None,
            frames: None,
            delay: None,
            dump: false,
        };
        assert!(run(args, CanvasConfig::default(), &Printer::plain()).is_err());
    }
}

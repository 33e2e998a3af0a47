//! Draw command implementation.

use clap::Args;

use crate::config::CanvasConfig;
use crate::error::Result;
use crate::output::Printer;

/// Open the drawing window
#[derive(Args, Debug)]
pub struct DrawArgs {
    /// Seed for shape selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Window title
    #[arg(long, default_value = "wiggle")]
    pub title: String,
}

#[cfg(feature = "window")]
pub fn run(args: DrawArgs, config: CanvasConfig, printer: &Printer) -> Result<()> {
    use crate::controller::Controller;
    use crate::window::CanvasWindow;

    let mut controller = match args.seed {
        Some(seed) => Controller::with_seed(&config, seed),
        None => Controller::new(&config),
    };

    printer.info(
        "Drawing",
        &format!(
            "{}x{} canvas {}",
            config.width,
            config.height,
            printer.dim("(C clear, S save gif, J dump, 1-9 pencil, B background, Esc quit)")
        ),
    );
    CanvasWindow::open(&args.title, &config)?.run(&mut controller, &config, printer)
}

#[cfg(not(feature = "window"))]
pub fn run(_args: DrawArgs, _config: CanvasConfig, _printer: &Printer) -> Result<()> {
    Err(crate::error::WiggleError::Setup {
        message: "wiggle was built without window support".to_string(),
        help: Some("Rebuild with `--features window`, or use `wiggle replay`".to_string()),
    })
}

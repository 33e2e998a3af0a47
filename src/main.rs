use clap::Parser;
use miette::Result;
use wiggle::cli::{Cli, Commands};
use wiggle::output::Printer;
use wiggle::CanvasConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Cli { config, command } = Cli::parse();
    let printer = Printer::new();

    match command {
        Commands::Draw(args) => {
            let config = CanvasConfig::discover(config.as_deref())?;
            wiggle::cli::draw::run(args, config, &printer)?;
        }
        Commands::Replay(args) => {
            let config = CanvasConfig::discover(config.as_deref())?;
            wiggle::cli::replay::run(args, config, &printer)?;
        }
        Commands::Shapes(args) => wiggle::cli::shapes::run(args, &printer)?,
        Commands::Init(args) => {
            wiggle::cli::init::run(args, &printer)?;
        }
        Commands::Completions(args) => wiggle::cli::completions::run(args)?,
    }

    Ok(())
}

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use table_designer::app::{AppError, run_cli, run_gui};
use table_designer::io::config::Config;

/// Interactive stretchable table with legs and chairs laid out around it.
#[derive(Parser, Debug)]
#[command(name = "table-designer")]
#[command(about = "TOML-driven stretchable table designer")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Open the interactive viewer instead of replaying the session
    #[arg(long)]
    gui: bool,

    /// Plan image path, overrides `[plan].output`
    #[arg(short, long, value_name = "PNG")]
    output: Option<String>,
}

fn run(args: Args) -> Result<(), AppError> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading config: {}", path.display());
            Config::load(path)?
        }
        None => {
            info!("Using default config");
            Config::default()
        }
    };

    if args.gui {
        run_gui(config, args.config)
    } else {
        run_cli(&config, args.output.as_deref())?;
        Ok(())
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

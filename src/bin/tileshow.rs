use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tileshow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// Write each presented frame as a PNG into this directory instead of opening a window.
    #[arg(long, value_name = "DIR", global = true)]
    headless: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Stretch a single image over the whole window (default).
    Stretch,
    /// Tile the background image and center the foreground image on top.
    Tiled,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let scene = match cli.cmd.unwrap_or(Command::Stretch) {
        Command::Stretch => tileshow::Scene::stretch(),
        Command::Tiled => tileshow::Scene::tiled(),
    };
    let target = match cli.headless {
        Some(out_dir) => tileshow::Target::Headless { out_dir },
        None => tileshow::Target::Window,
    };

    match tileshow::run_demo(&tileshow::DemoConfig::default(), &target, &scene) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tileshow::ErrorReporter::stderr().report(err.operation(), &err.backend_message());
            ExitCode::FAILURE
        }
    }
}

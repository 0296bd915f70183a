mod config;
mod game;
mod game_modes;
mod logging;
mod ui;

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use game_modes::{run_game_local, FrameClock};
use ui::{TerminalControls, TerminalGuard, TerminalSurface};

#[derive(Debug, PartialEq)]
enum Command {
    Play { debug: bool },
    InitConfig,
    Help,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("pong");

    let command = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}", message);
            print_usage(program);
            std::process::exit(1);
        }
    };

    match command {
        Command::Help => {
            print_usage(program);
            Ok(())
        }
        Command::InitConfig => {
            let path = config::get_config_path();
            config::create_default_config(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Created default config file at: {}", path.display());
            Ok(())
        }
        Command::Play { debug } => play(debug),
    }
}

/// Parse command line arguments (program name excluded)
fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut debug = false;

    for arg in args {
        match arg.as_str() {
            "--debug" | "-d" => debug = true,
            "--init-config" => return Ok(Command::InitConfig),
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Command::Play { debug })
}

fn print_usage(program: &str) {
    println!("Pong - two players, one keyboard");
    println!();
    println!("Usage:");
    println!("  {}                 # Play", program);
    println!("  {} --debug         # Play, logging to {}", program, logging::log_file_path().display());
    println!("  {} --init-config   # Write a default config file and exit", program);
    println!();
    println!("Controls: W/S left paddle, Up/Down right paddle, Space to start, Q or Esc to quit");
    println!("Config file: {}", config::get_config_path().display());
}

fn play(debug: bool) -> Result<()> {
    logging::init(debug).context("failed to open debug log")?;

    let config = config::load_config().context("failed to read config file")?;
    config.validate().context("invalid configuration")?;
    info!(?config, "starting");

    // Declared first so it is dropped last: the terminal is restored
    // after everything that draws to it is gone
    let guard = TerminalGuard::enter(&config.display.title)
        .context("failed to initialize terminal")?;

    let terminal = guard.terminal().context("failed to initialize terminal")?;
    let mut surface = TerminalSurface::new(terminal, config.physics.width, config.physics.height)?;
    let mut controls = TerminalControls::new(
        guard.reports_key_release(),
        Duration::from_millis(config.display.key_hold_ms),
    );
    let mut clock = FrameClock::new(config.display.target_fps);

    run_game_local(&mut surface, &mut controls, &mut clock, &config)?;

    info!("exiting");
    Ok(())
}

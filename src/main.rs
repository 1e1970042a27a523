use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use fixloop::game::DummyGame;
use fixloop::{DesktopWindow, EngineConfig, GameEngine};

const DEFAULT_CONFIG: &str = "fixloop.ron";

fn main() -> ExitCode {
    fixloop::init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = ?err, "game terminated");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    let window = DesktopWindow::new(config.window.clone());
    let mut engine = GameEngine::new(window, DummyGame::new())
        .with_rates(config.target_ups, config.target_fps);
    engine.run()
}

fn load_config(explicit: Option<PathBuf>) -> Result<EngineConfig> {
    match explicit {
        Some(path) => EngineConfig::load(path),
        None if Path::new(DEFAULT_CONFIG).exists() => EngineConfig::load(DEFAULT_CONFIG),
        None => {
            tracing::debug!("no config file, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

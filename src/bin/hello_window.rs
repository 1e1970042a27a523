//! Bare window bootstrap: a red, vsynced window that closes on Escape.

use std::process::ExitCode;

use anyhow::Result;
use fixloop::engine::graphics::Color;
use fixloop::{DesktopWindow, RenderSurface, Window, WindowConfig};

fn main() -> ExitCode {
    fixloop::init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = ?err, "hello window failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Hello fixloop!");

    let mut window = DesktopWindow::new(WindowConfig {
        title: "Hello World!".to_string(),
        width: 300,
        height: 300,
        vsync: true,
    });
    window.init()?;
    window.set_clear_color(Color::RED);

    while !window.should_close() {
        if window.is_resized() {
            window.resize_viewport();
            window.set_resized(false);
        }
        window.clear()?;
        window.update()?;
    }
    Ok(())
}

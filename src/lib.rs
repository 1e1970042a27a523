pub mod engine;
pub mod game;

use tracing_subscriber::util::SubscriberInitExt;

pub use engine::core::{EngineConfig, TARGET_FPS, TARGET_UPS, WindowConfig};
pub use engine::logic::GameLogic;
pub use engine::window::{DesktopWindow, RenderSurface, Window};
pub use engine::{EngineState, GameEngine, LoopStats};

/// Installs the global subscriber, filtered by `RUST_LOG` (default `info`).
/// Records emitted through `log` by wgpu and winit are forwarded as well.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();

    if subscriber.try_init().is_err() {
        eprintln!("tracing subscriber already set");
    }
}

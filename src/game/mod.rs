pub mod dummy;
pub mod renderer;

pub use dummy::DummyGame;
pub use renderer::Renderer;

use anyhow::Result;

use crate::engine::graphics::Color;
use crate::engine::input::{KeyCode, KeyInput};
use crate::engine::logic::GameLogic;
use crate::engine::window::RenderSurface;

use super::renderer::Renderer;

/// Brightness change per update step while a key is held.
const FADE_STEP: f32 = 0.01;

/// Fades the background between black and white with the arrow keys.
#[derive(Debug, Default)]
pub struct DummyGame {
    direction: i8,
    color: f32,
    renderer: Renderer,
}

impl DummyGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> f32 {
        self.color
    }

    pub fn direction(&self) -> i8 {
        self.direction
    }
}

impl<W> GameLogic<W> for DummyGame
where
    W: KeyInput + RenderSurface,
{
    fn name(&self) -> &str {
        "Dummy"
    }

    fn init(&mut self, _window: &mut W) -> Result<()> {
        self.renderer.init()
    }

    fn input(&mut self, window: &W) {
        self.direction = if window.is_key_pressed(KeyCode::ArrowUp) {
            1
        } else if window.is_key_pressed(KeyCode::ArrowDown) {
            -1
        } else {
            0
        };
    }

    fn update(&mut self, _interval: f64) {
        self.color = (self.color + self.direction as f32 * FADE_STEP).clamp(0.0, 1.0);
    }

    fn render(&mut self, window: &mut W) -> Result<()> {
        if window.is_resized() {
            window.resize_viewport();
            window.set_resized(false);
        }
        window.set_clear_color(Color::rgba(self.color, self.color, self.color, 0.0));
        self.renderer.clear(window)
    }
}

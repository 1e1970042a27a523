use anyhow::Result;

use crate::engine::window::RenderSurface;

#[derive(Debug, Default)]
pub struct Renderer {
    frame_count: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self { frame_count: 0 }
    }

    pub fn init(&mut self) -> Result<()> {
        tracing::debug!("renderer ready");
        Ok(())
    }

    pub fn clear(&mut self, surface: &mut impl RenderSurface) -> Result<()> {
        surface.clear()?;
        self.frame_count += 1;
        tracing::trace!(frame = self.frame_count, "frame cleared");
        Ok(())
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

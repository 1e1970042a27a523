use anyhow::Result;

/// The four hooks a game plugs into the engine loop.
///
/// `W` is the window type the game is driven with; games that only need a
/// subset of the window (keys, render state) bound on those traits instead of
/// a concrete window.
pub trait GameLogic<W> {
    fn name(&self) -> &str {
        "game"
    }

    /// Runs once before the first frame; may allocate rendering resources.
    fn init(&mut self, window: &mut W) -> Result<()>;

    /// Samples input once per frame. Must not block.
    fn input(&mut self, window: &W);

    /// Advances the simulation by exactly `interval` seconds.
    fn update(&mut self, interval: f64);

    fn render(&mut self, window: &mut W) -> Result<()>;

    fn cleanup(&mut self) {}
}

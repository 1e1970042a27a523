pub mod core;
pub mod graphics;
pub mod input;
pub mod logic;
pub mod timer;
pub mod window;

use std::time::Duration;

use anyhow::{Context, Result};
use self::core::{FixedTimestep, TARGET_FPS, TARGET_UPS};
use self::logic::GameLogic;
use self::timer::{MonotonicClock, TimeSource, Timer};
use self::window::Window;

/// Longest single sleep taken by the frame limiter.
const SLEEP_QUANTUM: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Created,
    Initialized,
    Running,
    Closing,
    Terminated,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
    pub updates: u64,
}

/// Drives a [`GameLogic`] with fixed-size update steps and a decoupled,
/// optionally capped, render rate.
pub struct GameEngine<W, G, C = MonotonicClock> {
    window: W,
    timer: Timer<C>,
    game_logic: G,
    target_ups: u32,
    target_fps: u32,
    state: EngineState,
    stats: LoopStats,
}

impl<W, G> GameEngine<W, G>
where
    W: Window,
    G: GameLogic<W>,
{
    pub fn new(window: W, game_logic: G) -> Self {
        Self::with_clock(window, game_logic, MonotonicClock::new())
    }
}

impl<W, G, C> GameEngine<W, G, C>
where
    W: Window,
    G: GameLogic<W>,
    C: TimeSource,
{
    pub fn with_clock(window: W, game_logic: G, clock: C) -> Self {
        Self {
            window,
            timer: Timer::new(clock),
            game_logic,
            target_ups: TARGET_UPS,
            target_fps: TARGET_FPS,
            state: EngineState::Created,
            stats: LoopStats::default(),
        }
    }

    /// Overrides the update and render rates. Zero is treated as one.
    pub fn with_rates(mut self, target_ups: u32, target_fps: u32) -> Self {
        self.target_ups = target_ups.max(1);
        self.target_fps = target_fps.max(1);
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn game_logic(&self) -> &G {
        &self.game_logic
    }

    pub fn game_logic_mut(&mut self) -> &mut G {
        &mut self.game_logic
    }

    pub fn into_game_logic(self) -> G {
        self.game_logic
    }

    /// Initialises every collaborator and runs the loop until the window asks
    /// to close. Cleanup runs whether or not the loop succeeded.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(
            target: "engine",
            game = %self.game_logic.name(),
            ups = self.target_ups,
            fps = self.target_fps,
            "Engine starting"
        );

        let result = self.init().and_then(|()| self.game_loop());
        if self.state != EngineState::Closing {
            self.transition(EngineState::Closing);
        }
        self.cleanup();

        tracing::info!(
            target: "engine",
            frames = self.stats.frames,
            updates = self.stats.updates,
            "Engine shutdown complete"
        );
        result
    }

    fn init(&mut self) -> Result<()> {
        self.window.init().context("failed to initialize window")?;
        self.timer.init();
        self.game_logic
            .init(&mut self.window)
            .context("failed to initialize game logic")?;
        self.transition(EngineState::Initialized);
        Ok(())
    }

    fn game_loop(&mut self) -> Result<()> {
        self.transition(EngineState::Running);
        let mut step = FixedTimestep::from_ups(self.target_ups);

        while !self.window.should_close() {
            let elapsed = self.timer.elapsed_time();
            step.accumulate(elapsed);

            self.game_logic.input(&self.window);

            while step.should_step() {
                self.game_logic.update(step.interval());
                self.stats.updates += 1;
            }

            self.render()?;
            tracing::trace!(
                target: "engine",
                frame = self.stats.frames,
                elapsed,
                residual = step.residual(),
                "frame complete"
            );

            if !self.window.is_vsync_enabled() {
                self.sync();
            }
        }

        self.transition(EngineState::Closing);
        Ok(())
    }

    /// Waits out the remainder of the current frame slot.
    fn sync(&self) {
        let loop_slot = 1.0 / self.target_fps as f64;
        let end_time = self.timer.last_loop_time() + loop_slot;
        loop {
            let remaining = end_time - self.timer.current_time();
            if remaining <= 0.0 {
                break;
            }
            let wait = Duration::from_secs_f64(remaining).min(SLEEP_QUANTUM);
            if wait.is_zero() {
                break;
            }
            self.timer.sleep(wait);
        }
    }

    fn render(&mut self) -> Result<()> {
        self.game_logic
            .render(&mut self.window)
            .context("game render failed")?;
        self.window.update().context("window update failed")?;
        self.stats.frames += 1;
        Ok(())
    }

    fn cleanup(&mut self) {
        self.game_logic.cleanup();
        self.transition(EngineState::Terminated);
    }

    fn transition(&mut self, next: EngineState) {
        tracing::debug!(target: "engine", from = ?self.state, to = ?next, "engine state");
        self.state = next;
    }
}

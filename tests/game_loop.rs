use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use fixloop::engine::timer::TimeSource;
use fixloop::{EngineState, GameEngine, GameLogic, TARGET_FPS, TARGET_UPS, Window};

#[derive(Clone, Default)]
struct VirtualClock {
    now: Rc<Cell<f64>>,
}

impl VirtualClock {
    fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl TimeSource for VirtualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration.as_secs_f64());
    }
}

struct FakeWindow {
    clock: Option<VirtualClock>,
    frame_cost: f64,
    close_after: u32,
    frames: u32,
    vsync: bool,
    fail_init: bool,
}

impl FakeWindow {
    fn new(close_after: u32, vsync: bool) -> Self {
        Self {
            clock: None,
            frame_cost: 0.0,
            close_after,
            frames: 0,
            vsync,
            fail_init: false,
        }
    }
}

impl Window for FakeWindow {
    fn init(&mut self) -> Result<()> {
        if self.fail_init {
            bail!("no display");
        }
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.frames >= self.close_after
    }

    fn update(&mut self) -> Result<()> {
        self.frames += 1;
        if let Some(clock) = &self.clock {
            clock.advance(self.frame_cost);
        }
        Ok(())
    }

    fn is_vsync_enabled(&self) -> bool {
        self.vsync
    }
}

#[derive(Default)]
struct CountingGame {
    init_cost: Option<(VirtualClock, f64)>,
    inits: u32,
    inputs: u32,
    updates: Vec<f64>,
    renders: u32,
    cleanups: u32,
}

impl GameLogic<FakeWindow> for CountingGame {
    fn init(&mut self, _window: &mut FakeWindow) -> Result<()> {
        self.inits += 1;
        if let Some((clock, cost)) = &self.init_cost {
            clock.advance(*cost);
        }
        Ok(())
    }

    fn input(&mut self, _window: &FakeWindow) {
        self.inputs += 1;
    }

    fn update(&mut self, interval: f64) {
        self.updates.push(interval);
    }

    fn render(&mut self, _window: &mut FakeWindow) -> Result<()> {
        self.renders += 1;
        Ok(())
    }

    fn cleanup(&mut self) {
        self.cleanups += 1;
    }
}

#[test]
fn test_three_half_interval_frames_give_one_update() {
    let interval = 1.0 / TARGET_UPS as f64;
    let half = interval / 2.0;
    let clock = VirtualClock::default();

    // Every elapsed-time poll observes exactly half an interval: the first
    // covers game init, the rest cover one presented frame each.
    let mut window = FakeWindow::new(3, false);
    window.clock = Some(clock.clone());
    window.frame_cost = half;
    let game = CountingGame {
        init_cost: Some((clock.clone(), half)),
        ..CountingGame::default()
    };

    let mut engine = GameEngine::with_clock(window, game, clock.clone());
    engine.run().expect("run should succeed");

    let game = engine.into_game_logic();
    assert_eq!(game.updates.len(), 1);
    assert_eq!(game.updates[0], interval);
    assert_eq!(game.renders, 3);
    assert_eq!(game.inputs, 3);
    assert_eq!(game.inits, 1);
    assert_eq!(game.cleanups, 1);
}

#[test]
fn test_zero_elapsed_time_runs_no_updates() {
    let clock = VirtualClock::default();
    let mut engine = GameEngine::with_clock(FakeWindow::new(5, true), CountingGame::default(), clock);
    engine.run().expect("run should succeed");

    assert!(engine.game_logic().updates.is_empty());
    assert_eq!(engine.game_logic().renders, 5);
    assert_eq!(engine.stats().frames, 5);
    assert_eq!(engine.stats().updates, 0);
}

#[test]
fn test_update_count_tracks_total_elapsed_time() {
    let interval = 1.0 / TARGET_UPS as f64;
    let clock = VirtualClock::default();
    let mut window = FakeWindow::new(40, true);
    window.clock = Some(clock.clone());
    window.frame_cost = 0.013;

    let mut engine = GameEngine::with_clock(window, CountingGame::default(), clock.clone());
    engine.run().expect("run should succeed");

    // The last frame's cost is never polled.
    let polled = 39.0 * 0.013;
    let expected = (polled / interval).floor() as i64;
    let updates = engine.game_logic().updates.len() as i64;
    assert!((updates - expected).abs() <= 1, "{updates} vs {expected}");
    assert!(engine.game_logic().updates.iter().all(|&dt| dt == interval));
}

#[test]
fn test_init_failure_renders_nothing_and_still_cleans_up() {
    let mut window = FakeWindow::new(3, true);
    window.fail_init = true;

    let mut engine = GameEngine::with_clock(window, CountingGame::default(), VirtualClock::default());
    let err = engine.run().unwrap_err();

    assert!(format!("{err:#}").contains("no display"));
    assert_eq!(engine.state(), EngineState::Terminated);
    assert_eq!(engine.game_logic().inits, 0);
    assert_eq!(engine.game_logic().renders, 0);
    assert_eq!(engine.game_logic().cleanups, 1);
}

#[test]
fn test_frame_rate_capped_without_vsync() {
    let frames = 10;
    let mut engine = GameEngine::new(FakeWindow::new(frames, false), CountingGame::default());

    let start = Instant::now();
    engine.run().expect("run should succeed");
    let average = start.elapsed().as_secs_f64() / frames as f64;

    let slot = 1.0 / TARGET_FPS as f64;
    assert!(average >= slot - 0.001, "average frame {average}s");
    assert_eq!(engine.game_logic().renders, frames);
}

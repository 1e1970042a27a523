use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Fixed simulation rate, in update steps per second.
pub const TARGET_UPS: u32 = 30;

/// Render cap applied when the display does not throttle through vsync.
pub const TARGET_FPS: u32 = 75;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "GAME".to_string(),
            width: 600,
            height: 480,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub target_ups: u32,
    pub target_fps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            target_ups: TARGET_UPS,
            target_fps: TARGET_FPS,
        }
    }
}

impl EngineConfig {
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let config: Self = ron::from_str(source).context("malformed engine config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_ron_str(&source)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "engine config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window.title.trim().is_empty() {
            bail!("window title must not be empty");
        }
        if self.window.width == 0 || self.window.height == 0 {
            bail!(
                "window size must be non-zero, got {}x{}",
                self.window.width,
                self.window.height
            );
        }
        if self.target_ups == 0 || self.target_fps == 0 {
            bail!(
                "update and frame rates must be non-zero, got {} ups / {} fps",
                self.target_ups,
                self.target_fps
            );
        }
        Ok(())
    }
}

/// Relative slack when comparing the accumulator against the interval, so
/// that a whole number of intervals always drains to that many steps.
const STEP_TOLERANCE: f64 = 1e-9;

/// Accumulates real frame time and hands it back in constant-size steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    interval: f64,
    accumulator: f64,
}

impl FixedTimestep {
    pub fn from_ups(ups: u32) -> Self {
        let interval = 1.0 / ups.max(1) as f64;
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Unconsumed simulation time.
    pub fn residual(&self) -> f64 {
        self.accumulator
    }

    pub fn accumulate(&mut self, delta: f64) {
        self.accumulator += delta.max(0.0);
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.interval * (1.0 - STEP_TOLERANCE) {
            self.accumulator = (self.accumulator - self.interval).max(0.0);
            true
        } else {
            false
        }
    }
}

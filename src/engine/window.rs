use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use wgpu::SurfaceError;
use winit::{
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window as NativeWindow, WindowBuilder},
};

use super::core::WindowConfig;
use super::graphics::{Color, Graphics};
use super::input::{KeyInput, KeyboardState};

/// How long a frame waits for OS events while the window has no drawable area.
const MINIMIZED_POLL: Duration = Duration::from_millis(16);

/// What the game loop needs from the windowing layer.
pub trait Window {
    fn init(&mut self) -> Result<()>;

    fn should_close(&self) -> bool;

    /// Presents the last rendered frame and processes pending OS events.
    fn update(&mut self) -> Result<()>;

    fn is_vsync_enabled(&self) -> bool;
}

/// Render state a game reads and mutates while drawing.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn is_resized(&self) -> bool;
    fn set_resized(&mut self, resized: bool);

    /// Adopts the current width/height as the drawable area.
    fn resize_viewport(&mut self);

    fn set_clear_color(&mut self, color: Color);
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Default)]
struct WindowEvents {
    keyboard: KeyboardState,
    close_requested: bool,
    resized: bool,
    size: PhysicalSize<u32>,
}

impl WindowEvents {
    fn handle(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window close requested");
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::Focused(false) => self.keyboard.release_all(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.key(code, event.state);
                }
            }
            _ => {}
        }
    }

    fn key(&mut self, code: KeyCode, state: ElementState) {
        if code == KeyCode::Escape && state == ElementState::Released {
            tracing::info!("escape released, closing window");
            self.close_requested = true;
        }
        self.keyboard.handle_key(code, state);
    }

    fn is_minimized(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    fn pump_timeout(&self) -> Duration {
        if self.is_minimized() {
            MINIMIZED_POLL
        } else {
            Duration::ZERO
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size != self.size {
            tracing::debug!(width = size.width, height = size.height, "window resized");
            self.size = size;
            self.resized = true;
        }
    }
}

/// A native desktop window with a GPU surface, driven by pumping winit's
/// event loop once per frame.
pub struct DesktopWindow {
    config: WindowConfig,
    graphics: Option<Graphics>,
    window: Option<Arc<NativeWindow>>,
    event_loop: Option<EventLoop<()>>,
    events: WindowEvents,
    clear_color: Color,
}

impl DesktopWindow {
    pub fn new(config: WindowConfig) -> Self {
        let size = PhysicalSize::new(config.width, config.height);
        Self {
            config,
            graphics: None,
            window: None,
            event_loop: None,
            events: WindowEvents {
                size,
                ..WindowEvents::default()
            },
            clear_color: Color::BLACK,
        }
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Requests the window to close at the end of the current frame.
    pub fn request_close(&mut self) {
        self.events.close_requested = true;
    }
}

impl Window for DesktopWindow {
    fn init(&mut self) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(self.config.title.as_str())
                .with_inner_size(LogicalSize::new(
                    self.config.width as f64,
                    self.config.height as f64,
                ))
                .with_resizable(true)
                .with_visible(false)
                .build(&event_loop)
                .context("failed to create window")?,
        );

        match event_loop.primary_monitor() {
            Some(monitor) => window.set_outer_position(centered_position(
                monitor.position(),
                monitor.size(),
                window.outer_size(),
            )),
            None => tracing::debug!("no primary monitor reported, leaving window placement to the OS"),
        }

        let graphics = pollster::block_on(Graphics::new(window.clone(), self.config.vsync))
            .context("failed to initialize graphics")?;

        self.events.size = graphics.size();
        window.set_visible(true);
        tracing::info!(
            title = %self.config.title,
            width = self.events.size.width,
            height = self.events.size.height,
            vsync = self.config.vsync,
            "window created"
        );

        self.graphics = Some(graphics);
        self.window = Some(window);
        self.event_loop = Some(event_loop);
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.events.close_requested
    }

    fn update(&mut self) -> Result<()> {
        if let Some(graphics) = self.graphics.as_mut() {
            graphics.present();
        }

        let event_loop = self
            .event_loop
            .as_mut()
            .ok_or_else(|| anyhow!("window updated before init"))?;
        let window_id = self.window.as_ref().map(|window| window.id());
        let events = &mut self.events;
        let timeout = events.pump_timeout();
        let status = event_loop.pump_events(Some(timeout), |event, _target| {
            if let Event::WindowEvent { window_id: id, event } = event {
                if Some(id) == window_id {
                    events.handle(event);
                }
            }
        });

        if let PumpStatus::Exit(code) = status {
            tracing::debug!(code, "event loop exited");
            self.events.close_requested = true;
        }
        Ok(())
    }

    fn is_vsync_enabled(&self) -> bool {
        self.config.vsync
    }
}

impl KeyInput for DesktopWindow {
    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.events.keyboard.is_key_pressed(key)
    }
}

impl RenderSurface for DesktopWindow {
    fn width(&self) -> u32 {
        self.events.size.width
    }

    fn height(&self) -> u32 {
        self.events.size.height
    }

    fn is_resized(&self) -> bool {
        self.events.resized
    }

    fn set_resized(&mut self, resized: bool) {
        self.events.resized = resized;
    }

    fn resize_viewport(&mut self) {
        if let Some(graphics) = self.graphics.as_mut() {
            graphics.resize(self.events.size);
        }
    }

    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn clear(&mut self) -> Result<()> {
        if self.events.is_minimized() {
            tracing::trace!("window minimized, skipping frame");
            return Ok(());
        }
        let size = self.events.size;
        let Some(graphics) = self.graphics.as_mut() else {
            bail!("window cleared before init");
        };
        match graphics.clear(self.clear_color) {
            Ok(()) => Ok(()),
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                tracing::debug!("surface lost or outdated, reconfiguring");
                graphics.resize(size);
                Ok(())
            }
            Err(SurfaceError::Timeout) => {
                tracing::warn!("surface timeout, skipping frame");
                Ok(())
            }
            Err(SurfaceError::OutOfMemory) => Err(anyhow!("GPU out of memory")),
        }
    }
}

impl Drop for DesktopWindow {
    fn drop(&mut self) {
        // Surface before window, window before the event loop.
        self.graphics.take();
        if self.window.take().is_some() {
            tracing::debug!(title = %self.config.title, "window released");
        }
        self.event_loop.take();
    }
}

fn centered_position(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window_size: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |monitor: u32, window: u32| ((monitor as i64 - window as i64) / 2) as i32;
    PhysicalPosition::new(
        monitor_origin.x + offset(monitor_size.width, window_size.width),
        monitor_origin.y + offset(monitor_size.height, window_size.height),
    )
}

use std::sync::Arc;

use glam::{IVec2, Vec2};
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId, WindowLevel};

use crate::clock::{TickClock, TickStats};
use crate::config::PetConfig;
use crate::error::NekoError;
use crate::pet::rng::RandomSource;
use crate::pet::{Pet, TickOutcome};
use crate::platform::{self, WindowPlatform};
use crate::render::uniform::SpriteUniform;
use crate::render::GpuState;
use crate::sprite_sheet::SpriteSheet;
use crate::tray::{TrayCommand, TrayIcon};

// ---------------------------------------------------------------------------
// Tick -> window
// ---------------------------------------------------------------------------

/// What a tick asks of the overlay window.
trait OverlayWindow {
    fn move_to(&self, origin: IVec2);
    fn redraw(&self);
}

impl OverlayWindow for Window {
    fn move_to(&self, origin: IVec2) {
        self.set_outer_position(PhysicalPosition::new(origin.x, origin.y));
    }

    fn redraw(&self) {
        self.request_redraw();
    }
}

/// Step the pet toward `cursor`. The window only moves when the pet did.
fn advance(
    pet: &mut Pet,
    cursor: Vec2,
    rng: &mut impl RandomSource,
    window: &impl OverlayWindow,
) {
    if let TickOutcome::Moved { window_origin } = pet.tick(cursor, rng) {
        window.move_to(window_origin);
    }
    window.redraw();
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
struct App {
    config: PetConfig,
    sheet: SpriteSheet,
    pet: Pet,
    platform: Box<dyn WindowPlatform>,

    // RNG for the resting-animation dice
    rng: fastrand::Rng,

    // Tick scheduling
    clock: TickClock,
    stats: TickStats,
    paused: bool,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    tray: Option<TrayIcon>,

    /// Startup error raised inside a winit callback, returned by `run`.
    fatal: Option<NekoError>,
}

impl App {
    fn new(config: PetConfig, sheet: SpriteSheet, platform: Box<dyn WindowPlatform>) -> Self {
        let now = Instant::now();
        Self {
            config,
            sheet,
            pet: Pet::new(config),
            platform,
            rng: fastrand::Rng::new(),
            clock: TickClock::new(config.tick_period(), now),
            stats: TickStats::new(now),
            paused: false,
            window: None,
            gpu: None,
            tray: None,
            fatal: None,
        }
    }

    /// Create the overlay window and GPU resources.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), NekoError> {
        let origin = self.pet.window_origin();

        // Start hidden so DWM doesn't cache stale frame state before the
        // overlay styles land.
        let attrs = WindowAttributes::default()
            .with_title("Neko")
            .with_decorations(false)
            .with_resizable(false)
            .with_visible(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_inner_size(PhysicalSize::new(
                self.config.cell_size.x,
                self.config.cell_size.y,
            ))
            .with_position(PhysicalPosition::new(origin.x, origin.y));

        // On Windows transparency comes from DirectComposition; with_transparent
        // would add WS_EX_LAYERED and break it.
        #[cfg(not(windows))]
        let attrs = attrs.with_transparent(true);

        let window = Arc::new(event_loop.create_window(attrs)?);

        platform::setup_overlay(self.platform.as_ref(), &window);

        let size = window.inner_size();
        log::info!(
            "Overlay window created: {}x{} at ({}, {})",
            size.width,
            size.height,
            origin.x,
            origin.y
        );

        self.gpu = Some(GpuState::new(window.clone(), &self.sheet)?);
        log::info!("wgpu + sprite pipeline initialized");

        self.tray = TrayIcon::spawn();

        self.clock = TickClock::new(self.config.tick_period(), Instant::now());
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.deadline()));

        window.set_visible(true);
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    /// One simulation tick: sample cursor, step the pet, move the window.
    fn step(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let started = Instant::now();

        let cursor = self.platform.cursor_position();
        advance(&mut self.pet, cursor, &mut self.rng, &**window);

        let now = Instant::now();
        self.stats.record_tick(now - started, now);
    }

    fn handle_tray(&mut self, event_loop: &ActiveEventLoop) {
        let Some(tray) = &mut self.tray else {
            return;
        };
        match tray.poll() {
            TrayCommand::None => {}
            TrayCommand::TogglePause => {
                self.paused = !self.paused;
                log::info!(
                    "Neko {} as {}",
                    if self.paused { "paused" } else { "resumed" },
                    self.pet.key().name()
                );
            }
            TrayCommand::Quit => {
                log::info!("Quit from tray menu");
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.handle_tray(event_loop);
        if event_loop.exiting() || self.window.is_none() {
            return;
        }

        if self.clock.poll(Instant::now()) && !self.paused {
            self.step();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.deadline()));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!(
                    "Close requested, exiting after {} ticks at {}",
                    self.stats.tick_count(),
                    self.pet.position()
                );
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                // Paint only reads the pet.
                let cell = self.pet.current_cell();
                if let Some(gpu) = &mut self.gpu {
                    gpu.render_frame(SpriteUniform::from_uv_rect(self.sheet.uv_rect(cell)));
                }
            }
            _ => {}
        }
    }
}

/// Entry point — decode the sprite sheet, create event loop and run.
pub fn run() -> Result<(), NekoError> {
    let config = PetConfig::default();
    let sheet = SpriteSheet::embedded(config.cell_size, config.key_color)?;
    let platform = platform::native()?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, sheet, platform);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::pet::rng::Scripted;

    /// Records what a tick did to the window.
    #[derive(Default)]
    struct RecordingWindow {
        moves: RefCell<Vec<IVec2>>,
        redraws: Cell<u32>,
    }

    impl OverlayWindow for RecordingWindow {
        fn move_to(&self, origin: IVec2) {
            self.moves.borrow_mut().push(origin);
        }

        fn redraw(&self) {
            self.redraws.set(self.redraws.get() + 1);
        }
    }

    #[test]
    fn idle_tick_leaves_the_window_in_place() {
        let mut pet = Pet::new(PetConfig::default());
        let window = RecordingWindow::default();

        advance(&mut pet, Vec2::new(110.0, 120.0), &mut Scripted::new([]), &window);

        assert!(window.moves.borrow().is_empty());
        assert_eq!(window.redraws.get(), 1);
    }

    #[test]
    fn chase_tick_moves_the_window_with_the_pet() {
        let mut pet = Pet::new(PetConfig::default());
        let window = RecordingWindow::default();

        advance(&mut pet, Vec2::new(100.0, 200.0), &mut Scripted::new([]), &window);
        advance(&mut pet, Vec2::new(100.0, 300.0), &mut Scripted::new([]), &window);

        assert_eq!(
            *window.moves.borrow(),
            vec![IVec2::new(84, 94), IVec2::new(84, 104)]
        );
        assert_eq!(window.redraws.get(), 2);
    }
}

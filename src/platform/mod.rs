#[cfg(windows)]
pub mod win32;
#[cfg(not(windows))]
pub mod x11;

use glam::Vec2;
use thiserror::Error;
use winit::window::Window;

/// A platform styling call that did not take effect.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[cfg(windows)]
    #[error("window handle unavailable: {0}")]
    Handle(#[from] raw_window_handle::HandleError),

    #[cfg(windows)]
    #[error("expected a {0} window handle")]
    UnexpectedHandle(&'static str),

    #[error("winit refused: {0}")]
    Winit(#[from] winit::error::ExternalError),

    #[cfg(windows)]
    #[error("win32 call failed: {0}")]
    Win32(#[from] windows::core::Error),

    #[cfg(not(windows))]
    #[error("cannot connect to the X server: {0}")]
    X11Connect(#[from] x11rb::errors::ConnectError),

    #[cfg(not(windows))]
    #[error("X11 connection lost: {0}")]
    X11Connection(#[from] x11rb::errors::ConnectionError),

    #[cfg(not(windows))]
    #[error("X11 request failed: {0}")]
    X11Reply(#[from] x11rb::errors::ReplyError),

    #[cfg(not(windows))]
    #[error("X server has no screen {0}")]
    NoScreen(usize),
}

/// What the pet needs from the OS beyond winit: the global cursor and overlay styling.
pub trait WindowPlatform {
    /// Global cursor position in screen pixels.
    fn cursor_position(&self) -> Vec2;

    /// Make the window ignore focus and pass all mouse input through.
    fn set_click_through(&self, window: &Window) -> Result<(), PlatformError>;

    /// Keep the window above every other window.
    fn set_always_on_top(&self, window: &Window) -> Result<(), PlatformError>;
}

/// The platform implementation for this build target.
#[cfg(windows)]
pub fn native() -> Result<Box<dyn WindowPlatform>, PlatformError> {
    Ok(Box::new(win32::Win32Platform))
}

/// The platform implementation for this build target. Without an X server
/// there is no global cursor to chase, so this fails.
#[cfg(not(windows))]
pub fn native() -> Result<Box<dyn WindowPlatform>, PlatformError> {
    Ok(Box::new(x11::X11Platform::connect(None)?))
}

/// Apply overlay styling. Failures leave the window interactive but are not fatal.
pub fn setup_overlay(platform: &dyn WindowPlatform, window: &Window) {
    if let Err(e) = platform.set_always_on_top(window) {
        log::warn!("Could not keep window on top: {e}");
    }
    match platform.set_click_through(window) {
        Ok(()) => log::info!("Overlay setup complete (click-through + no-activate)"),
        Err(e) => log::warn!("Could not make window click-through: {e}"),
    }
}

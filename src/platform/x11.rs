use std::cell::Cell;

use glam::Vec2;
use winit::window::{Window, WindowLevel};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{ConnectionExt as _, Window as XWindow};
use x11rb::rust_connection::RustConnection;

use super::{PlatformError, WindowPlatform};

/// X11 implementation: the pointer comes from `QueryPointer` on the root
/// window, overlay styling goes through winit.
pub struct X11Platform {
    conn: RustConnection,
    root: XWindow,
    /// Last pointer position the server reported.
    last: Cell<Vec2>,
}

impl X11Platform {
    /// Connect to `display`, or `$DISPLAY` when `None`, and read the pointer once.
    pub fn connect(display: Option<&str>) -> Result<Self, PlatformError> {
        let (conn, screen) = RustConnection::connect(display)?;
        let root = conn
            .setup()
            .roots
            .get(screen)
            .map(|s| s.root)
            .ok_or(PlatformError::NoScreen(screen))?;

        let platform = Self {
            conn,
            root,
            last: Cell::new(Vec2::ZERO),
        };
        let pointer = platform.query_pointer()?;
        platform.last.set(pointer);

        log::info!("Cursor source: X11 screen {screen}, pointer at {pointer}");
        Ok(platform)
    }

    fn query_pointer(&self) -> Result<Vec2, PlatformError> {
        let reply = self.conn.query_pointer(self.root)?.reply()?;
        Ok(Vec2::new(reply.root_x as f32, reply.root_y as f32))
    }
}

impl WindowPlatform for X11Platform {
    fn cursor_position(&self) -> Vec2 {
        match self.query_pointer() {
            Ok(pointer) => {
                self.last.set(pointer);
                pointer
            }
            Err(e) => {
                log::debug!("QueryPointer failed, keeping {}: {e}", self.last.get());
                self.last.get()
            }
        }
    }

    fn set_click_through(&self, window: &Window) -> Result<(), PlatformError> {
        window.set_cursor_hittest(false)?;
        Ok(())
    }

    fn set_always_on_top(&self, window: &Window) -> Result<(), PlatformError> {
        window.set_window_level(WindowLevel::AlwaysOnTop);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_is_an_error_not_a_guess() {
        let err = X11Platform::connect(Some("not a display")).err();
        assert!(matches!(err, Some(PlatformError::X11Connect(_))));
    }

    #[test]
    fn missing_server_is_an_error_not_a_guess() {
        assert!(X11Platform::connect(Some(":4242")).is_err());
    }
}

use glam::Vec2;
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetWindowLongPtrW, SetWindowLongPtrW, SetWindowPos, GWL_EXSTYLE, HWND_TOPMOST,
    SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, WS_EX_LAYERED,
    WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TRANSPARENT,
};
use winit::window::Window;

use super::{PlatformError, WindowPlatform};

/// Win32 implementation: GetCursorPos plus extended window styles.
pub struct Win32Platform;

impl WindowPlatform for Win32Platform {
    fn cursor_position(&self) -> Vec2 {
        let mut point = POINT::default();
        unsafe {
            let _ = GetCursorPos(&mut point);
        }
        Vec2::new(point.x as f32, point.y as f32)
    }

    fn set_click_through(&self, window: &Window) -> Result<(), PlatformError> {
        window.set_cursor_hittest(false)?;
        let hwnd = get_hwnd(window)?;
        unsafe { make_overlay(hwnd) }
    }

    fn set_always_on_top(&self, window: &Window) -> Result<(), PlatformError> {
        let hwnd = get_hwnd(window)?;
        unsafe {
            SetWindowPos(
                hwnd,
                HWND_TOPMOST,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )?;
        }
        Ok(())
    }
}

/// Extract the Win32 HWND from a winit window.
pub fn get_hwnd(window: &Window) -> Result<HWND, PlatformError> {
    let handle = window.window_handle()?;
    match handle.as_raw() {
        RawWindowHandle::Win32(h) => Ok(HWND(h.hwnd.get() as *mut core::ffi::c_void)),
        _ => Err(PlatformError::UnexpectedHandle("Win32")),
    }
}

/// Turn the window into a tool window that never activates and lets clicks through.
unsafe fn make_overlay(hwnd: HWND) -> Result<(), PlatformError> {
    let style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
    log::debug!("Window ex-style before: 0x{:08X}", style);

    // Drop WS_EX_LAYERED: it creates a GDI backing surface that fights the
    // DirectComposition visual wgpu presents to. WS_EX_NOREDIRECTIONBITMAP
    // keeps DWM from allocating one at all.
    const WS_EX_NOREDIRECTIONBITMAP: isize = 0x00200000;

    let new_style = (style & !(WS_EX_LAYERED.0 as isize))
        | WS_EX_TRANSPARENT.0 as isize
        | WS_EX_NOACTIVATE.0 as isize
        | WS_EX_TOOLWINDOW.0 as isize
        | WS_EX_NOREDIRECTIONBITMAP;
    SetWindowLongPtrW(hwnd, GWL_EXSTYLE, new_style);

    log::debug!("Window ex-style after:  0x{:08X}", new_style);

    // Force DWM to recalculate the window frame with the new styles.
    SetWindowPos(
        hwnd,
        HWND::default(),
        0,
        0,
        0,
        0,
        SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
    )?;

    // At 32x32 the DWM border and rounded corners would eat the sprite.
    // DWMWA_NCRENDERING_POLICY(2) = DWMNCRP_DISABLED(2)
    set_dwm_u32(hwnd, 2, 2);
    // DWMWA_WINDOW_CORNER_PREFERENCE(33) = DWMWCP_DONOTROUND(1)
    set_dwm_u32(hwnd, 33, 1);
    // DWMWA_BORDER_COLOR(34) = DWMWA_COLOR_NONE(0xFFFFFFFE)
    set_dwm_u32(hwnd, 34, 0xFFFFFFFE);

    Ok(())
}

/// Best-effort DWM attribute; older Windows versions reject some of these.
unsafe fn set_dwm_u32(hwnd: HWND, attribute: i32, value: u32) {
    let _ = DwmSetWindowAttribute(
        hwnd,
        DWMWINDOWATTRIBUTE(attribute),
        &value as *const u32 as *const core::ffi::c_void,
        std::mem::size_of::<u32>() as u32,
    );
}

/// Notification-area icon with a Pause / Quit menu.
/// The pet window is click-through, so this is the only way to reach it.
/// Uses Win32 Shell_NotifyIconW directly; a no-op elsewhere.

#[cfg(any(windows, test))]
use std::cell::Cell;

#[cfg(windows)]
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, POINT, WPARAM};
#[cfg(windows)]
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
};
#[cfg(windows)]
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, CreateWindowExW, DefWindowProcW, DestroyMenu, DestroyWindow,
    GetCursorPos, GetWindowLongPtrW, LoadIconW, RegisterClassW, SetForegroundWindow,
    SetWindowLongPtrW, TrackPopupMenu, GWLP_USERDATA, HMENU, IDI_APPLICATION, MF_SEPARATOR,
    MF_STRING, TPM_BOTTOMALIGN, TPM_LEFTALIGN, WM_COMMAND, WM_RBUTTONUP, WM_USER, WNDCLASSW,
    WS_EX_TOOLWINDOW,
};

/// Custom message ID for tray icon callbacks.
#[cfg(windows)]
const WM_TRAYICON: u32 = WM_USER + 1;

/// Menu item IDs.
#[cfg(any(windows, test))]
const ID_QUIT: u16 = 1000;
#[cfg(any(windows, test))]
const ID_PAUSE: u16 = 1001;

const TOOLTIP: &str = "Neko";

/// Commands returned from tray menu interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrayCommand {
    #[default]
    None,
    TogglePause,
    Quit,
}

#[cfg(any(windows, test))]
impl TrayCommand {
    fn from_menu_id(id: u16) -> Self {
        match id {
            ID_QUIT => TrayCommand::Quit,
            ID_PAUSE => TrayCommand::TogglePause,
            _ => TrayCommand::None,
        }
    }
}

/// Menu choice waiting for the next `poll`.
#[cfg(any(windows, test))]
#[derive(Debug, Default)]
struct PendingCommand(Cell<TrayCommand>);

#[cfg(any(windows, test))]
impl PendingCommand {
    fn record(&self, menu_id: u16) {
        self.0.set(TrayCommand::from_menu_id(menu_id));
    }

    fn take(&self) -> TrayCommand {
        self.0.take()
    }
}

/// System tray icon state.
pub struct TrayIcon {
    #[cfg(windows)]
    hwnd: HWND,
    #[cfg(windows)]
    nid: NOTIFYICONDATAW,
    /// Written by the window procedure through the window's user data, so it
    /// is boxed to keep its address stable and dropped after the window.
    #[cfg(windows)]
    pending: Box<PendingCommand>,
}

#[cfg(windows)]
impl TrayIcon {
    /// Create the icon. Failure only costs the menu, so it is logged and skipped.
    pub fn spawn() -> Option<Self> {
        match unsafe { Self::create() } {
            Ok(tray) => {
                log::info!("System tray icon created");
                Some(tray)
            }
            Err(e) => {
                log::warn!("Tray icon unavailable: {e}");
                None
            }
        }
    }

    unsafe fn create() -> windows::core::Result<Self> {
        // Hidden window that receives the icon's callback messages.
        let class_name: Vec<u16> = "NekoTrayClass\0".encode_utf16().collect();
        let wc = WNDCLASSW {
            lpfnWndProc: Some(tray_wnd_proc),
            lpszClassName: windows::core::PCWSTR(class_name.as_ptr()),
            ..Default::default()
        };
        RegisterClassW(&wc);

        let hwnd = CreateWindowExW(
            WS_EX_TOOLWINDOW,
            windows::core::PCWSTR(class_name.as_ptr()),
            windows::core::PCWSTR::null(),
            Default::default(),
            0,
            0,
            0,
            0,
            HWND::default(),
            HMENU::default(),
            HINSTANCE::default(),
            None,
        )?;

        let pending = Box::<PendingCommand>::default();
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, &*pending as *const PendingCommand as isize);

        let mut nid = NOTIFYICONDATAW::default();
        nid.cbSize = std::mem::size_of::<NOTIFYICONDATAW>() as u32;
        nid.hWnd = hwnd;
        nid.uID = 1;
        nid.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
        nid.uCallbackMessage = WM_TRAYICON;
        nid.hIcon = LoadIconW(None, IDI_APPLICATION).unwrap_or_default();

        // Leave the last slot as the terminating NUL.
        let max = nid.szTip.len() - 1;
        for (slot, ch) in nid.szTip.iter_mut().take(max).zip(TOOLTIP.encode_utf16()) {
            *slot = ch;
        }

        if !Shell_NotifyIconW(NIM_ADD, &nid).as_bool() {
            let _ = DestroyWindow(hwnd);
            return Err(windows::core::Error::from_win32());
        }

        Ok(Self { hwnd, nid, pending })
    }

    /// Take the last menu choice. Call once per loop iteration.
    pub fn poll(&mut self) -> TrayCommand {
        self.pending.take()
    }
}

#[cfg(windows)]
impl Drop for TrayIcon {
    fn drop(&mut self) {
        unsafe {
            let _ = Shell_NotifyIconW(NIM_DELETE, &self.nid);
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

/// Window procedure for the hidden tray message window.
/// winit's message loop dispatches to it since it lives on the same thread.
#[cfg(windows)]
unsafe extern "system" fn tray_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_TRAYICON && (lparam.0 & 0xFFFF) as u32 == WM_RBUTTONUP {
        show_context_menu(hwnd);
        return LRESULT(0);
    }
    if msg == WM_COMMAND {
        let pending = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const PendingCommand;
        if let Some(pending) = pending.as_ref() {
            pending.record((wparam.0 & 0xFFFF) as u16);
        }
        return LRESULT(0);
    }
    DefWindowProcW(hwnd, msg, wparam, lparam)
}

/// Show the right-click context menu at the cursor position.
#[cfg(windows)]
unsafe fn show_context_menu(hwnd: HWND) {
    let Ok(hmenu) = CreatePopupMenu() else {
        return;
    };

    let pause: Vec<u16> = "Pause / Resume\0".encode_utf16().collect();
    let quit: Vec<u16> = "Quit\0".encode_utf16().collect();
    let _ = AppendMenuW(hmenu, MF_STRING, ID_PAUSE as usize, windows::core::PCWSTR(pause.as_ptr()));
    let _ = AppendMenuW(hmenu, MF_SEPARATOR, 0, windows::core::PCWSTR::null());
    let _ = AppendMenuW(hmenu, MF_STRING, ID_QUIT as usize, windows::core::PCWSTR(quit.as_ptr()));

    let mut pt = POINT::default();
    let _ = GetCursorPos(&mut pt);

    // Required so menu closes when clicking outside
    let _ = SetForegroundWindow(hwnd);

    let _ = TrackPopupMenu(
        hmenu,
        TPM_LEFTALIGN | TPM_BOTTOMALIGN,
        pt.x,
        pt.y,
        0,
        hwnd,
        None,
    );

    let _ = DestroyMenu(hmenu);
}

// Non-windows stub
#[cfg(not(windows))]
impl TrayIcon {
    pub fn spawn() -> Option<Self> {
        log::debug!("No tray icon on this platform ({TOOLTIP})");
        None
    }

    pub fn poll(&mut self) -> TrayCommand {
        TrayCommand::None
    }
}

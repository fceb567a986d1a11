//! Windows host window implementation
//!
//! Locates the game window by class and title and manages the overlay
//! window's `WS_EX_TOPMOST` z-order with Win32 calls.

use std::ffi::c_void;

use windows::core::w;
use windows::Win32::Foundation::{HWND, POINT, RECT};
use windows::Win32::Graphics::Gdi::ClientToScreen;
use windows::Win32::UI::WindowsAndMessaging::{
    FindWindowW, GetClientRect, GetForegroundWindow, GetWindowLongPtrW, IsIconic, IsWindow,
    SetWindowPos, GWL_EXSTYLE, HWND_NOTOPMOST, HWND_TOPMOST, SWP_NOACTIVATE, SWP_NOMOVE,
    SWP_NOSIZE, WS_EX_TOPMOST,
};

use super::{HostWindow, PlatformError};
use crate::layout::HostRect;
use crate::visibility::HostState;

/// Handles are stored as integers so the host can move between threads.
pub struct Win32Host {
    overlay: isize,
    game: isize,
}

fn hwnd(raw: isize) -> HWND {
    HWND(raw as *mut c_void)
}

impl Win32Host {
    /// `overlay` is the raw handle of the overlay window.
    pub fn new(overlay: isize) -> Self {
        let mut host = Self { overlay, game: 0 };
        host.refresh_game_window();
        host
    }

    /// Look the game window up again (it may have been restarted).
    pub fn refresh_game_window(&mut self) -> bool {
        let found = unsafe { FindWindowW(w!("UnityWndClass"), w!("Hearthstone")) };
        match found {
            Ok(handle) if !handle.is_invalid() => {
                self.game = handle.0 as isize;
                true
            }
            _ => {
                self.game = 0;
                false
            }
        }
    }

    fn game(&self) -> Option<HWND> {
        if self.game == 0 {
            return None;
        }
        let handle = hwnd(self.game);
        unsafe { IsWindow(handle).as_bool() }.then_some(handle)
    }
}

impl HostWindow for Win32Host {
    fn host_present(&self) -> bool {
        self.game().is_some()
    }

    fn host_rect(&self) -> Option<HostRect> {
        let game = self.game()?;
        let mut rect = RECT::default();
        let mut origin = POINT::default();
        unsafe {
            GetClientRect(game, &mut rect).ok()?;
            if !ClientToScreen(game, &mut origin).as_bool() {
                return None;
            }
        }
        Some(HostRect::new(
            f64::from(origin.y),
            f64::from(origin.x),
            f64::from(rect.right - rect.left),
            f64::from(rect.bottom - rect.top),
        ))
    }

    fn host_state(&self) -> HostState {
        match self.game() {
            Some(game) => unsafe {
                HostState {
                    foreground: GetForegroundWindow() == game,
                    minimized: IsIconic(game).as_bool(),
                }
            },
            None => HostState {
                foreground: false,
                minimized: false,
            },
        }
    }

    fn is_topmost(&self) -> bool {
        let ex_style = unsafe { GetWindowLongPtrW(hwnd(self.overlay), GWL_EXSTYLE) };
        ex_style & WS_EX_TOPMOST.0 as isize != 0
    }

    fn reassert_topmost(&mut self) -> Result<(), PlatformError> {
        if self.game().is_none() {
            return Err(PlatformError::HostNotFound);
        }
        let overlay = hwnd(self.overlay);
        let flags = SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE;
        unsafe {
            SetWindowPos(overlay, HWND_NOTOPMOST, 0, 0, 0, 0, flags)
                .map_err(|e| PlatformError::Other(format!("SetWindowPos failed: {}", e)))?;
            SetWindowPos(overlay, HWND_TOPMOST, 0, 0, 0, 0, flags)
                .map_err(|e| PlatformError::Other(format!("SetWindowPos failed: {}", e)))?;
        }
        Ok(())
    }
}

//! Host window access
//!
//! The overlay follows the game's window: it reads its rectangle and
//! foreground state, and keeps the overlay window above it. Each platform
//! provides a [`HostWindow`]; [`HeadlessHost`] is a scriptable stand-in for
//! platforms without one and for tests.

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "windows")]
pub use windows::Win32Host;

use crate::layout::HostRect;
use crate::visibility::HostState;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("host window not found")]
    HostNotFound,
    #[error("{0}")]
    Other(String),
}

/// The game window plus the overlay window's z-order.
pub trait HostWindow: Send {
    /// Whether the game window currently exists.
    fn host_present(&self) -> bool;

    /// Client rectangle of the game window in screen coordinates.
    fn host_rect(&self) -> Option<HostRect>;

    fn host_state(&self) -> HostState;

    fn is_topmost(&self) -> bool;

    /// Drop and re-assert the overlay's topmost z-order.
    fn reassert_topmost(&mut self) -> Result<(), PlatformError>;
}

impl<H: HostWindow + ?Sized> HostWindow for Box<H> {
    fn host_present(&self) -> bool {
        (**self).host_present()
    }

    fn host_rect(&self) -> Option<HostRect> {
        (**self).host_rect()
    }

    fn host_state(&self) -> HostState {
        (**self).host_state()
    }

    fn is_topmost(&self) -> bool {
        (**self).is_topmost()
    }

    fn reassert_topmost(&mut self) -> Result<(), PlatformError> {
        (**self).reassert_topmost()
    }
}

/// In-memory host window.
///
/// `topmost_after` controls after how many reassertions the overlay reports
/// topmost; `None` means it never does.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessHost {
    pub present: bool,
    pub rect: HostRect,
    pub state: HostState,
    pub topmost_after: Option<u32>,
    reasserts: u32,
}

impl HeadlessHost {
    pub fn new(rect: HostRect) -> Self {
        Self {
            present: true,
            rect,
            state: HostState::default(),
            topmost_after: Some(0),
            reasserts: 0,
        }
    }

    pub fn reasserts(&self) -> u32 {
        self.reasserts
    }
}

impl HostWindow for HeadlessHost {
    fn host_present(&self) -> bool {
        self.present
    }

    fn host_rect(&self) -> Option<HostRect> {
        self.present.then_some(self.rect)
    }

    fn host_state(&self) -> HostState {
        self.state
    }

    fn is_topmost(&self) -> bool {
        self.topmost_after.is_some_and(|n| self.reasserts >= n)
    }

    fn reassert_topmost(&mut self) -> Result<(), PlatformError> {
        if !self.present {
            return Err(PlatformError::HostNotFound);
        }
        self.reasserts += 1;
        Ok(())
    }
}

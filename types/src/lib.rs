//! Shared types for the HDT overlay workspace
//!
//! - [`config`] - user-facing overlay settings (serde, TOML)
//! - [`formatting`] - display string formatting for overlay labels

pub mod config;
pub mod formatting;

pub use config::{
    CounterDisplay, CounterSettings, OverlaySettings, PanelSettings, PositionSettings,
    SideCounterSettings, TimerSettings, VisibilitySettings,
};

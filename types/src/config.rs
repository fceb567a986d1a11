//! Overlay settings shared between the core and the overlay crates.
//!
//! The settings file is a flat set of user preferences grouped into
//! sections. Every field has a default so partial files load cleanly;
//! the overlay re-reads the whole struct on every tick.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Root
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OverlaySettings {
    pub visibility: VisibilitySettings,
    pub panels: PanelSettings,
    pub positions: PositionSettings,
    pub timers: TimerSettings,
    pub counters: CounterSettings,
    /// Swap `.` and `,` in numeric labels
    pub european_number_format: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Visibility
// ─────────────────────────────────────────────────────────────────────────────

/// Explicit hide/show switches, one per toggleable overlay region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilitySettings {
    pub hide_overlay: bool,
    pub hide_in_background: bool,
    pub hide_in_spectator: bool,
    pub hide_in_menu: bool,
    pub hide_decks: bool,

    pub hide_player_cards: bool,
    pub hide_player_card_count: bool,
    pub hide_player_draw_chances: bool,
    pub hide_player_fatigue_count: bool,
    pub hide_player_attack_icon: bool,

    pub hide_opponent_cards: bool,
    pub hide_opponent_card_count: bool,
    pub hide_opponent_draw_chances: bool,
    pub hide_opponent_fatigue_count: bool,
    pub hide_opponent_attack_icon: bool,
    pub hide_opponent_card_age: bool,
    pub hide_opponent_card_marks: bool,

    pub hide_timers: bool,
    pub show_flavor_text: bool,
    pub show_deck_title: bool,
    pub show_deck_wins: bool,
    pub show_win_rate_against: bool,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            hide_overlay: false,
            hide_in_background: false,
            hide_in_spectator: false,
            hide_in_menu: true,
            hide_decks: false,
            hide_player_cards: false,
            hide_player_card_count: false,
            hide_player_draw_chances: false,
            hide_player_fatigue_count: false,
            hide_player_attack_icon: false,
            hide_opponent_cards: false,
            hide_opponent_card_count: false,
            hide_opponent_draw_chances: false,
            hide_opponent_fatigue_count: false,
            hide_opponent_attack_icon: false,
            hide_opponent_card_age: false,
            hide_opponent_card_marks: false,
            hide_timers: false,
            show_flavor_text: false,
            show_deck_title: false,
            show_deck_wins: false,
            show_win_rate_against: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panels (opacity / scaling)
// ─────────────────────────────────────────────────────────────────────────────

/// Opacity values are percentages (0-100). Player/opponent scaling are
/// percentages; the secrets panel stores a plain factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub overlay_opacity: f64,
    pub player_opacity: f64,
    pub opponent_opacity: f64,
    pub secrets_opacity: f64,
    pub player_scaling: f64,
    pub opponent_scaling: f64,
    pub secrets_scaling: f64,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            overlay_opacity: 100.0,
            player_opacity: 100.0,
            opponent_opacity: 100.0,
            secrets_opacity: 100.0,
            player_scaling: 100.0,
            opponent_scaling: 100.0,
            secrets_scaling: 1.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Positions
// ─────────────────────────────────────────────────────────────────────────────

/// Anchor positions as percentages of the host window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionSettings {
    pub player_deck_top: f64,
    pub player_deck_left: f64,
    pub opponent_deck_top: f64,
    pub opponent_deck_left: f64,
    pub secrets_top: f64,
    pub secrets_left: f64,
    pub counters_player_vertical: f64,
    pub counters_player_horizontal: f64,
    pub counters_opponent_vertical: f64,
    pub counters_opponent_horizontal: f64,
    pub attack_icon_player_vertical: f64,
    pub attack_icon_player_horizontal: f64,
    pub attack_icon_opponent_vertical: f64,
    pub attack_icon_opponent_horizontal: f64,
}

impl Default for PositionSettings {
    fn default() -> Self {
        Self {
            player_deck_top: 17.0,
            player_deck_left: 99.5,
            opponent_deck_top: 17.0,
            opponent_deck_left: 0.5,
            secrets_top: 5.0,
            secrets_left: 15.0,
            counters_player_vertical: 65.7,
            counters_player_horizontal: 80.6,
            counters_opponent_vertical: 26.7,
            counters_opponent_horizontal: 80.6,
            attack_icon_player_vertical: 61.7,
            attack_icon_player_horizontal: 60.5,
            attack_icon_opponent_vertical: 33.8,
            attack_icon_opponent_horizontal: 60.5,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Timers
// ─────────────────────────────────────────────────────────────────────────────

/// Turn timer anchor (percent) and per-side label spacing (pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    pub vertical_position: f64,
    pub horizontal_position: f64,
    pub vertical_spacing: f64,
    pub horizontal_spacing: f64,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            vertical_position: 43.2,
            horizontal_position: 80.0,
            vertical_spacing: 50.0,
            horizontal_spacing: 0.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Counters
// ─────────────────────────────────────────────────────────────────────────────

/// When a special counter is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterDisplay {
    Always,
    /// Shown once the side has interacted with the mechanic
    #[default]
    Auto,
    Never,
}

/// Display mode of every special counter for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SideCounterSettings {
    pub cthun: CounterDisplay,
    pub spells: CounterDisplay,
    pub jade_golem: CounterDisplay,
    pub pogo_hopper: CounterDisplay,
    pub galakrond: CounterDisplay,
    pub libram: CounterDisplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterSettings {
    pub player: SideCounterSettings,
    pub opponent: SideCounterSettings,
}

impl Default for CounterSettings {
    fn default() -> Self {
        // The spells counter is off for the opponent unless asked for
        let opponent = SideCounterSettings {
            spells: CounterDisplay::Never,
            ..SideCounterSettings::default()
        };
        Self {
            player: SideCounterSettings::default(),
            opponent,
        }
    }
}

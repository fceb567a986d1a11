//! Turn timer label formatting.

use hdt_core::{SceneMode, TimerState};
use hdt_types::formatting::{format_clock, INFINITY_GLYPH};

/// Color cue of the combined turn timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimerColor {
    #[default]
    Default,
    /// The turn is in overtime (negative combined seconds)
    Urgent,
}

impl TimerColor {
    pub fn rgba(self) -> [u8; 4] {
        match self {
            TimerColor::Default => [255, 255, 255, 255],
            TimerColor::Urgent => [50, 205, 50, 255],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimerDisplay {
    pub turn: String,
    pub turn_color: TimerColor,
    pub player: String,
    pub opponent: String,
}

/// Format the three timer labels.
///
/// Returns `None` when there is nothing to update: outside of gameplay, or
/// while neither side has a running clock. Callers keep their previous
/// labels in that case.
pub fn format_turn_timer(state: &TimerState, scene: SceneMode) -> Option<TimerDisplay> {
    if scene != SceneMode::Gameplay {
        return None;
    }
    if state.player_seconds <= 0 && state.opponent_seconds <= 0 {
        return None;
    }

    let turn = if state.seconds == f64::INFINITY {
        INFINITY_GLYPH.to_string()
    } else {
        format_clock(state.seconds.abs() as i64)
    };
    let turn_color = if state.seconds < 0.0 {
        TimerColor::Urgent
    } else {
        TimerColor::Default
    };

    Some(TimerDisplay {
        turn,
        turn_color,
        player: format_clock(i64::from(state.player_seconds)),
        opponent: format_clock(i64::from(state.opponent_seconds)),
    })
}

//! Overlay frame: everything the presentation layer needs for one tick.
//!
//! `OverlayFrame` is a plain value. The projector mutates its own copy in
//! place each tick, so fields that a tick decides not to recompute (attack
//! values, timer labels, hand slots mid-update) carry over from the
//! previous tick.

use hdt_core::{CounterSet, FormatIcon, Side};

use crate::card_marks::CardMarkSlot;
use crate::layout::{ElementSizes, Layout, MAX_HAND_SLOTS};
use crate::minion::MinionBadge;
use crate::timer::TimerDisplay;
use crate::visibility::{PanelOpacity, PanelScaling, VisibilityFlags};

/// Per-side values shown next to a deck panel and on the board.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SideFrame {
    pub hand_count: String,
    pub deck_count: String,
    pub draw_chance: String,
    /// Damage of the next fatigue draw, only once the deck is empty
    pub fatigue: Option<String>,
    /// Total attack available on the board
    pub attack: String,
    pub counters: CounterSet,
    pub board: Vec<MinionBadge>,
}

/// Active deck banner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeckBanner {
    pub title: String,
    pub tag: String,
    pub format: String,
    pub icon: Option<FormatIcon>,
    pub wins: String,
    pub win_rate_against: String,
    /// Dust needed to craft the deck
    pub dust: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    /// Whether the overlay window as a whole is shown
    pub shown: bool,
    pub opacity: PanelOpacity,
    pub scaling: PanelScaling,
    pub visibility: VisibilityFlags,
    pub card_marks: [CardMarkSlot; MAX_HAND_SLOTS],
    pub player: SideFrame,
    pub opponent: SideFrame,
    pub deck: DeckBanner,
    pub missing_cards_warning: String,
    pub timers: TimerDisplay,
    pub sizes: ElementSizes,
    pub layout: Layout,
    pub auto_scale: f64,
}

impl Default for OverlayFrame {
    fn default() -> Self {
        Self {
            shown: false,
            opacity: PanelOpacity::default(),
            scaling: PanelScaling::default(),
            visibility: VisibilityFlags::default(),
            card_marks: Default::default(),
            player: SideFrame::default(),
            opponent: SideFrame::default(),
            deck: DeckBanner::default(),
            missing_cards_warning: String::new(),
            timers: TimerDisplay::default(),
            sizes: ElementSizes::default(),
            layout: Layout::default(),
            auto_scale: 1.0,
        }
    }
}

impl OverlayFrame {
    pub fn side(&self, side: Side) -> &SideFrame {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Number of hand slots currently shown.
    pub fn visible_card_marks(&self) -> usize {
        self.card_marks
            .iter()
            .filter(|slot| slot.visibility.is_visible())
            .count()
    }
}

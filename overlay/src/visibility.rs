//! Visibility policy for every toggleable overlay region.
//!
//! Each region is one row of [`VISIBILITY_TABLE`]: a boolean expression
//! over the user's hide flags and the current game predicates. Adding a
//! region means adding a row, not another branch in the projector.

use std::collections::BTreeMap;

use hdt_core::{DeckContext, GameMode, GameStateView};
use hdt_types::{PanelSettings, VisibilitySettings};

/// Display state of a region, matching the presentation layer's notion of
/// hidden (keeps its layout slot) versus collapsed (takes no space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Collapsed,
}

impl Visibility {
    #[inline]
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }

    #[inline]
    pub fn from_visible(visible: bool) -> Self {
        if visible { Visibility::Visible } else { Visibility::Collapsed }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    PlayerStack,
    OpponentStack,
    PlayerCardList,
    OpponentCardList,
    PlayerCardCount,
    PlayerDrawChance,
    PlayerFatigue,
    OpponentCardCount,
    OpponentDrawChance,
    OpponentFatigue,
    PlayerAttackIcon,
    OpponentAttackIcon,
    Timers,
    DeckTitle,
    DeckWins,
    WinRateAgainst,
    MissingCardsWarning,
    BattlegroundsTopBar,
    FlavorText,
    CardMarks,
}

/// Interactive state owned by the overlay window itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    /// User is dragging overlay elements around; shows everything movable
    pub movable: bool,
    /// Player list was hidden through the hotkey toggle
    pub player_cards_hidden: bool,
    pub opponent_cards_hidden: bool,
    /// Hidden by the application (e.g. while a dialog is open)
    pub force_hidden: bool,
}

/// State of the game's host window as reported by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostState {
    pub foreground: bool,
    pub minimized: bool,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            foreground: true,
            minimized: false,
        }
    }
}

/// Named conditions the visibility rules are written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Predicates {
    pub in_menu: bool,
    pub in_battlegrounds: bool,
    pub in_mercenaries: bool,
    pub in_spectator: bool,
    pub using_premade: bool,
    pub mulligan_done: bool,
    pub warning_pending: bool,
    pub host_foreground: bool,
    pub host_minimized: bool,
    pub overlay_visible: bool,
    pub ui: UiState,
}

impl Predicates {
    pub fn new(
        game: &GameStateView,
        decks: &DeckContext,
        host: HostState,
        ui: UiState,
        overlay_visible: bool,
    ) -> Self {
        Self {
            in_menu: game.in_menu,
            in_battlegrounds: game.is_battlegrounds(),
            in_mercenaries: game.is_mercenaries(),
            in_spectator: game.game_mode == GameMode::Spectator,
            using_premade: game.using_premade,
            mulligan_done: game.mulligan_done,
            warning_pending: decks.warning_pending(),
            host_foreground: host.foreground,
            host_minimized: host.minimized,
            overlay_visible,
            ui,
        }
    }
}

type HideRule = fn(&VisibilitySettings, &Predicates) -> bool;

/// One row of the visibility table.
pub struct RegionRule {
    pub region: Region,
    /// Region is hidden when this evaluates to true
    pub hidden_when: HideRule,
    /// State used when hidden
    pub hidden_as: Visibility,
}

/// Deck lists are suppressed outside constructed play unless the user is
/// arranging the overlay.
fn hide_deck(s: &VisibilitySettings, p: &Predicates) -> bool {
    let suppressed =
        s.hide_decks || p.in_battlegrounds || p.in_mercenaries || (s.hide_in_menu && p.in_menu);
    suppressed && !p.ui.movable
}

fn no_board_meta(p: &Predicates) -> bool {
    p.in_menu || p.in_battlegrounds || p.in_mercenaries
}

pub static VISIBILITY_TABLE: &[RegionRule] = &[
    RegionRule {
        region: Region::PlayerStack,
        hidden_when: |s, p| p.ui.player_cards_hidden || hide_deck(s, p),
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::OpponentStack,
        hidden_when: |s, p| p.ui.opponent_cards_hidden || hide_deck(s, p),
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::PlayerCardList,
        hidden_when: |s, _| s.hide_player_cards,
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::OpponentCardList,
        hidden_when: |s, _| s.hide_opponent_cards,
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::PlayerCardCount,
        hidden_when: |s, _| s.hide_player_card_count,
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::PlayerDrawChance,
        hidden_when: |s, _| s.hide_player_draw_chances,
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::PlayerFatigue,
        hidden_when: |s, _| s.hide_player_fatigue_count,
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::OpponentCardCount,
        hidden_when: |s, _| s.hide_opponent_card_count,
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::OpponentDrawChance,
        hidden_when: |s, _| s.hide_opponent_draw_chances,
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::OpponentFatigue,
        hidden_when: |s, _| s.hide_opponent_fatigue_count,
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::PlayerAttackIcon,
        hidden_when: |s, p| s.hide_player_attack_icon || no_board_meta(p),
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::OpponentAttackIcon,
        hidden_when: |s, p| s.hide_opponent_attack_icon || no_board_meta(p),
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::Timers,
        hidden_when: |s, p| s.hide_timers || (p.in_menu && !p.ui.movable),
        hidden_as: Visibility::Hidden,
    },
    RegionRule {
        region: Region::DeckTitle,
        hidden_when: |s, p| !(s.show_deck_title && p.using_premade),
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::DeckWins,
        hidden_when: |s, p| !(s.show_deck_wins && p.using_premade),
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::WinRateAgainst,
        hidden_when: |s, p| !(s.show_win_rate_against && p.using_premade),
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::MissingCardsWarning,
        hidden_when: |_, p| p.in_menu || !p.warning_pending,
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::BattlegroundsTopBar,
        hidden_when: |_, p| p.in_menu || !p.in_battlegrounds,
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::FlavorText,
        hidden_when: |s, p| {
            let in_match = p.mulligan_done || p.in_battlegrounds || p.in_mercenaries;
            !s.show_flavor_text
                || p.in_menu
                || !in_match
                || !p.host_foreground
                || !p.overlay_visible
        },
        hidden_as: Visibility::Collapsed,
    },
    RegionRule {
        region: Region::CardMarks,
        hidden_when: |s, p| p.in_menu || (s.hide_opponent_card_age && s.hide_opponent_card_marks),
        hidden_as: Visibility::Hidden,
    },
];

/// Evaluated visibility of every region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityFlags {
    regions: BTreeMap<Region, Visibility>,
}

impl VisibilityFlags {
    /// Regions missing from the table read as collapsed.
    pub fn get(&self, region: Region) -> Visibility {
        self.regions
            .get(&region)
            .copied()
            .unwrap_or(Visibility::Collapsed)
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.get(region).is_visible()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, Visibility)> + '_ {
        self.regions.iter().map(|(r, v)| (*r, *v))
    }
}

/// Evaluate the whole visibility table.
pub fn compute_visibility(settings: &VisibilitySettings, predicates: &Predicates) -> VisibilityFlags {
    let regions = VISIBILITY_TABLE
        .iter()
        .map(|rule| {
            let visibility = if (rule.hidden_when)(settings, predicates) {
                rule.hidden_as
            } else {
                Visibility::Visible
            };
            (rule.region, visibility)
        })
        .collect();
    VisibilityFlags { regions }
}

/// Whether the overlay window as a whole should be shown.
pub fn overlay_shown(settings: &VisibilitySettings, predicates: &Predicates) -> bool {
    let hidden = (settings.hide_in_background && !predicates.host_foreground)
        || (settings.hide_in_spectator && predicates.in_spectator)
        || settings.hide_overlay
        || predicates.ui.force_hidden
        || predicates.host_minimized;
    !hidden
}

/// Panel opacities as 0.0-1.0 factors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelOpacity {
    pub overlay: f64,
    pub player: f64,
    pub opponent: f64,
    pub secrets: f64,
}

impl PanelOpacity {
    pub fn from_settings(panels: &PanelSettings) -> Self {
        Self {
            overlay: panels.overlay_opacity / 100.0,
            player: panels.player_opacity / 100.0,
            opponent: panels.opponent_opacity / 100.0,
            secrets: panels.secrets_opacity / 100.0,
        }
    }
}

/// Uniform scale factors per panel. Player and opponent are independent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelScaling {
    pub player: f64,
    pub opponent: f64,
    pub secrets: f64,
    /// The linked opponent deck display follows the opponent panel
    pub opponent_deck_link: f64,
}

impl PanelScaling {
    pub fn from_settings(panels: &PanelSettings) -> Self {
        let opponent = panels.opponent_scaling / 100.0;
        Self {
            player: panels.player_scaling / 100.0,
            opponent,
            secrets: panels.secrets_scaling,
            opponent_deck_link: opponent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predicates() -> Predicates {
        Predicates {
            host_foreground: true,
            overlay_visible: true,
            mulligan_done: true,
            ..Predicates::default()
        }
    }

    #[test]
    fn test_every_region_has_a_rule() {
        let flags = compute_visibility(&VisibilitySettings::default(), &predicates());
        assert_eq!(flags.iter().count(), VISIBILITY_TABLE.len());
        assert_eq!(VISIBILITY_TABLE.len(), 20);
    }

    #[test]
    fn test_defaults_show_core_regions() {
        let flags = compute_visibility(&VisibilitySettings::default(), &predicates());
        assert!(flags.is_visible(Region::PlayerStack));
        assert!(flags.is_visible(Region::OpponentStack));
        assert!(flags.is_visible(Region::PlayerAttackIcon));
        assert!(flags.is_visible(Region::Timers));
        assert!(flags.is_visible(Region::CardMarks));
        assert!(!flags.is_visible(Region::DeckTitle));
        assert!(!flags.is_visible(Region::BattlegroundsTopBar));
        assert!(!flags.is_visible(Region::MissingCardsWarning));
    }

    #[test]
    fn test_battlegrounds_suppresses_deck_unless_movable() {
        let settings = VisibilitySettings::default();
        let mut p = predicates();
        p.in_battlegrounds = true;
        let flags = compute_visibility(&settings, &p);
        assert_eq!(flags.get(Region::PlayerStack), Visibility::Collapsed);
        assert_eq!(flags.get(Region::OpponentStack), Visibility::Collapsed);
        assert_eq!(flags.get(Region::PlayerAttackIcon), Visibility::Collapsed);
        assert!(flags.is_visible(Region::BattlegroundsTopBar));

        p.ui.movable = true;
        let flags = compute_visibility(&settings, &p);
        assert!(flags.is_visible(Region::PlayerStack));
        assert!(flags.is_visible(Region::OpponentStack));
        // The override only applies to the deck panels
        assert_eq!(flags.get(Region::PlayerAttackIcon), Visibility::Collapsed);
    }

    #[test]
    fn test_movable_overrides_explicit_hide_decks() {
        let settings = VisibilitySettings {
            hide_decks: true,
            ..VisibilitySettings::default()
        };
        let mut p = predicates();
        assert!(!compute_visibility(&settings, &p).is_visible(Region::PlayerStack));
        p.ui.movable = true;
        assert!(compute_visibility(&settings, &p).is_visible(Region::PlayerStack));
    }

    #[test]
    fn test_menu_hides_timers_and_attack_icons() {
        let mut p = predicates();
        p.in_menu = true;
        let flags = compute_visibility(&VisibilitySettings::default(), &p);
        assert_eq!(flags.get(Region::Timers), Visibility::Hidden);
        assert_eq!(flags.get(Region::OpponentAttackIcon), Visibility::Collapsed);
        assert_eq!(flags.get(Region::CardMarks), Visibility::Hidden);
        // hide_in_menu defaults to true
        assert_eq!(flags.get(Region::PlayerStack), Visibility::Collapsed);
    }

    #[test]
    fn test_card_marks_hidden_only_when_both_flags_set() {
        let mut settings = VisibilitySettings {
            hide_opponent_card_age: true,
            ..VisibilitySettings::default()
        };
        let p = predicates();
        assert!(compute_visibility(&settings, &p).is_visible(Region::CardMarks));
        settings.hide_opponent_card_marks = true;
        assert_eq!(
            compute_visibility(&settings, &p).get(Region::CardMarks),
            Visibility::Hidden
        );
    }

    #[test]
    fn test_premade_banners() {
        let settings = VisibilitySettings {
            show_deck_title: true,
            show_deck_wins: true,
            ..VisibilitySettings::default()
        };
        let mut p = predicates();
        assert!(!compute_visibility(&settings, &p).is_visible(Region::DeckTitle));
        p.using_premade = true;
        let flags = compute_visibility(&settings, &p);
        assert!(flags.is_visible(Region::DeckTitle));
        assert!(flags.is_visible(Region::DeckWins));
        assert!(!flags.is_visible(Region::WinRateAgainst));
    }

    #[test]
    fn test_overlay_shown_rules() {
        let mut settings = VisibilitySettings::default();
        let mut p = predicates();
        assert!(overlay_shown(&settings, &p));
        p.host_foreground = false;
        assert!(overlay_shown(&settings, &p));
        settings.hide_in_background = true;
        assert!(!overlay_shown(&settings, &p));
        p.host_foreground = true;
        p.host_minimized = true;
        assert!(!overlay_shown(&settings, &p));
    }

    #[test]
    fn test_opacity_and_scaling_are_linear() {
        let panels = PanelSettings {
            player_opacity: 50.0,
            opponent_opacity: 0.0,
            player_scaling: 120.0,
            opponent_scaling: 80.0,
            secrets_scaling: 1.5,
            ..PanelSettings::default()
        };
        let opacity = PanelOpacity::from_settings(&panels);
        assert_eq!(opacity.player, 0.5);
        assert_eq!(opacity.opponent, 0.0);
        assert_eq!(opacity.overlay, 1.0);
        let scaling = PanelScaling::from_settings(&panels);
        assert_eq!(scaling.player, 1.2);
        assert_eq!(scaling.opponent, 0.8);
        assert_eq!(scaling.opponent_deck_link, 0.8);
        assert_eq!(scaling.secrets, 1.5);
    }
}

//! Per-tick projection of the game snapshot onto the overlay frame.
//!
//! The projector owns the current [`OverlayFrame`] and rewrites it in
//! place. One `update` runs strictly in this order:
//!
//! 1. evaluate visibility predicates against the borrowed snapshot
//! 2. refresh the opponent hand slots
//! 3. rebuild both board badge lists
//! 4. opacities, region visibility, counters, card counts, banners, attack
//! 5. sizes and positions for the last known host rectangle
//! 6. let visible secondary windows refresh themselves
//!
//! Nothing from the snapshot is retained past the call.

use hashbrown::HashMap;

use hdt_core::dust::total_dust;
use hdt_core::{
    compute_counters, CardType, DeckContext, GameStateView, GameTag, SceneMode, Side, TimerState,
    Zone,
};
use hdt_types::formatting::{format_draw_chance, format_record, join_truncated};
use hdt_types::OverlaySettings;

use crate::card_marks::update_card_marks;
use crate::frame::{DeckBanner, OverlayFrame, SideFrame};
use crate::layout::{
    apply_auto_scaling, compute_positions, default_scaled_elements, ElementMetrics, HostRect,
    LayoutContext, LayoutError, ScaledBehavior,
};
use crate::minion::{BaseCard, CardDatabase, MinionBadge};
use crate::timer::format_turn_timer;
use crate::visibility::{
    compute_visibility, overlay_shown, HostState, PanelOpacity, PanelScaling, Predicates, Region,
    UiState,
};

/// Deck size shown before the game has started.
pub const DEFAULT_DECK_SIZE: i32 = 30;
/// Number of missing card names listed in the warning banner.
pub const MISSING_CARDS_SHOWN: usize = 3;

/// A window outside the overlay (player/opponent deck windows) that mirrors
/// parts of the frame and refreshes itself when asked.
pub trait SecondaryWindow: Send {
    fn name(&self) -> &str;
    fn is_visible(&self) -> bool;
    fn update(&mut self, frame: &OverlayFrame);
}

pub struct OverlayProjector {
    frame: OverlayFrame,
    host_rect: Option<HostRect>,
    host: HostState,
    ui: UiState,
    /// Inputs of the last layout, reused when only the host window moves
    settings: OverlaySettings,
    metrics: ElementMetrics,
    layout_ctx: LayoutContext,
    cards: Box<dyn CardDatabase>,
    scaled: Vec<Box<dyn ScaledBehavior>>,
    secondary: Vec<Box<dyn SecondaryWindow>>,
    topmost_requested: bool,
}

impl Default for OverlayProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayProjector {
    pub fn new() -> Self {
        Self {
            frame: OverlayFrame::default(),
            host_rect: None,
            host: HostState::default(),
            ui: UiState::default(),
            settings: OverlaySettings::default(),
            metrics: ElementMetrics::default(),
            layout_ctx: LayoutContext::default(),
            cards: Box::new(HashMap::<String, BaseCard>::new()),
            scaled: default_scaled_elements(),
            secondary: Vec::new(),
            topmost_requested: false,
        }
    }

    pub fn with_card_database(mut self, cards: Box<dyn CardDatabase>) -> Self {
        self.cards = cards;
        self
    }

    pub fn add_secondary_window(&mut self, window: Box<dyn SecondaryWindow>) {
        self.secondary.push(window);
    }

    pub fn frame(&self) -> &OverlayFrame {
        &self.frame
    }

    pub fn host_rect(&self) -> Option<HostRect> {
        self.host_rect
    }

    pub fn set_host_state(&mut self, host: HostState) {
        self.host = host;
    }

    pub fn set_ui_state(&mut self, ui: UiState) {
        self.ui = ui;
    }

    /// Whether a refresh tick asked for the overlay to be re-raised. Clears
    /// the request.
    pub fn take_topmost_request(&mut self) -> bool {
        std::mem::take(&mut self.topmost_requested)
    }

    /// Run one full tick.
    pub fn update(
        &mut self,
        game: &GameStateView,
        settings: &OverlaySettings,
        decks: &DeckContext,
        metrics: &ElementMetrics,
        refresh: bool,
    ) -> &OverlayFrame {
        if refresh {
            self.topmost_requested = true;
        }

        // 1. predicates
        let mut predicates = Predicates::new(game, decks, self.host, self.ui, false);
        let shown = overlay_shown(&settings.visibility, &predicates);
        predicates.overlay_visible = shown;
        self.frame.shown = shown;
        let flags = compute_visibility(&settings.visibility, &predicates);

        // 2. hand slots
        update_card_marks(
            &mut self.frame.card_marks,
            game,
            &settings.visibility,
            flags.get(Region::CardMarks),
        );

        // 3. boards
        for side in Side::BOTH {
            let badges = game
                .board_minions(side)
                .into_iter()
                .map(|entity| MinionBadge::from_entity(entity, self.cards.as_ref()))
                .collect();
            side_frame_mut(&mut self.frame, side).board = badges;
        }

        // 4. panel values
        self.frame.opacity = PanelOpacity::from_settings(&settings.panels);
        self.frame.scaling = PanelScaling::from_settings(&settings.panels);

        let european = settings.european_number_format;
        for side in Side::BOTH {
            let counter_settings = match side {
                Side::Player => &settings.counters.player,
                Side::Opponent => &settings.counters.opponent,
            };
            let counters = compute_counters(game, side, counter_settings);
            let target = side_frame_mut(&mut self.frame, side);
            target.counters = counters;
            update_card_counts(target, game, side, european);
        }

        self.frame.deck = deck_banner(decks, european);
        self.frame.missing_cards_warning = if decks.warning_pending() {
            join_truncated(&decks.not_found_cards, MISSING_CARDS_SHOWN)
        } else {
            String::new()
        };

        let attack_shown = flags.is_visible(Region::PlayerAttackIcon)
            || flags.is_visible(Region::OpponentAttackIcon);
        if game.setup_done && attack_shown {
            self.frame.player.attack = board_damage(game, Side::Player).to_string();
            self.frame.opponent.attack = board_damage(game, Side::Opponent).to_string();
        }
        self.frame.visibility = flags;

        // 5. layout
        self.settings = settings.clone();
        self.metrics = *metrics;
        self.layout_ctx = layout_context(game, settings);
        if let Some(rect) = self.host_rect {
            if let Err(e) = self.relayout(rect) {
                tracing::debug!(error = %e, "Skipping layout for this tick");
            }
        }

        // 6. secondary windows
        for window in self.secondary.iter_mut().filter(|w| w.is_visible()) {
            tracing::trace!(window = window.name(), "Updating secondary window");
            window.update(&self.frame);
        }

        &self.frame
    }

    /// Update the timer labels. Labels are left alone when the formatter
    /// declines (no running clock, or not in gameplay).
    pub fn update_turn_timer(&mut self, state: &TimerState, scene: SceneMode) -> bool {
        match format_turn_timer(state, scene) {
            Some(display) => {
                self.frame.timers = display;
                true
            }
            None => false,
        }
    }

    /// The host window moved or resized: recompute sizes, auto scaling and
    /// positions from the inputs of the last tick.
    pub fn on_host_rect(&mut self, rect: HostRect) -> Result<(), LayoutError> {
        rect.validate()?;
        self.host_rect = Some(rect);
        self.relayout(rect)
    }

    fn relayout(&mut self, rect: HostRect) -> Result<(), LayoutError> {
        let mut layout = compute_positions(&rect, &self.settings, &self.metrics, &self.layout_ctx)?;
        let auto_scale = apply_auto_scaling(&rect, &mut self.scaled)?;
        for dependent in &self.scaled {
            layout.positions.insert(dependent.id(), dependent.position());
        }

        if self.frame.sizes.board_height != layout.sizes.board_height {
            tracing::debug!(
                height = rect.height,
                board_height = layout.sizes.board_height,
                "Board sizes changed"
            );
        }
        let mut sizes = layout.sizes;
        // Keep the last usable font size while the host is too small for one
        if sizes.attack_font_size.is_none() {
            sizes.attack_font_size = self.frame.sizes.attack_font_size;
        }
        self.frame.sizes = sizes;
        layout.sizes = sizes;
        self.frame.layout = layout;
        self.frame.auto_scale = auto_scale;
        Ok(())
    }
}

fn side_frame_mut(frame: &mut OverlayFrame, side: Side) -> &mut SideFrame {
    match side {
        Side::Player => &mut frame.player,
        Side::Opponent => &mut frame.opponent,
    }
}

fn layout_context(game: &GameStateView, settings: &OverlaySettings) -> LayoutContext {
    let main_action = game
        .step()
        .is_some_and(hdt_core::entity::step::is_main_action);
    let mercs_to_nominate = game
        .game_entity()
        .is_some_and(|e| e.has_tag(GameTag::AllowMoveMinion));
    LayoutContext {
        in_mercenaries: game.is_mercenaries(),
        main_action,
        mercs_to_nominate,
        opponent_hand_count: game.opponent.hand_count,
        show_flavor_text: settings.visibility.show_flavor_text,
    }
}

fn update_card_counts(target: &mut SideFrame, game: &GameStateView, side: Side, european: bool) {
    let view = game.side(side);
    let deck_count = if game.game_started() {
        view.deck_count
    } else {
        DEFAULT_DECK_SIZE
    };
    target.hand_count = view.hand_count.to_string();
    target.deck_count = deck_count.to_string();
    target.draw_chance = format_draw_chance(1, deck_count, european);
    target.fatigue = (deck_count <= 0).then(|| {
        let fatigue = game
            .player_entity(side)
            .map_or(0, |e| e.tag(GameTag::Fatigue));
        (fatigue + 1).to_string()
    });
}

/// Attack a side could still deal this turn with its hero and minions.
pub fn board_damage(game: &GameStateView, side: Side) -> i32 {
    game.in_zone(side, Zone::Play)
        .filter(|e| matches!(e.card_type(), CardType::Minion | CardType::Hero))
        .filter(|e| e.can_attack())
        .map(|e| e.attack().max(0))
        .sum()
}

fn deck_banner(decks: &DeckContext, european: bool) -> DeckBanner {
    let Some(deck) = &decks.active_deck else {
        return DeckBanner::default();
    };
    let record = format_record(decks.record.wins, decks.record.losses, european);
    let win_rate_against = match &decks.opponent_class {
        Some(class) => format!(
            "VS {class}: {}",
            format_record(
                decks.record_vs_opponent.wins,
                decks.record_vs_opponent.losses,
                european
            )
        ),
        None => String::new(),
    };
    DeckBanner {
        title: deck.name.clone(),
        tag: deck.tag_text(),
        format: deck.format_text().to_string(),
        icon: Some(deck.format_icon()),
        wins: record,
        win_rate_against,
        dust: total_dust(deck, false, false),
    }
}

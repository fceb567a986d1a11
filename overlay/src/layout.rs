//! Resolution-independent layout of overlay elements.
//!
//! Every position is derived from the host window rectangle, the user's
//! percentage anchors and each element's intrinsic size. Horizontal board
//! anchors are expressed against a 4:3 board that is centered in wider
//! windows (see [`scaled_x`]).

use std::collections::BTreeMap;

use hdt_types::OverlaySettings;

use crate::visibility::PanelScaling;

/// Reference height for [`auto_scale`].
pub const REFERENCE_HEIGHT: f64 = 1080.0;
pub const AUTO_SCALE_MIN: f64 = 0.8;
pub const AUTO_SCALE_MAX: f64 = 1.3;
/// Gap between the opponent panel and its linked deck display.
pub const SECONDARY_MARGIN: f64 = 10.0;
/// Inset of the flavor text from the bottom-right corner.
pub const FLAVOR_TEXT_INSET: f64 = 10.0;
/// Card marks never go above this many pixels from the top edge.
pub const CARD_MARK_MIN_TOP: f64 = 5.0;
pub const MAX_HAND_SLOTS: usize = 10;

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq)]
pub enum LayoutError {
    #[error("host rectangle is degenerate ({width}x{height})")]
    Degenerate { width: f64, height: f64 },
}

/// Host window rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl HostRect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Fails for rectangles that would make any ratio undefined, such as
    /// the zero-height window the game reports while it is still starting.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(LayoutError::Degenerate {
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn scaled(self, scale: f64) -> Self {
        Self::new(self.width * scale, self.height * scale)
    }
}

/// Final placement of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub left: f64,
    pub top: f64,
    pub scale: f64,
}

impl Position {
    pub fn new(left: f64, top: f64, scale: f64) -> Self {
        Self { left, top, scale }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    PlayerStack,
    OpponentStack,
    OpponentDeckLink,
    Secrets,
    TurnTimer,
    PlayerTimer,
    OpponentTimer,
    PlayerCounters,
    OpponentCounters,
    PlayerAttackIcon,
    OpponentAttackIcon,
    PlayerBoard,
    OpponentBoard,
    FlavorText,
    /// Opponent hand slot, 0-based
    CardMark(u8),
    BattlegroundsTopBar,
    HeroNotification,
    BobsBuddy,
    PastOpponentBoard,
    ExperienceCounter,
    MercenariesTaskListButton,
    MercenariesTaskList,
}

/// Intrinsic (unscaled) sizes of the elements whose own dimensions take
/// part in their placement. These come from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementMetrics {
    pub player_stack: Size,
    /// Visible part of the opponent panel (count, chance and list)
    pub opponent_stack: Size,
    pub opponent_deck_link: Size,
    pub flavor_text: Size,
    pub card_mark: Size,
}

impl Default for ElementMetrics {
    fn default() -> Self {
        Self {
            player_stack: Size::new(240.0, 620.0),
            opponent_stack: Size::new(240.0, 620.0),
            opponent_deck_link: Size::new(240.0, 36.0),
            flavor_text: Size::new(300.0, 120.0),
            card_mark: Size::new(37.0, 49.0),
        }
    }
}

/// Game facts that move elements around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutContext {
    pub in_mercenaries: bool,
    pub main_action: bool,
    pub mercs_to_nominate: bool,
    pub opponent_hand_count: usize,
    pub show_flavor_text: bool,
}

/// Element sizes derived from the host height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementSizes {
    pub attack_icon_width: f64,
    /// `None` while the host is too small for a non-zero font
    pub attack_font_size: Option<f64>,
    pub attack_font_margin_top: f64,
    pub counter_icon_scale: f64,
    pub card_width: f64,
    pub card_height: f64,
    pub board_width: f64,
    pub board_height: f64,
    pub minion_width: f64,
    pub minion_margin: f64,
}

impl ElementSizes {
    pub fn from_rect(rect: &HostRect) -> Result<Self, LayoutError> {
        rect.validate()?;
        let h = rect.height;
        let ratio = screen_ratio(rect);
        let font = (h * 0.0204).round();
        let board_width = rect.width * ratio;
        let minion_width = board_width * 0.63 / 7.0;
        Ok(Self {
            attack_icon_width: (h * 0.0695).round(),
            attack_font_size: (font > 0.0).then_some(font),
            attack_font_margin_top: (h * 0.0038).round(),
            counter_icon_scale: (h / 1800.0).min(1.0),
            card_width: h * 0.125,
            card_height: h * 0.189,
            board_width,
            board_height: h * 0.158,
            minion_width,
            minion_margin: minion_width * 0.05,
        })
    }
}

/// Width of the 4:3 board relative to the host width.
pub fn screen_ratio(rect: &HostRect) -> f64 {
    (4.0 / 3.0) / (rect.width / rect.height)
}

/// Horizontal pixel position of a board-relative fraction.
pub fn scaled_x(fraction: f64, width: f64, ratio: f64) -> f64 {
    width * ratio * fraction + width * (1.0 - ratio) / 2.0
}

/// Auto-scale factor for the game-mode specific widgets.
pub fn auto_scale(rect: &HostRect) -> f64 {
    (rect.height / REFERENCE_HEIGHT).clamp(AUTO_SCALE_MIN, AUTO_SCALE_MAX)
}

/// Where a panel linked to an anchor sibling ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Below(f64),
    Above(f64),
}

impl Placement {
    pub fn top(self) -> f64 {
        match self {
            Placement::Below(top) | Placement::Above(top) => top,
        }
    }
}

/// Place a panel under its sibling if it fits entirely within the host,
/// otherwise above the sibling.
pub fn place_secondary(
    anchor_top: f64,
    sibling_height: f64,
    element_height: f64,
    margin: f64,
    host_height: f64,
) -> Placement {
    if anchor_top + sibling_height + margin + element_height <= host_height {
        Placement::Below(anchor_top + sibling_height + margin)
    } else {
        Placement::Above(anchor_top - element_height - margin)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Card mark slots
// ─────────────────────────────────────────────────────────────────────────────

const HAND_CENTER_X: f64 = 0.476;
const HAND_SLOT_SPREAD: f64 = 0.36;
const HAND_TOP_Y: f64 = 0.012;
const HAND_ARC_Y: f64 = 0.05;

/// Board-relative anchor of one hand slot when the hand holds `hand_count`
/// cards. The hand fans out from the center and curves down at the edges.
pub fn card_mark_anchor(hand_count: usize, index: usize) -> (f64, f64) {
    let n = hand_count.clamp(1, MAX_HAND_SLOTS) as f64;
    let offset = index as f64 - (n - 1.0) / 2.0;
    let step = HAND_SLOT_SPREAD / n.max(4.0);
    let x = HAND_CENTER_X + offset * step;
    let y = HAND_TOP_Y + HAND_ARC_Y * (offset / n).powi(2);
    (x, y)
}

fn card_mark_position(rect: &HostRect, ratio: f64, size: Size, hand_count: usize, index: usize) -> Position {
    let (x, y) = card_mark_anchor(hand_count, index);
    let left = scaled_x(x, rect.width, ratio) - size.width / 2.0;
    let top = (y * rect.height - size.height / 3.0).max(CARD_MARK_MIN_TOP);
    Position::new(left, top, 1.0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Every computed position plus the values they were derived from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub positions: BTreeMap<ElementId, Position>,
    pub sizes: ElementSizes,
    pub opponent_deck_link: Option<Placement>,
}

impl Layout {
    pub fn get(&self, id: ElementId) -> Option<Position> {
        self.positions.get(&id).copied()
    }
}

fn board_tops(rect: &HostRect, sizes: &ElementSizes, ctx: &LayoutContext) -> (f64, f64) {
    let h = rect.height;
    let merc_main = ctx.in_mercenaries && ctx.main_action && !ctx.mercs_to_nominate;
    let opponent_offset = if merc_main { h * 0.142 } else { h * 0.045 };
    let player_offset = if ctx.in_mercenaries {
        if merc_main { h * -0.09 } else { h * 0.003 }
    } else {
        h * 0.03
    };
    (
        h / 2.0 - sizes.board_height - opponent_offset,
        h / 2.0 - player_offset,
    )
}

/// Compute the position of every element for one host rectangle.
pub fn compute_positions(
    rect: &HostRect,
    settings: &OverlaySettings,
    metrics: &ElementMetrics,
    ctx: &LayoutContext,
) -> Result<Layout, LayoutError> {
    let sizes = ElementSizes::from_rect(rect)?;
    let (w, h) = (rect.width, rect.height);
    let ratio = screen_ratio(rect);
    let scaling = PanelScaling::from_settings(&settings.panels);
    let pos = &settings.positions;
    let timers = &settings.timers;

    let mut positions = BTreeMap::new();

    positions.insert(
        ElementId::PlayerStack,
        Position::new(
            w * pos.player_deck_left / 100.0 - metrics.player_stack.width * scaling.player,
            h * pos.player_deck_top / 100.0,
            scaling.player,
        ),
    );

    let opponent_top = h * pos.opponent_deck_top / 100.0;
    let opponent_left = w * pos.opponent_deck_left / 100.0;
    positions.insert(
        ElementId::OpponentStack,
        Position::new(opponent_left, opponent_top, scaling.opponent),
    );

    let link = place_secondary(
        opponent_top,
        metrics.opponent_stack.height * scaling.opponent,
        metrics.opponent_deck_link.height * scaling.opponent_deck_link,
        SECONDARY_MARGIN,
        h,
    );
    positions.insert(
        ElementId::OpponentDeckLink,
        Position::new(opponent_left, link.top(), scaling.opponent_deck_link),
    );

    positions.insert(
        ElementId::Secrets,
        Position::new(
            w * pos.secrets_left / 100.0,
            h * pos.secrets_top / 100.0,
            scaling.secrets,
        ),
    );

    let timer_top = h * timers.vertical_position / 100.0;
    let timer_left = w * timers.horizontal_position / 100.0;
    positions.insert(
        ElementId::TurnTimer,
        Position::new(timer_left, timer_top - 5.0, 1.0),
    );
    positions.insert(
        ElementId::OpponentTimer,
        Position::new(
            timer_left + timers.horizontal_spacing,
            timer_top - timers.vertical_spacing,
            1.0,
        ),
    );
    positions.insert(
        ElementId::PlayerTimer,
        Position::new(
            timer_left + timers.horizontal_spacing,
            timer_top + timers.vertical_spacing,
            1.0,
        ),
    );

    let board_anchor = |vertical: f64, horizontal: f64, scale: f64| {
        Position::new(
            scaled_x(horizontal / 100.0, w, ratio),
            h * vertical / 100.0,
            scale,
        )
    };
    positions.insert(
        ElementId::PlayerCounters,
        board_anchor(
            pos.counters_player_vertical,
            pos.counters_player_horizontal,
            sizes.counter_icon_scale,
        ),
    );
    positions.insert(
        ElementId::OpponentCounters,
        board_anchor(
            pos.counters_opponent_vertical,
            pos.counters_opponent_horizontal,
            sizes.counter_icon_scale,
        ),
    );
    positions.insert(
        ElementId::PlayerAttackIcon,
        board_anchor(
            pos.attack_icon_player_vertical,
            pos.attack_icon_player_horizontal,
            1.0,
        ),
    );
    positions.insert(
        ElementId::OpponentAttackIcon,
        board_anchor(
            pos.attack_icon_opponent_vertical,
            pos.attack_icon_opponent_horizontal,
            1.0,
        ),
    );

    let board_left = scaled_x(0.0, w, ratio);
    let (opponent_board_top, player_board_top) = board_tops(rect, &sizes, ctx);
    positions.insert(
        ElementId::OpponentBoard,
        Position::new(board_left, opponent_board_top, 1.0),
    );
    positions.insert(
        ElementId::PlayerBoard,
        Position::new(board_left, player_board_top, 1.0),
    );

    if ctx.show_flavor_text {
        positions.insert(
            ElementId::FlavorText,
            Position::new(
                w - metrics.flavor_text.width - FLAVOR_TEXT_INSET,
                h - metrics.flavor_text.height - FLAVOR_TEXT_INSET,
                1.0,
            ),
        );
    }

    let hand_count = ctx.opponent_hand_count.min(MAX_HAND_SLOTS);
    let mark_size = metrics.card_mark.scaled(scaling.opponent);
    for index in 0..hand_count {
        let mut position = card_mark_position(rect, ratio, mark_size, hand_count, index);
        position.scale = scaling.opponent;
        positions.insert(ElementId::CardMark(index as u8), position);
    }

    Ok(Layout {
        positions,
        sizes,
        opponent_deck_link: Some(link),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Auto-scaled dependents
// ─────────────────────────────────────────────────────────────────────────────

/// A sub-layout that follows the host size and the auto-scale factor.
///
/// `update_position` and `update_scaling` are independent of each other and
/// may be called in either order.
pub trait ScaledBehavior: Send {
    fn id(&self) -> ElementId;
    fn update_position(&mut self, rect: &HostRect);
    fn update_scaling(&mut self, scale: f64);
    fn position(&self) -> Position;
}

/// Element anchored to a board-relative point, scaled around that point.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchoredElement {
    id: ElementId,
    /// Board-relative anchor
    anchor: (f64, f64),
    /// Fraction of the element's own size that sits left of / above the anchor
    origin: (f64, f64),
    size: Size,
    left: f64,
    top: f64,
    scale: f64,
}

impl AnchoredElement {
    pub fn new(id: ElementId, anchor: (f64, f64), origin: (f64, f64), size: Size) -> Self {
        Self {
            id,
            anchor,
            origin,
            size,
            left: 0.0,
            top: 0.0,
            scale: 1.0,
        }
    }
}

impl ScaledBehavior for AnchoredElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn update_position(&mut self, rect: &HostRect) {
        if rect.validate().is_err() {
            return;
        }
        let ratio = screen_ratio(rect);
        self.left = scaled_x(self.anchor.0, rect.width, ratio) - self.size.width * self.origin.0;
        self.top = rect.height * self.anchor.1 - self.size.height * self.origin.1;
    }

    fn update_scaling(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn position(&self) -> Position {
        Position::new(self.left, self.top, self.scale)
    }
}

/// The fixed set of auto-scaled widgets.
pub fn default_scaled_elements() -> Vec<Box<dyn ScaledBehavior>> {
    vec![
        Box::new(AnchoredElement::new(
            ElementId::BattlegroundsTopBar,
            (0.5, 0.0),
            (0.5, 0.0),
            Size::new(900.0, 44.0),
        )),
        Box::new(AnchoredElement::new(
            ElementId::HeroNotification,
            (0.5, 0.08),
            (0.5, 0.0),
            Size::new(420.0, 90.0),
        )),
        Box::new(AnchoredElement::new(
            ElementId::BobsBuddy,
            (0.5, 0.05),
            (0.5, 0.0),
            Size::new(240.0, 60.0),
        )),
        Box::new(AnchoredElement::new(
            ElementId::PastOpponentBoard,
            (0.5, 0.5),
            (0.5, 0.5),
            Size::new(700.0, 180.0),
        )),
        Box::new(AnchoredElement::new(
            ElementId::ExperienceCounter,
            (1.0, 1.0),
            (1.0, 1.0),
            Size::new(160.0, 40.0),
        )),
        Box::new(AnchoredElement::new(
            ElementId::MercenariesTaskListButton,
            (1.0, 0.86),
            (1.0, 0.5),
            Size::new(48.0, 48.0),
        )),
        Box::new(AnchoredElement::new(
            ElementId::MercenariesTaskList,
            (1.0, 0.8),
            (1.0, 1.0),
            Size::new(320.0, 400.0),
        )),
    ]
}

/// Recompute the auto-scale factor and push it, together with the new host
/// rectangle, to every dependent. Returns the factor.
pub fn apply_auto_scaling(
    rect: &HostRect,
    dependents: &mut [Box<dyn ScaledBehavior>],
) -> Result<f64, LayoutError> {
    rect.validate()?;
    let scale = auto_scale(rect);
    for dependent in dependents.iter_mut() {
        dependent.update_position(rect);
        dependent.update_scaling(scale);
    }
    Ok(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(width: f64, height: f64) -> HostRect {
        HostRect::new(0.0, 0.0, width, height)
    }

    #[test]
    fn test_degenerate_rect_is_rejected() {
        assert!(rect(0.0, 1080.0).validate().is_err());
        assert!(rect(1920.0, 0.0).validate().is_err());
        assert!(rect(f64::NAN, 1080.0).validate().is_err());
        let err = compute_positions(
            &rect(1920.0, 0.0),
            &OverlaySettings::default(),
            &ElementMetrics::default(),
            &LayoutContext::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            LayoutError::Degenerate {
                width: 1920.0,
                height: 0.0
            }
        );
    }

    #[test]
    fn test_screen_ratio_and_scaled_x() {
        let r = rect(1440.0, 1080.0);
        assert!((screen_ratio(&r) - 1.0).abs() < 1e-12);
        assert_eq!(scaled_x(0.5, 1440.0, 1.0), 720.0);

        let wide = rect(1920.0, 1080.0);
        let ratio = screen_ratio(&wide);
        assert!((ratio - 0.75).abs() < 1e-12);
        // The 4:3 board is centered: 240 px bars on each side
        assert!((scaled_x(0.0, 1920.0, ratio) - 240.0).abs() < 1e-9);
        assert!((scaled_x(1.0, 1920.0, ratio) - 1680.0).abs() < 1e-9);
    }

    #[test]
    fn test_auto_scale_is_clamped() {
        assert_eq!(auto_scale(&rect(1920.0, 1080.0)), 1.0);
        assert_eq!(auto_scale(&rect(800.0, 600.0)), AUTO_SCALE_MIN);
        assert_eq!(auto_scale(&rect(3840.0, 2160.0)), AUTO_SCALE_MAX);
    }

    #[test]
    fn test_secondary_placement_boundaries() {
        // 100 + 500 + 10 + 40 == 650 fits exactly
        assert_eq!(place_secondary(100.0, 500.0, 40.0, 10.0, 650.0), Placement::Below(610.0));
        // One pixel shorter and it goes above
        assert_eq!(place_secondary(100.0, 500.0, 40.0, 10.0, 649.0), Placement::Above(50.0));
    }

    #[test]
    fn test_element_sizes_follow_height() {
        let sizes = ElementSizes::from_rect(&rect(1920.0, 1080.0)).unwrap();
        assert_eq!(sizes.attack_icon_width, 75.0);
        assert_eq!(sizes.attack_font_size, Some(22.0));
        assert_eq!(sizes.attack_font_margin_top, 4.0);
        assert_eq!(sizes.counter_icon_scale, 0.6);

        let tall = ElementSizes::from_rect(&rect(3840.0, 2160.0)).unwrap();
        assert_eq!(tall.counter_icon_scale, 1.0);

        let tiny = ElementSizes::from_rect(&rect(20.0, 20.0)).unwrap();
        assert_eq!(tiny.attack_font_size, None);
    }

    #[test]
    fn test_default_positions_1080p() {
        let settings = OverlaySettings::default();
        let metrics = ElementMetrics::default();
        let ctx = LayoutContext {
            opponent_hand_count: 4,
            show_flavor_text: true,
            ..LayoutContext::default()
        };
        let layout = compute_positions(&rect(1920.0, 1080.0), &settings, &metrics, &ctx).unwrap();

        let player = layout.get(ElementId::PlayerStack).unwrap();
        assert!((player.left - (1920.0 * 0.995 - 240.0)).abs() < 1e-9);
        assert!((player.top - 1080.0 * 0.17).abs() < 1e-9);

        let turn = layout.get(ElementId::TurnTimer).unwrap();
        let opp_timer = layout.get(ElementId::OpponentTimer).unwrap();
        let player_timer = layout.get(ElementId::PlayerTimer).unwrap();
        assert!((turn.top - (1080.0 * 0.432 - 5.0)).abs() < 1e-9);
        assert!((opp_timer.top - (1080.0 * 0.432 - 50.0)).abs() < 1e-9);
        assert!((player_timer.top - (1080.0 * 0.432 + 50.0)).abs() < 1e-9);
        assert!((turn.left - 1536.0).abs() < 1e-9);

        let flavor = layout.get(ElementId::FlavorText).unwrap();
        assert_eq!(flavor.left, 1920.0 - 300.0 - 10.0);
        assert_eq!(flavor.top, 1080.0 - 120.0 - 10.0);

        assert!(layout.get(ElementId::CardMark(3)).is_some());
        assert!(layout.get(ElementId::CardMark(4)).is_none());
        for i in 0..4 {
            assert!(layout.get(ElementId::CardMark(i)).unwrap().top >= CARD_MARK_MIN_TOP);
        }
    }

    #[test]
    fn test_opponent_link_flips_above_when_no_room() {
        let mut settings = OverlaySettings::default();
        settings.positions.opponent_deck_top = 40.0;
        let metrics = ElementMetrics::default();
        let layout = compute_positions(
            &rect(1920.0, 1080.0),
            &settings,
            &metrics,
            &LayoutContext::default(),
        )
        .unwrap();
        // 432 + 620 + 10 + 36 > 1080
        assert_eq!(layout.opponent_deck_link, Some(Placement::Above(432.0 - 36.0 - 10.0)));
    }

    #[test]
    fn test_mercenaries_board_offsets() {
        let settings = OverlaySettings::default();
        let metrics = ElementMetrics::default();
        let r = rect(1920.0, 1000.0);
        let sizes = ElementSizes::from_rect(&r).unwrap();

        let main = LayoutContext {
            in_mercenaries: true,
            main_action: true,
            ..LayoutContext::default()
        };
        let layout = compute_positions(&r, &settings, &metrics, &main).unwrap();
        let opp = layout.get(ElementId::OpponentBoard).unwrap();
        let player = layout.get(ElementId::PlayerBoard).unwrap();
        assert!((opp.top - (500.0 - sizes.board_height - 142.0)).abs() < 1e-9);
        assert!((player.top - 590.0).abs() < 1e-9);

        let nominate = LayoutContext {
            mercs_to_nominate: true,
            ..main
        };
        let layout = compute_positions(&r, &settings, &metrics, &nominate).unwrap();
        assert!((layout.get(ElementId::PlayerBoard).unwrap().top - 497.0).abs() < 1e-9);

        let layout = compute_positions(&r, &settings, &metrics, &LayoutContext::default()).unwrap();
        assert!((layout.get(ElementId::PlayerBoard).unwrap().top - 470.0).abs() < 1e-9);
        let opp = layout.get(ElementId::OpponentBoard).unwrap();
        assert!((opp.top - (500.0 - sizes.board_height - 45.0)).abs() < 1e-9);
    }

    #[test]
    fn test_layout_is_reproducible() {
        let settings = OverlaySettings::default();
        let metrics = ElementMetrics::default();
        let ctx = LayoutContext {
            opponent_hand_count: 10,
            ..LayoutContext::default()
        };
        let a = compute_positions(&rect(2560.0, 1080.0), &settings, &metrics, &ctx).unwrap();
        let b = compute_positions(&rect(2560.0, 1080.0), &settings, &metrics, &ctx).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_auto_scaling_reaches_every_dependent() {
        let mut dependents = default_scaled_elements();
        assert_eq!(dependents.len(), 7);
        let scale = apply_auto_scaling(&rect(3840.0, 2160.0), &mut dependents).unwrap();
        assert_eq!(scale, AUTO_SCALE_MAX);
        for d in &dependents {
            assert_eq!(d.position().scale, AUTO_SCALE_MAX);
        }
        assert!(apply_auto_scaling(&rect(3840.0, 0.0), &mut dependents).is_err());
    }

    #[test]
    fn test_scaled_behavior_order_independent() {
        let r = rect(1920.0, 1080.0);
        let mut a = AnchoredElement::new(ElementId::BobsBuddy, (0.5, 0.05), (0.5, 0.0), Size::new(240.0, 60.0));
        let mut b = a.clone();
        a.update_position(&r);
        a.update_scaling(1.2);
        b.update_scaling(1.2);
        b.update_position(&r);
        assert_eq!(a.position(), b.position());
        assert_eq!(a.position().left, 960.0 - 120.0);
    }
}

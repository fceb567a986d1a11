//! Opponent hand indicators (card age, provenance mark, source card).

use hdt_core::{resolve_source, CardMark, GameStateView, Side, SourceInfo};
use hdt_types::VisibilitySettings;

use crate::layout::MAX_HAND_SLOTS;
use crate::visibility::Visibility;

/// One indicator above an opponent hand position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMarkSlot {
    pub visibility: Visibility,
    /// Turn the card entered the hand
    pub age: Option<i32>,
    pub icon: CardMark,
    pub source: SourceInfo,
    pub cost_reduction: String,
}

impl Default for CardMarkSlot {
    fn default() -> Self {
        Self {
            visibility: Visibility::Collapsed,
            age: None,
            icon: CardMark::None,
            source: SourceInfo::None,
            cost_reduction: String::new(),
        }
    }
}

fn cost_reduction_text(reduction: i32) -> String {
    if reduction > 0 {
        format!("-{reduction}")
    } else {
        String::new()
    }
}

/// Rebuild the ten hand slots.
///
/// Every slot is recreated each call. Slots past the live hand size are
/// collapsed; a live position without a matching hand entity (the hand is
/// mid-update) shows an empty indicator. `visible_as` is the evaluated
/// card-mark region visibility.
pub fn update_card_marks(
    slots: &mut [CardMarkSlot; MAX_HAND_SLOTS],
    game: &GameStateView,
    settings: &VisibilitySettings,
    visible_as: Visibility,
) {
    let hand_count = game.opponent.hand_count.min(MAX_HAND_SLOTS);
    for (index, slot) in slots.iter_mut().enumerate() {
        *slot = if index < hand_count {
            project_slot(game, index, settings, visible_as)
        } else {
            CardMarkSlot::default()
        };
    }
}

fn project_slot(
    game: &GameStateView,
    index: usize,
    settings: &VisibilitySettings,
    visible_as: Visibility,
) -> CardMarkSlot {
    let mut slot = CardMarkSlot {
        visibility: visible_as,
        ..CardMarkSlot::default()
    };
    let Some(entity) = game.hand_at(Side::Opponent, index as i32 + 1) else {
        return slot;
    };

    slot.age = (!settings.hide_opponent_card_age).then_some(entity.info.turn);
    if !settings.hide_opponent_card_marks {
        slot.icon = entity.info.card_mark;
        slot.source = resolve_source(entity, &game.entities);
        slot.cost_reduction = cost_reduction_text(entity.info.cost_reduction);
    }
    slot
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdt_core::{Entity, EntityInfo, GameTag, PlayerView, Zone};
    use proptest::prelude::*;

    fn hand_card(id: i32, position: i32, info: EntityInfo) -> Entity {
        Entity::new(id, format!("CARD_{id}"))
            .with_tag(GameTag::Controller, 2)
            .with_tag(GameTag::Zone, Zone::Hand as i32)
            .with_tag(GameTag::ZonePosition, position)
            .with_info(info)
    }

    fn game_with_hand(count: usize) -> GameStateView {
        let mut game = GameStateView {
            player: PlayerView {
                controller: 1,
                ..PlayerView::default()
            },
            opponent: PlayerView {
                controller: 2,
                hand_count: count,
                ..PlayerView::default()
            },
            ..GameStateView::default()
        };
        for pos in 1..=count.min(MAX_HAND_SLOTS) as i32 {
            game.insert(hand_card(100 + pos, pos, EntityInfo { turn: pos, ..EntityInfo::default() }));
        }
        game
    }

    #[test]
    fn test_created_card_shows_creator() {
        let mut game = game_with_hand(0);
        game.opponent.hand_count = 1;
        game.insert(Entity::new(40, "CREATOR"));
        game.insert(hand_card(
            41,
            1,
            EntityInfo {
                turn: 3,
                card_mark: CardMark::Created,
                creator_id: 40,
                cost_reduction: 2,
                ..EntityInfo::default()
            },
        ));
        let mut slots: [CardMarkSlot; MAX_HAND_SLOTS] = Default::default();
        update_card_marks(&mut slots, &game, &VisibilitySettings::default(), Visibility::Visible);

        assert_eq!(slots[0].visibility, Visibility::Visible);
        assert_eq!(slots[0].age, Some(3));
        assert_eq!(slots[0].icon, CardMark::Created);
        assert_eq!(slots[0].source.card_id(), Some("CREATOR"));
        assert_eq!(slots[0].cost_reduction, "-2");
        assert_eq!(slots[1].visibility, Visibility::Collapsed);
    }

    #[test]
    fn test_hidden_marks_mask_source() {
        let mut game = game_with_hand(0);
        game.opponent.hand_count = 1;
        game.insert(Entity::new(40, "CREATOR"));
        game.insert(hand_card(
            41,
            1,
            EntityInfo {
                card_mark: CardMark::Created,
                creator_id: 40,
                ..EntityInfo::default()
            },
        ));
        let settings = VisibilitySettings {
            hide_opponent_card_marks: true,
            hide_opponent_card_age: true,
            ..VisibilitySettings::default()
        };
        let mut slots: [CardMarkSlot; MAX_HAND_SLOTS] = Default::default();
        update_card_marks(&mut slots, &game, &settings, Visibility::Hidden);
        assert_eq!(slots[0].icon, CardMark::None);
        assert!(slots[0].source.is_none());
        assert_eq!(slots[0].age, None);
        assert_eq!(slots[0].visibility, Visibility::Hidden);
    }

    #[test]
    fn test_missing_entity_shows_fresh_slot() {
        let game = game_with_hand(3);
        let mut slots: [CardMarkSlot; MAX_HAND_SLOTS] = Default::default();
        update_card_marks(&mut slots, &game, &VisibilitySettings::default(), Visibility::Visible);
        assert_eq!(slots[1].age, Some(2));

        let mut shuffled = game.clone();
        shuffled.entities.remove(&102);
        update_card_marks(&mut slots, &shuffled, &VisibilitySettings::default(), Visibility::Visible);
        assert_eq!(
            slots[1],
            CardMarkSlot {
                visibility: Visibility::Visible,
                ..CardMarkSlot::default()
            }
        );
    }

    #[test]
    fn test_live_position_without_entity_is_visible() {
        let mut game = game_with_hand(0);
        game.opponent.hand_count = 1;
        let mut slots: [CardMarkSlot; MAX_HAND_SLOTS] = Default::default();
        update_card_marks(&mut slots, &game, &VisibilitySettings::default(), Visibility::Visible);
        let visible = slots.iter().filter(|s| s.visibility.is_visible()).count();
        assert_eq!(visible, 1);
    }

    #[test]
    fn test_hiding_marks_clears_cost_reduction() {
        let mut game = game_with_hand(0);
        game.opponent.hand_count = 1;
        game.insert(hand_card(
            41,
            1,
            EntityInfo {
                cost_reduction: 2,
                ..EntityInfo::default()
            },
        ));
        let mut slots: [CardMarkSlot; MAX_HAND_SLOTS] = Default::default();
        update_card_marks(&mut slots, &game, &VisibilitySettings::default(), Visibility::Visible);
        assert_eq!(slots[0].cost_reduction, "-2");

        let settings = VisibilitySettings {
            hide_opponent_card_marks: true,
            ..VisibilitySettings::default()
        };
        update_card_marks(&mut slots, &game, &settings, Visibility::Hidden);
        assert_eq!(slots[0].cost_reduction, "");
        assert_eq!(slots[0].icon, CardMark::None);
    }

    #[test]
    fn test_shrinking_hand_collapses_stale_slots() {
        let mut slots: [CardMarkSlot; MAX_HAND_SLOTS] = Default::default();
        update_card_marks(&mut slots, &game_with_hand(6), &VisibilitySettings::default(), Visibility::Visible);
        update_card_marks(&mut slots, &game_with_hand(2), &VisibilitySettings::default(), Visibility::Visible);
        let visible = slots.iter().filter(|s| s.visibility.is_visible()).count();
        assert_eq!(visible, 2);
    }

    proptest! {
        #[test]
        fn prop_visible_slots_match_hand_size(n in 0usize..=10) {
            let mut slots: [CardMarkSlot; MAX_HAND_SLOTS] = Default::default();
            update_card_marks(&mut slots, &game_with_hand(10), &VisibilitySettings::default(), Visibility::Visible);
            update_card_marks(&mut slots, &game_with_hand(n), &VisibilitySettings::default(), Visibility::Visible);
            let visible = slots.iter().filter(|s| s.visibility == Visibility::Visible).count();
            let collapsed = slots.iter().filter(|s| s.visibility == Visibility::Collapsed).count();
            prop_assert_eq!(visible, n);
            prop_assert_eq!(collapsed, 10 - n);
        }
    }
}

//! Board minion badges for the Battlegrounds tooltip board.

use hashbrown::HashMap;

use hdt_core::{Entity, GameTag, Rarity};

use crate::visibility::Visibility;

/// Printed stats of a card, looked up by card id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseCard {
    pub rarity: Rarity,
    pub attack: i32,
    pub health: i32,
}

/// Card database seam. The overlay only needs printed stats and rarity.
pub trait CardDatabase: Send {
    fn base_card(&self, card_id: &str) -> Option<BaseCard>;
}

impl CardDatabase for HashMap<String, BaseCard> {
    fn base_card(&self, card_id: &str) -> Option<BaseCard> {
        self.get(card_id).copied()
    }
}

/// Color of an attack or health number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatColor {
    #[default]
    Base,
    /// Differs from the printed value
    Buffed,
}

impl StatColor {
    pub fn rgba(self) -> [u8; 4] {
        match self {
            StatColor::Base => [255, 255, 255, 255],
            StatColor::Buffed => [28, 227, 28, 255],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinionBadge {
    pub entity_id: i32,
    pub card_id: String,
    pub poisonous: Visibility,
    pub divine_shield: Visibility,
    pub deathrattle: Visibility,
    pub taunt: Visibility,
    pub premium_taunt: Visibility,
    pub border: Visibility,
    pub legendary_border: Visibility,
    pub premium_border: Visibility,
    pub premium_legendary_border: Visibility,
    pub attack: String,
    pub health: String,
    pub attack_color: StatColor,
    pub health_color: StatColor,
}

fn shown(visible: bool) -> Visibility {
    if visible { Visibility::Visible } else { Visibility::Hidden }
}

impl MinionBadge {
    pub fn from_entity(entity: &Entity, cards: &dyn CardDatabase) -> Self {
        let base = cards.base_card(&entity.card_id);
        let legendary = base.is_some_and(|b| b.rarity == Rarity::Legendary);
        let premium = entity.is_premium();
        let taunt = entity.has_tag(GameTag::Taunt);

        // Golden minions print double stats
        let (attack_color, health_color) = match base {
            Some(b) => {
                let factor = if premium { 2 } else { 1 };
                let color = |current: i32, printed: i32| {
                    if current == printed * factor {
                        StatColor::Base
                    } else {
                        StatColor::Buffed
                    }
                };
                (
                    color(entity.attack(), b.attack),
                    color(entity.health(), b.health),
                )
            }
            None => (StatColor::Base, StatColor::Base),
        };

        Self {
            entity_id: entity.id,
            card_id: entity.card_id.clone(),
            poisonous: shown(entity.has_tag(GameTag::Poisonous)),
            divine_shield: shown(entity.has_tag(GameTag::DivineShield)),
            deathrattle: shown(entity.has_tag(GameTag::Deathrattle)),
            taunt: shown(taunt && !premium),
            premium_taunt: shown(taunt && premium),
            border: shown(!premium),
            legendary_border: shown(legendary && !premium),
            premium_border: shown(premium),
            premium_legendary_border: shown(legendary && premium),
            attack: entity.attack().to_string(),
            health: entity.health().to_string(),
            attack_color,
            health_color,
        }
    }
}

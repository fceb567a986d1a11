//! Entity model as produced by the game-state collaborator.
//!
//! Entities are owned by whoever parses the game log. This crate only ever
//! borrows them for the duration of a single overlay tick.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Named integer attributes carried by an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameTag {
    Zone,
    ZonePosition,
    Controller,
    CardType,
    Attack,
    Health,
    Damage,
    Premium,
    Taunt,
    DivineShield,
    Poisonous,
    Deathrattle,
    Exhausted,
    Frozen,
    CantAttack,
    Step,
    AllowMoveMinion,
    JadeGolem,
    InvokeCounter,
    LibramCostReduction,
    Fatigue,
    NumTurnsInPlay,
}

/// Values of [`GameTag::Zone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Zone {
    Invalid = 0,
    Play = 1,
    Deck = 2,
    Hand = 3,
    Graveyard = 4,
    RemovedFromGame = 5,
    SetAside = 6,
    Secret = 7,
}

impl Zone {
    pub fn from_tag(value: i32) -> Self {
        match value {
            1 => Self::Play,
            2 => Self::Deck,
            3 => Self::Hand,
            4 => Self::Graveyard,
            5 => Self::RemovedFromGame,
            6 => Self::SetAside,
            7 => Self::Secret,
            _ => Self::Invalid,
        }
    }
}

/// Values of [`GameTag::CardType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CardType {
    Invalid = 0,
    Game = 1,
    Player = 2,
    Hero = 3,
    Minion = 4,
    Spell = 5,
    Enchantment = 6,
    Weapon = 7,
    HeroPower = 10,
    Location = 39,
}

impl CardType {
    pub fn from_tag(value: i32) -> Self {
        match value {
            1 => Self::Game,
            2 => Self::Player,
            3 => Self::Hero,
            4 => Self::Minion,
            5 => Self::Spell,
            6 => Self::Enchantment,
            7 => Self::Weapon,
            10 => Self::HeroPower,
            39 => Self::Location,
            _ => Self::Invalid,
        }
    }
}

/// Values of [`GameTag::Step`] that count as the main action phase.
pub mod step {
    pub const MAIN_PRE_ACTION: i32 = 18;
    pub const MAIN_ACTION: i32 = 10;
    pub const MAIN_POST_ACTION: i32 = 19;

    pub fn is_main_action(step: i32) -> bool {
        matches!(step, MAIN_ACTION | MAIN_PRE_ACTION | MAIN_POST_ACTION)
    }
}

/// Provenance label of a card in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardMark {
    #[default]
    None,
    Coin,
    Returned,
    Mulliganed,
    Created,
    Kept,
    DrawnByEntity,
    Forged,
}

impl CardMark {
    /// Marks whose source is tracked through the creator id.
    pub fn tracks_creator(self) -> bool {
        matches!(self, Self::Created | Self::DrawnByEntity)
    }
}

/// Derived metadata the log collaborator attaches to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityInfo {
    /// Turn the card entered the hand
    pub turn: i32,
    pub card_mark: CardMark,
    /// Entity that created this one; `0` when unknown
    pub creator_id: i32,
    /// Entity that drew this one. `Some(0)` is distinct from `None`
    pub drawer_id: Option<i32>,
    pub cost_reduction: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Entity {
    pub id: i32,
    pub card_id: String,
    /// Localized card name when the card is known
    pub name: Option<String>,
    pub tags: HashMap<GameTag, i32>,
    pub info: EntityInfo,
}

impl Entity {
    pub fn new(id: i32, card_id: impl Into<String>) -> Self {
        Self {
            id,
            card_id: card_id.into(),
            ..Self::default()
        }
    }

    /// Builder-style tag setter, mostly for fixtures.
    pub fn with_tag(mut self, tag: GameTag, value: i32) -> Self {
        self.tags.insert(tag, value);
        self
    }

    pub fn with_info(mut self, info: EntityInfo) -> Self {
        self.info = info;
        self
    }

    /// Tag value, `0` when absent.
    #[inline]
    pub fn tag(&self, tag: GameTag) -> i32 {
        self.tags.get(&tag).copied().unwrap_or(0)
    }

    #[inline]
    pub fn has_tag(&self, tag: GameTag) -> bool {
        self.tag(tag) > 0
    }

    pub fn zone(&self) -> Zone {
        Zone::from_tag(self.tag(GameTag::Zone))
    }

    pub fn zone_position(&self) -> i32 {
        self.tag(GameTag::ZonePosition)
    }

    pub fn controller(&self) -> i32 {
        self.tag(GameTag::Controller)
    }

    pub fn card_type(&self) -> CardType {
        CardType::from_tag(self.tag(GameTag::CardType))
    }

    pub fn is_minion(&self) -> bool {
        self.card_type() == CardType::Minion
    }

    pub fn attack(&self) -> i32 {
        self.tag(GameTag::Attack)
    }

    /// Remaining health (max health minus damage taken).
    pub fn health(&self) -> i32 {
        self.tag(GameTag::Health) - self.tag(GameTag::Damage)
    }

    pub fn is_premium(&self) -> bool {
        self.has_tag(GameTag::Premium)
    }

    /// Minion or hero that could still attack this turn.
    pub fn can_attack(&self) -> bool {
        !self.has_tag(GameTag::Exhausted)
            && !self.has_tag(GameTag::Frozen)
            && !self.has_tag(GameTag::CantAttack)
    }
}

//! Read-only snapshot of an in-progress game.
//!
//! A [`GameStateView`] is produced by the game-state collaborator once per
//! overlay tick. The overlay borrows it, derives a frame and drops the
//! borrow; nothing here outlives the tick.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, GameTag, Zone};

/// Which side of the table a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

/// Game mode of the current match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Unknown,
    Ranked,
    Casual,
    Arena,
    Brawl,
    Friendly,
    Practice,
    Spectator,
    Battlegrounds,
    Mercenaries,
    Duels,
}

/// Client scene currently shown by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneMode {
    #[default]
    Hub,
    Gameplay,
    Other,
}

/// Turn timer values as reported by the timer tick source.
///
/// `seconds` is the combined turn timer: `+inf` means "no limit" and a
/// negative value means the turn is in overtime.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimerState {
    pub seconds: f64,
    pub player_seconds: i32,
    pub opponent_seconds: i32,
}

/// Per-side summary kept by the game-state collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerView {
    /// Value of the `CONTROLLER` tag owned by this side
    pub controller: i32,
    /// Entity id of the side's player entity (holds jade/invoke/libram tags)
    pub player_entity_id: Option<i32>,
    pub hand_count: usize,
    pub deck_count: i32,
    /// Whether any entity has been attributed to this side yet
    pub has_player_entities: bool,
    pub spells_played_count: u32,
    pub pogo_hopper_played_count: u32,
    /// Stand-in entity carrying C'Thun's current stats
    pub cthun_proxy_id: Option<i32>,
}

/// Everything the overlay reads about the running game for one tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStateView {
    pub entities: HashMap<i32, Entity>,
    pub player: PlayerView,
    pub opponent: PlayerView,
    pub game_mode: GameMode,
    pub scene: SceneMode,
    pub game_entity_id: Option<i32>,
    pub in_menu: bool,
    pub setup_done: bool,
    pub mulligan_done: bool,
    /// The player is playing a deck that is tracked as a premade deck list
    pub using_premade: bool,
}

impl GameStateView {
    /// Insert an entity, keyed by its own id.
    pub fn insert(&mut self, entity: Entity) {
        self.entities.insert(entity.id, entity);
    }

    pub fn entity(&self, id: i32) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn side(&self, side: Side) -> &PlayerView {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn player_entity(&self, side: Side) -> Option<&Entity> {
        self.side(side).player_entity_id.and_then(|id| self.entity(id))
    }

    pub fn game_entity(&self) -> Option<&Entity> {
        self.game_entity_id.and_then(|id| self.entity(id))
    }

    pub fn is_battlegrounds(&self) -> bool {
        self.game_mode == GameMode::Battlegrounds
    }

    pub fn is_mercenaries(&self) -> bool {
        self.game_mode == GameMode::Mercenaries
    }

    /// Entities of one side in a zone, in no particular order.
    pub fn in_zone(&self, side: Side, zone: Zone) -> impl Iterator<Item = &Entity> {
        let controller = self.side(side).controller;
        self.entities
            .values()
            .filter(move |e| e.controller() == controller && e.zone() == zone)
    }

    /// Hand entity at a 1-based zone position.
    pub fn hand_at(&self, side: Side, position: i32) -> Option<&Entity> {
        self.in_zone(side, Zone::Hand)
            .find(|e| e.zone_position() == position)
    }

    /// Minions in play for one side, ordered by zone position.
    ///
    /// Ties are broken by entity id so the order is stable across ticks.
    pub fn board_minions(&self, side: Side) -> Vec<&Entity> {
        let mut board: Vec<&Entity> = self
            .in_zone(side, Zone::Play)
            .filter(|e| e.is_minion())
            .collect();
        board.sort_by_key(|e| (e.zone_position(), e.id));
        board
    }

    /// The game counts as started once setup is done outside the menu and
    /// the local player owns at least one entity.
    pub fn game_started(&self) -> bool {
        !self.in_menu && self.setup_done && self.player.has_player_entities
    }

    /// Value of the game entity's `STEP` tag, if there is a game entity.
    pub fn step(&self) -> Option<i32> {
        self.game_entity().map(|e| e.tag(GameTag::Step))
    }
}

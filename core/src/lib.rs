//! Read-only game model and derived game facts for the HDT overlay.
//!
//! This crate never mutates game state: the snapshot types are filled by
//! the log-parsing collaborator and borrowed here for one tick at a time.

pub mod config;
pub mod counters;
pub mod deck;
pub mod dust;
pub mod entity;
pub mod game;
pub mod relationships;

pub use counters::{compute_counters, CounterSet, CounterStyle, CounterStyles};
pub use deck::{CardSet, Deck, DeckCard, DeckContext, FormatIcon, Rarity, Record};
pub use entity::{CardMark, CardType, Entity, EntityInfo, GameTag, Zone};
pub use game::{GameMode, GameStateView, PlayerView, SceneMode, Side, TimerState};
pub use relationships::{resolve_source, SourceInfo};

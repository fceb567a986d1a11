//! Provenance of hand cards: which entity created or drew them.
//!
//! Lookups go through the live entity table only. An id that no longer
//! resolves (the source left play, or was never revealed) reads as
//! [`SourceInfo::None`]; nothing here fails.

use hashbrown::HashMap;

use crate::entity::Entity;

/// The card shown as the source of a hand card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceInfo {
    #[default]
    None,
    Card { entity_id: i32, card_id: String },
}

impl SourceInfo {
    pub fn card_id(&self) -> Option<&str> {
        match self {
            SourceInfo::None => None,
            SourceInfo::Card { card_id, .. } => Some(card_id),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, SourceInfo::None)
    }
}

fn lookup(id: i32, entities: &HashMap<i32, Entity>) -> SourceInfo {
    if id <= 0 {
        return SourceInfo::None;
    }
    match entities.get(&id) {
        Some(source) => SourceInfo::Card {
            entity_id: source.id,
            card_id: source.card_id.clone(),
        },
        None => SourceInfo::None,
    }
}

/// Resolve the source card of a hand entity.
///
/// Precedence is fixed: for `Created`/`DrawnByEntity` marks only the
/// creator id is consulted, even if it does not resolve. Otherwise a
/// present drawer id (zero included) is looked up.
pub fn resolve_source(entity: &Entity, entities: &HashMap<i32, Entity>) -> SourceInfo {
    let info = &entity.info;
    if info.card_mark.tracks_creator() {
        lookup(info.creator_id, entities)
    } else if let Some(drawer_id) = info.drawer_id {
        lookup(drawer_id, entities)
    } else {
        SourceInfo::None
    }
}

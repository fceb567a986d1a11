//! Deck descriptions consumed by the overlay banners.
//!
//! Decks are owned by the deck-list collaborator; the overlay only reads
//! the active deck to label the title, format and win-rate banners.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Free,
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Card sets that affect crafting rules. Everything else is `Standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSet {
    Core,
    Karazhan,
    Naxxramas,
    BlackrockMountain,
    LeagueOfExplorers,
    Dragons,
    #[default]
    Standard,
}

impl CardSet {
    /// Sets whose cards can never be crafted.
    pub fn is_uncraftable(self) -> bool {
        matches!(self, CardSet::Core)
    }

    /// Sets whose cards are unlocked through adventures.
    pub fn is_adventure(self) -> bool {
        matches!(
            self,
            CardSet::Karazhan
                | CardSet::Naxxramas
                | CardSet::BlackrockMountain
                | CardSet::LeagueOfExplorers
                | CardSet::Dragons
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCard {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub set: CardSet,
    pub count: u32,
}

/// Format icon shown next to the deck banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatIcon {
    Arena,
    Brawl,
    Adventure,
    Duels,
    Standard,
    Classic,
    Wild,
}

const ARCHETYPES: [&str; 5] = ["Midrange", "Aggro", "Control", "Tempo", "Combo"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub class: String,
    pub tags: Vec<String>,
    pub cards: Vec<DeckCard>,
    pub is_arena: bool,
    pub is_dungeon: bool,
    pub is_duels: bool,
    pub standard_viable: bool,
    pub is_classic: bool,
}

impl Deck {
    /// All tags lowercased and joined, with dashes removed, for substring checks.
    fn tag_blob(&self) -> String {
        self.tags.join(",").to_lowercase().replace('-', "")
    }

    /// Archetype tag if the deck carries one, else the class name.
    pub fn tag_text(&self) -> String {
        let blob = self.tag_blob();
        if !self.tags.is_empty() {
            for tag in ARCHETYPES {
                if blob.contains(&tag.to_lowercase()) {
                    return tag.to_string();
                }
            }
        }
        self.class.clone()
    }

    pub fn format_text(&self) -> &'static str {
        let blob = self.tag_blob();
        if self.is_arena {
            "Arena"
        } else if blob.contains("brawl") {
            "Brawl"
        } else if blob.contains("adventure") || blob.contains("pve") {
            "Adventure"
        } else if self.is_dungeon {
            "Dungeon"
        } else if self.is_duels {
            "Duels"
        } else if self.standard_viable {
            "Standard"
        } else if self.is_classic {
            "Classic"
        } else {
            "Wild"
        }
    }

    /// Icon priority differs slightly from [`Deck::format_text`]: dungeon runs
    /// share the adventure icon and a `duels` tag selects the duels icon.
    pub fn format_icon(&self) -> FormatIcon {
        let blob = self.tag_blob();
        if self.is_arena {
            FormatIcon::Arena
        } else if blob.contains("brawl") {
            FormatIcon::Brawl
        } else if blob.contains("adventure") || blob.contains("pve") || self.is_dungeon {
            FormatIcon::Adventure
        } else if blob.contains("duels") || self.is_duels {
            FormatIcon::Duels
        } else if self.standard_viable {
            FormatIcon::Standard
        } else if self.is_classic {
            FormatIcon::Classic
        } else {
            FormatIcon::Wild
        }
    }
}

/// Win/loss record of the active deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
}

/// Deck-list state the overlay needs alongside the game snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckContext {
    pub active_deck: Option<Deck>,
    pub record: Record,
    /// Record of the active deck against the current opponent's class
    pub record_vs_opponent: Record,
    pub opponent_class: Option<String>,
    /// Names of deck cards that could not be matched to the card database
    pub not_found_cards: Vec<String>,
    /// Deck for which the user dismissed the missing-cards warning
    pub ignored_deck_id: Option<String>,
}

impl DeckContext {
    /// The missing-cards warning applies to the active deck.
    pub fn warning_pending(&self) -> bool {
        match &self.active_deck {
            Some(deck) => {
                !self.not_found_cards.is_empty()
                    && self.ignored_deck_id.as_deref() != Some(deck.id.as_str())
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(tags: &[&str]) -> Deck {
        Deck {
            id: "d1".to_string(),
            name: "Test".to_string(),
            class: "Mage".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Deck::default()
        }
    }

    #[test]
    fn test_tag_text_prefers_archetype() {
        assert_eq!(deck(&["Tempo-Mage"]).tag_text(), "Tempo");
        assert_eq!(deck(&["ladder", "CONTROL"]).tag_text(), "Control");
        assert_eq!(deck(&["ladder"]).tag_text(), "Mage");
        assert_eq!(deck(&[]).tag_text(), "Mage");
    }

    #[test]
    fn test_format_text_priority() {
        let mut arena = deck(&["brawl"]);
        arena.is_arena = true;
        assert_eq!(arena.format_text(), "Arena");
        assert_eq!(deck(&["Brawl"]).format_text(), "Brawl");
        assert_eq!(deck(&["PvE"]).format_text(), "Adventure");

        let mut standard = deck(&[]);
        standard.standard_viable = true;
        standard.is_classic = true;
        assert_eq!(standard.format_text(), "Standard");
        assert_eq!(deck(&[]).format_text(), "Wild");
    }

    #[test]
    fn test_format_icon_duels_tag() {
        assert_eq!(deck(&["duels"]).format_icon(), FormatIcon::Duels);
        assert_eq!(deck(&["duels"]).format_text(), "Wild");
        let mut dungeon = deck(&[]);
        dungeon.is_dungeon = true;
        assert_eq!(dungeon.format_icon(), FormatIcon::Adventure);
        assert_eq!(dungeon.format_text(), "Dungeon");
    }

    #[test]
    fn test_warning_pending() {
        let mut ctx = DeckContext {
            active_deck: Some(deck(&[])),
            not_found_cards: vec!["Missing".to_string()],
            ..DeckContext::default()
        };
        assert!(ctx.warning_pending());
        ctx.ignored_deck_id = Some("d1".to_string());
        assert!(!ctx.warning_pending());
        ctx.ignored_deck_id = None;
        ctx.active_deck = None;
        assert!(!ctx.warning_pending());
    }
}

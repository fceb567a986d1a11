//! Crafting cost of a deck in arcane dust.

use phf::phf_set;

use crate::deck::{Deck, DeckCard, Rarity};

/// Cards that can never be crafted in their normal version.
static UNCRAFTABLE_CARDS: phf::Set<&'static str> = phf_set! {
    "OG_280",  // C'Thun
    "OG_281",  // Beckoner of Evil
    "DRG_076", // Shield of Galakrond
    "SCH_199", // Transfer Student
    "DRG_600", // Galakrond, the Wretched
    "DRG_610", // Galakrond, the Nightmare
    "DRG_620", // Galakrond, the Tempest
    "DRG_650", // Galakrond, the Unbreakable
    "DRG_660", // Galakrond, the Unspeakable
    "BAR_721", // Mankrik
    "DMF_058", // Shadow Hunter Vol'jin
    "DMF_085", // Silas Darkmoon
    "BT_255",  // Kael'thas Sunstrider
    "BT_126",  // Sathrovarr
    "LOOT_357", // Marin the Fox
};

/// Cards that can never be crafted in their golden version.
static UNCRAFTABLE_GOLDEN_CARDS: phf::Set<&'static str> = phf_set! {
    "BAR_743", // Venomous Scorpid
    "BAR_069", // Peon
    "BAR_026", // Hog Rancher
    "BAR_027", // Burning Blade Acolyte
    "BAR_074", // Horde Operative
    "BAR_075", // Mor'shan Watch Post
    "BAR_079", // Primordial Protector
    "DMF_058", // Shadow Hunter Vol'jin
    "DMF_085", // Silas Darkmoon
    "BT_255",  // Kael'thas Sunstrider
    "BT_126",  // Sathrovarr
    "LOOT_357", // Marin the Fox
    "DAL_800", // Zayle, Shadow Cloak
    "BOT_700", // SN1P-SN4P
};

/// Dust needed to craft one copy, `None` for rarities that cannot be crafted.
pub fn craft_cost(rarity: Rarity, golden: bool) -> Option<u32> {
    let cost = match (rarity, golden) {
        (Rarity::Common, false) => 40,
        (Rarity::Rare, false) => 100,
        (Rarity::Epic, false) => 400,
        (Rarity::Legendary, false) => 1600,
        (Rarity::Common, true) => 400,
        (Rarity::Rare, true) => 800,
        (Rarity::Epic, true) => 1600,
        (Rarity::Legendary, true) => 3200,
        (Rarity::Free, _) => return None,
    };
    Some(cost)
}

fn is_excluded(card: &DeckCard, golden: bool) -> bool {
    if golden {
        UNCRAFTABLE_GOLDEN_CARDS.contains(card.id.as_str())
    } else {
        UNCRAFTABLE_CARDS.contains(card.id.as_str())
    }
}

/// Dust contributed by one deck entry. Exclusions are checked before the
/// rarity table, so an excluded card is free whatever its rarity.
pub fn card_dust(card: &DeckCard, golden: bool, adventure: bool) -> u32 {
    if card.set.is_uncraftable() || is_excluded(card, golden) {
        return 0;
    }
    if card.set.is_adventure() && !adventure {
        return 0;
    }
    craft_cost(card.rarity, golden).map_or(0, |cost| cost * card.count)
}

/// Total dust to craft a deck.
///
/// `adventure` counts cards from adventure sets as craftable.
pub fn total_dust(deck: &Deck, golden: bool, adventure: bool) -> u32 {
    deck.cards
        .iter()
        .map(|card| card_dust(card, golden, adventure))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::CardSet;

    fn card(id: &str, rarity: Rarity, set: CardSet, count: u32) -> DeckCard {
        DeckCard {
            id: id.to_string(),
            name: id.to_string(),
            rarity,
            set,
            count,
        }
    }

    fn deck(cards: Vec<DeckCard>) -> Deck {
        Deck {
            cards,
            ..Deck::default()
        }
    }

    #[test]
    fn test_rarity_table() {
        let deck = deck(vec![
            card("A", Rarity::Common, CardSet::Standard, 2),
            card("B", Rarity::Rare, CardSet::Standard, 2),
            card("C", Rarity::Epic, CardSet::Standard, 1),
            card("D", Rarity::Legendary, CardSet::Standard, 1),
            card("E", Rarity::Free, CardSet::Standard, 2),
        ]);
        assert_eq!(total_dust(&deck, false, false), 80 + 200 + 400 + 1600);
        assert_eq!(total_dust(&deck, true, false), 800 + 1600 + 1600 + 3200);
    }

    #[test]
    fn test_uncraftable_set_contributes_nothing() {
        for rarity in [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary] {
            for count in 1..=2 {
                let c = card("X", rarity, CardSet::Core, count);
                assert_eq!(card_dust(&c, false, true), 0);
                assert_eq!(card_dust(&c, true, true), 0);
            }
        }
    }

    #[test]
    fn test_exclusion_list_wins_over_rarity() {
        let cthun = card("OG_280", Rarity::Legendary, CardSet::Standard, 1);
        assert_eq!(card_dust(&cthun, false, false), 0);
        // The normal-only exclusion does not apply to golden crafting
        assert_eq!(card_dust(&cthun, true, false), 3200);

        let peon = card("BAR_069", Rarity::Common, CardSet::Standard, 2);
        assert_eq!(card_dust(&peon, true, false), 0);
        assert_eq!(card_dust(&peon, false, false), 80);

        // Excluded in both versions
        let kaelthas = card("BT_255", Rarity::Legendary, CardSet::Standard, 1);
        assert_eq!(card_dust(&kaelthas, false, false), 0);
        assert_eq!(card_dust(&kaelthas, true, false), 0);

        // Golden only
        let zayle = card("DAL_800", Rarity::Legendary, CardSet::Standard, 1);
        assert_eq!(card_dust(&zayle, true, false), 0);
        assert_eq!(card_dust(&zayle, false, false), 1600);
    }

    #[test]
    fn test_adventure_sets_need_flag() {
        let c = card("KAR_1", Rarity::Rare, CardSet::Karazhan, 2);
        assert_eq!(card_dust(&c, false, false), 0);
        assert_eq!(card_dust(&c, false, true), 200);
    }
}

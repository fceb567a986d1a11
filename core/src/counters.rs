//! Special per-side counters derived from play history.
//!
//! Counters are recomputed from the snapshot on every tick; nothing is
//! maintained incrementally. A counter whose display mode resolves to
//! hidden is not computed at all and reads `None`.

use hdt_types::{CounterDisplay, SideCounterSettings};

use crate::entity::GameTag;
use crate::game::{GameStateView, Side};

/// C'Thun's printed stats, used until a proxy entity is known.
pub const CTHUN_BASE_STATS: i32 = 6;
/// Jade Golems stop growing at 30/30.
pub const JADE_GOLEM_MAX: i32 = 30;

/// How a counter widget is drawn.
///
/// The C'Thun and spells counters share one widget with two halves, so
/// its style depends on which of the two are enabled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CounterStyle {
    #[default]
    None,
    /// Only the C'Thun half
    Cthun,
    /// Only the spells half
    Spells,
    Full,
}

impl CounterStyle {
    /// Style of the shared C'Thun/spells widget.
    pub fn combined(show_cthun: bool, show_spells: bool) -> Self {
        match (show_cthun, show_spells) {
            (true, true) => Self::Full,
            (true, false) => Self::Cthun,
            (false, true) => Self::Spells,
            (false, false) => Self::None,
        }
    }

    /// Style of a widget that only has one part.
    pub fn single(show: bool) -> Self {
        if show { Self::Full } else { Self::None }
    }
}

/// Styles of every counter widget on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterStyles {
    pub cthun_spells: CounterStyle,
    pub jade_golem: CounterStyle,
    pub pogo_hopper: CounterStyle,
    pub galakrond: CounterStyle,
    pub libram: CounterStyle,
}

/// Derived counter values for one side. `None` means not shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CounterSet {
    pub cthun_attack: Option<i32>,
    pub cthun_health: Option<i32>,
    pub spells_played: Option<u32>,
    pub next_jade_golem: Option<i32>,
    pub pogo_hopper: Option<u32>,
    pub galakrond_invokes: Option<i32>,
    pub libram_reduction: Option<i32>,
    pub styles: CounterStyles,
}

/// Size of the next Pogo-Hopper: 1, 3, 5, ... for 0, 1, 2, ... played.
pub fn pogo_hopper_size(play_count: u32) -> u32 {
    play_count.saturating_mul(2).saturating_add(1)
}

/// Size of the next Jade Golem given the `JADE_GOLEM` tag, capped at 30.
pub fn next_jade_golem(jade_tag: Option<i32>) -> i32 {
    match jade_tag {
        Some(current) => current.saturating_add(1).min(JADE_GOLEM_MAX),
        None => 1,
    }
}

/// Which mechanics a side has interacted with, used by [`CounterDisplay::Auto`].
#[derive(Debug, Clone, Copy, Default)]
struct Observed {
    cthun: bool,
    spells: bool,
    jade_golem: bool,
    pogo_hopper: bool,
    galakrond: bool,
    libram: bool,
}

fn observe(game: &GameStateView, side: Side) -> Observed {
    let view = game.side(side);
    let player_entity = game.player_entity(side);
    let tag_seen = |tag| player_entity.is_some_and(|e| e.has_tag(tag));
    Observed {
        cthun: view.cthun_proxy_id.is_some(),
        spells: view.spells_played_count > 0,
        jade_golem: tag_seen(GameTag::JadeGolem),
        pogo_hopper: view.pogo_hopper_played_count > 0,
        galakrond: tag_seen(GameTag::InvokeCounter),
        libram: tag_seen(GameTag::LibramCostReduction),
    }
}

fn shown(mode: CounterDisplay, observed: bool) -> bool {
    match mode {
        CounterDisplay::Always => true,
        CounterDisplay::Auto => observed,
        CounterDisplay::Never => false,
    }
}

/// Compute every enabled counter for one side.
pub fn compute_counters(
    game: &GameStateView,
    side: Side,
    settings: &SideCounterSettings,
) -> CounterSet {
    let view = game.side(side);
    let observed = observe(game, side);
    let player_entity = game.player_entity(side);

    let show_cthun = shown(settings.cthun, observed.cthun);
    let show_spells = shown(settings.spells, observed.spells);
    let show_jade = shown(settings.jade_golem, observed.jade_golem);
    let show_pogo = shown(settings.pogo_hopper, observed.pogo_hopper);
    let show_galakrond = shown(settings.galakrond, observed.galakrond);
    let show_libram = shown(settings.libram, observed.libram);

    let mut set = CounterSet::default();

    if show_cthun {
        let proxy = view.cthun_proxy_id.and_then(|id| game.entity(id));
        set.cthun_attack = Some(proxy.map_or(CTHUN_BASE_STATS, |p| p.attack()));
        set.cthun_health = Some(proxy.map_or(CTHUN_BASE_STATS, |p| p.health()));
    }
    if show_spells {
        set.spells_played = Some(view.spells_played_count);
    }
    if show_jade {
        let jade_tag = player_entity
            .filter(|e| e.has_tag(GameTag::JadeGolem))
            .map(|e| e.tag(GameTag::JadeGolem));
        set.next_jade_golem = Some(next_jade_golem(jade_tag));
    }
    if show_pogo {
        set.pogo_hopper = Some(pogo_hopper_size(view.pogo_hopper_played_count));
    }
    if show_galakrond {
        set.galakrond_invokes = Some(player_entity.map_or(0, |e| e.tag(GameTag::InvokeCounter)));
    }
    if show_libram {
        set.libram_reduction =
            Some(player_entity.map_or(0, |e| e.tag(GameTag::LibramCostReduction)));
    }

    set.styles = CounterStyles {
        cthun_spells: CounterStyle::combined(show_cthun, show_spells),
        jade_golem: CounterStyle::single(show_jade),
        pogo_hopper: CounterStyle::single(show_pogo),
        galakrond: CounterStyle::single(show_galakrond),
        libram: CounterStyle::single(show_libram),
    };
    set
}

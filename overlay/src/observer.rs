//! Change notification for derived frame properties.
//!
//! Consumers subscribe to the properties they render. After every tick the
//! bus diffs the new frame against the previous one and notifies only the
//! subscribers interested in something that actually changed.

use std::collections::BTreeSet;

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::frame::{OverlayFrame, SideFrame};

/// Queue depth per subscriber.
pub const SUBSCRIBER_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrameProperty {
    Shown,
    Opacity,
    Scaling,
    Visibility,
    CardMarks,
    PlayerValues,
    OpponentValues,
    PlayerBoard,
    OpponentBoard,
    DeckBanner,
    MissingCardsWarning,
    Timers,
    Sizes,
    Positions,
    AutoScale,
}

impl FrameProperty {
    pub const ALL: [FrameProperty; 15] = [
        FrameProperty::Shown,
        FrameProperty::Opacity,
        FrameProperty::Scaling,
        FrameProperty::Visibility,
        FrameProperty::CardMarks,
        FrameProperty::PlayerValues,
        FrameProperty::OpponentValues,
        FrameProperty::PlayerBoard,
        FrameProperty::OpponentBoard,
        FrameProperty::DeckBanner,
        FrameProperty::MissingCardsWarning,
        FrameProperty::Timers,
        FrameProperty::Sizes,
        FrameProperty::Positions,
        FrameProperty::AutoScale,
    ];
}

/// Everything on a side except its board list.
fn side_values_differ(a: &SideFrame, b: &SideFrame) -> bool {
    a.hand_count != b.hand_count
        || a.deck_count != b.deck_count
        || a.draw_chance != b.draw_chance
        || a.fatigue != b.fatigue
        || a.attack != b.attack
        || a.counters != b.counters
}

/// Properties whose value differs between two frames.
pub fn diff_frames(prev: &OverlayFrame, next: &OverlayFrame) -> BTreeSet<FrameProperty> {
    let checks = [
        (FrameProperty::Shown, prev.shown != next.shown),
        (FrameProperty::Opacity, prev.opacity != next.opacity),
        (FrameProperty::Scaling, prev.scaling != next.scaling),
        (FrameProperty::Visibility, prev.visibility != next.visibility),
        (FrameProperty::CardMarks, prev.card_marks != next.card_marks),
        (
            FrameProperty::PlayerValues,
            side_values_differ(&prev.player, &next.player),
        ),
        (
            FrameProperty::OpponentValues,
            side_values_differ(&prev.opponent, &next.opponent),
        ),
        (FrameProperty::PlayerBoard, prev.player.board != next.player.board),
        (
            FrameProperty::OpponentBoard,
            prev.opponent.board != next.opponent.board,
        ),
        (FrameProperty::DeckBanner, prev.deck != next.deck),
        (
            FrameProperty::MissingCardsWarning,
            prev.missing_cards_warning != next.missing_cards_warning,
        ),
        (FrameProperty::Timers, prev.timers != next.timers),
        (FrameProperty::Sizes, prev.sizes != next.sizes),
        (
            FrameProperty::Positions,
            prev.layout.positions != next.layout.positions,
        ),
        (FrameProperty::AutoScale, prev.auto_scale != next.auto_scale),
    ];
    checks
        .into_iter()
        .filter_map(|(property, changed)| changed.then_some(property))
        .collect()
}

/// Notification delivered to a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChange {
    /// Sequence number of the publishing tick
    pub tick: u64,
    /// Changed properties this subscriber asked for, in order
    pub properties: Vec<FrameProperty>,
}

struct Subscriber {
    interests: BTreeSet<FrameProperty>,
    tx: mpsc::Sender<PropertyChange>,
}

#[derive(Default)]
pub struct PropertyBus {
    previous: Option<OverlayFrame>,
    subscribers: Vec<Subscriber>,
    tick: u64,
}

impl PropertyBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        interests: impl IntoIterator<Item = FrameProperty>,
    ) -> mpsc::Receiver<PropertyChange> {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_CAPACITY);
        self.subscribers.push(Subscriber {
            interests: interests.into_iter().collect(),
            tx,
        });
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Diff `frame` against the last published frame and notify interested
    /// subscribers. The first publish reports every property as changed.
    ///
    /// Returns the full set of changed properties.
    pub fn publish(&mut self, frame: &OverlayFrame) -> BTreeSet<FrameProperty> {
        let changed = match &self.previous {
            Some(prev) => diff_frames(prev, frame),
            None => FrameProperty::ALL.into_iter().collect(),
        };
        self.tick += 1;
        self.previous = Some(frame.clone());

        if changed.is_empty() {
            return changed;
        }

        let tick = self.tick;
        self.subscribers.retain(|sub| {
            let properties: Vec<FrameProperty> =
                sub.interests.intersection(&changed).copied().collect();
            if properties.is_empty() {
                return true;
            }
            match sub.tx.try_send(PropertyChange { tick, properties }) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(tick, "Property subscriber lagging, dropping notification");
                    true
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!("Property subscriber closed, removing");
                    false
                }
            }
        });
        changed
    }
}

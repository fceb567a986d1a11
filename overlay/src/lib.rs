//! In-game overlay projection for HDT
//!
//! Each tick the [`OverlayProjector`] turns a borrowed game snapshot, the
//! user's settings and the active deck into one [`OverlayFrame`]: which
//! regions are visible, what every label says, how large and where every
//! element sits. The frame is plain data; a renderer draws it.
//!
//! # Architecture
//!
//! - [`visibility`] - declarative region rules over tick predicates
//! - [`layout`] - host-relative sizes, positions and auto scaling
//! - [`card_marks`], [`minion`], [`timer`] - per-element projections
//! - [`observer`] - per-property change notification
//! - [`platform`] - host window lookup and z-order
//! - [`topmost`] - bounded retry keeping the overlay above the game
//! - [`session`] - shared handle serializing ticks and host events

pub mod card_marks;
pub mod frame;
pub mod layout;
pub mod minion;
pub mod observer;
pub mod platform;
pub mod projector;
pub mod session;
pub mod timer;
pub mod topmost;
pub mod visibility;


pub use frame::{DeckBanner, OverlayFrame, SideFrame};
pub use layout::{ElementId, ElementMetrics, HostRect, Layout, LayoutError, Position};
pub use minion::{BaseCard, CardDatabase, MinionBadge};
pub use observer::{FrameProperty, PropertyBus, PropertyChange};
pub use platform::{HeadlessHost, HostWindow, PlatformError};
pub use projector::{OverlayProjector, SecondaryWindow};
pub use session::{OverlaySession, SessionError};
pub use timer::{TimerColor, TimerDisplay};
pub use topmost::{RetryPolicy, TopmostRetry, TopmostState};
pub use visibility::{HostState, Region, UiState, Visibility, VisibilityFlags};

//! Shared overlay session.
//!
//! The periodic tick and the host-moved event arrive from different
//! triggers. Both go through one mutex around the projector and property
//! bus, so a resize can never interleave with a tick. Neither that mutex nor
//! the host window lock is held while the topmost retry sleeps, and a retry
//! requested by a tick runs on its own task.

use std::sync::{Arc, Mutex, MutexGuard};

use hdt_core::{DeckContext, GameStateView, SceneMode, TimerState};
use hdt_types::OverlaySettings;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::frame::OverlayFrame;
use crate::layout::ElementMetrics;
use crate::observer::{FrameProperty, PropertyBus, PropertyChange};
use crate::platform::HostWindow;
use crate::projector::OverlayProjector;
use crate::topmost::{RetryPolicy, TopmostRetry, TopmostState};
use crate::visibility::UiState;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("overlay state lock poisoned")]
    Poisoned,
}

struct SessionState {
    projector: OverlayProjector,
    bus: PropertyBus,
}

/// Cloneable handle; clones share the same projector and host window.
#[derive(Clone)]
pub struct OverlaySession {
    state: Arc<Mutex<SessionState>>,
    host: Arc<tokio::sync::Mutex<Box<dyn HostWindow>>>,
    policy: RetryPolicy,
    /// Retry started by the last refresh tick
    pending: Arc<Mutex<Option<JoinHandle<TopmostState>>>>,
}

impl OverlaySession {
    pub fn new(projector: OverlayProjector, host: Box<dyn HostWindow>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                projector,
                bus: PropertyBus::new(),
            })),
            host: Arc::new(tokio::sync::Mutex::new(host)),
            policy: RetryPolicy::default(),
            pending: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionState>, SessionError> {
        self.state.lock().map_err(|_| SessionError::Poisoned)
    }

    pub fn subscribe(
        &self,
        interests: impl IntoIterator<Item = FrameProperty>,
    ) -> Result<mpsc::Receiver<PropertyChange>, SessionError> {
        Ok(self.lock()?.bus.subscribe(interests))
    }

    pub fn set_ui_state(&self, ui: UiState) -> Result<(), SessionError> {
        self.lock()?.projector.set_ui_state(ui);
        Ok(())
    }

    /// Copy of the current frame.
    pub fn frame(&self) -> Result<OverlayFrame, SessionError> {
        Ok(self.lock()?.projector.frame().clone())
    }

    /// Periodic tick. A refresh tick also starts re-raising the overlay in
    /// the background; see [`OverlaySession::wait_topmost`].
    pub async fn tick(
        &self,
        game: &GameStateView,
        settings: &OverlaySettings,
        decks: &DeckContext,
        metrics: &ElementMetrics,
        refresh: bool,
    ) -> Result<OverlayFrame, SessionError> {
        let host_state = self.host.lock().await.host_state();
        let (frame, wants_topmost) = {
            let mut state = self.lock()?;
            state.projector.set_host_state(host_state);
            let frame = state
                .projector
                .update(game, settings, decks, metrics, refresh)
                .clone();
            state.bus.publish(&frame);
            (frame, state.projector.take_topmost_request())
        };

        if wants_topmost {
            self.spawn_topmost();
        }
        Ok(frame)
    }

    /// Timer tick. Returns whether the labels changed.
    pub fn update_turn_timer(
        &self,
        timer: &TimerState,
        scene: SceneMode,
    ) -> Result<bool, SessionError> {
        let mut state = self.lock()?;
        let updated = state.projector.update_turn_timer(timer, scene);
        if updated {
            let frame = state.projector.frame().clone();
            state.bus.publish(&frame);
        }
        Ok(updated)
    }

    /// The game window moved or resized.
    pub async fn on_host_moved(&self) -> Result<TopmostState, SessionError> {
        let (rect, host_state) = {
            let host = self.host.lock().await;
            (host.host_rect(), host.host_state())
        };
        let Some(rect) = rect else {
            tracing::info!("Host window not found");
            return Ok(TopmostState::HostMissing);
        };

        {
            let mut state = self.lock()?;
            state.projector.set_host_state(host_state);
            match state.projector.on_host_rect(rect) {
                Ok(()) => {
                    let frame = state.projector.frame().clone();
                    state.bus.publish(&frame);
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Host rectangle unusable, keeping layout");
                }
            }
        }

        Ok(self.ensure_topmost().await)
    }

    /// Run the bounded topmost retry against the host window.
    pub async fn ensure_topmost(&self) -> TopmostState {
        let mut retry = TopmostRetry::new(self.policy);
        retry.run(&*self.host).await
    }

    fn spawn_topmost(&self) {
        let Ok(mut pending) = self.pending.lock() else {
            return;
        };
        if pending.as_ref().is_some_and(|handle| !handle.is_finished()) {
            tracing::debug!("Topmost retry already running");
            return;
        }
        let host = Arc::clone(&self.host);
        let policy = self.policy;
        *pending = Some(tokio::spawn(async move {
            let mut retry = TopmostRetry::new(policy);
            retry.run(&*host).await
        }));
    }

    /// Wait for the retry started by the last refresh tick, if any.
    pub async fn wait_topmost(&self) -> Option<TopmostState> {
        let handle = self.pending.lock().ok()?.take()?;
        handle.await.ok()
    }
}

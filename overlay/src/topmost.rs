//! Bounded retry that keeps the overlay above the game window.
//!
//! The game sometimes steals the top of the z-order right after it is
//! activated, so a single reassertion is not enough. The retry checks,
//! reasserts and sleeps until the overlay is observed on top or the
//! attempt budget runs out. Failure is logged and otherwise ignored.
//!
//! The host window is locked only for each check and reassertion, never
//! across a sleep, so other users of the host stay responsive while a
//! retry is in progress.

use std::time::Duration;

use tokio::sync::Mutex;

use crate::platform::{HostWindow, PlatformError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            delay: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopmostState {
    #[default]
    Idle,
    Retrying { attempt: u32 },
    Succeeded { attempts: u32 },
    Exhausted { attempts: u32 },
    /// The game window does not exist, nothing to stay above
    HostMissing,
}

impl TopmostState {
    pub fn is_finished(self) -> bool {
        !matches!(self, TopmostState::Idle | TopmostState::Retrying { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TopmostRetry {
    policy: RetryPolicy,
    state: TopmostState,
}

impl TopmostRetry {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: TopmostState::Idle,
        }
    }

    pub fn state(&self) -> TopmostState {
        self.state
    }

    /// Run the retry loop to completion.
    ///
    /// There is no delay after the final attempt, so an exhausted retry
    /// waits `(max_attempts - 1) * delay` in total.
    pub async fn run<H: HostWindow>(&mut self, host: &Mutex<H>) -> TopmostState {
        if !host.lock().await.host_present() {
            tracing::info!("Host window not found, skipping topmost");
            self.state = TopmostState::HostMissing;
            return self.state;
        }

        for attempt in 1..=self.policy.max_attempts {
            self.state = TopmostState::Retrying { attempt };
            match check_and_reassert(host).await {
                None => {
                    tracing::info!(attempts = attempt, "Overlay is topmost");
                    self.state = TopmostState::Succeeded { attempts: attempt };
                    return self.state;
                }
                Some(Err(e)) => {
                    tracing::debug!(attempt, error = %e, "Reasserting topmost failed");
                }
                Some(Ok(())) => {}
            }
            if attempt < self.policy.max_attempts {
                tokio::time::sleep(self.policy.delay).await;
            }
        }

        tracing::warn!(
            attempts = self.policy.max_attempts,
            "Could not set overlay as topmost"
        );
        self.state = TopmostState::Exhausted {
            attempts: self.policy.max_attempts,
        };
        self.state
    }
}

/// `None` when the overlay is already topmost, otherwise the outcome of
/// reasserting it. The lock is released on return.
async fn check_and_reassert<H: HostWindow>(
    host: &Mutex<H>,
) -> Option<Result<(), PlatformError>> {
    let mut host = host.lock().await;
    if host.is_topmost() {
        None
    } else {
        Some(host.reassert_topmost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::HostRect;
    use crate::platform::HeadlessHost;
    use tokio::time::Instant;

    fn host(topmost_after: Option<u32>) -> Mutex<HeadlessHost> {
        let mut host = HeadlessHost::new(HostRect::new(0.0, 0.0, 1920.0, 1080.0));
        host.topmost_after = topmost_after;
        Mutex::new(host)
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_topmost_exhausts_after_twenty_attempts() {
        let host = host(None);
        let mut retry = TopmostRetry::new(RetryPolicy::default());
        let start = Instant::now();

        let state = retry.run(&host).await;

        assert_eq!(state, TopmostState::Exhausted { attempts: 20 });
        assert_eq!(host.lock().await.reasserts(), 20);
        assert_eq!(start.elapsed(), Duration::from_millis(19 * 250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_early() {
        let host = host(Some(3));
        let mut retry = TopmostRetry::new(RetryPolicy::default());
        let start = Instant::now();

        let state = retry.run(&host).await;

        assert_eq!(state, TopmostState::Succeeded { attempts: 4 });
        assert_eq!(host.lock().await.reasserts(), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(750));
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_topmost_needs_no_delay() {
        let host = host(Some(0));
        let mut retry = TopmostRetry::new(RetryPolicy::default());
        let start = Instant::now();
        assert_eq!(
            retry.run(&host).await,
            TopmostState::Succeeded { attempts: 1 }
        );
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_host_unlocked_between_attempts() {
        let host = std::sync::Arc::new(host(None));
        let retrying = {
            let host = host.clone();
            tokio::spawn(async move {
                let mut retry = TopmostRetry::default();
                retry.run(&*host).await
            })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let start = Instant::now();
        let reasserts = host.lock().await.reasserts();
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(reasserts, 1);

        assert_eq!(
            retrying.await.unwrap(),
            TopmostState::Exhausted { attempts: 20 }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_host() {
        let host = host(None);
        host.lock().await.present = false;
        let mut retry = TopmostRetry::default();
        assert_eq!(retry.run(&host).await, TopmostState::HostMissing);
        assert!(retry.state().is_finished());
        assert_eq!(host.lock().await.reasserts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_policy() {
        let host = host(None);
        let mut retry = TopmostRetry::new(RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_millis(10),
        });
        let start = Instant::now();
        assert_eq!(
            retry.run(&host).await,
            TopmostState::Exhausted { attempts: 3 }
        );
        assert_eq!(start.elapsed(), Duration::from_millis(20));
    }
}

// ABOUTME: Async rate limit governor shared by all in-flight requests of a client.
// ABOUTME: Tracks a per-minute budget, reconciles with server headers, bootstraps once.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock, WindowId};
use super::headers::RateLimitHeaders;
use crate::error::RateLimitExceeded;

/// Extra delay past the minute boundary before a waiting request retries.
const WAKE_MARGIN: Duration = Duration::from_millis(500);

/// Progress of the first request that confirms the server's real limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No request has started yet.
    NotStarted,
    /// A synchronizer request is running; other callers wait on the gate.
    InProgress,
    /// The gate is open for the rest of the client's lifetime.
    Done,
}

/// Mutable state for the governor, protected by a single mutex.
struct RateLimitState {
    capacity: f64,
    remaining: f64,
    in_flight: u32,
    window: WindowId,
    sync: SyncState,
}

impl RateLimitState {
    /// Move to `window` if it differs from the current one.
    ///
    /// Requests still in flight from the previous window keep their slots.
    fn roll_window(&mut self, window: WindowId) -> bool {
        if window == self.window {
            return false;
        }
        self.remaining = self.capacity - f64::from(self.in_flight);
        self.window = window;
        true
    }

    fn available(&self) -> f64 {
        self.remaining - f64::from(self.in_flight)
    }
}

/// Point-in-time copy of the governor state, for monitoring and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitSnapshot {
    pub capacity: f64,
    pub remaining: f64,
    pub in_flight: u32,
    pub window: WindowId,
    pub sync: SyncState,
}

/// Client-side governor for the API's per-minute request budget.
///
/// Every request first calls [`bootstrap`](Self::bootstrap), then
/// [`acquire`](Self::acquire) for a [`Permit`] held for the duration of the
/// HTTP call, and finally [`reconcile`](Self::reconcile) with the headers of
/// whatever response came back.
///
/// The local budget estimate is optimistic: `remaining` is only lowered by
/// server feedback, while `in_flight` tracks requests that have not finished.
/// A request is admitted while `remaining - in_flight >= 1`.
///
/// # Bootstrap
///
/// Until the first response arrives the capacity is a guess. The first caller
/// of `bootstrap` becomes the synchronizer and receives a [`SyncGuard`]; later
/// callers wait until that guard is dropped, which happens whether the
/// synchronizer's request succeeds or fails. There is no timeout on this wait.
///
/// # Fairness
///
/// Waiting callers are not served in arrival order.
pub struct RateLimitGovernor {
    state: Mutex<RateLimitState>,
    gate: watch::Sender<bool>,
    auto_wait: bool,
    clock: Arc<dyn Clock>,
}

impl RateLimitGovernor {
    /// Create a governor using the system clock.
    pub fn new(capacity: u32, auto_wait: bool) -> Self {
        Self::with_clock(capacity, auto_wait, Arc::new(SystemClock))
    }

    /// Create a governor with a custom clock.
    pub fn with_clock(capacity: u32, auto_wait: bool, clock: Arc<dyn Clock>) -> Self {
        let (gate, _) = watch::channel(false);
        let capacity = f64::from(capacity);

        Self {
            state: Mutex::new(RateLimitState {
                capacity,
                remaining: capacity,
                in_flight: 0,
                window: WindowId::at(clock.now()),
                sync: SyncState::NotStarted,
            }),
            gate,
            auto_wait,
            clock,
        }
    }

    /// Whether exhausting the budget suspends callers instead of failing.
    pub fn auto_wait(&self) -> bool {
        self.auto_wait
    }

    /// Join the bootstrap protocol before acquiring a permit.
    ///
    /// Returns a [`SyncGuard`] if this caller was elected synchronizer. The
    /// guard must be kept alive until the caller's response has been
    /// reconciled. Returns `None` once the gate is open, waiting for it first
    /// if a synchronizer is still running.
    pub async fn bootstrap(&self) -> Option<SyncGuard<'_>> {
        let mut gate = {
            let mut state = self.state.lock();
            match state.sync {
                SyncState::Done => return None,
                SyncState::NotStarted => {
                    state.sync = SyncState::InProgress;
                    debug!("elected rate limit synchronizer");
                    return Some(SyncGuard { governor: self });
                }
                // Subscribed under the lock so the opening cannot be missed.
                SyncState::InProgress => self.gate.subscribe(),
            }
        };

        // The sender lives as long as `self`, so this only ends when the gate opens.
        let _ = gate.wait_for(|open| *open).await;
        None
    }

    /// Take a permit for one request.
    ///
    /// Fails with [`RateLimitExceeded`] when the budget is spent and
    /// auto-wait is off. With auto-wait on, suspends until the next minute
    /// window opens and then admits the caller unconditionally.
    pub async fn acquire(&self) -> Result<Permit<'_>, RateLimitExceeded> {
        let delay = {
            let mut state = self.state.lock();
            let now = self.clock.now();
            let window = WindowId::at(now);

            if state.roll_window(window) {
                debug!(
                    window = %window,
                    remaining = state.remaining,
                    in_flight = state.in_flight,
                    "rate limit window rolled over"
                );
            }

            if state.available() >= 1.0 {
                state.in_flight += 1;
                return Ok(Permit { governor: self });
            }

            let until_next = WindowId::until_next(now);
            if !self.auto_wait {
                let retry_after_secs = until_next.as_secs() + u64::from(until_next.subsec_nanos() > 0);
                warn!(
                    remaining = state.remaining,
                    in_flight = state.in_flight,
                    retry_after_secs,
                    "rate limit exceeded"
                );
                return Err(RateLimitExceeded {
                    retry_after_secs: Some(retry_after_secs),
                });
            }

            until_next + WAKE_MARGIN
        };

        info!(
            delay_ms = delay.as_millis() as u64,
            "rate limit budget exhausted, waiting for next window"
        );
        self.clock.sleep(delay).await;

        let mut state = self.state.lock();
        let window = WindowId::at(self.clock.now());
        state.remaining = state.capacity - f64::from(state.in_flight);
        state.window = window;
        state.in_flight += 1;
        Ok(Permit { governor: self })
    }

    /// Correct the local estimate from the server's headers.
    ///
    /// Absent or malformed values leave the corresponding field untouched.
    pub fn reconcile(&self, headers: &RateLimitHeaders) {
        let limit = headers.parsed_limit();
        let remaining = headers.parsed_remaining();
        if limit.is_none() && remaining.is_none() {
            return;
        }

        let mut state = self.state.lock();
        if let Some(limit) = limit {
            state.capacity = limit;
        }
        if let Some(remaining) = remaining {
            state.remaining = remaining;
        }
        debug!(
            capacity = state.capacity,
            remaining = state.remaining,
            in_flight = state.in_flight,
            "reconciled rate limit with server"
        );
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> RateLimitSnapshot {
        let state = self.state.lock();
        RateLimitSnapshot {
            capacity: state.capacity,
            remaining: state.remaining,
            in_flight: state.in_flight,
            window: state.window,
            sync: state.sync,
        }
    }

    /// True once the bootstrap gate has opened.
    pub fn is_synced(&self) -> bool {
        *self.gate.borrow()
    }

    /// Return one in-flight slot. Never goes below zero.
    pub(crate) fn release_slot(&self) {
        let mut state = self.state.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
    }

    fn open_gate(&self) {
        let mut state = self.state.lock();
        state.sync = SyncState::Done;
        self.gate.send_replace(true);
        debug!("rate limit bootstrap complete, gate open");
    }
}

/// Permission to send one request. Dropping it releases the slot.
#[must_use = "dropping a permit immediately releases its slot"]
pub struct Permit<'a> {
    governor: &'a RateLimitGovernor,
}

impl Permit<'_> {
    /// Release the slot now.
    pub fn release(self) {}
}

impl fmt::Debug for Permit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permit").finish_non_exhaustive()
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.governor.release_slot();
    }
}

/// Held by the bootstrap synchronizer. Dropping it opens the gate.
#[must_use = "dropping the guard immediately opens the bootstrap gate"]
pub struct SyncGuard<'a> {
    governor: &'a RateLimitGovernor,
}

impl SyncGuard<'_> {
    /// Open the gate now.
    pub fn complete(self) {}
}

impl fmt::Debug for SyncGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncGuard").finish_non_exhaustive()
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.governor.open_gate();
    }
}

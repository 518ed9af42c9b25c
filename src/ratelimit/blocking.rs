// ABOUTME: Blocking rate limit governor for the synchronous client.
// ABOUTME: Tracks one reset timestamp and blocks the thread when the budget is spent.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock, WindowId};
use super::headers::RateLimitHeaders;
use crate::error::RateLimitExceeded;

/// Reset interval assumed when the server omits `x-ratelimit-reset`.
const DEFAULT_RESET_SECS: u64 = 60;

struct BlockingState {
    capacity: f64,
    remaining: f64,
    window: WindowId,
    reset_at: DateTime<Utc>,
}

/// Rate limit governor for sequential callers.
///
/// There is no in-flight accounting and no bootstrap gate: each request
/// spends one unit of `remaining` up front, and the server's headers
/// overwrite the estimate afterwards.
pub struct BlockingGovernor {
    state: Mutex<BlockingState>,
    auto_wait: bool,
    clock: Arc<dyn Clock>,
}

impl BlockingGovernor {
    /// Create a governor using the system clock.
    pub fn new(capacity: u32, auto_wait: bool) -> Self {
        Self::with_clock(capacity, auto_wait, Arc::new(SystemClock))
    }

    /// Create a governor with a custom clock.
    pub fn with_clock(capacity: u32, auto_wait: bool, clock: Arc<dyn Clock>) -> Self {
        let capacity = f64::from(capacity);
        Self {
            state: Mutex::new(BlockingState {
                capacity,
                remaining: capacity,
                window: WindowId::at(clock.now()),
                reset_at: DateTime::<Utc>::MIN_UTC,
            }),
            auto_wait,
            clock,
        }
    }

    /// Spend one unit of budget, blocking or failing if none is left.
    pub fn check(&self) -> Result<(), RateLimitExceeded> {
        let mut state = self.state.lock();
        let now = self.clock.now();
        let window = WindowId::at(now);

        if window != state.window {
            debug!(window = %window, "rate limit window rolled over");
            state.remaining = state.capacity;
            state.window = window;
        } else if state.remaining <= 0.0 {
            // Without a server-reported reset, the next window is the best guess.
            let resume_at = if state.reset_at > now {
                state.reset_at
            } else {
                window.next_start()
            };
            let wait = (resume_at - now).to_std().unwrap_or_default();

            if !self.auto_wait {
                let retry_after_secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
                warn!(retry_after_secs, "rate limit exceeded");
                return Err(RateLimitExceeded {
                    retry_after_secs: Some(retry_after_secs),
                });
            }

            drop(state);
            info!(wait_secs = wait.as_secs_f64(), "rate limit hit, waiting for reset");
            self.clock.sleep_blocking(wait);

            state = self.state.lock();
            state.remaining = state.capacity;
            state.window = WindowId::at(self.clock.now());
        }

        state.remaining -= 1.0;
        Ok(())
    }

    /// Record the server's view of the budget after a response.
    pub fn reconcile(&self, headers: &RateLimitHeaders) {
        let limit = headers.parsed_limit();
        let remaining = headers.parsed_remaining();
        let reset_secs = headers.parsed_reset_secs().unwrap_or(DEFAULT_RESET_SECS);

        let now = self.clock.now();
        let base = now.checked_add_signed(TimeDelta::milliseconds(500)).unwrap_or(now);
        let base = base.with_nanosecond(0).unwrap_or(base);
        let reset_at = i64::try_from(reset_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| base.checked_add_signed(delta));
        if reset_at.is_none() {
            warn!(reset_secs, "ignoring out of range rate limit reset");
        }

        let mut state = self.state.lock();
        if let Some(limit) = limit {
            state.capacity = limit;
        }
        if let Some(remaining) = remaining {
            state.remaining = remaining;
        }
        if let Some(reset_at) = reset_at {
            state.reset_at = reset_at;
        }
        debug!(
            capacity = state.capacity,
            remaining = state.remaining,
            reset_at = %state.reset_at,
            "reconciled rate limit with server"
        );
    }

    /// Budget believed to be left in the current window.
    pub fn remaining(&self) -> f64 {
        self.state.lock().remaining
    }

    /// Requests allowed per window.
    pub fn capacity(&self) -> f64 {
        self.state.lock().capacity
    }

    /// When the server said the budget resets.
    pub fn reset_at(&self) -> DateTime<Utc> {
        self.state.lock().reset_at
    }

    /// Whole seconds until the reported reset, zero if already passed.
    pub fn reset_in_secs(&self) -> u64 {
        let reset_at = self.reset_at();
        (reset_at - self.clock.now())
            .to_std()
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

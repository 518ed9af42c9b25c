// ABOUTME: Rate limiting module - keeps requests inside the API's per-minute budget.
// ABOUTME: Async governor with bootstrap coordination plus a blocking variant.

mod blocking;
mod clock;
mod governor;
mod headers;

pub use blocking::BlockingGovernor;
pub use clock::{Clock, SystemClock, WindowId};
pub use governor::{Permit, RateLimitGovernor, RateLimitSnapshot, SyncGuard, SyncState};
pub use headers::{LIMIT_HEADER, RESET_HEADER, REMAINING_HEADER, RateLimitHeaders};

/// Requests per minute assumed until the server reports its own limit.
pub const DEFAULT_CAPACITY: u32 = 60;

#[cfg(test)]
mod blocking_test;
#[cfg(test)]
mod headers_test;

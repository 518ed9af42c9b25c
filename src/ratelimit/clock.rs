// ABOUTME: Wall-clock and sleep abstraction used by the rate limit governors.
// ABOUTME: Also defines WindowId, the one-minute accounting window.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use futures::future::BoxFuture;

const WINDOW_MILLIS: i64 = 60_000;

/// Source of wall-clock time and suspension for the governors.
///
/// Production code uses [`SystemClock`]. Tests substitute clocks driven by
/// paused tokio time or by manual advancement.
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Suspend the calling task for `duration`.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }

    /// Block the calling thread for `duration`.
    fn sleep_blocking(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Identifies a one-minute wall-clock window (minutes since the unix epoch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(i64);

impl WindowId {
    /// The window containing `time`.
    pub fn at(time: DateTime<Utc>) -> Self {
        WindowId(time.timestamp_millis().div_euclid(WINDOW_MILLIS))
    }

    /// First instant of this window.
    pub fn start(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.0 * WINDOW_MILLIS)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// First instant of the following window.
    pub fn next_start(&self) -> DateTime<Utc> {
        WindowId(self.0 + 1).start()
    }

    /// Time from `now` until the next window opens.
    pub fn until_next(now: DateTime<Utc>) -> Duration {
        let remaining = WindowId::at(now).next_start() - now;
        remaining.to_std().unwrap_or(Duration::ZERO)
    }
}

impl From<DateTime<Utc>> for WindowId {
    fn from(time: DateTime<Utc>) -> Self {
        WindowId::at(time)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start().format("%Y%m%d%H%M"))
    }
}

// ABOUTME: Tests for the blocking rate limit governor.
// ABOUTME: Uses a manual clock so waits are recorded instead of slept.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use parking_lot::Mutex;

use super::blocking::BlockingGovernor;
use super::clock::Clock;
use super::headers::RateLimitHeaders;

/// Clock that only moves when told to, or when something sleeps on it.
struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    slept: Mutex<Vec<Duration>>,
}

impl ManualClock {
    fn at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
            slept: Mutex::new(Vec::new()),
        })
    }

    fn advance(&self, by: Duration) {
        *self.now.lock() += TimeDelta::from_std(by).unwrap();
    }

    fn slept(&self) -> Vec<Duration> {
        self.slept.lock().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    fn sleep_blocking(&self, duration: Duration) {
        self.slept.lock().push(duration);
        self.advance(duration);
    }
}

fn ten_past() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 24, 12, 0, 10).unwrap()
}

#[test]
fn test_allows_exactly_capacity_requests() {
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(5, false, clock);

    for _ in 0..5 {
        governor.check().unwrap();
    }

    assert!(governor.check().is_err());
    assert_eq!(governor.remaining(), 0.0);
}

#[test]
fn test_error_reports_seconds_until_next_window_without_headers() {
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(1, false, clock);
    governor.check().unwrap();

    let err = governor.check().unwrap_err();

    assert_eq!(err.retry_after_secs, Some(50));
    assert_eq!(err.to_string(), "Rate limit exceeded. Limit resets in 50 seconds");
}

#[test]
fn test_error_reports_server_reset() {
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(60, false, clock);
    governor.check().unwrap();

    governor.reconcile(&RateLimitHeaders::new().remaining(0).reset(20));

    let err = governor.check().unwrap_err();
    assert_eq!(err.retry_after_secs, Some(20));
    assert_eq!(governor.reset_in_secs(), 20);
}

#[test]
fn test_auto_wait_blocks_until_reset_then_refills() {
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(60, true, clock.clone());
    governor.check().unwrap();
    governor.reconcile(&RateLimitHeaders::new().remaining(0).limit(60).reset(5));

    governor.check().unwrap();

    assert_eq!(clock.slept(), vec![Duration::from_secs(5)]);
    assert_eq!(governor.remaining(), 59.0);
}

#[test]
fn test_no_wait_when_budget_left() {
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(60, true, clock.clone());

    for _ in 0..10 {
        governor.check().unwrap();
    }

    assert!(clock.slept().is_empty());
    assert_eq!(governor.remaining(), 50.0);
}

#[test]
fn test_new_window_refills_budget() {
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(2, false, clock.clone());
    governor.check().unwrap();
    governor.check().unwrap();
    assert!(governor.check().is_err());

    clock.advance(Duration::from_secs(60));

    governor.check().unwrap();
    assert_eq!(governor.remaining(), 1.0);
}

#[test]
fn test_same_window_keeps_budget() {
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(2, false, clock.clone());
    governor.check().unwrap();
    governor.check().unwrap();

    clock.advance(Duration::from_secs(30));

    assert!(governor.check().is_err());
}

#[test]
fn test_server_remaining_overrides_local_count() {
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(60, false, clock);
    governor.check().unwrap();

    governor.reconcile(&RateLimitHeaders::new().remaining(10).limit(100));

    assert_eq!(governor.remaining(), 10.0);
    assert_eq!(governor.capacity(), 100.0);
}

#[test]
fn test_reset_timestamp_rounds_to_whole_seconds() {
    let start = ten_past() + TimeDelta::milliseconds(700);
    let clock = ManualClock::at(start);
    let governor = BlockingGovernor::with_clock(60, false, clock);

    governor.reconcile(&RateLimitHeaders::new().reset(30));

    // 12:00:10.7 + 0.5s = 12:00:11.2, truncated, plus 30s.
    assert_eq!(
        governor.reset_at(),
        Utc.with_ymd_and_hms(2026, 2, 24, 12, 0, 41).unwrap()
    );
}

#[test]
fn test_missing_headers_do_not_raise() {
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(60, false, clock);
    governor.check().unwrap();

    governor.reconcile(&RateLimitHeaders::new());
    governor.reconcile(&RateLimitHeaders::new().remaining("lots").reset("soon"));

    assert_eq!(governor.remaining(), 59.0);
    assert_eq!(governor.capacity(), 60.0);
    assert_eq!(governor.reset_in_secs(), 60);
}

#[test]
fn test_out_of_range_reset_keeps_previous_reset() {
    let clock = ManualClock::at(ten_past());
    let governor = BlockingGovernor::with_clock(60, false, clock);
    governor.reconcile(&RateLimitHeaders::new().reset(30));
    let reset_at = governor.reset_at();

    governor.reconcile(&RateLimitHeaders::new().remaining(10).reset("1e13"));
    governor.reconcile(&RateLimitHeaders::new().remaining(10).reset("1e17"));
    governor.reconcile(&RateLimitHeaders::new().remaining(10).reset("1e300"));

    assert_eq!(governor.reset_at(), reset_at);
    assert_eq!(governor.remaining(), 10.0);
    governor.check().unwrap();
    assert_eq!(governor.remaining(), 9.0);
}

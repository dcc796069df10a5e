//! Id generation, clocks and elapsed-time bucketing

use chrono::Utc;
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// Length of ids produced by [`make_id`] when stores assign one
pub const DEFAULT_ID_LENGTH: usize = 5;

const MINUTE_MS: i64 = 60 * 1000;
const DAY_MS: i64 = 24 * 60 * MINUTE_MS;

/// Generate a random alphanumeric id (e.g. `"GEouN"`)
pub fn make_id(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// A random timestamp within the week before `now_ms`
pub fn random_past_time(now_ms: i64) -> i64 {
    let offset = rand::thread_rng().gen_range(MINUTE_MS..=7 * DAY_MS);
    now_ms - offset
}

/// Source of the current time in epoch milliseconds
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to. Used by tests and demos.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now: AtomicI64::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// How long ago something happened, in coarse buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Elapsed {
    JustNow,
    LastHour,
    Today,
    Older,
}

impl Elapsed {
    pub fn label(&self) -> &'static str {
        match self {
            Elapsed::JustNow => "just now",
            Elapsed::LastHour => "last hour",
            Elapsed::Today => "today",
            Elapsed::Older => "older",
        }
    }
}

/// Upper bounds (exclusive, in seconds) of each recency bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencyThresholds {
    pub just_now_secs: i64,
    pub last_hour_secs: i64,
    pub today_secs: i64,
}

impl Default for RecencyThresholds {
    fn default() -> Self {
        Self {
            just_now_secs: 60,
            last_hour_secs: 60 * 60,
            today_secs: 24 * 60 * 60,
        }
    }
}

/// Classify the time elapsed between `timestamp_ms` and `now_ms`.
///
/// Timestamps in the future count as "just now".
pub fn elapsed_time(timestamp_ms: i64, now_ms: i64, thresholds: &RecencyThresholds) -> Elapsed {
    let diff = now_ms.saturating_sub(timestamp_ms);
    if diff < thresholds.just_now_secs.saturating_mul(1000) {
        Elapsed::JustNow
    } else if diff < thresholds.last_hour_secs.saturating_mul(1000) {
        Elapsed::LastHour
    } else if diff < thresholds.today_secs.saturating_mul(1000) {
        Elapsed::Today
    } else {
        Elapsed::Older
    }
}

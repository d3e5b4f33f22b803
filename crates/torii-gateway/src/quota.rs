//! Per-client daily admission quota.

use std::collections::HashMap;
use std::sync::Mutex;

use torii_core::{ClientId, DayStamp, QuotaKey};

/// Default number of admitted requests per client per UTC day.
pub const DEFAULT_DAILY_LIMIT: u32 = 50;
/// Default number of distinct counter keys that triggers an eviction sweep.
pub const DEFAULT_SWEEP_THRESHOLD: usize = 1000;

/// Admission controller: per-client, per-UTC-day request counters.
///
/// The whole check-then-increment sequence runs under one lock, so two
/// simultaneous requests from the same client can never both take the last
/// admission slot. Stale-day counters are swept as a side effect of
/// admission once the map grows past the threshold; there is no background
/// task.
pub struct DailyQuota {
    limit: u32,
    sweep_threshold: usize,
    counters: Mutex<HashMap<QuotaKey, u32>>,
}

impl DailyQuota {
    /// Create a quota with an explicit limit and sweep threshold.
    #[must_use]
    pub fn new(limit: u32, sweep_threshold: usize) -> Self {
        Self {
            limit,
            sweep_threshold,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// The per-day admission limit.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Decide whether a request from `client` may proceed today.
    ///
    /// Admission increments the client's counter for the current UTC day;
    /// rejection mutates nothing, so rejected requests never consume quota.
    #[must_use]
    pub fn check(&self, client: &ClientId) -> bool {
        self.check_on(client, DayStamp::today_utc())
    }

    fn check_on(&self, client: &ClientId, day: DayStamp) -> bool {
        let key = QuotaKey::new(client.clone(), day);
        let mut counters = self.counters.lock().unwrap();

        let current = counters.get(&key).copied().unwrap_or(0);
        if current >= self.limit {
            return false;
        }

        counters.insert(key, current + 1);

        if counters.len() > self.sweep_threshold {
            counters.retain(|key, _| key.day == day);
        }

        true
    }

    /// Number of counter keys currently tracked.
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.counters.lock().unwrap().len()
    }
}

impl Default for DailyQuota {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_LIMIT, DEFAULT_SWEEP_THRESHOLD)
    }
}

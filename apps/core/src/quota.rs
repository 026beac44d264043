use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-user daily counter of re-ranking calls, kept by the caller.
///
/// The detector only reads `llm_calls_today`; hosts that process several
/// messages of one user concurrently use [`LlmQuota::try_acquire`] so the
/// compare and the increment happen under a single lock.
pub struct LlmQuota {
    /// Day and call count for each user ID.
    counters: Mutex<HashMap<String, (NaiveDate, u32)>>,
    /// The maximum number of calls allowed per day.
    limit: u32,
}

impl LlmQuota {
    /// Creates a new `LlmQuota`.
    ///
    /// # Arguments
    ///
    /// * `limit` - The number of calls allowed per user per calendar day (UTC).
    pub fn new(limit: u32) -> Self {
        LlmQuota {
            counters: Mutex::new(HashMap::new()),
            limit,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Calls already charged to `user_id` on `day`.
    pub fn calls_on(&self, user_id: &str, day: NaiveDate) -> u32 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        match counters.get(user_id) {
            Some((counted_day, count)) if *counted_day == day => *count,
            _ => 0,
        }
    }

    pub fn calls_today(&self, user_id: &str) -> u32 {
        self.calls_on(user_id, Utc::now().date_naive())
    }

    /// Charges one call to `user_id` on `day` if the quota allows it.
    ///
    /// Returns `true` if the call was recorded, `false` if the quota is spent.
    /// A counter from an earlier day is reset first.
    pub fn try_acquire_on(&self, user_id: &str, day: NaiveDate) -> bool {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        let entry = counters.entry(user_id.to_string()).or_insert((day, 0));

        if entry.0 != day {
            *entry = (day, 0);
        }

        if entry.1 < self.limit {
            entry.1 += 1;
            true
        } else {
            false
        }
    }

    pub fn try_acquire(&self, user_id: &str) -> bool {
        self.try_acquire_on(user_id, Utc::now().date_naive())
    }
}

//! Lock-striped in-memory usage ledger.

use dashmap::DashMap;
use std::sync::Arc;

use crate::tenant::{
    domain::{QuotaDecision, QuotaLimit, UsageKey},
    ports::QuotaLedger,
};

#[derive(Debug, Clone, Copy, Default)]
struct UsageCounter {
    used: u64,
    reserved: u64,
}

impl UsageCounter {
    const fn consumed(self) -> u64 {
        self.used.saturating_add(self.reserved)
    }
}

/// Usage ledger backed by a sharded concurrent map.
///
/// Each key lives in one shard; every operation holds that shard's lock for
/// the whole read-modify-write, so unrelated tenants do not contend. Counters
/// never reset.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuotaLedger {
    counters: Arc<DashMap<UsageKey, UsageCounter>>,
}

impl InMemoryQuotaLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self, key: &UsageKey) -> UsageCounter {
        self.counters
            .get(key)
            .map(|counter| *counter)
            .unwrap_or_default()
    }
}

impl QuotaLedger for InMemoryQuotaLedger {
    fn try_reserve(&self, key: &UsageKey, limit: QuotaLimit) -> QuotaDecision {
        let mut counter = self.counters.entry(key.clone()).or_default();
        let consumed = counter.consumed();
        match limit {
            QuotaLimit::Limited(max) if !limit.admits(consumed) => QuotaDecision::Exceeded {
                limit: max,
                consumed,
            },
            QuotaLimit::Limited(_) | QuotaLimit::Unlimited => {
                counter.reserved = counter.reserved.saturating_add(1);
                QuotaDecision::Allowed
            }
        }
    }

    fn commit(&self, key: &UsageKey) {
        let mut counter = self.counters.entry(key.clone()).or_default();
        counter.reserved = counter.reserved.saturating_sub(1);
        counter.used = counter.used.saturating_add(1);
    }

    fn release(&self, key: &UsageKey) {
        if let Some(mut counter) = self.counters.get_mut(key) {
            counter.reserved = counter.reserved.saturating_sub(1);
        }
    }

    fn record(&self, key: &UsageKey) {
        let mut counter = self.counters.entry(key.clone()).or_default();
        counter.used = counter.used.saturating_add(1);
    }

    fn used(&self, key: &UsageKey) -> u64 {
        self.snapshot(key).used
    }

    fn reserved(&self, key: &UsageKey) -> u64 {
        self.snapshot(key).reserved
    }
}

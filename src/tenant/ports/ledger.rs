//! Usage ledger port for quota enforcement.

use crate::tenant::domain::{QuotaDecision, QuotaLimit, UsageKey};

/// Per-(tenant, capability) usage counters.
///
/// A counter has two parts: executions already charged (`used`) and
/// admissions still in flight (`reserved`). Both `try_reserve` and the
/// settle operations must be atomic per key so that concurrent callers can
/// never be admitted past the limit.
pub trait QuotaLedger: Send + Sync {
    /// Admits one more execution if `used + reserved` is below `limit`,
    /// incrementing `reserved` in the same atomic step.
    fn try_reserve(&self, key: &UsageKey, limit: QuotaLimit) -> QuotaDecision;

    /// Converts one reservation into a charged execution.
    fn commit(&self, key: &UsageKey);

    /// Drops one reservation without charging it.
    fn release(&self, key: &UsageKey);

    /// Charges one execution without a prior reservation.
    fn record(&self, key: &UsageKey);

    /// Returns the number of charged executions.
    fn used(&self, key: &UsageKey) -> u64;

    /// Returns the number of reservations in flight.
    fn reserved(&self, key: &UsageKey) -> u64;
}

//! In-memory adapters for profile storage and usage accounting.

mod profile_store;
mod quota_ledger;

pub use profile_store::InMemoryProfileRepository;
pub use quota_ledger::InMemoryQuotaLedger;

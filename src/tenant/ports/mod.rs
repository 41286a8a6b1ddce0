//! Port contracts for business profile storage and quota accounting.

pub mod ledger;
pub mod repository;

pub use ledger::QuotaLedger;
pub use repository::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult};

//! Domain model for business tenants and quota accounting.

mod error;
mod ids;
mod profile;
mod quota;

pub use error::TenantDomainError;
pub use ids::TenantId;
pub use profile::BusinessProfile;
pub use quota::{QuotaDecision, QuotaLimit, UsageKey};

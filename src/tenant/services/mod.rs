//! Application services for tenant entitlement and quota enforcement.

mod policy;

pub use policy::{QuotaReservation, TenantPolicyError, TenantPolicyResult, TenantPolicyService};

//! Business tenants: profiles, capability entitlements and quota accounting.
//!
//! A tenant is a calling organisation. Its [`domain::BusinessProfile`]
//! decides which capabilities it may invoke and how often. Usage counters are
//! kept by a [`ports::QuotaLedger`] and are charged only for successful
//! executions. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

//! Capability handler registration and resolution.
//!
//! Handlers are competing implementations of one or more capabilities. The
//! registry keeps them in registration order together with the business
//! profiles, and resolves each (capability, tenant) pair to exactly one
//! handler: tenant-scoped handlers shadow general ones, then the lowest
//! priority value wins, then the earliest registration. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

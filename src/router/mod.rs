//! Capability router: the single execution entry point.
//!
//! [`services::CapabilityRouter`] validates a request against the tenant's
//! business profile, reserves quota, resolves a handler and runs it. Checks
//! happen in a fixed order (authentication, entitlement, quota, resolution,
//! execution), which fixes the precedence of the errors in
//! [`domain::RouterError`].

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;

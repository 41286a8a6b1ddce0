//! Aggregate registry statistics.

use serde::{Deserialize, Serialize};

/// Read-only registry aggregate for operational dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryStatistics {
    /// Registered handlers.
    pub handler_count: usize,
    /// Size of the capability catalogue.
    pub capability_count: usize,
    /// Catalogue entries supported by at least one handler.
    pub supported_capability_count: usize,
    /// `supported_capability_count / capability_count`, in `[0, 1]`.
    pub coverage_rate: f64,
    /// Registered business profiles.
    pub tenant_count: usize,
}

impl RegistryStatistics {
    /// Builds statistics from raw counts, deriving the coverage rate.
    #[must_use]
    pub fn new(
        handler_count: usize,
        capability_count: usize,
        supported_capability_count: usize,
        tenant_count: usize,
    ) -> Self {
        Self {
            handler_count,
            capability_count,
            supported_capability_count,
            coverage_rate: ratio(supported_capability_count, capability_count),
            tenant_count,
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "coverage is reported as a fraction of the catalogue"
)]
fn ratio(part: usize, whole: usize) -> f64 {
    let (Ok(numerator), Ok(denominator)) = (u32::try_from(part), u32::try_from(whole)) else {
        return 0.0;
    };
    if denominator == 0 {
        return 0.0;
    }
    f64::from(numerator) / f64::from(denominator)
}

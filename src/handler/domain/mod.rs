//! Domain model for handler registration records and registry statistics.

mod error;
mod ids;
mod record;
mod scope;
mod statistics;

pub use error::HandlerDomainError;
pub use ids::HandlerId;
pub use record::HandlerRecord;
pub use scope::HandlerScope;
pub use statistics::RegistryStatistics;

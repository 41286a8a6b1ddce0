//! Domain model for capabilities and the values exchanged with handlers.

mod catalog;
mod error;
mod ids;
mod payload;
mod request;

pub use catalog::Capability;
pub use error::ParseCapabilityError;
pub use ids::RequestId;
pub use payload::{Metadata, Payload, metadata_keys};
pub use request::{CapabilityRequest, CapabilityResponse};

//! Application services for handler registration and resolution.

mod registry;

pub use registry::{
    HandlerRegistry, RegistrationOutcome, RegistryError, RegistryResult, ResolvedHandler,
};

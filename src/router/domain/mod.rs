//! Domain model for router configuration and caller-visible errors.

mod config;
mod error;

pub use config::RouterConfig;
pub use error::{ErrorKind, RouterError, RouterResult};

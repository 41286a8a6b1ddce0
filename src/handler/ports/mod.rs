//! Port contracts implemented by capability handlers.

pub mod handler;

pub use handler::{
    CapabilityHandler, HandlerError, HandlerOutput, HandlerResult, RegisteredHandler,
};

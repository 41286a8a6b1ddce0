//! Adapter implementations of the handler port.

mod scripted;

pub use scripted::{ScriptedBehaviour, ScriptedHandler};

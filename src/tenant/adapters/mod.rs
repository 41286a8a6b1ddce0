//! Adapter implementations for tenant ports.

pub mod memory;

//! Capability catalogue and the request/response values routed through
//! Switchyard.
//!
//! The catalogue is a closed, enumerable set fixed at compile time. Requests
//! name exactly one capability and carry a tagged payload; responses echo the
//! capability alongside handler output and routing metadata.

pub mod domain;

#[cfg(test)]
mod tests;

//! Switchyard: capability routing and tenant policy engine.
//!
//! A caller asks for a capability ("generate a math problem", "translate
//! text") on behalf of a business tenant. Switchyard checks the tenant's
//! profile and quota, picks one of several competing handlers, runs it and
//! returns the response annotated with routing metadata. An optional staged
//! pipeline brackets each call with cross-cutting plugins such as token
//! authentication, redaction and auditing.
//!
//! # Architecture
//!
//! Each feature module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and rules with no infrastructure dependencies
//! - **Ports**: Trait interfaces for handlers, stages and storage
//! - **Adapters**: In-memory implementations of ports
//! - **Services**: Orchestration over injected ports
//!
//! # Modules
//!
//! - [`capability`]: Capability catalog, requests and responses
//! - [`tenant`]: Business profiles, entitlements and quota accounting
//! - [`handler`]: Handler registration and deterministic resolution
//! - [`router`]: The execution entry point and its error taxonomy
//! - [`pipeline`]: Staged request lifecycle with always-on auditing
//! - [`config`]: JSON configuration for router settings and profiles

pub mod capability;
pub mod config;
pub mod handler;
pub mod pipeline;
pub mod router;
pub mod tenant;

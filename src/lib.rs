//! Taskgate: task management with cross-service owner references.
//!
//! Tasks reference their owner by a user identifier that lives in a separate
//! user service. The task side cannot enforce a foreign key, so every write
//! that sets an owner asks the user service whether the user exists before
//! storing anything. A `DONE` task refuses further edits.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP, memory)
//!
//! # Modules
//!
//! - [`task`]: Task store, status guard, and the consistency service
//! - [`user`]: User directory owning the identifiers tasks reference
//! - [`boundary`]: Service errors translated into caller-facing responses
//! - [`config`]: Layered runtime configuration
//! - [`telemetry`]: Log subscriber installation

pub mod boundary;
pub mod config;
pub mod task;
pub mod telemetry;
pub mod user;

//! User directory for taskgate.
//!
//! Users are owned by a separate service in production. This module models
//! that service's directory so the task context can be wired against it
//! in-process and so cross-context flows (including orphaned task references
//! after a user deletion) can be exercised end to end.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

//! Task management with cross-service owner references for taskgate.
//!
//! Every task names its owner by [`UserId`](crate::user::domain::UserId), a
//! user that lives in a store this module cannot read. Writes that set or
//! change the owner therefore ask a [`UserExistenceOracle`] first, and
//! updates are gated by the [`TaskStatusGuard`] state machine. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//!
//! # Consistency
//!
//! The owner check is point-in-time. A user can be deleted right after a task
//! referencing them is written, and nothing re-validates stored references.
//! [`TaskConsistencyService::update`] reads, checks, and writes without an
//! end-to-end lock: a concurrent delete of the same task between the read and
//! the write is undone by the write, which re-creates the record under the
//! same identifier. Concurrent updates of one task are last-write-wins.
//!
//! [`UserExistenceOracle`]: ports::UserExistenceOracle
//! [`TaskStatusGuard`]: domain::TaskStatusGuard
//! [`TaskConsistencyService::update`]: services::TaskConsistencyService::update

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

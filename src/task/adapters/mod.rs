//! Adapter implementations for task ports.

pub mod directory;
pub mod memory;
pub mod postgres;
pub mod remote;

//! Step definitions for task consistency scenarios.

mod then;
pub mod world;

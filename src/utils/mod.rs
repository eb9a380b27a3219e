//! # Utilities Module
//!
//! Graph search helpers shared by generation validation, tests and benchmarks.

pub mod pathfinding;

pub use pathfinding::*;

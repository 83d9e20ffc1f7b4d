//! Subsystems
//!
//! - `acquisition`: interrupt-driven sample acquisition and hand-off

pub mod acquisition;

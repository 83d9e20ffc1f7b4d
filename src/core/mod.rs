//! Core infrastructure
//!
//! Cross-cutting pieces shared by drivers and subsystems.

pub mod logging;

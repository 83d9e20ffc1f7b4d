//! PPG Drivers
//!
//! Optical pulse sensor drivers implementing the `PpgSensor` trait.
//!
//! ## Available Drivers
//!
//! - `max30102`: MAX30102 pulse oximeter / heart-rate sensor

pub mod max30102;

pub use max30102::{Max30102Config, Max30102Driver};

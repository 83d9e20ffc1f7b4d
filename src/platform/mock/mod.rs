//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use pico_ppg::platform::mock::MockI2c;
//! use pico_ppg::platform::traits::I2cInterface;
//!
//! let mut i2c = MockI2c::new();
//! i2c.set_read_data(&[0x15]);
//! let mut id = [0u8; 1];
//! i2c.write_read(0x57, &[0xFF], &mut id).await?;
//! ```

#![cfg(any(test, feature = "mock"))]

mod gpio;
mod i2c;
mod timer;

pub use gpio::MockIntPin;
pub use i2c::{I2cTransaction, MockI2c};
pub use timer::MockTimer;

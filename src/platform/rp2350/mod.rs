//! RP2350 platform implementation for Raspberry Pi Pico 2 W
//!
//! This module provides concrete implementations of the platform abstraction
//! traits for the RP2350 microcontroller using Embassy's `embassy-rp` crate.
//!
//! # Feature Gate
//!
//! This module is only available when the `pico2_w` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! pico_ppg = { version = "0.1", features = ["pico2_w"] }
//! ```

mod gpio;
mod i2c;

pub use gpio::EmbassyIntPin;
pub use i2c::Rp2350I2c;

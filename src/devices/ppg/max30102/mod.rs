//! MAX30102 Pulse Oximeter / Heart-Rate Sensor Driver
//!
//! I2C driver for the Analog Devices (Maxim) MAX30102 optical sensor.
//!
//! ## Features
//!
//! - Part identity check (PART_ID 0x15) and revision readout
//! - Soft reset with bounded completion polling
//! - Fixed register tables for IR-only or IR + red streaming
//! - 32-sample FIFO drained in a single burst per interrupt
//! - 18-bit samples, big-endian 3 bytes per channel
//! - One-shot die temperature
//!
//! ## Usage
//!
//! ```ignore
//! use pico_ppg::devices::ppg::{Max30102Config, Max30102Driver};
//! use pico_ppg::devices::traits::PpgSensor;
//!
//! let mut driver = Max30102Driver::new_initialized(i2c, Max30102Config::default(), &mut delay).await?;
//! let available = driver.available_samples().await;
//! let batch = driver.read_samples(available).await?;
//! ```

mod config;
mod driver;
pub mod registers;

pub use config::{Max30102Config, RegisterWrite, CONFIG_DUAL_CHANNEL, CONFIG_SINGLE_CHANNEL};
pub use driver::{decode_channel, decode_samples, FifoPointers, Max30102Driver};

#![cfg_attr(not(test), no_std)]

//! pico_ppg - Interrupt-driven PPG acquisition for Raspberry Pi Pico 2 W
//!
//! This library provides platform abstraction, the MAX30102 pulse-oximetry
//! driver, and the acquisition pipeline that streams decoded samples from the
//! sensor FIFO to a consumer.

extern crate alloc;

// Platform abstraction layer (bus, interrupt pin, mock and RP2350 bindings)
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Core infrastructure (logging)
pub mod core;

// Subsystems (acquisition pipeline)
pub mod subsystems;

// Note: Logging macros (log_info!, log_warn!, log_error!, log_debug!, log_trace!)
// are exported at crate root via #[macro_export] in core::logging

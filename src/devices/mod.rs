//! Device drivers
//!
//! Drivers are written against the platform abstraction traits, so the same
//! code runs on the RP2350 and against the mock bus in host tests.
//!
//! ## Modules
//!
//! - `ppg`: optical pulse sensor drivers (MAX30102)
//! - `register_bus`: register read/write client over `I2cInterface`
//! - `traits`: device trait definitions (`PpgSensor`)

pub mod ppg;
pub mod register_bus;
pub mod traits;

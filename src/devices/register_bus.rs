//! Register-oriented bus client
//!
//! Thin pass-through over `I2cInterface` for devices that expose 8-bit
//! register offsets behind a fixed 7-bit address. No retries are performed
//! here; every failure is returned to the caller with the register it hit.

use crate::platform::{I2cInterface, PlatformError};
use core::fmt;

/// Bus transaction failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct BusError {
    /// Register offset the transaction addressed
    pub register: u8,
    /// Platform-level cause (NACK, timeout, ...)
    pub cause: PlatformError,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "register {:#04x}: {}", self.register, self.cause)
    }
}

/// Register bus client bound to one device address
pub struct RegisterBus<I> {
    i2c: I,
    address: u8,
}

impl<I: I2cInterface> RegisterBus<I> {
    /// Bind a bus handle to a 7-bit device address
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address this client talks to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Access the underlying bus handle
    pub fn i2c(&mut self) -> &mut I {
        &mut self.i2c
    }

    /// Release the underlying bus handle
    pub fn release(self) -> I {
        self.i2c
    }

    /// Read a single register
    pub async fn read_byte(&mut self, register: u8) -> Result<u8, BusError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .await
            .map_err(|cause| BusError { register, cause })?;
        Ok(buf[0])
    }

    /// Write a single register
    pub async fn write_byte(&mut self, register: u8, value: u8) -> Result<(), BusError> {
        self.i2c
            .write(self.address, &[register, value])
            .await
            .map_err(|cause| BusError { register, cause })
    }

    /// Read `buffer.len()` consecutive bytes starting at `register` in one transaction
    ///
    /// On failure the buffer contents are unspecified.
    pub async fn read_burst(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), BusError> {
        self.i2c
            .write_read(self.address, &[register], buffer)
            .await
            .map_err(|cause| BusError { register, cause })
    }
}

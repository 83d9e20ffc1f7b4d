//! Platform error types
//!
//! Bus implementations map their HAL errors onto these so drivers never see
//! HAL types.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum PlatformError {
    /// I2C transaction failed
    I2c(I2cError),
}

/// I2C transaction failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum I2cError {
    /// Address or data byte not acknowledged (device absent or busy)
    Nack,
    /// Another controller won arbitration
    ArbitrationLost,
    /// Controller aborted the transfer for another reason
    Abort,
    /// Zero-length or oversized transfer buffer
    BufferLength,
    /// Address outside the 7-bit range or reserved
    InvalidAddress,
}

impl fmt::Display for I2cError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            I2cError::Nack => "no acknowledge",
            I2cError::ArbitrationLost => "arbitration lost",
            I2cError::Abort => "transfer aborted",
            I2cError::BufferLength => "invalid buffer length",
            I2cError::InvalidAddress => "invalid address",
        };
        f.write_str(text)
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::I2c(e) => write!(f, "I2C {}", e),
        }
    }
}

impl From<I2cError> for PlatformError {
    fn from(err: I2cError) -> Self {
        PlatformError::I2c(err)
    }
}

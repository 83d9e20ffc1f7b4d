//! Async I2C bus interface
//!
//! Drivers own one implementation of this trait per bus. Each call is one
//! complete bus transaction; implementations never retry. Bus speed is fixed
//! when the platform peripheral is created.

use crate::platform::Result;

/// Async I2C controller
///
/// Addresses are 7-bit. A single owner drives the bus; callers that share a
/// bus serialize access above this layer.
#[allow(async_fn_in_trait)]
pub trait I2cInterface {
    /// START, address (W), `data`, STOP
    async fn write(&mut self, addr: u8, data: &[u8]) -> Result<()>;

    /// Write `write_data`, repeated START, then fill `read_buffer`
    ///
    /// Register reads use this form: the register offset is the single
    /// written byte.
    async fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8])
        -> Result<()>;
}

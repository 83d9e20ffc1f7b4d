//! RP2350 I2C implementation
//!
//! This module provides async I2C support for RP2350 using Embassy's `embassy-rp` crate.
//!
//! # Example
//!
//! ```no_run
//! use pico_ppg::platform::rp2350::Rp2350I2c;
//!
//! embassy_rp::bind_interrupts!(struct Irqs {
//!     I2C0_IRQ => embassy_rp::i2c::InterruptHandler<embassy_rp::peripherals::I2C0>;
//! });
//!
//! #[embassy_executor::main]
//! async fn main(_spawner: embassy_executor::Spawner) {
//!     let p = embassy_rp::init(Default::default());
//!
//!     let mut embassy_config = embassy_rp::i2c::Config::default();
//!     embassy_config.frequency = 400_000;
//!     // GPIO 5 (SCL), GPIO 4 (SDA)
//!     let i2c = embassy_rp::i2c::I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, embassy_config);
//!
//!     let bus = Rp2350I2c::new(i2c);
//! }
//! ```

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::I2cInterface,
    Result,
};
use embassy_rp::i2c::{Async, I2c as EmbassyI2c, Instance};
use embedded_hal_async::i2c::I2c as AsyncI2cTrait;

/// RP2350 I2C implementation using Embassy async I2C
///
/// Wraps the `embassy-rp` I2C peripheral to implement the async `I2cInterface` trait.
///
/// # Type Parameters
///
/// * `T` - I2C peripheral instance (I2C0 or I2C1)
pub struct Rp2350I2c<'d, T: Instance> {
    i2c: EmbassyI2c<'d, T, Async>,
}

impl<'d, T: Instance> Rp2350I2c<'d, T> {
    /// Create a new RP2350 I2C instance
    ///
    /// # Note
    ///
    /// The peripheral must already be initialized with
    /// `embassy_rp::i2c::I2c::new_async`, which fixes the bus speed.
    pub fn new(i2c: EmbassyI2c<'d, T, Async>) -> Self {
        Self { i2c }
    }
}

impl<'d, T: Instance> I2cInterface for Rp2350I2c<'d, T> {
    async fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.i2c.write(addr, data).await.map_err(map_embassy_error)
    }

    async fn write_read(
        &mut self,
        addr: u8,
        write_data: &[u8],
        read_buffer: &mut [u8],
    ) -> Result<()> {
        self.i2c
            .write_read(addr, write_data, read_buffer)
            .await
            .map_err(map_embassy_error)
    }
}

/// Map Embassy I2C errors to platform I2C errors
#[allow(deprecated)]
fn map_embassy_error(error: embassy_rp::i2c::Error) -> PlatformError {
    use embassy_rp::i2c::{AbortReason, Error};

    let kind = match error {
        Error::Abort(AbortReason::NoAcknowledge) => I2cError::Nack,
        Error::Abort(AbortReason::ArbitrationLoss) => I2cError::ArbitrationLost,
        Error::Abort(_) => I2cError::Abort,
        Error::InvalidReadBufferLength | Error::InvalidWriteBufferLength => I2cError::BufferLength,
        Error::AddressOutOfRange(_) | Error::AddressReserved(_) => I2cError::InvalidAddress,
    };
    kind.into()
}

//! PPG Sensor Trait and Data Types
//!
//! Device-independent interface for optical pulse sensors consumed by the
//! acquisition pipeline.
//!
//! ## Usage
//!
//! ```ignore
//! use pico_ppg::devices::traits::PpgSensor;
//!
//! async fn drain<S: PpgSensor>(sensor: &mut S) -> Result<usize, PpgError> {
//!     let available = sensor.available_samples().await;
//!     let batch = sensor.read_samples(available).await?;
//!     Ok(batch.len())
//! }
//! ```

use crate::devices::register_bus::BusError;
use bitflags::bitflags;
use core::fmt;

/// Hardware FIFO depth in samples
pub const FIFO_DEPTH: usize = 32;

/// Mask for one 18-bit channel reading
pub const SAMPLE_MASK: u32 = (1 << 18) - 1;

/// Decoded samples from one FIFO read, bounded by the hardware depth
pub type SampleBatch = heapless::Vec<PpgSample, FIFO_DEPTH>;

/// PPG driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum PpgError {
    /// Bus transaction failed outside a more specific step
    Bus(BusError),

    /// Part-identity register does not hold the expected value
    IdentityMismatch { found: u8, expected: u8 },

    /// Reset bit did not self-clear within the poll bound
    ResetTimeout,

    /// A fixed configuration write failed; later writes were not attempted
    ConfigWriteFailed { register: u8, cause: BusError },

    /// FIFO write/read pointer could not be read
    PointerReadFailed(BusError),

    /// Sample burst read failed; the whole batch is discarded
    BurstReadFailed(BusError),

    /// Interrupt status differs from the expected pattern (advisory)
    UnexpectedInterruptStatus(u8),
}

impl From<BusError> for PpgError {
    fn from(err: BusError) -> Self {
        PpgError::Bus(err)
    }
}

impl fmt::Display for PpgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PpgError::Bus(e) => write!(f, "bus error at {}", e),
            PpgError::IdentityMismatch { found, expected } => write!(
                f,
                "part ID {:#04x}, expected {:#04x}",
                found, expected
            ),
            PpgError::ResetTimeout => write!(f, "reset did not complete"),
            PpgError::ConfigWriteFailed { register, cause } => {
                write!(f, "config write to {:#04x} failed: {}", register, cause.cause)
            }
            PpgError::PointerReadFailed(e) => write!(f, "FIFO pointer read failed at {}", e),
            PpgError::BurstReadFailed(e) => write!(f, "FIFO burst read failed at {}", e),
            PpgError::UnexpectedInterruptStatus(status) => {
                write!(f, "unexpected interrupt status {:#04x}", status)
            }
        }
    }
}

/// Active optical channels per sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum ChannelMode {
    /// IR only
    Single,
    /// IR followed by red in each FIFO slot
    Dual,
}

impl ChannelMode {
    /// Number of 3-byte channel readings per sample
    pub const fn count(self) -> usize {
        match self {
            ChannelMode::Single => 1,
            ChannelMode::Dual => 2,
        }
    }
}

/// One decoded FIFO sample
///
/// Channel values are always masked to 18 bits. `red` is `None` when the
/// sensor runs a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct PpgSample {
    /// Infrared channel
    pub ir: u32,
    /// Red channel (dual-channel configuration only)
    pub red: Option<u32>,
}

impl PpgSample {
    /// Single-channel sample
    pub fn ir_only(ir: u32) -> Self {
        Self {
            ir: ir & SAMPLE_MASK,
            red: None,
        }
    }

    /// Dual-channel sample
    pub fn dual(ir: u32, red: u32) -> Self {
        Self {
            ir: ir & SAMPLE_MASK,
            red: Some(red & SAMPLE_MASK),
        }
    }
}

/// Stream line format: `ir,red` for dual channel, `ir` for single channel
impl fmt::Display for PpgSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.red {
            Some(red) => write!(f, "{},{}", self.ir, red),
            None => write!(f, "{}", self.ir),
        }
    }
}

bitflags! {
    /// Interrupt status register 1 (read-to-clear)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InterruptStatus: u8 {
        /// FIFO almost full
        const A_FULL = 0b1000_0000;
        /// New FIFO data ready
        const PPG_RDY = 0b0100_0000;
        /// Ambient light cancellation overflow
        const ALC_OVF = 0b0010_0000;
        /// Power ready (set after power-up or brownout)
        const PWR_RDY = 0b0000_0001;
    }
}

#[cfg(feature = "pico2_w")]
impl defmt::Format for InterruptStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "InterruptStatus({=u8:#x})", self.bits())
    }
}

/// Device-independent PPG sensor interface
///
/// `interrupt_status` is read-to-clear on real hardware: call it exactly once
/// per interrupt event, after the event.
#[allow(async_fn_in_trait)]
pub trait PpgSensor {
    /// Channel layout of every sample this sensor produces
    fn channel_mode(&self) -> ChannelMode;

    /// Samples waiting in the hardware FIFO
    ///
    /// Pointer read failures are logged and reported as 0 available.
    async fn available_samples(&mut self) -> u8;

    /// Pull and decode `count` samples in one burst
    ///
    /// `count` is clamped to `FIFO_DEPTH`. A zero count performs no bus
    /// transaction.
    async fn read_samples(&mut self, count: u8) -> Result<SampleBatch, PpgError>;

    /// Read (and thereby clear) the interrupt status
    async fn interrupt_status(&mut self) -> Result<InterruptStatus, PpgError>;

    /// One-shot die temperature in °C
    async fn temperature(&mut self) -> Result<f32, PpgError>;
}

//! MAX30102 I2C Driver Implementation
//!
//! Identity check, reset, fixed configuration, and FIFO draining.

use super::config::Max30102Config;
use super::registers::{self, BYTES_PER_CHANNEL, FIFO_PTR_MASK, TEMP_FRAC_STEP};
use crate::devices::register_bus::RegisterBus;
use crate::devices::traits::{
    ChannelMode, InterruptStatus, PpgError, PpgSample, PpgSensor, SampleBatch, FIFO_DEPTH,
    SAMPLE_MASK,
};
use crate::platform::I2cInterface;
use embedded_hal_async::delay::DelayNs;

/// Largest single burst: a full FIFO of dual-channel samples
const MAX_BURST_LEN: usize = FIFO_DEPTH * 2 * BYTES_PER_CHANNEL;

/// Snapshot of the FIFO write/read pointers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct FifoPointers {
    /// Next slot the sensor will write (0..32)
    pub write: u8,
    /// Next slot the host will read (0..32)
    pub read: u8,
}

impl FifoPointers {
    /// Build from raw register values, keeping the low 5 bits
    pub fn new(write: u8, read: u8) -> Self {
        Self {
            write: write & FIFO_PTR_MASK,
            read: read & FIFO_PTR_MASK,
        }
    }

    /// Unread samples between the pointers
    ///
    /// Equal pointers mean an empty FIFO; a full FIFO is indistinguishable
    /// from empty at this level.
    pub fn available(&self) -> u8 {
        let depth = FIFO_DEPTH as u8;
        (self.write + depth - self.read) % depth
    }
}

/// Decode one big-endian 3-byte channel reading to 18 bits
pub fn decode_channel(bytes: &[u8; BYTES_PER_CHANNEL]) -> u32 {
    let [high, mid, low] = *bytes;
    let raw = (u32::from(high) << 16) | (u32::from(mid) << 8) | u32::from(low);
    raw & SAMPLE_MASK
}

/// Decode a FIFO burst into samples, oldest first
///
/// Trailing bytes that do not form a whole sample are ignored.
pub fn decode_samples(raw: &[u8], channels: ChannelMode) -> SampleBatch {
    let stride = channels.count() * BYTES_PER_CHANNEL;
    let mut batch = SampleBatch::new();

    for chunk in raw.chunks_exact(stride) {
        // Slot order within a sample: IR, then red
        let mut readings = chunk
            .chunks_exact(BYTES_PER_CHANNEL)
            .filter_map(|bytes| <&[u8; BYTES_PER_CHANNEL]>::try_from(bytes).ok())
            .map(decode_channel);
        let sample = match (channels, readings.next(), readings.next()) {
            (ChannelMode::Single, Some(ir), _) => PpgSample::ir_only(ir),
            (ChannelMode::Dual, Some(ir), Some(red)) => PpgSample::dual(ir, red),
            _ => break,
        };
        if batch.push(sample).is_err() {
            break;
        }
    }

    batch
}

/// MAX30102 I2C Driver
///
/// Implements `PpgSensor`. The driver owns its bus handle; callers that need
/// shared access wrap the driver in a mutex.
pub struct Max30102Driver<I> {
    /// Register-level bus client
    bus: RegisterBus<I>,

    /// Driver configuration
    config: Max30102Config,

    /// Revision ID read during initialization
    revision: Option<u8>,

    /// Initialization complete flag
    initialized: bool,
}

impl<I: I2cInterface> Max30102Driver<I> {
    /// Create an uninitialized driver
    ///
    /// No bus traffic happens until `initialize` is called.
    pub fn new(i2c: I, config: Max30102Config) -> Self {
        Self {
            bus: RegisterBus::new(i2c, config.i2c_address),
            config,
            revision: None,
            initialized: false,
        }
    }

    /// Create and initialize a driver
    pub async fn new_initialized<D: DelayNs>(
        i2c: I,
        config: Max30102Config,
        delay: &mut D,
    ) -> Result<Self, PpgError> {
        let mut driver = Self::new(i2c, config);
        driver.initialize(delay).await?;
        Ok(driver)
    }

    /// Driver configuration
    pub fn config(&self) -> &Max30102Config {
        &self.config
    }

    /// Whether `initialize` completed successfully
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Revision ID cached by `initialize`
    pub fn revision(&self) -> Option<u8> {
        self.revision
    }

    /// Access the underlying bus handle
    pub fn i2c(&mut self) -> &mut I {
        self.bus.i2c()
    }

    /// Release the underlying bus handle
    pub fn release(self) -> I {
        self.bus.release()
    }

    /// Read the PART_ID register
    pub async fn part_id(&mut self) -> Result<u8, PpgError> {
        Ok(self.bus.read_byte(registers::PART_ID).await?)
    }

    /// Read the REV_ID register
    pub async fn revision_id(&mut self) -> Result<u8, PpgError> {
        Ok(self.bus.read_byte(registers::REV_ID).await?)
    }

    /// Bring the sensor from power-on to streaming
    ///
    /// Any failure leaves the sensor unconfigured and the driver marked
    /// uninitialized.
    pub async fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PpgError> {
        self.initialized = false;
        crate::log_info!("MAX30102 init at address {:#x}", self.bus.address());

        // Step 1: Verify part identity
        let part_id = self.part_id().await?;
        if part_id != registers::PART_ID_VALUE {
            crate::log_error!(
                "MAX30102 part ID mismatch: {:#x} (expected {:#x})",
                part_id,
                registers::PART_ID_VALUE
            );
            return Err(PpgError::IdentityMismatch {
                found: part_id,
                expected: registers::PART_ID_VALUE,
            });
        }

        // Revision is informational; a failed read does not stop init
        self.revision = match self.revision_id().await {
            Ok(revision) => {
                crate::log_info!("MAX30102 detected (part {:#x}, rev {:#x})", part_id, revision);
                Some(revision)
            }
            Err(_) => {
                crate::log_warn!("MAX30102 detected (part {:#x}), revision unreadable", part_id);
                None
            }
        };

        // Step 2: Soft reset
        self.bus
            .write_byte(registers::MODE_CONFIG, registers::MODE_RESET)
            .await?;
        self.wait_for_reset(delay).await?;

        // Step 3: Apply fixed configuration
        self.apply_config().await?;

        self.initialized = true;
        crate::log_info!(
            "MAX30102 configured ({} register writes)",
            self.config.registers.len()
        );
        Ok(())
    }

    async fn wait_for_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PpgError> {
        for attempt in 0..self.config.reset_poll_attempts {
            let mode = self.bus.read_byte(registers::MODE_CONFIG).await?;
            if mode & registers::MODE_RESET == 0 {
                crate::log_debug!("MAX30102 reset cleared after {} polls", attempt + 1);
                return Ok(());
            }
            delay.delay_us(self.config.reset_poll_interval_us).await;
        }

        crate::log_error!(
            "MAX30102 reset still pending after {} polls",
            self.config.reset_poll_attempts
        );
        Err(PpgError::ResetTimeout)
    }

    async fn apply_config(&mut self) -> Result<(), PpgError> {
        for write in self.config.registers {
            crate::log_debug!(
                "write_reg {}({:#x}) = {:#x}",
                registers::register_name(write.register),
                write.register,
                write.value
            );
            if let Err(cause) = self.bus.write_byte(write.register, write.value).await {
                crate::log_error!("MAX30102 config write to {:#x} failed", write.register);
                return Err(PpgError::ConfigWriteFailed {
                    register: write.register,
                    cause,
                });
            }
        }
        Ok(())
    }

    /// Read both FIFO pointers
    pub async fn fifo_pointers(&mut self) -> Result<FifoPointers, PpgError> {
        let write = self
            .bus
            .read_byte(registers::FIFO_WR_PTR)
            .await
            .map_err(PpgError::PointerReadFailed)?;
        let read = self
            .bus
            .read_byte(registers::FIFO_RD_PTR)
            .await
            .map_err(PpgError::PointerReadFailed)?;
        Ok(FifoPointers::new(write, read))
    }
}

impl<I: I2cInterface> PpgSensor for Max30102Driver<I> {
    fn channel_mode(&self) -> ChannelMode {
        self.config.channels
    }

    async fn available_samples(&mut self) -> u8 {
        match self.fifo_pointers().await {
            Ok(pointers) => {
                crate::log_trace!(
                    "FIFO wr={} rd={} available={}",
                    pointers.write,
                    pointers.read,
                    pointers.available()
                );
                pointers.available()
            }
            Err(_) => {
                crate::log_error!("Failed to read FIFO pointers");
                0
            }
        }
    }

    async fn read_samples(&mut self, count: u8) -> Result<SampleBatch, PpgError> {
        let count = usize::from(count).min(FIFO_DEPTH);
        if count == 0 {
            return Ok(SampleBatch::new());
        }

        let channels = self.config.channels;
        let len = count * channels.count() * BYTES_PER_CHANNEL;
        let mut buffer = [0u8; MAX_BURST_LEN];

        if let Err(cause) = self
            .bus
            .read_burst(registers::FIFO_DATA, &mut buffer[..len])
            .await
        {
            crate::log_error!("FIFO burst read of {} bytes failed", len);
            return Err(PpgError::BurstReadFailed(cause));
        }

        Ok(decode_samples(&buffer[..len], channels))
    }

    async fn interrupt_status(&mut self) -> Result<InterruptStatus, PpgError> {
        let raw = self.bus.read_byte(registers::INT_STATUS_1).await?;
        Ok(InterruptStatus::from_bits_retain(raw))
    }

    async fn temperature(&mut self) -> Result<f32, PpgError> {
        let integer = self.bus.read_byte(registers::DIE_TEMP_INT).await? as i8;
        let fraction = self.bus.read_byte(registers::DIE_TEMP_FRAC).await?;

        // Re-arm for the next call
        self.bus
            .write_byte(registers::DIE_TEMP_CONFIG, registers::TEMP_EN)
            .await?;

        Ok(f32::from(integer) + f32::from(fraction) * TEMP_FRAC_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::register_bus::BusError;
    use crate::platform::error::I2cError;
    use crate::platform::mock::{I2cTransaction, MockI2c, MockTimer};
    use crate::platform::PlatformError;

    const ADDR: u8 = 0x57;

    fn driver(config: Max30102Config) -> Max30102Driver<MockI2c> {
        Max30102Driver::new(MockI2c::new(), config)
    }

    fn writes(transactions: &[I2cTransaction]) -> Vec<(u8, u8)> {
        transactions
            .iter()
            .filter_map(|t| match t {
                I2cTransaction::Write { data, .. } => Some((data[0], data[1])),
                _ => None,
            })
            .collect()
    }

    fn nack(register: u8) -> BusError {
        BusError {
            register,
            cause: PlatformError::I2c(I2cError::Nack),
        }
    }

    #[test]
    fn test_decode_channel_masks_to_18_bits() {
        assert_eq!(decode_channel(&[0x00, 0x00, 0x01]), 1);
        assert_eq!(decode_channel(&[0x01, 0x02, 0x03]), 0x01_0203);
        assert_eq!(decode_channel(&[0xFF, 0xFF, 0xFF]), 0x3_FFFF);
        assert_eq!(decode_channel(&[0xFC, 0x12, 0x34]), 0x1234);
    }

    #[test]
    fn test_fifo_pointer_wraparound() {
        assert_eq!(FifoPointers::new(2, 30).available(), 4);
        assert_eq!(FifoPointers::new(10, 3).available(), 7);
        assert_eq!(FifoPointers::new(5, 5).available(), 0);
        assert_eq!(FifoPointers::new(0, 31).available(), 1);
        // Upper bits are not part of the pointer
        assert_eq!(FifoPointers::new(0xE2, 0x1E).available(), 4);
    }

    #[test]
    fn test_decode_samples_dual_order() {
        let raw = [0, 0, 1, 0, 0, 2, 0, 0, 3, 0, 0, 4, 0xFF];
        let batch = decode_samples(&raw, ChannelMode::Dual);
        assert_eq!(
            batch.as_slice(),
            &[PpgSample::dual(1, 2), PpgSample::dual(3, 4)]
        );
    }

    #[test]
    fn test_decode_samples_short_burst_yields_nothing() {
        assert!(decode_samples(&[0x01, 0x02], ChannelMode::Single).is_empty());
        assert!(decode_samples(&[0, 0, 1, 0, 0], ChannelMode::Dual).is_empty());
        assert_eq!(
            decode_samples(&[0, 0, 7, 0xAA], ChannelMode::Single).as_slice(),
            &[PpgSample::ir_only(7)]
        );
    }

    #[tokio::test]
    async fn test_initialize_sequence() {
        let mut drv = driver(Max30102Config::default());
        // PART_ID, REV_ID, MODE_CONFIG (reset already clear)
        drv.i2c().set_read_data(&[0x15, 0x03, 0x00]);
        let mut delay = MockTimer::new();

        drv.initialize(&mut delay).await.unwrap();

        assert!(drv.is_initialized());
        assert_eq!(drv.revision(), Some(0x03));
        assert_eq!(delay.delay_count(), 0);

        let transactions = drv.i2c().transactions();
        assert_eq!(
            transactions[0],
            I2cTransaction::WriteRead {
                addr: ADDR,
                write_data: vec![0xFF],
                read_len: 1
            }
        );
        assert_eq!(
            writes(&transactions),
            vec![
                (0x09, 0x40),
                (0x02, 0x80),
                (0x03, 0x00),
                (0x08, 0x5F),
                (0x09, 0x02),
                (0x0A, 0x77),
                (0x0C, 0x7F),
                (0x0D, 0x7F),
                (0x11, 0x02),
                (0x12, 0x00),
            ]
        );
    }

    #[tokio::test]
    async fn test_initialize_survives_revision_read_failure() {
        let mut drv = driver(Max30102Config::default());
        // PART_ID, MODE_CONFIG; the failed REV_ID read consumes nothing
        drv.i2c().set_read_data(&[0x15, 0x00]);
        drv.i2c().fail_reads_of(0xFE);
        let mut delay = MockTimer::new();

        drv.initialize(&mut delay).await.unwrap();

        assert!(drv.is_initialized());
        assert_eq!(drv.revision(), None);
        let transactions = drv.i2c().transactions();
        assert_eq!(writes(&transactions).len(), 10);
        assert_eq!(writes(&transactions)[0], (0x09, 0x40));
    }

    #[tokio::test]
    async fn test_initialize_identity_mismatch_performs_no_writes() {
        let mut drv = driver(Max30102Config::default());
        drv.i2c().set_read_data(&[0x11]);
        let mut delay = MockTimer::new();

        let err = drv.initialize(&mut delay).await.unwrap_err();

        assert_eq!(
            err,
            PpgError::IdentityMismatch {
                found: 0x11,
                expected: 0x15
            }
        );
        assert!(!drv.is_initialized());
        assert!(writes(&drv.i2c().transactions()).is_empty());
    }

    #[tokio::test]
    async fn test_initialize_unreachable_device() {
        let mut drv = driver(Max30102Config::default());
        drv.i2c().fail_reads_of(0xFF);
        let mut delay = MockTimer::new();

        let err = drv.initialize(&mut delay).await.unwrap_err();
        assert_eq!(err, PpgError::Bus(nack(0xFF)));
    }

    #[tokio::test]
    async fn test_initialize_polls_until_reset_clears() {
        let mut drv = driver(Max30102Config::default());
        drv.i2c().set_read_data(&[0x15, 0x00, 0x40, 0x40, 0x00]);
        let mut delay = MockTimer::new();

        drv.initialize(&mut delay).await.unwrap();

        assert_eq!(delay.delay_count(), 2);
        assert_eq!(delay.now_us(), 2_000);
    }

    #[tokio::test]
    async fn test_initialize_reset_timeout() {
        let config = Max30102Config {
            reset_poll_attempts: 3,
            ..Max30102Config::default()
        };
        let mut drv = driver(config);
        drv.i2c().set_read_data(&[0x15, 0x00, 0x40, 0x40, 0x40]);
        let mut delay = MockTimer::new();

        let err = drv.initialize(&mut delay).await.unwrap_err();

        assert_eq!(err, PpgError::ResetTimeout);
        // Only the reset write went out
        assert_eq!(writes(&drv.i2c().transactions()), vec![(0x09, 0x40)]);
    }

    #[tokio::test]
    async fn test_initialize_aborts_at_failed_config_write() {
        let mut drv = driver(Max30102Config::default());
        drv.i2c().set_read_data(&[0x15, 0x00, 0x00]);
        // Write 0 is the reset; write 4 is the fourth table entry (MODE_CONFIG)
        drv.i2c().fail_write_at(4);
        let mut delay = MockTimer::new();

        let err = drv.initialize(&mut delay).await.unwrap_err();

        assert_eq!(
            err,
            PpgError::ConfigWriteFailed {
                register: 0x09,
                cause: nack(0x09)
            }
        );
        assert!(!drv.is_initialized());
        assert_eq!(
            writes(&drv.i2c().transactions()),
            vec![(0x09, 0x40), (0x02, 0x80), (0x03, 0x00), (0x08, 0x5F), (0x09, 0x02)]
        );
    }

    #[tokio::test]
    async fn test_dual_channel_config_is_applied() {
        let mut drv = driver(Max30102Config::dual_channel());
        drv.i2c().set_read_data(&[0x15, 0x00, 0x00]);
        let mut delay = MockTimer::new();

        drv.initialize(&mut delay).await.unwrap();

        let written = writes(&drv.i2c().transactions());
        assert!(written.contains(&(0x09, 0x07)));
        assert!(written.contains(&(0x11, 0x12)));
        assert_eq!(drv.channel_mode(), ChannelMode::Dual);
    }

    #[tokio::test]
    async fn test_available_samples_reads_both_pointers() {
        let mut drv = driver(Max30102Config::default());
        drv.i2c().set_read_data(&[2, 30]);

        assert_eq!(drv.available_samples().await, 4);
        assert_eq!(
            drv.i2c().transactions(),
            vec![
                I2cTransaction::WriteRead {
                    addr: ADDR,
                    write_data: vec![0x04],
                    read_len: 1
                },
                I2cTransaction::WriteRead {
                    addr: ADDR,
                    write_data: vec![0x06],
                    read_len: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_available_samples_pointer_failure_reports_zero() {
        let mut drv = driver(Max30102Config::default());
        drv.i2c().fail_reads_of(0x04);

        assert_eq!(drv.available_samples().await, 0);
        assert_eq!(
            drv.fifo_pointers().await,
            Err(PpgError::PointerReadFailed(nack(0x04)))
        );
    }

    #[tokio::test]
    async fn test_read_samples_single_burst_in_order() {
        let mut drv = driver(Max30102Config::default());
        drv.i2c().set_read_data(&[0, 0, 1, 0, 0, 2, 0, 0, 3]);

        let batch = drv.read_samples(3).await.unwrap();

        assert_eq!(
            batch.as_slice(),
            &[
                PpgSample::ir_only(1),
                PpgSample::ir_only(2),
                PpgSample::ir_only(3)
            ]
        );
        assert_eq!(
            drv.i2c().transactions(),
            vec![I2cTransaction::WriteRead {
                addr: ADDR,
                write_data: vec![0x07],
                read_len: 9
            }]
        );
    }

    #[tokio::test]
    async fn test_read_samples_zero_count_no_transaction() {
        let mut drv = driver(Max30102Config::default());

        let batch = drv.read_samples(0).await.unwrap();

        assert!(batch.is_empty());
        assert!(drv.i2c().transactions().is_empty());
    }

    #[tokio::test]
    async fn test_read_samples_clamps_to_fifo_depth() {
        let mut drv = driver(Max30102Config::dual_channel());

        let batch = drv.read_samples(40).await.unwrap();

        assert_eq!(batch.len(), FIFO_DEPTH);
        assert_eq!(
            drv.i2c().transactions(),
            vec![I2cTransaction::WriteRead {
                addr: ADDR,
                write_data: vec![0x07],
                read_len: 192
            }]
        );
    }

    #[tokio::test]
    async fn test_read_samples_burst_failure_yields_nothing() {
        let mut drv = driver(Max30102Config::default());
        drv.i2c().fail_reads_of(0x07);
        drv.i2c().set_read_data(&[0, 0, 1, 0, 0, 2]);

        let result = drv.read_samples(2).await;

        assert_eq!(result, Err(PpgError::BurstReadFailed(nack(0x07))));
        assert_eq!(drv.i2c().pending_read_bytes(), 6);
    }

    #[tokio::test]
    async fn test_interrupt_status() {
        let mut drv = driver(Max30102Config::default());
        drv.i2c().set_read_data(&[0x80]);

        let status = drv.interrupt_status().await.unwrap();

        assert_eq!(status, InterruptStatus::A_FULL);
        assert_eq!(
            drv.i2c().transactions(),
            vec![I2cTransaction::WriteRead {
                addr: ADDR,
                write_data: vec![0x00],
                read_len: 1
            }]
        );
    }

    #[tokio::test]
    async fn test_temperature_reads_then_rearms() {
        let mut drv = driver(Max30102Config::default());
        // 25 + 4 * 0.0625
        drv.i2c().set_read_data(&[25, 4]);

        let temp = drv.temperature().await.unwrap();

        assert!((temp - 25.25).abs() < 1e-6);
        assert_eq!(writes(&drv.i2c().transactions()), vec![(0x21, 0x01)]);
    }

    #[tokio::test]
    async fn test_temperature_negative_integer_part() {
        let mut drv = driver(Max30102Config::default());
        // -2 + 8 * 0.0625
        drv.i2c().set_read_data(&[0xFE, 8]);

        let temp = drv.temperature().await.unwrap();

        assert!((temp - (-1.5)).abs() < 1e-6);
    }
}

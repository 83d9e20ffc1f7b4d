//! MAX30102 Configuration
//!
//! Fixed register tables applied after reset, plus driver-level settings.

use super::registers;
use crate::devices::traits::ChannelMode;

/// One register write of a fixed configuration table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct RegisterWrite {
    pub register: u8,
    pub value: u8,
}

impl RegisterWrite {
    pub const fn new(register: u8, value: u8) -> Self {
        Self { register, value }
    }
}

const FIFO_CONFIG_VALUE: u8 =
    registers::FIFO_SMP_AVE_4 | registers::FIFO_ROLLOVER_EN | registers::FIFO_A_FULL_MASK;

const SPO2_CONFIG_VALUE: u8 =
    registers::SPO2_ADC_RGE_16384 | registers::SPO2_SR_1000 | registers::SPO2_LED_PW_411;

/// IR-only streaming: almost-full interrupt, heart-rate mode, slot 1 = IR
pub const CONFIG_SINGLE_CHANNEL: [RegisterWrite; 9] = [
    RegisterWrite::new(registers::INT_ENABLE_1, registers::INT_A_FULL_EN),
    RegisterWrite::new(registers::INT_ENABLE_2, 0x00),
    RegisterWrite::new(registers::FIFO_CONFIG, FIFO_CONFIG_VALUE),
    RegisterWrite::new(registers::MODE_CONFIG, registers::MODE_HEART_RATE),
    RegisterWrite::new(registers::SPO2_CONFIG, SPO2_CONFIG_VALUE),
    RegisterWrite::new(registers::LED1_PA, registers::LED_PA_25MA),
    RegisterWrite::new(registers::LED2_PA, registers::LED_PA_25MA),
    RegisterWrite::new(registers::MULTI_LED_CTRL_1, registers::SLOT_IR),
    RegisterWrite::new(registers::MULTI_LED_CTRL_2, 0x00),
];

/// IR + red streaming: multi-LED mode, slot 1 = IR, slot 2 = red
pub const CONFIG_DUAL_CHANNEL: [RegisterWrite; 9] = [
    RegisterWrite::new(registers::INT_ENABLE_1, registers::INT_A_FULL_EN),
    RegisterWrite::new(registers::INT_ENABLE_2, 0x00),
    RegisterWrite::new(registers::FIFO_CONFIG, FIFO_CONFIG_VALUE),
    RegisterWrite::new(registers::MODE_CONFIG, registers::MODE_MULTI_LED),
    RegisterWrite::new(registers::SPO2_CONFIG, SPO2_CONFIG_VALUE),
    RegisterWrite::new(registers::LED1_PA, registers::LED_PA_25MA),
    RegisterWrite::new(registers::LED2_PA, registers::LED_PA_25MA),
    RegisterWrite::new(
        registers::MULTI_LED_CTRL_1,
        registers::SLOT_IR | (registers::SLOT_RED << registers::SLOT_HIGH_SHIFT),
    ),
    RegisterWrite::new(registers::MULTI_LED_CTRL_2, 0x00),
];

/// MAX30102 driver configuration
#[derive(Debug, Clone, Copy)]
pub struct Max30102Config {
    /// I2C address (fixed at 0x57 on this part)
    pub i2c_address: u8,

    /// Channel layout; must match what `registers` programs
    pub channels: ChannelMode,

    /// Register writes applied in order after reset
    pub registers: &'static [RegisterWrite],

    /// Maximum MODE_CONFIG reads while waiting for reset to self-clear
    pub reset_poll_attempts: u16,

    /// Delay between reset polls in microseconds
    pub reset_poll_interval_us: u32,
}

impl Max30102Config {
    /// IR-only configuration
    pub const fn single_channel() -> Self {
        Self {
            i2c_address: registers::MAX30102_ADDR,
            channels: ChannelMode::Single,
            registers: &CONFIG_SINGLE_CHANNEL,
            reset_poll_attempts: 100,
            reset_poll_interval_us: 1_000,
        }
    }

    /// IR + red configuration
    pub const fn dual_channel() -> Self {
        Self {
            channels: ChannelMode::Dual,
            registers: &CONFIG_DUAL_CHANNEL,
            ..Self::single_channel()
        }
    }
}

impl Default for Max30102Config {
    fn default() -> Self {
        Self::single_channel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(table: &[RegisterWrite]) -> Vec<(u8, u8)> {
        table.iter().map(|w| (w.register, w.value)).collect()
    }

    #[test]
    fn test_single_channel_table_values() {
        assert_eq!(
            pairs(&CONFIG_SINGLE_CHANNEL),
            vec![
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

    #[test]
    fn test_dual_channel_table_differs_in_mode_and_slots() {
        let single = pairs(&CONFIG_SINGLE_CHANNEL);
        let dual = pairs(&CONFIG_DUAL_CHANNEL);

        let differing: Vec<_> = single
            .iter()
            .zip(dual.iter())
            .filter(|(s, d)| s != d)
            .map(|(_, d)| *d)
            .collect();
        assert_eq!(differing, vec![(0x09, 0x07), (0x11, 0x12)]);
    }

    #[test]
    fn test_default_config() {
        let config = Max30102Config::default();
        assert_eq!(config.i2c_address, 0x57);
        assert_eq!(config.channels, ChannelMode::Single);
        assert_eq!(config.registers.len(), 9);
        assert_eq!(config.reset_poll_attempts, 100);

        let dual = Max30102Config::dual_channel();
        assert_eq!(dual.channels, ChannelMode::Dual);
        assert_eq!(dual.i2c_address, 0x57);
    }
}

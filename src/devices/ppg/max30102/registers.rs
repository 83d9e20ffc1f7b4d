//! MAX30102 Register Definitions
//!
//! Based on the MAX30102 datasheet (19-7740 Rev 1).

#![allow(dead_code)]

// ============================================================================
// I2C Address and Identity
// ============================================================================

/// Fixed 7-bit I2C address
pub const MAX30102_ADDR: u8 = 0x57;

/// Expected PART_ID value
pub const PART_ID_VALUE: u8 = 0x15;

// ============================================================================
// Status Registers
// ============================================================================

/// Interrupt status 1 (read-to-clear)
pub const INT_STATUS_1: u8 = 0x00;

/// Interrupt status 2 (die temperature ready)
pub const INT_STATUS_2: u8 = 0x01;

/// Interrupt enable 1
pub const INT_ENABLE_1: u8 = 0x02;

/// Interrupt enable 2
pub const INT_ENABLE_2: u8 = 0x03;

// ============================================================================
// FIFO Registers
// ============================================================================

/// FIFO write pointer (5 bits)
pub const FIFO_WR_PTR: u8 = 0x04;

/// FIFO overflow counter
pub const OVF_COUNTER: u8 = 0x05;

/// FIFO read pointer (5 bits)
pub const FIFO_RD_PTR: u8 = 0x06;

/// FIFO data; reads auto-increment the read pointer
pub const FIFO_DATA: u8 = 0x07;

// ============================================================================
// Configuration Registers
// ============================================================================

/// FIFO configuration (averaging, rollover, almost-full threshold)
pub const FIFO_CONFIG: u8 = 0x08;

/// Mode configuration (shutdown, reset, mode)
pub const MODE_CONFIG: u8 = 0x09;

/// SpO2 configuration (ADC range, sample rate, pulse width)
pub const SPO2_CONFIG: u8 = 0x0A;

/// LED pulse amplitude, LED1 (red)
pub const LED1_PA: u8 = 0x0C;

/// LED pulse amplitude, LED2 (IR)
pub const LED2_PA: u8 = 0x0D;

/// Multi-LED mode control, slots 1 and 2
pub const MULTI_LED_CTRL_1: u8 = 0x11;

/// Multi-LED mode control, slots 3 and 4
pub const MULTI_LED_CTRL_2: u8 = 0x12;

// ============================================================================
// Die Temperature
// ============================================================================

/// Die temperature integer part (two's complement)
pub const DIE_TEMP_INT: u8 = 0x1F;

/// Die temperature fraction (0.0625 °C steps)
pub const DIE_TEMP_FRAC: u8 = 0x20;

/// Die temperature config; writing TEMP_EN starts one conversion
pub const DIE_TEMP_CONFIG: u8 = 0x21;

// ============================================================================
// Part Identification
// ============================================================================

/// Revision ID
pub const REV_ID: u8 = 0xFE;

/// Part ID
pub const PART_ID: u8 = 0xFF;

// ============================================================================
// Register Bit Values
// ============================================================================

/// INT_ENABLE_1: FIFO almost-full interrupt
pub const INT_A_FULL_EN: u8 = 0x80;

/// FIFO_CONFIG: SMP_AVE field position
pub const FIFO_SMP_AVE_SHIFT: u8 = 5;

/// FIFO_CONFIG: 4-sample averaging
pub const FIFO_SMP_AVE_4: u8 = 0b010 << FIFO_SMP_AVE_SHIFT;

/// FIFO_CONFIG: roll over when full
pub const FIFO_ROLLOVER_EN: u8 = 0x10;

/// FIFO_CONFIG: almost-full threshold field (free slots left at interrupt)
pub const FIFO_A_FULL_MASK: u8 = 0x0F;

/// MODE_CONFIG: shutdown
pub const MODE_SHDN: u8 = 0x80;

/// MODE_CONFIG: reset (self-clearing)
pub const MODE_RESET: u8 = 0x40;

/// MODE_CONFIG: single LED
pub const MODE_HEART_RATE: u8 = 0x02;

/// MODE_CONFIG: red and IR
pub const MODE_SPO2: u8 = 0x03;

/// MODE_CONFIG: slot-programmed LEDs
pub const MODE_MULTI_LED: u8 = 0x07;

/// SPO2_CONFIG: 16384 nA full scale
pub const SPO2_ADC_RGE_16384: u8 = 0b11 << 5;

/// SPO2_CONFIG: 1000 samples per second
pub const SPO2_SR_1000: u8 = 0b101 << 2;

/// SPO2_CONFIG: 411 µs pulse width (18-bit resolution)
pub const SPO2_LED_PW_411: u8 = 0b11;

/// LED pulse amplitude of roughly 25.4 mA
pub const LED_PA_25MA: u8 = 0x7F;

/// Multi-LED slot source: LED1 (red)
pub const SLOT_RED: u8 = 0b001;

/// Multi-LED slot source: LED2 (IR)
pub const SLOT_IR: u8 = 0b010;

/// Multi-LED slot: second slot of the register
pub const SLOT_HIGH_SHIFT: u8 = 4;

/// DIE_TEMP_CONFIG: start conversion
pub const TEMP_EN: u8 = 0x01;

/// FIFO pointer width
pub const FIFO_PTR_MASK: u8 = 0x1F;

/// Bytes per channel reading in the FIFO
pub const BYTES_PER_CHANNEL: usize = 3;

/// Die temperature fraction step in °C
pub const TEMP_FRAC_STEP: f32 = 0.0625;

/// Human-readable register name for debug logs
pub fn register_name(register: u8) -> &'static str {
    match register {
        INT_STATUS_1 => "INT_STATUS_1",
        INT_STATUS_2 => "INT_STATUS_2",
        INT_ENABLE_1 => "INT_ENABLE_1",
        INT_ENABLE_2 => "INT_ENABLE_2",
        FIFO_WR_PTR => "FIFO_WR_PTR",
        OVF_COUNTER => "OVF_COUNTER",
        FIFO_RD_PTR => "FIFO_RD_PTR",
        FIFO_DATA => "FIFO_DATA",
        FIFO_CONFIG => "FIFO_CONFIG",
        MODE_CONFIG => "MODE_CONFIG",
        SPO2_CONFIG => "SPO2_CONFIG",
        LED1_PA => "LED1_PA",
        LED2_PA => "LED2_PA",
        MULTI_LED_CTRL_1 => "MULTI_LED_CTRL_1",
        MULTI_LED_CTRL_2 => "MULTI_LED_CTRL_2",
        DIE_TEMP_INT => "DIE_TEMP_INT",
        DIE_TEMP_FRAC => "DIE_TEMP_FRAC",
        DIE_TEMP_CONFIG => "DIE_TEMP_CONFIG",
        REV_ID => "REV_ID",
        PART_ID => "PART_ID",
        _ => "UNKNOWN",
    }
}

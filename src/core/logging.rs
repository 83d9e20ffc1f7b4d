//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (pico2_w): Uses defmt over RTT
//! - Host tests: Uses println!
//! - Host non-test: No-op that still type-checks and consumes its arguments
//!
//! The sample stream never goes through these macros. Diagnostics stay on
//! RTT; the consumer loop owns the USB console (see `subsystems::acquisition`).

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), test))]
        println!("[INFO] {}", format!($($arg)*));

        #[cfg(all(not(feature = "pico2_w"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), test))]
        println!("[WARN] {}", format!($($arg)*));

        #[cfg(all(not(feature = "pico2_w"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), test))]
        eprintln!("[ERROR] {}", format!($($arg)*));

        #[cfg(all(not(feature = "pico2_w"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), test))]
        println!("[DEBUG] {}", format!($($arg)*));

        #[cfg(all(not(feature = "pico2_w"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), test))]
        println!("[TRACE] {}", format!($($arg)*));

        #[cfg(all(not(feature = "pico2_w"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_log_macros_accept_format_args() {
        let register = 0x09u8;
        let value = 0x40u8;
        crate::log_info!("info {}", 1);
        crate::log_warn!("unexpected status: {:#x}", value);
        crate::log_error!("write to {:#x} failed", register);
        crate::log_debug!("write_reg {}({:#x}) = {:#x}", "MODE_CONFIG", register, value);
        crate::log_trace!("cycle {}", 7u32);
    }
}

//! GPIO interrupt line abstraction
//!
//! The sensor signals "FIFO needs service" by pulling its open-drain INT line
//! low. The pin is configured as a pulled-up input and only the falling edge
//! matters.

/// Trait for an interrupt input pin with async edge detection
///
/// Implementations should wait for the falling edge asynchronously. On RP2350
/// the wait is backed by the GPIO bank interrupt, so awaiting this future is
/// the interrupt handler from the application's point of view.
#[allow(async_fn_in_trait)]
pub trait IntPin {
    /// Wait for falling edge (data ready signal)
    async fn wait_for_falling_edge(&mut self);
}

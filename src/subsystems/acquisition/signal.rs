//! Readiness signalling between the interrupt line and the reader task
//!
//! Both primitives wrap an embassy `Signal`, which holds at most one pending
//! value: repeated notifications before the waiter runs coalesce into one.

use crate::platform::IntPin;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;

/// Why the reader woke up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum WakeCause {
    /// Data-ready was signalled
    Interrupt,
    /// The bounded wait expired first
    Timeout,
}

/// Capacity-one "FIFO data ready" notification
pub struct DataReady<M: RawMutex> {
    signal: Signal<M, ()>,
}

impl<M: RawMutex> DataReady<M> {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Mark data ready; a pending notification absorbs this one
    pub fn notify(&self) {
        self.signal.signal(());
    }

    /// Whether a notification is waiting to be consumed
    pub fn is_pending(&self) -> bool {
        self.signal.signaled()
    }

    /// Wait for a notification or until `timeout_ms` elapses
    ///
    /// A notification that wins the race is consumed.
    pub async fn wait_timeout<D: DelayNs>(&self, delay: &mut D, timeout_ms: u32) -> WakeCause {
        match select(self.signal.wait(), delay.delay_ms(timeout_ms)).await {
            Either::First(()) => WakeCause::Interrupt,
            Either::Second(()) => WakeCause::Timeout,
        }
    }
}

impl<M: RawMutex> Default for DataReady<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot gate held closed until the sensor is initialized and the
/// interrupt line is attached
pub struct StartupGate<M: RawMutex> {
    signal: Signal<M, ()>,
}

impl<M: RawMutex> StartupGate<M> {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Release the waiter
    pub fn open(&self) {
        self.signal.signal(());
    }

    pub fn is_open(&self) -> bool {
        self.signal.signaled()
    }

    /// Block until `open` has been called
    pub async fn wait_open(&self) {
        self.signal.wait().await;
    }
}

impl<M: RawMutex> Default for StartupGate<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward one falling edge on the interrupt line to `ready`
pub async fn service_edge<P: IntPin, M: RawMutex>(pin: &mut P, ready: &DataReady<M>) {
    pin.wait_for_falling_edge().await;
    ready.notify();
}

/// Interrupt watcher loop
///
/// Does no bus I/O; the reader clears the interrupt by reading status.
pub async fn watch_interrupt<P: IntPin, M: RawMutex>(pin: &mut P, ready: &DataReady<M>) -> ! {
    loop {
        service_edge(pin, ready).await;
    }
}

//! RP2350 interrupt pin implementation

use crate::platform::traits::IntPin;
use embassy_rp::gpio::{Input, Pull};

/// INT pin implementation using Embassy GPIO
///
/// The MAX30102 INT output is open-drain, active low.
pub struct EmbassyIntPin<'d> {
    pin: Input<'d>,
}

impl<'d> EmbassyIntPin<'d> {
    /// Create INT pin from Embassy GPIO input
    ///
    /// The pin should be configured with internal pull-up.
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }

    /// Configure a GPIO as pulled-up input and wrap it
    pub fn pull_up(pin: impl embassy_rp::Peripheral<P = impl embassy_rp::gpio::Pin> + 'd) -> Self {
        Self::new(Input::new(pin, Pull::Up))
    }
}

impl IntPin for EmbassyIntPin<'_> {
    async fn wait_for_falling_edge(&mut self) {
        self.pin.wait_for_falling_edge().await;
    }
}

//! Mock interrupt pin implementation for testing

use crate::platform::traits::IntPin;

/// Mock interrupt pin
///
/// Tests push falling edges; each `wait_for_falling_edge` consumes one.
/// With no edge pending the wait never completes, like a quiet INT line.
#[derive(Debug, Default)]
pub struct MockIntPin {
    pending_edges: usize,
}

impl MockIntPin {
    /// Create a new mock pin idling high (pull-up, no interrupt)
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the sensor asserting INT (high to low transition)
    pub fn push_falling_edge(&mut self) {
        self.pending_edges += 1;
    }

    /// Edges not yet consumed by a waiter
    pub fn pending_edges(&self) -> usize {
        self.pending_edges
    }
}

impl IntPin for MockIntPin {
    async fn wait_for_falling_edge(&mut self) {
        if self.pending_edges == 0 {
            core::future::pending::<()>().await;
        }
        self.pending_edges -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_int_pin_consumes_edges() {
        let mut pin = MockIntPin::new();
        assert_eq!(pin.pending_edges(), 0);

        pin.push_falling_edge();
        pin.push_falling_edge();
        assert_eq!(pin.pending_edges(), 2);

        pin.wait_for_falling_edge().await;
        pin.wait_for_falling_edge().await;
        assert_eq!(pin.pending_edges(), 0);
    }

    #[tokio::test]
    async fn test_mock_int_pin_quiet_line_never_fires() {
        use embassy_futures::select::{select, Either};

        let mut pin = MockIntPin::new();
        match select(pin.wait_for_falling_edge(), core::future::ready(())).await {
            Either::First(_) => panic!("quiet pin produced an edge"),
            Either::Second(_) => {}
        }
    }
}

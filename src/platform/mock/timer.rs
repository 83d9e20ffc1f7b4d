//! Mock Timer implementation for testing

use embedded_hal_async::delay::DelayNs;

/// Mock Timer implementation
///
/// Uses simulated time: every delay completes immediately and advances the
/// internal clock. A bounded wait raced against this timer therefore times
/// out at once unless the other side is already ready.
#[derive(Debug, Default)]
pub struct MockTimer {
    elapsed_ns: u64,
    delays: usize,
}

impl MockTimer {
    /// Create a new mock timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time in microseconds
    pub fn now_us(&self) -> u64 {
        self.elapsed_ns / 1_000
    }

    /// Simulated time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }

    /// Number of delays that have completed
    pub fn delay_count(&self) -> usize {
        self.delays
    }
}

impl DelayNs for MockTimer {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns = self.elapsed_ns.wrapping_add(ns as u64);
        self.delays += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_timer_delay_us() {
        let mut timer = MockTimer::new();
        assert_eq!(timer.now_us(), 0);

        timer.delay_us(1000).await;
        assert_eq!(timer.now_us(), 1000);

        timer.delay_us(500).await;
        assert_eq!(timer.now_us(), 1500);
        assert_eq!(timer.delay_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_timer_delay_ms() {
        let mut timer = MockTimer::new();

        timer.delay_ms(5).await;
        assert_eq!(timer.now_ms(), 5);
        assert_eq!(timer.now_us(), 5000);
    }
}

//! Reader task and consumer loop
//!
//! Reader cycle: wait for data-ready (bounded) → read status → query
//! available → burst read and decode → enqueue each sample in order.

use super::queue::{QueuedSample, SampleQueue};
use super::signal::{DataReady, StartupGate, WakeCause};
use crate::devices::traits::{InterruptStatus, PpgError, PpgSample, PpgSensor};
use core::fmt::Write;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::delay::DelayNs;

/// Longest emitted line: two 6-digit channels, a comma and a newline
pub const LINE_CAPACITY: usize = 24;

/// Reader task configuration
#[derive(Debug, Clone, Copy)]
pub struct AcquisitionConfig {
    /// Bounded wait on data-ready before polling anyway (default: 5000)
    pub ready_timeout_ms: u32,

    /// Status expected after a data-ready interrupt (default: A_FULL)
    pub expected_status: InterruptStatus,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            ready_timeout_ms: 5000,
            expected_status: InterruptStatus::A_FULL,
        }
    }
}

/// Outcome of one reader iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct CycleReport {
    /// Cycle number stamped on every sample of this iteration
    pub cycle: u32,
    pub wake: WakeCause,
    /// `None` when the status read failed
    pub status: Option<InterruptStatus>,
    pub available: u8,
    pub enqueued: usize,
}

/// Reader task state
pub struct Acquisition<'a, M: RawMutex, S: PpgSensor, D: DelayNs> {
    sensor: &'a Mutex<M, S>,
    ready: &'a DataReady<M>,
    queue: &'a SampleQueue<M>,
    delay: D,
    config: AcquisitionConfig,
    cycle: u32,
}

impl<'a, M: RawMutex, S: PpgSensor, D: DelayNs> Acquisition<'a, M, S, D> {
    pub fn new(
        sensor: &'a Mutex<M, S>,
        ready: &'a DataReady<M>,
        queue: &'a SampleQueue<M>,
        delay: D,
        config: AcquisitionConfig,
    ) -> Self {
        Self {
            sensor,
            ready,
            queue,
            delay,
            config,
            cycle: 0,
        }
    }

    /// Completed iterations
    pub fn cycles(&self) -> u32 {
        self.cycle
    }

    /// Run one acquisition cycle
    ///
    /// Never fails: bus errors degrade to an iteration that enqueues nothing.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let wake = self
            .ready
            .wait_timeout(&mut self.delay, self.config.ready_timeout_ms)
            .await;
        if wake == WakeCause::Timeout {
            crate::log_debug!(
                "No data-ready within {} ms, polling FIFO",
                self.config.ready_timeout_ms
            );
        }

        let cycle = self.cycle;
        self.cycle = self.cycle.wrapping_add(1);

        let (status, available, batch) = {
            let mut sensor = self.sensor.lock().await;

            // Reading status releases the INT line
            let status = match sensor.interrupt_status().await {
                Ok(status) => {
                    if status != self.config.expected_status {
                        crate::log_warn!("{}", PpgError::UnexpectedInterruptStatus(status.bits()));
                    }
                    Some(status)
                }
                Err(_) => {
                    crate::log_warn!("Interrupt status read failed");
                    None
                }
            };

            let available = sensor.available_samples().await;
            (status, available, sensor.read_samples(available).await)
        };

        let enqueued = match batch {
            Ok(batch) => {
                let count = batch.len();
                for sample in batch {
                    self.queue.push(QueuedSample { cycle, sample });
                }
                count
            }
            Err(_) => 0,
        };

        let report = CycleReport {
            cycle,
            wake,
            status,
            available,
            enqueued,
        };
        crate::log_trace!(
            "cycle {}: available={} enqueued={}",
            report.cycle,
            report.available,
            report.enqueued
        );
        report
    }

    /// Reader task body: wait for the startup gate, then cycle forever
    pub async fn run(&mut self, gate: &StartupGate<M>) -> ! {
        gate.wait_open().await;
        crate::log_info!("Acquisition started");
        loop {
            self.run_cycle().await;
        }
    }
}

/// Destination for emitted samples
#[allow(async_fn_in_trait)]
pub trait SampleSink {
    /// Emit one sample; delivery failures are the sink's concern
    async fn emit(&mut self, sample: &PpgSample);
}

/// Render a sample as one stream line (`ir\n` or `ir,red\n`)
pub fn format_line(sample: &PpgSample) -> heapless::String<LINE_CAPACITY> {
    let mut line = heapless::String::new();
    // 18-bit channels always fit
    let _ = writeln!(line, "{}", sample);
    line
}

/// Dequeue one item and emit it
pub async fn consume_one<M: RawMutex, K: SampleSink>(queue: &SampleQueue<M>, sink: &mut K) {
    let item = queue.pop().await;
    sink.emit(&item.sample).await;
}

/// Consumer loop body
pub async fn run_consumer<M: RawMutex, K: SampleSink>(queue: &SampleQueue<M>, sink: &mut K) -> ! {
    loop {
        consume_one(queue, sink).await;
    }
}

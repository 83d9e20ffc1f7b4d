//! Interrupt-driven PPG acquisition pipeline
//!
//! ```text
//! INT falling edge ──► DataReady ──► reader (Acquisition) ──► SampleQueue ──► consumer ──► SampleSink
//!                                        │
//!                                        └── Mutex<PpgSensor> (shared bus)
//! ```
//!
//! The interrupt watcher only signals; all bus traffic happens in the
//! reader. The reader waits on `DataReady` with a bound, so a missed or
//! coalesced edge costs at most one timeout before the FIFO is polled.
//!
//! Primitives are generic over `RawMutex`: firmware uses
//! `CriticalSectionRawMutex` statics, host tests use `NoopRawMutex`.

pub mod queue;
pub mod signal;
pub mod task;

pub use queue::{QueuedSample, SampleQueue};
pub use signal::{service_edge, watch_interrupt, DataReady, StartupGate, WakeCause};
pub use task::{
    consume_one, format_line, run_consumer, Acquisition, AcquisitionConfig, CycleReport,
    SampleSink, LINE_CAPACITY,
};

//! Device traits
//!
//! Hardware-independent trait definitions for device drivers. The acquisition
//! pipeline is written against these so it can be exercised with any sensor
//! implementation, including the driver running over a mock bus.

pub mod ppg;

pub use ppg::{
    ChannelMode, InterruptStatus, PpgError, PpgSample, PpgSensor, SampleBatch, FIFO_DEPTH,
    SAMPLE_MASK,
};

//! Unbounded FIFO hand-off from the reader task to the consumer loop
//!
//! Items move by value: once pushed, the reader keeps no reference to a
//! sample. Capacity is limited only by the heap.

use crate::devices::traits::PpgSample;
use alloc::collections::VecDeque;
use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

/// Queue item: one sample plus the acquisition cycle that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct QueuedSample {
    pub cycle: u32,
    pub sample: PpgSample,
}

/// Single-consumer sample queue
pub struct SampleQueue<M: RawMutex> {
    items: Mutex<M, RefCell<VecDeque<QueuedSample>>>,
    available: Signal<M, ()>,
}

impl<M: RawMutex> SampleQueue<M> {
    pub const fn new() -> Self {
        Self {
            items: Mutex::new(RefCell::new(VecDeque::new())),
            available: Signal::new(),
        }
    }

    /// Append an item; never blocks and never drops
    pub fn push(&self, item: QueuedSample) {
        self.items.lock(|items| items.borrow_mut().push_back(item));
        self.available.signal(());
    }

    /// Take the oldest item if there is one
    pub fn try_pop(&self) -> Option<QueuedSample> {
        self.items.lock(|items| items.borrow_mut().pop_front())
    }

    /// Take the oldest item, waiting while the queue is empty
    pub async fn pop(&self) -> QueuedSample {
        loop {
            if let Some(item) = self.try_pop() {
                return item;
            }
            self.available.wait().await;
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock(|items| items.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: RawMutex> Default for SampleQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}

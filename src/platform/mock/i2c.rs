//! Mock I2C implementation for testing

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::I2cInterface,
    Result,
};
use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Write-Read transaction
    WriteRead {
        addr: u8,
        write_data: Vec<u8>,
        read_len: usize,
    },
}

/// Mock I2C implementation
///
/// Records all transactions (including failed ones) for test verification,
/// serves pre-programmed read data in order, and can be told to fail a
/// chosen write or every read of a chosen register.
#[derive(Debug, Default)]
pub struct MockI2c {
    transactions: Vec<I2cTransaction>,
    read_data: VecDeque<u8>,
    writes_seen: usize,
    fail_write_index: Option<usize>,
    fail_read_register: Option<u8>,
}

impl MockI2c {
    /// Create a new mock I2C
    pub fn new() -> Self {
        Self::default()
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<I2cTransaction> {
        self.transactions.clone()
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Replace the data returned by subsequent read operations
    pub fn set_read_data(&mut self, data: &[u8]) {
        self.read_data = data.iter().copied().collect();
    }

    /// Append data after whatever is still queued for reading
    pub fn queue_read_data(&mut self, data: &[u8]) {
        self.read_data.extend(data.iter().copied());
    }

    /// Number of scripted read bytes not yet consumed
    pub fn pending_read_bytes(&self) -> usize {
        self.read_data.len()
    }

    /// Fail the `index`-th write transaction (0-based, counted from creation)
    pub fn fail_write_at(&mut self, index: usize) {
        self.fail_write_index = Some(index);
    }

    /// Fail every write-read whose first written byte is `register`
    pub fn fail_reads_of(&mut self, register: u8) {
        self.fail_read_register = Some(register);
    }

    /// Remove all injected failures
    pub fn clear_failures(&mut self) {
        self.fail_write_index = None;
        self.fail_read_register = None;
    }

    fn fill(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            match self.read_data.pop_front() {
                Some(value) => *byte = value,
                None => break,
            }
        }
    }
}

impl I2cInterface for MockI2c {
    async fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::Write {
            addr,
            data: data.to_vec(),
        });

        let index = self.writes_seen;
        self.writes_seen += 1;
        if self.fail_write_index == Some(index) {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        Ok(())
    }

    async fn write_read(
        &mut self,
        addr: u8,
        write_data: &[u8],
        read_buffer: &mut [u8],
    ) -> Result<()> {
        self.transactions.push(I2cTransaction::WriteRead {
            addr,
            write_data: write_data.to_vec(),
            read_len: read_buffer.len(),
        });

        if let (Some(register), Some(first)) = (self.fail_read_register, write_data.first()) {
            if register == *first {
                return Err(PlatformError::I2c(I2cError::Nack));
            }
        }

        self.fill(read_buffer);
        Ok(())
    }
}

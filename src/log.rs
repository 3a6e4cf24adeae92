//! Append Log
//!
//! The append/locking protocol and the snapshot reader.
//!
//! ## Responsibilities
//! - Reserve slots atomically with respect to concurrent writer processes
//! - Copy record bytes into reserved slots under a per-slot lock
//! - Produce a consistent snapshot of all committed records

use std::os::unix::io::AsRawFd;

use crate::config::Config;
use crate::error::{LogError, Result};
use crate::record::{self, Record, RECORD_SIZE};
use crate::region::{acquire, LockMode, LogFile, SharedRegion, HEADER_SIZE};

/// One participant's handle on the shared log
///
/// ## Concurrency Model: Multi-Process, Lock-Arbitrated
///
/// Any number of processes may hold an `AppendLog` on the same file and
/// call `append` concurrently. Three disjoint lock scopes arbitrate all
/// access to the mapped bytes:
///
/// - **Header** (`[0, 8)`, exclusive): held only for the read-increment-write
///   that reserves a slot. Minimal critical section, so header contention
///   stays short.
/// - **One slot** (exclusive): held while the record bytes are copied in.
///   Taken *after* the header lock is released, so a slow copy never blocks
///   other writers from reserving their own slots.
/// - **Whole region** (shared): taken only by `dump`.
///
/// No participant ever holds more than one scope at a time, and the
/// header-then-slot order is never reversed, so no deadlock cycle can form.
///
/// A slot is counted as committed the moment the header lock is released,
/// *before* its bytes land. A `dump` that races a still-copying writer can
/// therefore observe a zeroed or partially-written slot; callers get a
/// consistent snapshot by running `dump` only after all writers have
/// exited (the harness enforces this by waiting on every child).
pub struct AppendLog {
    file: LogFile,
    region: SharedRegion,
}

impl AppendLog {
    /// Open (or create) the backing file and map the shared region.
    pub fn open(config: &Config) -> Result<Self> {
        let file = LogFile::open_or_create(config)?;
        let region = file.map()?;
        Ok(Self { file, region })
    }

    /// Fixed slot capacity of this log
    pub fn capacity(&self) -> u32 {
        self.region.max_records()
    }

    /// Append one record, returning the slot index it was committed to.
    ///
    /// Safe to call concurrently from any number of processes.
    pub fn append(&mut self, record: &Record) -> Result<u32> {
        let offset = self.reserve_slot()?;
        let index = offset / RECORD_SIZE as u32;

        // Slot lock scope: exactly the reserved slot's bytes. The header
        // lock is already released, so other writers reserve in parallel.
        let slot_start = HEADER_SIZE as i64 + offset as i64;
        let _slot = acquire(
            self.file.as_raw_fd(),
            LockMode::Exclusive,
            slot_start,
            RECORD_SIZE as i64,
        )?;
        self.region.write_slot(index, record)?;

        tracing::trace!(index, "record committed");
        Ok(index)
    }

    /// Atomically claim the next free slot and return its byte offset
    /// (relative to the end of the header).
    ///
    /// The entire header lock bracket lives here: acquire exclusive lock on
    /// `[0, HEADER_SIZE)`, read the counters, advance both in lock-step,
    /// release. Once the lock is released no other writer can claim the
    /// same offset. The counters are checked against capacity *before*
    /// being advanced: a full log is left untouched.
    ///
    /// There is no rollback. After this returns, the claimed slot counts
    /// as committed even if the caller's copy never completes.
    fn reserve_slot(&mut self) -> Result<u32> {
        let _header = acquire(
            self.file.as_raw_fd(),
            LockMode::Exclusive,
            0,
            HEADER_SIZE as i64,
        )?;

        let (next_offset, record_count) = self.region.read_header();
        if record_count >= self.region.max_records() {
            return Err(LogError::CapacityExceeded {
                capacity: self.region.max_records(),
            });
        }
        self.region
            .write_header(next_offset + RECORD_SIZE as u32, record_count + 1);

        Ok(next_offset)
    }

    /// Decode every committed record, in slot-index order.
    ///
    /// Takes a single shared lock over the entire file (header and all
    /// slots), so it cannot start while any writer holds the header or a
    /// slot below the `record_count` it will observe. Re-running `dump`
    /// with no intervening appends yields an identical sequence.
    pub fn dump(&self) -> Result<Vec<String>> {
        // len 0 locks through end of file
        let _all = acquire(self.file.as_raw_fd(), LockMode::Shared, 0, 0)?;

        let (_, record_count) = self.region.read_header();
        let mut records = Vec::with_capacity(record_count as usize);
        for index in 0..record_count {
            let slot = self.region.read_slot(index)?;
            records.push(record::decode(&slot));
        }

        tracing::debug!(record_count, "dump complete");
        Ok(records)
    }

    /// Snapshot of the header counters `(next_offset, record_count)` under
    /// a shared header lock.
    pub fn header(&self) -> Result<(u32, u32)> {
        let _header = acquire(
            self.file.as_raw_fd(),
            LockMode::Shared,
            0,
            HEADER_SIZE as i64,
        )?;
        Ok(self.region.read_header())
    }

    /// Persist the mapped region through to disk.
    pub fn flush(&self) -> Result<()> {
        self.region.flush()
    }
}

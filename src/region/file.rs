//! Log Storage Backing
//!
//! Opens and sizes the backing file and maps it as the shared region.
//! All access to the mapped bytes goes through `SharedRegion`'s typed
//! accessors; nothing else in the crate does offset arithmetic.

use std::fs::{File, OpenOptions};
use std::os::unix::io::{AsRawFd, RawFd};

use memmap2::MmapMut;

use crate::config::Config;
use crate::error::{LogError, Result};
use crate::record::{Record, RECORD_SIZE};

/// Size of the header block: two `u32` counters at offsets 0 and 4.
pub const HEADER_SIZE: usize = 8;

/// The backing file of one log, opened read-write and sized to exactly
/// `HEADER_SIZE + max_records * RECORD_SIZE` bytes.
pub struct LogFile {
    file: File,
    max_records: u32,
}

impl LogFile {
    /// Open or create the backing file and resize it to its fixed size.
    ///
    /// With `config.truncate` (the default) any prior content is discarded
    /// and the whole file reads as zero, so the header starts at
    /// `(0, 0)` without an explicit initialization step. In preserve mode
    /// the file is still resized, so a file from a run with a different
    /// capacity is cut or zero-extended to this one's bounds.
    pub fn open_or_create(config: &Config) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);
        if config.truncate {
            options.truncate(true);
        }
        let file = options.open(&config.path)?;

        let size = Self::file_size(config.max_records);
        file.set_len(size)?;

        tracing::debug!(
            path = %config.path.display(),
            size,
            max_records = config.max_records,
            truncate = config.truncate,
            "opened backing file"
        );

        Ok(Self {
            file,
            max_records: config.max_records,
        })
    }

    /// Total file size for a given slot capacity.
    pub fn file_size(max_records: u32) -> u64 {
        HEADER_SIZE as u64 + max_records as u64 * RECORD_SIZE as u64
    }

    /// Establish the shared writable mapping of the entire file.
    ///
    /// Safety of the mapping itself rests on the crate-wide protocol: the
    /// mapped bytes are mutated by other processes, and every participant
    /// reads or writes them only while holding the advisory lock covering
    /// that byte range.
    pub fn map(&self) -> Result<SharedRegion> {
        let map = unsafe { MmapMut::map_mut(&self.file)? };
        Ok(SharedRegion {
            map,
            max_records: self.max_records,
        })
    }
}

impl AsRawFd for LogFile {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

/// Typed, bounds-checked view over the mapped bytes.
///
/// The header accessors perform no locking themselves; callers must already
/// hold the header lock (the append path funnels through
/// `AppendLog::reserve_slot`, which owns that bracket).
pub struct SharedRegion {
    map: MmapMut,
    max_records: u32,
}

impl SharedRegion {
    /// Fixed slot capacity of the region
    pub fn max_records(&self) -> u32 {
        self.max_records
    }

    /// Read `(next_offset, record_count)` from the header.
    pub fn read_header(&self) -> (u32, u32) {
        let next_offset =
            u32::from_ne_bytes([self.map[0], self.map[1], self.map[2], self.map[3]]);
        let record_count =
            u32::from_ne_bytes([self.map[4], self.map[5], self.map[6], self.map[7]]);
        (next_offset, record_count)
    }

    /// Write `(next_offset, record_count)` to the header.
    pub fn write_header(&mut self, next_offset: u32, record_count: u32) {
        self.map[0..4].copy_from_slice(&next_offset.to_ne_bytes());
        self.map[4..8].copy_from_slice(&record_count.to_ne_bytes());
    }

    /// Copy slot `index` out of the region.
    pub fn read_slot(&self, index: u32) -> Result<Record> {
        let start = self.slot_start(index)?;
        let mut record: Record = [0u8; RECORD_SIZE];
        record.copy_from_slice(&self.map[start..start + RECORD_SIZE]);
        Ok(record)
    }

    /// Copy a record into slot `index`.
    pub fn write_slot(&mut self, index: u32, record: &Record) -> Result<()> {
        let start = self.slot_start(index)?;
        self.map[start..start + RECORD_SIZE].copy_from_slice(record);
        Ok(())
    }

    /// Persist the whole mapping through to disk.
    pub fn flush(&self) -> Result<()> {
        self.map.flush()?;
        Ok(())
    }

    fn slot_start(&self, index: u32) -> Result<usize> {
        if index >= self.max_records {
            return Err(LogError::SlotOutOfRange {
                index,
                capacity: self.max_records,
            });
        }
        Ok(HEADER_SIZE + index as usize * RECORD_SIZE)
    }
}

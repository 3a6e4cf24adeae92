//! Shared Region Module
//!
//! Owns the backing file and its cross-process memory mapping.
//!
//! ## Responsibilities
//! - Create/size the backing file to exactly `header + capacity * RECORD_SIZE`
//! - Map it as one contiguous writable region visible to every participant
//! - Expose the header counters and record slots as bounds-checked views
//! - Wrap advisory `fcntl` byte-range locks in an RAII guard
//!
//! ## File Format
//! ```text
//! ┌──────────────────┬──────────────────────────────────────────┐
//! │ Header (8 bytes) │ Record slots                             │
//! │ ┌──────┬───────┐ │ ┌────────┬────────┬─────┬──────────────┐ │
//! │ │ next │ count │ │ │ slot 0 │ slot 1 │ ... │ slot cap - 1 │ │
//! │ │ (u32)│ (u32) │ │ │ (32 B) │ (32 B) │     │   (32 B)     │ │
//! │ └──────┴───────┘ │ └────────┴────────┴─────┴──────────────┘ │
//! └──────────────────┴──────────────────────────────────────────┘
//! ```
//!
//! `next` is the byte offset (relative to the end of the header) of the next
//! free slot; `count` is the number of committed records. Both are native
//! byte order. Mutators keep them in lock-step: `count * RECORD_SIZE == next`
//! whenever no writer holds the header lock.

mod file;
mod lock;

pub use file::{LogFile, SharedRegion, HEADER_SIZE};
pub use lock::{acquire, LockMode, RangeGuard};

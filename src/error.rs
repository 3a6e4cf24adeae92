//! Error types for slotlog
//!
//! Provides a unified error type for all operations.
//!
//! There is no transient/retryable class: every lock wait is unbounded and
//! blocking, so a returned error always means a real, unrecoverable
//! condition (bad descriptor, bad permissions, resource exhaustion).

use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Unified error type for slotlog operations
#[derive(Debug, Error)]
pub enum LogError {
    // -------------------------------------------------------------------------
    // I/O Errors (open / resize / map / lock syscalls) — always fatal
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Capacity Errors
    // -------------------------------------------------------------------------
    /// An append would claim a slot past the fixed capacity. The header is
    /// left untouched; continuing would write past the mapped region.
    #[error("log capacity exceeded: {capacity} records already committed")]
    CapacityExceeded {
        /// Fixed slot capacity of the log
        capacity: u32,
    },

    // -------------------------------------------------------------------------
    // Input Errors (rejected before any writer is spawned)
    // -------------------------------------------------------------------------
    #[error("malformed input: {0}")]
    MalformedInput(String),

    // -------------------------------------------------------------------------
    // Harness Errors
    // -------------------------------------------------------------------------
    /// A writer process exited with a nonzero status or was killed.
    #[error("writer process {pid} exited with status {status}")]
    WriterFailed { pid: i32, status: i32 },

    // -------------------------------------------------------------------------
    // Internal Misuse
    // -------------------------------------------------------------------------
    /// A slot accessor was asked for an index outside the mapped region.
    /// Appends that go through `reserve_slot` can never trigger this.
    #[error("slot index {index} out of range (capacity {capacity})")]
    SlotOutOfRange { index: u32, capacity: u32 },
}

//! Record codec
//!
//! Encoding and decoding of one fixed-width log entry.
//!
//! ## Slot Format
//!
//! ```text
//! ┌────────────────────────────┬──────────────────┐
//! │ "<label> <sequence>" UTF-8 │ NUL padding      │
//! └────────────────────────────┴──────────────────┘
//!  0                                    RECORD_SIZE
//! ```
//!
//! Encoding always leaves at least one trailing NUL: text longer than
//! `RECORD_SIZE - 1` bytes is silently truncated. That is the defined
//! edge-case policy, not a failure.

/// Fixed width of every record slot, in bytes
pub const RECORD_SIZE: usize = 32;

/// One encoded log record, exactly one slot wide
pub type Record = [u8; RECORD_SIZE];

/// Encode `"<label> <sequence>"` into a NUL-padded fixed-width record.
pub fn encode(label: &str, sequence: u32) -> Record {
    let text = format!("{} {}", label, sequence);
    let mut record: Record = [0u8; RECORD_SIZE];
    let len = text.len().min(RECORD_SIZE - 1);
    record[..len].copy_from_slice(&text.as_bytes()[..len]);
    record
}

/// Decode a slot back to text: bytes up to the first NUL, or the full
/// slot if no NUL is present. Non-UTF-8 bytes are replaced, never fatal.
pub fn decode(record: &Record) -> String {
    let end = record
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(RECORD_SIZE);
    String::from_utf8_lossy(&record[..end]).into_owned()
}

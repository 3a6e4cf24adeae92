//! # slotlog
//!
//! A minimal append-only log shared between independent OS processes:
//! - Fixed-size memory-mapped backing file (header + fixed-width slots)
//! - Coordination purely through advisory byte-range file locks
//! - Many concurrent writer processes, one snapshot reader
//! - No in-process mutexes: writers are processes, not threads
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌───────────┐   ┌───────────┐   ┌───────────┐
//! │ writer P1 │   │ writer P2 │   │ writer Pn │      (forked processes)
//! └─────┬─────┘   └─────┬─────┘   └─────┬─────┘
//!       │    append()   │               │
//!       └───────────────┼───────────────┘
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │               shared mapping (mmap)             │
//! │ ┌──────────┬────────┬────────┬─────┬──────────┐ │
//! │ │  header  │ slot 0 │ slot 1 │ ... │ slot N-1 │ │
//! │ │ (8 bytes)│ (32 B) │ (32 B) │     │  (32 B)  │ │
//! │ └──────────┴────────┴────────┴─────┴──────────┘ │
//! └─────────────────────────────────────────────────┘
//!                       ▲
//!                       │    dump()  (after all writers exit)
//!                 ┌─────┴─────┐
//!                 │  reader   │
//!                 └───────────┘
//! ```
//!
//! An append takes two short exclusive range locks in a fixed order: first
//! the header (reserve a slot by bumping `next_offset`/`record_count`),
//! then the reserved slot alone (copy the record bytes). The reader takes
//! one shared lock over the whole file and decodes every committed slot.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod region;
pub mod log;
pub mod harness;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LogError, Result};
pub use config::Config;
pub use log::AppendLog;
pub use record::{Record, RECORD_SIZE};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of slotlog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

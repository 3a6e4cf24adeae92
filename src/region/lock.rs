//! Advisory byte-range locks
//!
//! Thin RAII wrapper over `fcntl(F_SETLKW)` record locks. Acquisition is
//! blocking with no timeout; a lock held by a process that dies is released
//! by the OS when its descriptor closes.
//!
//! POSIX record locks belong to a (process, file) pair: two locks taken by
//! the same process never conflict. That is why writers in this crate are
//! separate processes, never threads.

use std::io;
use std::os::unix::io::RawFd;

use crate::error::Result;

/// Lock mode for a byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Shared (read) lock: excludes exclusive holders only
    Shared,
    /// Exclusive (write) lock: excludes everyone else
    Exclusive,
}

impl LockMode {
    fn lock_type(self) -> libc::c_short {
        match self {
            LockMode::Shared => libc::F_RDLCK as libc::c_short,
            LockMode::Exclusive => libc::F_WRLCK as libc::c_short,
        }
    }
}

/// A held byte-range lock, released on drop.
///
/// `len == 0` locks from `start` through end of file (the whole-region
/// lock the snapshot reader takes).
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct RangeGuard {
    fd: RawFd,
    start: i64,
    len: i64,
}

/// Block until the lock over `[start, start + len)` is granted.
pub fn acquire(fd: RawFd, mode: LockMode, start: i64, len: i64) -> Result<RangeGuard> {
    set_lock(fd, mode.lock_type(), start, len)?;
    Ok(RangeGuard { fd, start, len })
}

impl Drop for RangeGuard {
    fn drop(&mut self) {
        if let Err(e) = set_lock(self.fd, libc::F_UNLCK as libc::c_short, self.start, self.len) {
            tracing::warn!(
                start = self.start,
                len = self.len,
                "failed to release byte-range lock: {}",
                e
            );
        }
    }
}

fn set_lock(fd: RawFd, lock_type: libc::c_short, start: i64, len: i64) -> io::Result<()> {
    let mut fl: libc::flock = unsafe { std::mem::zeroed() };
    fl.l_type = lock_type;
    fl.l_whence = libc::SEEK_SET as libc::c_short;
    fl.l_start = start;
    fl.l_len = len;

    loop {
        let rc = unsafe { libc::fcntl(fd, libc::F_SETLKW, &fl) };
        if rc == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        // F_SETLKW sleeps; a signal wakes it with EINTR and we go back to sleep
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

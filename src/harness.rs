//! Multi-Writer Harness
//!
//! Forks one writer process per `<count> <label>` pair, waits for every
//! writer to exit, then runs the snapshot reader. The wait is what makes
//! the snapshot consistent: the append protocol itself counts a slot as
//! committed before its bytes are written, so the reader must only run
//! once no writer is mid-copy.
//!
//! Writers are processes, not threads: POSIX record locks never conflict
//! within one process, so threads could not exclude each other on the
//! header range.

use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, ForkResult};

use crate::config::Config;
use crate::error::{LogError, Result};
use crate::log::AppendLog;
use crate::record;

/// Maximum number of writer processes per run
pub const MAX_WRITERS: usize = 5;

/// One writer's workload: `count` records labelled `label`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterSpec {
    pub label: String,
    pub count: u32,
}

/// Parse alternating `<count> <label>` argument pairs.
///
/// An empty list is valid (zero writers; the dump is empty). A count that
/// is not a non-negative integer, an odd number of arguments, or more than
/// `MAX_WRITERS` pairs is `MalformedInput` — rejected here, before any
/// process is spawned.
pub fn parse_specs(args: &[String]) -> Result<Vec<WriterSpec>> {
    if args.len() % 2 != 0 {
        return Err(LogError::MalformedInput(format!(
            "expected <count> <label> pairs, got {} arguments",
            args.len()
        )));
    }
    if args.len() / 2 > MAX_WRITERS {
        return Err(LogError::MalformedInput(format!(
            "too many writers: {} (max {})",
            args.len() / 2,
            MAX_WRITERS
        )));
    }

    args.chunks(2)
        .map(|pair| {
            let count: u32 = pair[0]
                .parse()
                .map_err(|_| LogError::MalformedInput(format!("bad count: {:?}", pair[0])))?;
            Ok(WriterSpec {
                label: pair[1].clone(),
                count,
            })
        })
        .collect()
}

/// Run the full scenario: open the log, fork one writer per spec, wait for
/// all of them, then dump.
///
/// The log is opened once in the parent; each forked child inherits the
/// descriptor and the shared mapping. Record locks are per (process, file),
/// so the children exclude each other even though the descriptors share an
/// open file description.
pub fn run(config: &Config, specs: &[WriterSpec]) -> Result<Vec<String>> {
    let mut log = AppendLog::open(config)?;

    let mut children = Vec::with_capacity(specs.len());
    for spec in specs {
        // Safety: the child calls only append/exit on inherited state and
        // never touches the parent's side of the fork.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => {
                let code = match write_all(&mut log, spec) {
                    Ok(()) => 0,
                    Err(e) => {
                        tracing::error!(label = %spec.label, "writer failed: {}", e);
                        1
                    }
                };
                std::process::exit(code);
            }
            Ok(ForkResult::Parent { child }) => {
                tracing::debug!(pid = child.as_raw(), label = %spec.label, count = spec.count, "spawned writer");
                children.push(child);
            }
            Err(errno) => {
                return Err(LogError::Io(std::io::Error::from_raw_os_error(
                    errno as i32,
                )));
            }
        }
    }

    // Wait for every child before reading, even if one already failed.
    let mut failure: Option<LogError> = None;
    for child in children {
        let status = waitpid(child, None)
            .map_err(|errno| std::io::Error::from_raw_os_error(errno as i32))?;
        let exit = match status {
            WaitStatus::Exited(_, 0) => None,
            WaitStatus::Exited(pid, code) => Some((pid, code)),
            WaitStatus::Signaled(pid, signal, _) => Some((pid, 128 + signal as i32)),
            _ => Some((child, -1)),
        };
        if let Some((pid, status)) = exit {
            tracing::warn!(pid = pid.as_raw(), status, "writer exited abnormally");
            failure.get_or_insert(LogError::WriterFailed {
                pid: pid.as_raw(),
                status,
            });
        }
    }
    if let Some(e) = failure {
        return Err(e);
    }

    log.flush()?;
    log.dump()
}

fn write_all(log: &mut AppendLog, spec: &WriterSpec) -> Result<()> {
    for sequence in 0..spec.count {
        let record = record::encode(&spec.label, sequence);
        log.append(&record)?;
    }
    Ok(())
}

//! Retried file creation and removal.

use crate::backoff::{Retrier, RetryOutcome, Sleeper};
use crate::history::ErrorHost;
use log::{debug, warn};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

/// Result of a file helper, mapped onto the integer status convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Done,
    AlreadyPresent,
    AlreadyAbsent,
    Failed { attempts: u32 },
}

impl FileStatus {
    /// 0 on success, 1 when nothing needed doing, -1 on failure.
    pub fn code(&self) -> i32 {
        match self {
            FileStatus::Done => 0,
            FileStatus::AlreadyPresent | FileStatus::AlreadyAbsent => 1,
            FileStatus::Failed { .. } => -1,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FileStatus::Failed { .. })
    }
}

fn finish(outcome: RetryOutcome<FileStatus>, action: &str, path: &Path) -> FileStatus {
    match outcome {
        RetryOutcome::Succeeded { value, attempts } => {
            debug!("{action} {path:?}: {value:?} after {attempts} attempt(s)");
            value
        }
        RetryOutcome::Failed { attempts } => {
            warn!("{action} {path:?} failed after {attempts} attempt(s)");
            FileStatus::Failed { attempts }
        }
    }
}

/// Creates an empty file. An existing file is left untouched.
///
/// The parent directory must already exist.
pub fn create_file<S: Sleeper>(retrier: &Retrier<S>, host: &ErrorHost, path: &Path) -> FileStatus {
    let outcome = retrier.run(host, |_| {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(FileStatus::Done),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(FileStatus::AlreadyPresent),
            Err(e) => Err(format!("Failed to create {}: {e}", path.display())),
        }
    });
    finish(outcome, "Create", path)
}

/// Removes a file. A path that does not exist is reported, not treated as failure.
pub fn remove_file<S: Sleeper>(retrier: &Retrier<S>, host: &ErrorHost, path: &Path) -> FileStatus {
    let outcome = retrier.run(host, |_| match fs::remove_file(path) {
        Ok(()) => Ok(FileStatus::Done),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileStatus::AlreadyAbsent),
        Err(e) => Err(format!("Failed to remove {}: {e}", path.display())),
    });
    finish(outcome, "Remove", path)
}

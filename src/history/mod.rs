// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Process-wide error history and exception-free failure detection.
//!
//! A fallible operation reports faults by appending an [`ErrorRecord`] to an
//! [`ErrorHost`]. Callers detect failure by taking an [`ErrorHandle`] snapshot
//! before and after the operation and comparing the two with
//! [`did_error_occur`].

mod display;
mod handle;

pub use display::{ErrorDisplay, SuppressionGuard};
pub use handle::{ErrorHandle, did_error_occur};

use chrono::{DateTime, Utc};
use log::error;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Default number of records retained before the oldest is dropped.
pub const DEFAULT_HISTORY_CAPACITY: usize = 256;

/// A single fault appended to an error history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub id: u64,
    pub message: String,
    pub source: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "[{source}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Bounded, newest-first list of error records.
#[derive(Debug)]
pub struct ErrorHistory {
    records: VecDeque<Arc<ErrorRecord>>,
    capacity: usize,
}

impl ErrorHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    pub fn push(&mut self, record: Arc<ErrorRecord>) {
        self.records.push_front(record);
        self.records.truncate(self.capacity);
    }

    pub fn last(&self) -> Option<Arc<ErrorRecord>> {
        self.records.front().cloned()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ErrorRecord>> {
        self.records.iter()
    }
}

impl Default for ErrorHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

/// Owner of an error history and the error-display mode that governs it.
///
/// The save/restore performed by suppressed invocation is not reentrant:
/// concurrent suppressed calls against the same host are unsupported.
#[derive(Debug)]
pub struct ErrorHost {
    history: Mutex<ErrorHistory>,
    display: Mutex<ErrorDisplay>,
    next_id: AtomicU64,
}

impl ErrorHost {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: Mutex::new(ErrorHistory::new(capacity)),
            display: Mutex::new(ErrorDisplay::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The process-wide host shared by callers that do not bring their own.
    pub fn global() -> &'static ErrorHost {
        static GLOBAL: OnceLock<ErrorHost> = OnceLock::new();
        GLOBAL.get_or_init(ErrorHost::new)
    }

    /// Returns a handle to the most recent record, or the empty handle.
    pub fn capture_last_error(&self) -> ErrorHandle {
        ErrorHandle::from_record(self.history().last())
    }

    pub fn record(&self, message: impl Into<String>) -> ErrorHandle {
        self.push_record(message.into(), None)
    }

    pub fn record_with_source(
        &self,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> ErrorHandle {
        self.push_record(message.into(), Some(source.into()))
    }

    fn push_record(&self, message: String, source: Option<String>) -> ErrorHandle {
        let record = Arc::new(ErrorRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            message,
            source,
            recorded_at: Utc::now(),
        });

        if self.display() == ErrorDisplay::Continue {
            error!("{record}");
        }

        self.history().push(Arc::clone(&record));
        ErrorHandle::from_record(Some(record))
    }

    pub fn clear(&self) {
        self.history().clear();
    }

    /// Snapshot of the retained records, newest first.
    pub fn records(&self) -> Vec<Arc<ErrorRecord>> {
        self.history().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.history().len()
    }

    pub fn is_empty(&self) -> bool {
        self.history().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.history().capacity()
    }

    pub fn display(&self) -> ErrorDisplay {
        *self.display.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_display(&self, display: ErrorDisplay) {
        *self.display.lock().unwrap_or_else(PoisonError::into_inner) = display;
    }

    /// Switches to [`ErrorDisplay::SilentlyContinue`] until the guard is dropped.
    pub fn suppress(&self) -> SuppressionGuard<'_> {
        SuppressionGuard::acquire(self)
    }

    fn history(&self) -> MutexGuard<'_, ErrorHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ErrorHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Captures the last error of the process-wide host.
pub fn capture_last_error() -> ErrorHandle {
    ErrorHost::global().capture_last_error()
}

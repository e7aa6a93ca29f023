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

use crate::history::ErrorRecord;
use std::sync::Arc;

/// Opaque reference to the last error observed, or the explicit empty value.
///
/// Two handles are equal only when they point at the same record; records
/// with identical messages are still distinct faults.
#[derive(Debug, Clone, Default)]
pub struct ErrorHandle(Option<Arc<ErrorRecord>>);

impl ErrorHandle {
    pub const fn none() -> Self {
        Self(None)
    }

    pub(crate) fn from_record(record: Option<Arc<ErrorRecord>>) -> Self {
        Self(record)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn is_some(&self) -> bool {
        self.0.is_some()
    }

    pub fn record(&self) -> Option<&ErrorRecord> {
        self.0.as_deref()
    }
}

impl PartialEq for ErrorHandle {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for ErrorHandle {}

/// Reports whether a new error appeared between two snapshots.
///
/// A history that was populated at `before` and empty at `after` counts as
/// no error: only an explicit clear produces that transition.
pub fn did_error_occur(before: &ErrorHandle, after: &ErrorHandle) -> bool {
    match (before.is_none(), after.is_none()) {
        (true, true) => false,
        (true, false) => true,
        (false, true) => false,
        (false, false) => before != after,
    }
}

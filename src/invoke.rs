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

//! Single-shot invocation with error display suppressed.

use crate::error::{QuietError, Result};
use crate::history::{ErrorHost, did_error_occur};
use log::debug;
use std::fmt;

/// Source label attached to errors returned (rather than recorded) by an operation.
pub const RETURNED_ERROR_SOURCE: &str = "invoke";

/// Outcome of one suppressed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult<T> {
    Success(T),
    Failure,
}

impl<T> OperationResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            OperationResult::Success(value) => Some(value),
            OperationResult::Failure => None,
        }
    }

    pub fn into_result(self) -> Result<T> {
        self.into_option().ok_or(QuietError::OperationFailed)
    }
}

/// Runs `operation` once with the host's error display suppressed.
///
/// The operation may report a fault by recording it on the host or by
/// returning `Err`; a returned error is recorded on its behalf. Success is
/// decided solely by comparing error snapshots taken before and after the
/// call, so an `Ok` value is discarded if the operation also recorded an error.
pub fn invoke_suppressed<T, E, F>(host: &ErrorHost, operation: F) -> OperationResult<T>
where
    F: FnOnce(&ErrorHost) -> std::result::Result<T, E>,
    E: fmt::Display,
{
    let before = host.capture_last_error();

    let outcome = {
        let _guard = host.suppress();
        let outcome = operation(host);
        if let Err(e) = &outcome {
            host.record_with_source(RETURNED_ERROR_SOURCE, e.to_string());
        }
        outcome
    };

    let after = host.capture_last_error();

    match outcome {
        Ok(value) if !did_error_occur(&before, &after) => OperationResult::Success(value),
        _ => {
            if let Some(record) = after.record() {
                debug!("Suppressed operation failed: {record}");
            }
            OperationResult::Failure
        }
    }
}

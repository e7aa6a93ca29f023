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

use crate::config::WaitSettings;
use crate::error::{QuietError, Result};
use log::{debug, trace};
use retry::delay::Fixed;
use retry::{OperationResult, retry};
use std::path::Path;

/// Polls until `path` exists, checking at most `settings.attempts` times.
pub fn wait_for_path(path: &Path, settings: &WaitSettings) -> Result<()> {
    let checks = settings.attempts.max(1);

    let result = retry(
        Fixed::from_millis(settings.interval_ms).take(checks - 1),
        || {
            if path.exists() {
                OperationResult::Ok(())
            } else {
                trace!("Path {path:?} not ready yet");
                OperationResult::Retry(())
            }
        },
    );

    match result {
        Ok(()) => {
            debug!("Path {path:?} is ready");
            Ok(())
        }
        Err(_) => Err(QuietError::PathNotReady {
            path: path.display().to_string(),
            attempts: checks,
        }),
    }
}

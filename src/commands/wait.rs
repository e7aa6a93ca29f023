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

use crate::config::{QuietConfig, WaitSettings};
use crate::error::Result;
use crate::platform::wait_for_path;
use log::info;
use std::path::Path;

pub struct WaitCommand<'a> {
    config: &'a QuietConfig,
}

impl<'a> WaitCommand<'a> {
    pub fn new(config: &'a QuietConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(
        &self,
        path: &Path,
        attempts: Option<usize>,
        interval_ms: Option<u64>,
    ) -> Result<()> {
        let settings = WaitSettings {
            attempts: attempts.unwrap_or(self.config.wait.attempts),
            interval_ms: interval_ms.unwrap_or(self.config.wait.interval_ms),
        };

        info!(
            "Waiting for {} ({} check(s), {}ms apart)",
            path.display(),
            settings.attempts,
            settings.interval_ms
        );
        wait_for_path(path, &settings)?;
        println!("{}", path.display());
        Ok(())
    }
}

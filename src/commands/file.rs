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

use crate::backoff::{Retrier, RetryPolicy};
use crate::config::QuietConfig;
use crate::error::{QuietError, Result};
use crate::history::ErrorHost;
use crate::platform::{FileStatus, create_file, remove_file};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Create,
    Remove,
}

pub struct FileCommand<'a> {
    config: &'a QuietConfig,
    retrier: Retrier,
}

impl<'a> FileCommand<'a> {
    pub fn new(config: &'a QuietConfig) -> Result<Self> {
        let retrier = Retrier::new(RetryPolicy::from_config(&config.retry)?);
        Ok(Self { config, retrier })
    }

    pub fn execute(&self, action: FileAction, path: &Path) -> Result<()> {
        let host = ErrorHost::global();
        host.set_display(self.config.display);

        let status = match action {
            FileAction::Create => create_file(&self.retrier, host, path),
            FileAction::Remove => remove_file(&self.retrier, host, path),
        };

        match status {
            FileStatus::Done => Ok(()),
            FileStatus::AlreadyPresent => {
                eprintln!("Warning: {} already exists", path.display());
                Ok(())
            }
            FileStatus::AlreadyAbsent => {
                eprintln!("Warning: {} does not exist", path.display());
                Ok(())
            }
            FileStatus::Failed { attempts } => {
                if let Some(record) = host.capture_last_error().record() {
                    eprintln!("{record}");
                }
                Err(QuietError::RetriesExhausted { attempts })
            }
        }
    }
}

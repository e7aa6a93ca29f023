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

use crate::error::Result;
use crate::split::{SplitOptions, split_literal};

pub struct SplitCommand;

impl SplitCommand {
    pub fn execute(
        &self,
        input: &str,
        separator: &str,
        options: &SplitOptions,
        json: bool,
    ) -> Result<()> {
        let parts = split_literal(input, separator, options);

        if json {
            println!("{}", serde_json::to_string_pretty(&parts)?);
        } else {
            for part in &parts {
                println!("{part}");
            }
        }
        Ok(())
    }
}

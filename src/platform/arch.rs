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

use serde::Serialize;
use std::env;
use std::fmt;

/// Processor architecture in the spelling used by Windows environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ProcessorArchitecture {
    Amd64,
    X86,
    Arm64,
    Arm,
    Unknown(String),
}

impl ProcessorArchitecture {
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier.trim().to_ascii_lowercase().as_str() {
            "amd64" | "x86_64" | "x64" | "em64t" => ProcessorArchitecture::Amd64,
            "x86" | "i386" | "i586" | "i686" => ProcessorArchitecture::X86,
            "arm64" | "aarch64" => ProcessorArchitecture::Arm64,
            "arm" | "armv7" | "armv7l" => ProcessorArchitecture::Arm,
            _ => ProcessorArchitecture::Unknown(identifier.trim().to_string()),
        }
    }

    pub fn pointer_width(&self) -> Option<u8> {
        match self {
            ProcessorArchitecture::Amd64 | ProcessorArchitecture::Arm64 => Some(64),
            ProcessorArchitecture::X86 | ProcessorArchitecture::Arm => Some(32),
            ProcessorArchitecture::Unknown(_) => None,
        }
    }
}

impl fmt::Display for ProcessorArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorArchitecture::Amd64 => f.write_str("AMD64"),
            ProcessorArchitecture::X86 => f.write_str("x86"),
            ProcessorArchitecture::Arm64 => f.write_str("ARM64"),
            ProcessorArchitecture::Arm => f.write_str("ARM"),
            ProcessorArchitecture::Unknown(raw) => f.write_str(raw),
        }
    }
}

impl From<ProcessorArchitecture> for String {
    fn from(arch: ProcessorArchitecture) -> Self {
        arch.to_string()
    }
}

/// Architecture of the machine, preferring the host-reported value.
///
/// A 32-bit process on 64-bit Windows sees `x86` in `PROCESSOR_ARCHITECTURE`
/// and the real architecture in `PROCESSOR_ARCHITEW6432`.
pub fn processor_architecture() -> ProcessorArchitecture {
    processor_architecture_from(|name| env::var(name).ok())
}

pub fn processor_architecture_from<F>(lookup: F) -> ProcessorArchitecture
where
    F: Fn(&str) -> Option<String>,
{
    let reported = ["PROCESSOR_ARCHITEW6432", "PROCESSOR_ARCHITECTURE"]
        .into_iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty());

    match reported {
        Some(value) => {
            log::debug!("Processor architecture reported by environment: {value}");
            ProcessorArchitecture::from_identifier(&value)
        }
        None => ProcessorArchitecture::from_identifier(env::consts::ARCH),
    }
}

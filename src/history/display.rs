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

use crate::error::QuietError;
use crate::history::ErrorHost;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How newly recorded errors are surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ErrorDisplay {
    /// Record the error and emit it through the logger.
    #[default]
    Continue,
    /// Record the error without emitting it.
    SilentlyContinue,
}

impl fmt::Display for ErrorDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorDisplay::Continue => "continue",
            ErrorDisplay::SilentlyContinue => "silently-continue",
        };
        f.write_str(label)
    }
}

impl FromStr for ErrorDisplay {
    type Err = QuietError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(ErrorDisplay::Continue),
            "silentlycontinue" | "silently-continue" | "silently_continue" => {
                Ok(ErrorDisplay::SilentlyContinue)
            }
            other => Err(QuietError::InvalidArgument(format!(
                "Unknown error display mode '{other}'. Use 'continue' or 'silently-continue'."
            ))),
        }
    }
}

impl TryFrom<String> for ErrorDisplay {
    type Error = QuietError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ErrorDisplay> for String {
    fn from(display: ErrorDisplay) -> Self {
        display.to_string()
    }
}

/// RAII guard that restores the host's previous display mode when dropped.
pub struct SuppressionGuard<'a> {
    host: &'a ErrorHost,
    saved: ErrorDisplay,
}

impl<'a> SuppressionGuard<'a> {
    pub(crate) fn acquire(host: &'a ErrorHost) -> Self {
        let saved = host.display();
        host.set_display(ErrorDisplay::SilentlyContinue);
        trace!("Error display suppressed (saved mode: {saved})");
        Self { host, saved }
    }

    pub fn saved(&self) -> ErrorDisplay {
        self.saved
    }
}

impl Drop for SuppressionGuard<'_> {
    fn drop(&mut self) {
        self.host.set_display(self.saved);
        trace!("Error display restored to {}", self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_modes() {
        assert_eq!(
            "Continue".parse::<ErrorDisplay>().unwrap(),
            ErrorDisplay::Continue
        );
        assert_eq!(
            "SilentlyContinue".parse::<ErrorDisplay>().unwrap(),
            ErrorDisplay::SilentlyContinue
        );
        assert_eq!(
            " silently-continue ".parse::<ErrorDisplay>().unwrap(),
            ErrorDisplay::SilentlyContinue
        );
        assert!("stop".parse::<ErrorDisplay>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for mode in [ErrorDisplay::Continue, ErrorDisplay::SilentlyContinue] {
            assert_eq!(mode.to_string().parse::<ErrorDisplay>().unwrap(), mode);
        }
    }

    #[test]
    fn test_guard_suppresses_and_restores() {
        let host = ErrorHost::new();
        assert_eq!(host.display(), ErrorDisplay::Continue);

        {
            let guard = host.suppress();
            assert_eq!(guard.saved(), ErrorDisplay::Continue);
            assert_eq!(host.display(), ErrorDisplay::SilentlyContinue);
        }

        assert_eq!(host.display(), ErrorDisplay::Continue);
    }

    #[test]
    fn test_guard_restores_already_silent_mode() {
        let host = ErrorHost::new();
        host.set_display(ErrorDisplay::SilentlyContinue);

        drop(host.suppress());

        assert_eq!(host.display(), ErrorDisplay::SilentlyContinue);
    }

    #[test]
    fn test_nested_guards_unwind_in_order() {
        let host = ErrorHost::new();
        {
            let _outer = host.suppress();
            {
                let inner = host.suppress();
                assert_eq!(inner.saved(), ErrorDisplay::SilentlyContinue);
            }
            assert_eq!(host.display(), ErrorDisplay::SilentlyContinue);
        }
        assert_eq!(host.display(), ErrorDisplay::Continue);
    }

    #[test]
    fn test_guard_restores_after_panic() {
        let host = ErrorHost::new();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = host.suppress();
            panic!("operation blew up");
        }));

        assert!(result.is_err());
        assert_eq!(host.display(), ErrorDisplay::Continue);
    }
}

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
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a QuietError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a QuietError) -> Self {
        let (suggestion, details) = match error {
            QuietError::OperationFailed => {
                let suggestion = Some(
                    "Re-run with -vv to see the error recorded by the operation.".to_string(),
                );
                (suggestion, None)
            }
            QuietError::RetriesExhausted { attempts } => {
                let suggestion = Some(
                    "Raise the attempt budget with QUIETRETRY_RETRY__MAX_ATTEMPTS or the \
                     [retry] section of config.toml."
                        .to_string(),
                );
                let details = Some(format!(
                    "Every one of the {attempts} attempt(s) recorded a new error."
                ));
                (suggestion, details)
            }
            QuietError::PathNotReady { path, attempts } => {
                let suggestion = Some(format!(
                    "Check that '{path}' is being created, or increase --attempts / \
                     --interval-ms (currently {attempts} check(s))."
                ));
                (suggestion, None)
            }
            QuietError::InvalidConfig(msg) | QuietError::ConfigError(msg) => {
                let suggestion = Some(
                    "Check config.toml in QUIETRETRY_HOME and any QUIETRETRY_* environment \
                     variables."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            QuietError::Config(err) => {
                let suggestion = Some(
                    "Check the syntax of config.toml and the values of QUIETRETRY_* \
                     environment variables."
                        .to_string(),
                );
                let details = Some(err.to_string());
                (suggestion, details)
            }
            QuietError::Io(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                let suggestion = if cfg!(windows) {
                    Some("Run the command from an Administrator prompt.".to_string())
                } else {
                    Some("Check file ownership, or re-run with sudo if appropriate.".to_string())
                };
                (suggestion, None)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

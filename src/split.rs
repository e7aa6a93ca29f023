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

//! Splitting on a literal separator.
//!
//! The separator is matched as plain text, never as a pattern, so inputs
//! such as `"a.b"` split on `"."` the obvious way.

/// Controls how [`split_literal`] divides its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitOptions {
    /// Maximum number of parts; the last part keeps the unsplit remainder.
    /// `None` and `Some(0)` mean unlimited.
    pub max_parts: Option<usize>,
    /// Match the separator ignoring ASCII case.
    pub ignore_case: bool,
    /// Drop empty parts after splitting.
    pub remove_empty: bool,
}

impl SplitOptions {
    pub fn with_max_parts(mut self, max_parts: usize) -> Self {
        self.max_parts = Some(max_parts);
        self
    }

    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn removing_empty(mut self) -> Self {
        self.remove_empty = true;
        self
    }
}

pub fn split_literal(input: &str, separator: &str, options: &SplitOptions) -> Vec<String> {
    if separator.is_empty() {
        return vec![input.to_string()];
    }

    let limit = options.max_parts.filter(|&n| n > 0);
    let mut parts = Vec::new();
    let mut start = 0;

    loop {
        if let Some(limit) = limit
            && parts.len() + 1 >= limit
        {
            break;
        }
        match find_from(input, separator, start, options.ignore_case) {
            Some(pos) => {
                parts.push(input[start..pos].to_string());
                start = pos + separator.len();
            }
            None => break,
        }
    }
    parts.push(input[start..].to_string());

    if options.remove_empty {
        parts.retain(|part| !part.is_empty());
    }
    parts
}

fn find_from(haystack: &str, needle: &str, start: usize, ignore_case: bool) -> Option<usize> {
    if !ignore_case {
        return haystack[start..].find(needle).map(|pos| pos + start);
    }

    let hay = haystack.as_bytes();
    let pattern = needle.as_bytes();
    let last = hay.len().checked_sub(pattern.len())?;

    (start..=last).find(|&i| {
        haystack.is_char_boundary(i) && hay[i..i + pattern.len()].eq_ignore_ascii_case(pattern)
    })
}

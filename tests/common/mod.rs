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

//! Shared helpers for integration tests.

use quietretry::{ErrorHost, Sleeper};
use std::cell::{Cell, RefCell};
use std::time::Duration;

/// Sleeper that records requested durations instead of blocking.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    requests: RefCell<Vec<Duration>>,
}

#[allow(dead_code)]
impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<Duration> {
        self.requests.borrow().clone()
    }

    pub fn requested_secs(&self) -> Vec<u64> {
        self.requests.borrow().iter().map(|d| d.as_secs()).collect()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.requests.borrow_mut().push(duration);
    }
}

/// Operation that fails a fixed number of times before producing a value.
#[derive(Debug)]
pub struct FlakyOperation<T: Clone> {
    failures_before_success: u32,
    value: T,
    calls: Cell<u32>,
}

#[allow(dead_code)]
impl<T: Clone> FlakyOperation<T> {
    pub fn new(failures_before_success: u32, value: T) -> Self {
        Self {
            failures_before_success,
            value,
            calls: Cell::new(0),
        }
    }

    pub fn always_failing(value: T) -> Self {
        Self::new(u32::MAX, value)
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }

    /// Fails by returning an error.
    pub fn call(&self, _host: &ErrorHost) -> Result<T, String> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if call <= self.failures_before_success {
            Err(format!("attempt {call} failed"))
        } else {
            Ok(self.value.clone())
        }
    }

    /// Fails by recording a non-terminating error and still returning a value.
    pub fn call_recording(&self, host: &ErrorHost) -> Result<T, String> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if call <= self.failures_before_success {
            host.record_with_source("flaky", format!("attempt {call} recorded a fault"));
        }
        Ok(self.value.clone())
    }
}
